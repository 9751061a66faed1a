use std::collections::HashMap;

use uom::si::{
    area::square_meter,
    f64::{Area, Length, MassRate, Power},
    length::meter,
    mass_rate::kilogram_per_second,
};

use super::{
    CircuitLayout, CondensationControl, ConstructionInfo, ControlKind, ControlStrategy,
    HeatBalanceAlgorithm, HeatBalanceCoefficients, Host, NodeId, PipeNetwork, RinkGeometry,
    RinkSystemConfig, ScheduleId, Setpoint, SurfaceCatalog, SurfaceClass, SurfaceId, SurfaceInfo,
    SystemVariant,
};

/// Coefficients of a slab whose source plane idles at 2 °C.
pub(crate) fn coefficients() -> HeatBalanceCoefficients {
    HeatBalanceCoefficients {
        ca: 1.0,
        cb: 0.2,
        cc: 0.02,
        cd: 2.0,
        ce: 0.1,
        cf: 0.01,
        cg: 0.5,
        ch: 0.005,
        ci: 0.6,
        cj: 0.3,
    }
}

pub(crate) fn floor_area() -> Area {
    Area::new::<square_meter>(1800.0)
}

/// 300 circuits of 20 mm tube, 500 m long.
pub(crate) fn pipes() -> PipeNetwork {
    PipeNetwork::new(meters(500.0), meters(0.02), 300)
        .expect("fixture geometry is valid")
}

pub(crate) const FLOOR: SurfaceId = SurfaceId(3);
pub(crate) const INLET: NodeId = NodeId(11);
pub(crate) const AVAILABILITY: ScheduleId = ScheduleId(0);
pub(crate) const SETPOINT: ScheduleId = ScheduleId(1);
pub(crate) const EVENTS: ScheduleId = ScheduleId(2);
pub(crate) const SPECTATORS: ScheduleId = ScheduleId(3);

fn meters(value: f64) -> Length {
    Length::new::<meter>(value)
}

/// Direct ammonia system on the fixture floor, under surface control.
pub(crate) fn system_config() -> RinkSystemConfig {
    RinkSystemConfig {
        name: "Main Rink".into(),
        variant: SystemVariant::Direct,
        floor_surface: "Rink Floor".into(),
        inlet_node: "Rink Inlet".into(),
        availability: AVAILABILITY,
        tube_diameter: meters(0.02),
        tube_length: meters(500.0),
        circuits: CircuitLayout::Count(300),
        control: ControlStrategy {
            kind: ControlKind::SurfaceTemperature,
            setpoint: Setpoint::Scheduled(SETPOINT),
        },
        min_flow: MassRate::new::<kilogram_per_second>(0.5),
        max_flow: MassRate::new::<kilogram_per_second>(50.0),
        condensation: CondensationControl::default(),
        geometry: RinkGeometry::new(meters(60.0), meters(30.0), meters(6.0), meters(0.03))
            .expect("fixture geometry is valid"),
        spectators: None,
    }
}

/// Host that records every request and write-back.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) schedules: HashMap<ScheduleId, f64>,

    /// Largest flow the plant grants; unlimited when `None`.
    pub(crate) grant_limit: Option<MassRate>,

    pub(crate) requests: Vec<(NodeId, MassRate)>,
    pub(crate) heat_sources: Vec<(SurfaceId, Power)>,
}

impl RecordingHost {
    pub(crate) fn with_schedules(values: &[(ScheduleId, f64)]) -> Self {
        Self {
            schedules: values.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub(crate) fn last_request(&self) -> Option<MassRate> {
        self.requests.last().map(|&(_, flow)| flow)
    }
}

impl Host for RecordingHost {
    fn schedule_value(&self, schedule: ScheduleId) -> f64 {
        self.schedules.get(&schedule).copied().unwrap_or(0.0)
    }

    fn request_flow_rate(&mut self, node: NodeId, desired: MassRate) -> MassRate {
        self.requests.push((node, desired));
        match self.grant_limit {
            Some(limit) if desired > limit => limit,
            _ => desired,
        }
    }

    fn set_heat_source(&mut self, surface: SurfaceId, heat_source: Power) {
        self.heat_sources.push((surface, heat_source));
    }
}

/// Catalog holding a single valid rink floor and inlet node.
#[derive(Debug)]
pub(crate) struct Catalog {
    pub(crate) floor: SurfaceInfo,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            floor: SurfaceInfo {
                id: FLOOR,
                name: "Rink Floor".into(),
                class: SurfaceClass::Floor,
                area: floor_area(),
                algorithm: HeatBalanceAlgorithm::ConductionTransferFunction,
                construction: Some(ConstructionInfo {
                    name: "Slab With Pipes".into(),
                    has_source_sink: true,
                }),
            },
        }
    }
}

impl SurfaceCatalog for Catalog {
    fn surface(&self, name: &str) -> Option<SurfaceInfo> {
        (name == self.floor.name).then(|| self.floor.clone())
    }

    fn node(&self, name: &str) -> Option<NodeId> {
        (name == "Rink Inlet").then_some(INLET)
    }
}
