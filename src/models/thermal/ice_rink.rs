//! Refrigerated ice rink floor model.
//!
//! This module provides a [`twine_core::Model`] implementation for a rink
//! refrigeration system. The computational core is in the internal `core`
//! module, which steps against any [`Host`]. [`IceRink`] runs a step against
//! a snapshot of schedule values and the flow the plant can deliver.

pub(crate) mod core;

use std::collections::HashMap;

use twine_core::Model;
use uom::si::f64::{MassRate, Power};

pub use self::core::{
    CircuitLayout, CondensationAction, CondensationConfig, CondensationControl,
    CondensationError, CondensationKind, ConfigurationError, ConstructionInfo, ControlKind,
    ControlOutcome, ControlStrategy, EventCount, ExchangerPerformance, FloorContext,
    FloorResponse, FloorSurface, FlowBounds, FlowRequest, FreezeRequest, HeatBalance,
    HeatBalanceAlgorithm, HeatBalanceCoefficients, Host, ICE_SPECIFIC_HEAT, LATENT_HEAT_OF_FUSION,
    LoadBreakdown, NodeId, NumericalError, OperatingMode, OperatingState, PipeNetwork,
    Resurfacer, ResurfacerConfig, ResurfacingLoad, RinkError, RinkGeometry, RinkSystem,
    RinkSystemConfig, ScheduleId, Setpoint, SlabResponse, SpectatorGain, StepInput, StepOutcome,
    SurfaceCatalog, SurfaceClass, SurfaceId, SurfaceInfo, SystemVariant, ZoneConvection,
    freezing_energy,
};

/// A rink system and the resurfacers that serve it.
#[derive(Debug, Clone, PartialEq)]
pub struct IceRink {
    pub system: RinkSystem,
    pub resurfacers: Vec<Resurfacer>,
}

/// Input to one [`IceRink`] step.
#[derive(Debug, Clone, PartialEq)]
pub struct IceRinkInput {
    pub step: StepInput,

    /// Current schedule values. Missing schedules read as zero.
    pub schedules: HashMap<ScheduleId, f64>,

    /// Most flow the plant can deliver; unlimited when `None`.
    pub available_flow: Option<MassRate>,
}

impl Model for IceRink {
    type Input = IceRinkInput;
    type Output = StepOutcome;
    type Error = RinkError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut host = SnapshotHost {
            schedules: &input.schedules,
            available_flow: input.available_flow,
        };
        self.system
            .simulate_step(&input.step, &self.resurfacers, &mut host)
    }
}

/// Host backed by a fixed schedule snapshot.
///
/// Heat sources are reported through the step outcome, so the write-back is
/// dropped.
struct SnapshotHost<'a> {
    schedules: &'a HashMap<ScheduleId, f64>,
    available_flow: Option<MassRate>,
}

impl Host for SnapshotHost<'_> {
    fn schedule_value(&self, schedule: ScheduleId) -> f64 {
        self.schedules.get(&schedule).copied().unwrap_or(0.0)
    }

    fn request_flow_rate(&mut self, _node: NodeId, desired: MassRate) -> MassRate {
        match self.available_flow {
            Some(available) if desired > available => available,
            _ => desired,
        }
    }

    fn set_heat_source(&mut self, _surface: SurfaceId, _heat_source: Power) {}
}

#[cfg(test)]
mod tests {
    use uom::{
        ConstZero,
        si::{
            f64::{ThermodynamicTemperature, Time},
            mass_rate::kilogram_per_second,
            thermodynamic_temperature::degree_celsius,
            time::minute,
        },
    };

    use super::*;
    use crate::models::thermal::ice_rink::core::test_support::{
        AVAILABILITY, Catalog, SETPOINT, coefficients, system_config,
    };

    fn rink() -> IceRink {
        IceRink {
            system: RinkSystem::initialize(system_config(), &Catalog::default()).unwrap(),
            resurfacers: Vec::new(),
        }
    }

    fn input(schedules: &[(ScheduleId, f64)], available_flow: Option<MassRate>) -> IceRinkInput {
        IceRinkInput {
            step: StepInput {
                inlet_temperature: ThermodynamicTemperature::new::<degree_celsius>(-8.0),
                inlet_mass_rate: MassRate::new::<kilogram_per_second>(0.0),
                floor: coefficients(),
                zone_convection: ZoneConvection::default(),
                dew_point: None,
                timestep: Time::new::<minute>(15.0),
                freezing: None,
            },
            schedules: schedules.iter().copied().collect(),
            available_flow,
        }
    }

    #[test]
    fn runs_a_step_within_available_flow() {
        let available = MassRate::new::<kilogram_per_second>(12.0);

        let outcome = rink()
            .call(&input(&[(AVAILABILITY, 1.0), (SETPOINT, -3.0)], Some(available)))
            .unwrap();

        assert_eq!(outcome.state.mode, OperatingMode::Cooling);
        assert_eq!(outcome.state.mass_rate, available);
        assert!(outcome.state.heat_source < Power::ZERO);
    }

    #[test]
    fn missing_availability_schedule_means_off() {
        let outcome = rink().call(&input(&[(SETPOINT, -3.0)], None)).unwrap();

        assert_eq!(outcome.state.mode, OperatingMode::NotOperating);
        assert_eq!(outcome.state.heat_source, Power::ZERO);
    }

    #[test]
    fn ill_posed_coefficients_fail() {
        let mut bad = input(&[(AVAILABILITY, 1.0), (SETPOINT, -3.0)], None);
        bad.step.floor.cb = 2.0;
        bad.step.floor.ce = 0.5;

        assert!(matches!(
            rink().call(&bad),
            Err(RinkError::Numerical(NumericalError::DegenerateHeatBalance { .. }))
        ));
    }
}
