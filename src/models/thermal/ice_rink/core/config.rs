//! System definition and one-time initialization.

use tracing::debug;
use uom::si::{
    area::square_meter,
    f64::{Length, MassRate},
    length::meter,
    mass_rate::kilogram_per_second,
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive},
    thermo::fluid::{Brine, BrineKind, Refrigerant},
};

use super::{
    CondensationControl, ConfigurationError, ControlStrategy, FloorSurface, FlowBounds, NodeId,
    PipeNetwork, RinkGeometry, ScheduleId, SpectatorGain, SurfaceCatalog,
};

/// Whether the floor is cooled by the primary refrigerant or a brine loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SystemVariant {
    /// Ammonia pumped through the floor.
    Direct,

    /// A secondary brine pumped through the floor.
    Indirect { brine: BrineKind, concentration: f64 },
}

impl SystemVariant {
    /// Indirect variant from a brine keyword (`CaCl2` or `EG`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnrecognizedKeyword`] for other keywords.
    pub fn indirect(brine: &str, concentration: f64) -> Result<Self, ConfigurationError> {
        let brine = brine
            .parse()
            .map_err(|_| ConfigurationError::UnrecognizedKeyword {
                field: "brine type",
                value: brine.trim().to_owned(),
            })?;
        Ok(Self::Indirect {
            brine,
            concentration,
        })
    }

    fn refrigerant(self) -> Result<Refrigerant, ConfigurationError> {
        match self {
            Self::Direct => Ok(Refrigerant::Ammonia),
            Self::Indirect {
                brine,
                concentration,
            } => Brine::new(brine, concentration)
                .map(Refrigerant::Brine)
                .map_err(ConfigurationError::UnsupportedRefrigerant),
        }
    }
}

/// How the pipes are split into parallel circuits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircuitLayout {
    OnePerSurface,
    Count(u32),

    /// Circuits of roughly this length.
    FromCircuitLength(Length),
}

impl CircuitLayout {
    /// Number of circuits for a total tube length.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidParameter`] for a zero count or a
    /// circuit length that is not strictly positive.
    pub fn circuits(self, tube_length: Length) -> Result<u32, ConfigurationError> {
        match self {
            Self::OnePerSurface => Ok(1),
            Self::Count(count) => StrictlyPositive::new(count)
                .map(|count| count.into_inner())
                .map_err(ConfigurationError::invalid("circuit count")),
            Self::FromCircuitLength(circuit_length) => {
                let circuit_length = StrictlyPositive::new(circuit_length)
                    .map_err(ConfigurationError::invalid("circuit length"))?
                    .into_inner();
                let ratio = (tube_length.get::<meter>() / circuit_length.get::<meter>()).round();
                // Saturating float-to-int cast; NaN maps to zero.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let count = ratio as u32;
                Ok(count.max(1))
            }
        }
    }
}

/// Definition of a rink refrigeration system.
#[derive(Debug, Clone, PartialEq)]
pub struct RinkSystemConfig {
    pub name: String,
    pub variant: SystemVariant,

    /// Name of the floor surface the pipes are embedded in.
    pub floor_surface: String,

    /// Name of the plant node the refrigerant enters through.
    pub inlet_node: String,

    /// The system runs while this schedule is positive.
    pub availability: ScheduleId,

    pub tube_diameter: Length,
    pub tube_length: Length,
    pub circuits: CircuitLayout,
    pub control: ControlStrategy,
    pub min_flow: MassRate,
    pub max_flow: MassRate,
    pub condensation: CondensationControl,
    pub geometry: RinkGeometry,
    pub spectators: Option<SpectatorGain>,
}

/// A validated rink system, ready to step.
#[derive(Debug, Clone, PartialEq)]
pub struct RinkSystem {
    pub(super) name: String,
    pub(super) floor: FloorSurface,
    pub(super) inlet: NodeId,
    pub(super) availability: ScheduleId,
    pub(super) refrigerant: Refrigerant,
    pub(super) pipes: PipeNetwork,
    pub(super) control: ControlStrategy,
    pub(super) bounds: FlowBounds,
    pub(super) condensation: CondensationControl,
    pub(super) geometry: RinkGeometry,
    pub(super) spectators: Option<SpectatorGain>,
}

impl RinkSystem {
    /// Resolves and validates a system definition against the host.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the floor surface or inlet node
    /// cannot be resolved, the surface cannot host a rink, the refrigerant
    /// has no property data, or a numeric parameter is out of range.
    pub fn initialize(
        config: RinkSystemConfig,
        catalog: &impl SurfaceCatalog,
    ) -> Result<Self, ConfigurationError> {
        let RinkSystemConfig {
            name,
            variant,
            floor_surface,
            inlet_node,
            availability,
            tube_diameter,
            tube_length,
            circuits,
            control,
            min_flow,
            max_flow,
            condensation,
            geometry,
            spectators,
        } = config;

        let surface = catalog
            .surface(&floor_surface)
            .ok_or(ConfigurationError::SurfaceNotFound {
                name: floor_surface,
            })?;
        let floor = FloorSurface::from_surface(surface)?;

        let inlet = catalog
            .node(&inlet_node)
            .ok_or(ConfigurationError::UnresolvedNode { name: inlet_node })?;

        let refrigerant = variant.refrigerant()?;
        let circuits = circuits.circuits(tube_length)?;
        let pipes = PipeNetwork::new(tube_length, tube_diameter, circuits)?;
        let bounds = FlowBounds::new(min_flow, max_flow)?;

        if let Some(spectators) = &spectators {
            NonNegative::new(spectators.area)
                .map_err(ConfigurationError::invalid("spectator area"))?;
        }

        debug!(
            system = %name,
            circuits,
            floor_area = floor.area().get::<square_meter>(),
            min_flow = min_flow.get::<kilogram_per_second>(),
            max_flow = max_flow.get::<kilogram_per_second>(),
            "initialized rink system"
        );

        Ok(Self {
            name,
            floor,
            inlet,
            availability,
            refrigerant,
            pipes,
            control,
            bounds,
            condensation,
            geometry,
            spectators,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn floor(&self) -> &FloorSurface {
        &self.floor
    }

    #[must_use]
    pub fn refrigerant(&self) -> &Refrigerant {
        &self.refrigerant
    }

    #[must_use]
    pub fn pipes(&self) -> &PipeNetwork {
        &self.pipes
    }

    #[must_use]
    pub fn bounds(&self) -> &FlowBounds {
        &self.bounds
    }
}
