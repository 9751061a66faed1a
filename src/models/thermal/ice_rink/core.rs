mod condensation;
mod config;
mod control;
mod error;
mod exchanger;
mod floor;
mod heat_balance;
mod host;
mod loads;
mod step;
mod surface;

#[cfg(test)]
pub(crate) mod test_support;

pub use condensation::{
    CondensationAction, CondensationConfig, CondensationControl, CondensationError,
    CondensationKind,
};
pub use config::{CircuitLayout, RinkSystem, RinkSystemConfig, SystemVariant};
pub use control::{
    ControlKind, ControlOutcome, ControlStrategy, FlowBounds, FlowRequest, Setpoint,
};
pub use error::{ConfigurationError, NumericalError, RinkError};
pub use exchanger::{ExchangerPerformance, PipeNetwork};
pub use floor::{FloorContext, FloorResponse};
pub use heat_balance::{HeatBalance, HeatBalanceCoefficients, SlabResponse};
pub use host::{Host, NodeId, ScheduleId, SurfaceCatalog, SurfaceId};
pub use loads::{
    EventCount, ICE_SPECIFIC_HEAT, LATENT_HEAT_OF_FUSION, Resurfacer, ResurfacerConfig,
    ResurfacingLoad, RinkGeometry, SpectatorGain, freezing_energy,
};
pub use step::{
    FreezeRequest, LoadBreakdown, OperatingMode, OperatingState, StepInput, StepOutcome,
    ZoneConvection,
};
pub use surface::{
    ConstructionInfo, FloorSurface, HeatBalanceAlgorithm, SurfaceClass, SurfaceInfo,
};
