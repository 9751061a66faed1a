//! Condensation control for the rink floor.
//!
//! A floor colder than the zone dew point gathers frost and water. The limit
//! is the dew point plus a configurable offset. When the granted flow would
//! pull the surface below the limit the system either shuts off or, with
//! [`CondensationKind::VariableOff`], backs the flow off until the surface
//! sits on the limit.

mod problem;

use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};
use twine_solvers::equation::bisection;
use uom::{
    ConstZero,
    si::{
        f64::{MassRate, TemperatureInterval, ThermodynamicTemperature},
        mass_rate::kilogram_per_second,
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::degree_celsius,
    },
};

use super::{ConfigurationError, FloorContext, FloorResponse, NumericalError};

use problem::{DewPointProblem, FloorFlowModel};

/// How the system reacts to a surface below the condensation limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CondensationKind {
    /// Condensation is ignored.
    #[default]
    Off,

    /// Flow is shut off.
    SimpleOff,

    /// Flow is reduced until the surface reaches the limit.
    VariableOff,
}

impl FromStr for CondensationKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("Off") {
            Ok(Self::Off)
        } else if s.eq_ignore_ascii_case("SimpleOff") {
            Ok(Self::SimpleOff)
        } else if s.eq_ignore_ascii_case("VariableOff") {
            Ok(Self::VariableOff)
        } else {
            Err(ConfigurationError::UnrecognizedKeyword {
                field: "condensation control",
                value: s.to_owned(),
            })
        }
    }
}

/// Solver configuration for the variable shut-off search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondensationConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance for the flow search variable.
    pub flow_tol: MassRate,

    /// Absolute tolerance for the surface temperature residual.
    pub temperature_tol: TemperatureInterval,
}

impl Default for CondensationConfig {
    fn default() -> Self {
        Self {
            max_iters: 50,
            flow_tol: MassRate::new::<kilogram_per_second>(1e-6),
            temperature_tol: TemperatureInterval::new::<delta_kelvin>(1e-6),
        }
    }
}

impl CondensationConfig {
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.flow_tol.get::<kilogram_per_second>(),
            x_rel_tol: 0.0,
            residual_tol: self.temperature_tol.get::<delta_kelvin>(),
        }
    }
}

/// Errors from the variable shut-off search.
///
/// These never abort a step; the system shuts off instead.
#[derive(Debug, Error)]
pub enum CondensationError {
    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best surface temperature residual achieved.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}

/// Configured condensation policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondensationControl {
    pub kind: CondensationKind,

    /// Margin above the dew point the surface must stay at.
    pub dew_point_offset: TemperatureInterval,

    pub solver: CondensationConfig,
}

impl Default for CondensationControl {
    fn default() -> Self {
        Self {
            kind: CondensationKind::Off,
            dew_point_offset: TemperatureInterval::new::<delta_kelvin>(1.0),
            solver: CondensationConfig::default(),
        }
    }
}

/// What condensation control did to the granted flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CondensationAction {
    /// The surface stays above the limit.
    Unrestricted,

    /// Flow is shut off.
    ShutOff,

    /// Flow is reduced to the given rate.
    Limited(MassRate),
}

impl CondensationControl {
    /// Checks the floor response at the granted flow against the dew point.
    ///
    /// # Errors
    ///
    /// Returns a [`NumericalError`] if the idle floor cannot be evaluated.
    pub fn check(
        &self,
        floor: &FloorContext<'_>,
        granted: &FloorResponse,
        dew_point: ThermodynamicTemperature,
    ) -> Result<CondensationAction, NumericalError> {
        let limit = dew_point + self.dew_point_offset;
        if self.kind == CondensationKind::Off || granted.balance.surface_temperature >= limit {
            return Ok(CondensationAction::Unrestricted);
        }

        if self.kind == CondensationKind::SimpleOff {
            warn!(
                surface = granted.balance.surface_temperature.get::<degree_celsius>(),
                limit = limit.get::<degree_celsius>(),
                "surface below condensation limit, shutting off"
            );
            return Ok(CondensationAction::ShutOff);
        }

        let idle = floor.evaluate(MassRate::ZERO)?;
        if idle.balance.surface_temperature < limit {
            warn!(
                surface = idle.balance.surface_temperature.get::<degree_celsius>(),
                limit = limit.get::<degree_celsius>(),
                "idle surface below condensation limit, shutting off"
            );
            return Ok(CondensationAction::ShutOff);
        }

        match limit_flow(floor, granted.mass_rate, limit, &self.solver) {
            Ok(flow) => {
                debug!(
                    granted = granted.mass_rate.get::<kilogram_per_second>(),
                    limited = flow.get::<kilogram_per_second>(),
                    "flow limited by condensation control"
                );
                Ok(CondensationAction::Limited(flow))
            }
            Err(error) => {
                warn!(%error, "condensation flow search failed, shutting off");
                Ok(CondensationAction::ShutOff)
            }
        }
    }
}

/// Finds the flow at which the surface reaches `limit`.
///
/// The surface is at or above the limit with no flow and below it at
/// `granted`, so the root is bracketed.
fn limit_flow(
    floor: &FloorContext<'_>,
    granted: MassRate,
    limit: ThermodynamicTemperature,
    config: &CondensationConfig,
) -> Result<MassRate, CondensationError> {
    let model = FloorFlowModel::new(floor);
    let problem = DewPointProblem::new(limit);

    let solution = bisection::solve(
        &model,
        &problem,
        [0.0, granted.get::<kilogram_per_second>()],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // A failed evaluation is treated as a surface above the limit.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(CondensationError::MaxIters {
            residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output.mass_rate)
}
