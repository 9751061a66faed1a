//! Flow control for the rink floor.
//!
//! Both strategies invert the floor balance for the refrigerant flow that
//! meets the setpoint, starting from an evaluation at a trial flow:
//!
//! - [`ControlKind::OutletTemperature`] targets the refrigerant (or brine)
//!   leaving the floor.
//! - [`ControlKind::SurfaceTemperature`] targets the ice surface.
//!
//! The returned [`FlowRequest`] is what the system asks the plant for. The
//! plant may grant less.

mod outlet_temperature;
mod surface_temperature;

use std::str::FromStr;

use uom::si::{
    f64::{MassRate, ThermodynamicTemperature},
    thermodynamic_temperature::degree_celsius,
};

use crate::support::constraint::{Constrained, NonNegative, StrictlyPositive};

use super::{ConfigurationError, FloorContext, Host, NumericalError, ScheduleId};

/// Quantity the flow is modulated to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    OutletTemperature,
    SurfaceTemperature,
}

impl FromStr for ControlKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("RefrigOutletTemperature")
            || s.eq_ignore_ascii_case("BrineOutletTemperature")
        {
            Ok(Self::OutletTemperature)
        } else if s.eq_ignore_ascii_case("IceSurfaceTemperature") {
            Ok(Self::SurfaceTemperature)
        } else {
            Err(ConfigurationError::UnrecognizedKeyword {
                field: "control type",
                value: s.to_owned(),
            })
        }
    }
}

/// Where the control target comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setpoint {
    Fixed(ThermodynamicTemperature),

    /// A schedule whose values are temperatures in °C.
    Scheduled(ScheduleId),
}

impl Setpoint {
    /// Current target temperature.
    pub fn resolve(&self, host: &impl Host) -> ThermodynamicTemperature {
        match *self {
            Self::Fixed(temperature) => temperature,
            Self::Scheduled(schedule) => {
                ThermodynamicTemperature::new::<degree_celsius>(host.schedule_value(schedule))
            }
        }
    }
}

/// Configured refrigerant flow limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowBounds {
    min: Constrained<MassRate, NonNegative>,
    max: Constrained<MassRate, StrictlyPositive>,
}

impl FlowBounds {
    /// Creates flow bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the minimum is negative, the
    /// maximum is not strictly positive, or the minimum exceeds the maximum.
    pub fn new(min: MassRate, max: MassRate) -> Result<Self, ConfigurationError> {
        let min = NonNegative::new(min).map_err(ConfigurationError::invalid("minimum flow"))?;
        let max = StrictlyPositive::new(max).map_err(ConfigurationError::invalid("maximum flow"))?;
        if min.as_ref() > max.as_ref() {
            return Err(ConfigurationError::InvertedFlowBounds {
                min: min.into_inner(),
                max: max.into_inner(),
            });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> MassRate {
        self.min.into_inner()
    }

    #[must_use]
    pub fn max(&self) -> MassRate {
        self.max.into_inner()
    }

    /// Limits `flow` to the bounds.
    ///
    /// `NaN` resolves to the maximum.
    #[must_use]
    pub fn clamp(&self, flow: MassRate) -> MassRate {
        if flow.is_nan() || flow > self.max() {
            self.max()
        } else if flow < self.min() {
            self.min()
        } else {
            flow
        }
    }
}

/// How a control strategy arrived at its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    /// The setpoint is already met without modulating.
    AtSetpoint,

    /// The flow was inverted from the floor balance.
    Modulated,

    /// The setpoint needs more than the maximum flow.
    Saturated,
}

/// Flow a control strategy asks the plant for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowRequest {
    pub mass_rate: MassRate,
    pub outcome: ControlOutcome,
}

/// A control kind paired with its setpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlStrategy {
    pub kind: ControlKind,
    pub setpoint: Setpoint,
}

impl ControlStrategy {
    /// Resolves the flow that meets `target`.
    ///
    /// `current` is the flow at the inlet node before this step's request.
    ///
    /// # Errors
    ///
    /// Returns a [`NumericalError`] if the floor cannot be evaluated at a
    /// trial flow or the surface does not respond to the heat source.
    pub fn required_flow(
        &self,
        floor: &FloorContext<'_>,
        bounds: &FlowBounds,
        target: ThermodynamicTemperature,
        current: MassRate,
    ) -> Result<FlowRequest, NumericalError> {
        match self.kind {
            ControlKind::OutletTemperature => {
                outlet_temperature::required_flow(floor, bounds, target, current)
            }
            ControlKind::SurfaceTemperature => {
                surface_temperature::required_flow(floor, bounds, target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use uom::si::mass_rate::kilogram_per_second;

    use super::*;
    use crate::models::thermal::ice_rink::core::test_support::{RecordingHost, SETPOINT};

    fn flow(kg_per_s: f64) -> MassRate {
        MassRate::new::<kilogram_per_second>(kg_per_s)
    }

    #[test]
    fn parses_control_keywords() {
        assert_eq!(
            "RefrigOutletTemperature".parse::<ControlKind>(),
            Ok(ControlKind::OutletTemperature)
        );
        assert_eq!(
            "icesurfacetemperature".parse::<ControlKind>(),
            Ok(ControlKind::SurfaceTemperature)
        );
        assert_eq!(
            "AirTemperature".parse::<ControlKind>(),
            Err(ConfigurationError::UnrecognizedKeyword {
                field: "control type",
                value: "AirTemperature".into(),
            })
        );
    }

    #[test]
    fn scheduled_setpoint_reads_celsius() {
        let host = RecordingHost::with_schedules(&[(SETPOINT, -4.5)]);
        let target = Setpoint::Scheduled(SETPOINT).resolve(&host);
        assert!((target.get::<degree_celsius>() + 4.5).abs() < 1e-12);
    }

    #[test]
    fn bounds_clamp() {
        let bounds = FlowBounds::new(flow(1.0), flow(50.0)).unwrap();
        assert_eq!(bounds.clamp(flow(0.2)), flow(1.0));
        assert_eq!(bounds.clamp(flow(20.0)), flow(20.0));
        assert_eq!(bounds.clamp(flow(80.0)), flow(50.0));
        assert_eq!(bounds.clamp(flow(f64::NAN)), flow(50.0));
    }

    #[test]
    fn invalid_bounds() {
        assert!(matches!(
            FlowBounds::new(flow(60.0), flow(50.0)),
            Err(ConfigurationError::InvertedFlowBounds { .. })
        ));
        assert!(matches!(
            FlowBounds::new(flow(0.0), flow(0.0)),
            Err(ConfigurationError::InvalidParameter {
                parameter: "maximum flow",
                ..
            })
        ));
        assert!(FlowBounds::new(flow(-1.0), flow(50.0)).is_err());
    }
}
