use tracing::{debug, warn};
use uom::{
    ConstZero,
    si::{
        area::square_meter,
        f64::{MassRate, ThermodynamicTemperature},
        mass_rate::kilogram_per_second,
        ratio::ratio,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::degree_celsius,
    },
};

use super::{ControlOutcome, FlowBounds, FlowRequest};
use crate::models::thermal::ice_rink::core::{FloorContext, NumericalError};

/// Flow that brings the refrigerant outlet down to `target`.
///
/// The floor is evaluated at the current node flow, limited to the bounds, or
/// at the maximum flow when the node is dry. If that trial already leaves the
/// outlet at or below the target the minimum flow is enough. Otherwise the
/// balance is inverted with the trial effectiveness:
///
/// ```text
/// m_dot = ((Ck - T_in) / (T_out* - T_in) - 1/ε) * A / (c_p * Cl)
/// ```
pub(super) fn required_flow(
    floor: &FloorContext<'_>,
    bounds: &FlowBounds,
    target: ThermodynamicTemperature,
    current: MassRate,
) -> Result<FlowRequest, NumericalError> {
    let trial = if current > MassRate::ZERO {
        bounds.clamp(current)
    } else {
        bounds.max()
    };
    let response = floor.evaluate(trial)?;

    if response.balance.outlet_temperature <= target {
        debug!(
            outlet = response.balance.outlet_temperature.get::<degree_celsius>(),
            target = target.get::<degree_celsius>(),
            "outlet already at setpoint"
        );
        return Ok(FlowRequest {
            mass_rate: bounds.min(),
            outcome: ControlOutcome::AtSetpoint,
        });
    }

    let exchanger = response
        .exchanger
        .expect("trial flow is strictly positive");

    let t_in = floor.inlet.get::<degree_celsius>();
    let t_target = target.get::<degree_celsius>();
    let eps = exchanger.effectiveness.get::<ratio>();
    let cp = exchanger
        .properties
        .specific_heat
        .get::<joule_per_kilogram_kelvin>();
    let area = floor.area.get::<square_meter>();

    let required = ((floor.slab.ck() - t_in) / (t_target - t_in) - 1.0 / eps) * area
        / (cp * floor.slab.cl());

    if !required.is_finite() || required <= 0.0 {
        warn!(
            target = t_target,
            inlet = t_in,
            "outlet setpoint unreachable, running at maximum flow"
        );
        return Ok(FlowRequest {
            mass_rate: bounds.max(),
            outcome: ControlOutcome::Saturated,
        });
    }

    let required = MassRate::new::<kilogram_per_second>(required);
    let outcome = if required > bounds.max() {
        warn!(
            required = required.get::<kilogram_per_second>(),
            "outlet control needs more than the maximum flow"
        );
        ControlOutcome::Saturated
    } else {
        ControlOutcome::Modulated
    };
    let mass_rate = bounds.clamp(required);
    debug!(
        trial = trial.get::<kilogram_per_second>(),
        flow = mass_rate.get::<kilogram_per_second>(),
        "outlet control resolved"
    );

    Ok(FlowRequest { mass_rate, outcome })
}
