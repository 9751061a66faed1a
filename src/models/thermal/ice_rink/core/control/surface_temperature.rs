use tracing::{debug, warn};
use uom::{
    ConstZero,
    si::{
        area::square_meter,
        f64::{MassRate, ThermodynamicTemperature},
        mass_rate::kilogram_per_second,
        power::watt,
        ratio::ratio,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::degree_celsius,
    },
};

use super::{ControlOutcome, FlowBounds, FlowRequest};
use crate::models::thermal::ice_rink::core::{FloorContext, NumericalError};

/// Flow that holds the ice surface at `target`.
///
/// No flow is needed while the idle slab is already at or below the target.
/// Otherwise the heat source that holds the target, `Q*`, is compared with
/// what the maximum flow delivers. When the maximum cannot reach `Q*` it is
/// used as is, else the flow is scaled from the maximum-flow evaluation:
///
/// ```text
/// m_dot = Q* / (ε_max * c_p * (T_in - T_source,max))
/// ```
pub(super) fn required_flow(
    floor: &FloorContext<'_>,
    bounds: &FlowBounds,
    target: ThermodynamicTemperature,
) -> Result<FlowRequest, NumericalError> {
    if floor.slab.idle_surface_temperature() <= target {
        debug!(
            target = target.get::<degree_celsius>(),
            "ice surface already at setpoint"
        );
        return Ok(FlowRequest {
            mass_rate: MassRate::ZERO,
            outcome: ControlOutcome::AtSetpoint,
        });
    }

    let area = floor.area.get::<square_meter>();
    let q_set = floor.slab.heat_flux_for_surface_temperature(target)? * area;

    let at_max = floor.evaluate(bounds.max())?;
    let q_max = at_max.balance.heat_source.get::<watt>();
    if q_max >= q_set {
        warn!(
            required = q_set,
            available = q_max,
            "rink undersized for the surface setpoint, running at maximum flow"
        );
        return Ok(FlowRequest {
            mass_rate: bounds.max(),
            outcome: ControlOutcome::Saturated,
        });
    }

    let exchanger = at_max
        .exchanger
        .expect("maximum flow is strictly positive");
    let eps = exchanger.effectiveness.get::<ratio>();
    let cp = exchanger
        .properties
        .specific_heat
        .get::<joule_per_kilogram_kelvin>();
    let t_in = floor.inlet.get::<degree_celsius>();
    let t_source = at_max.balance.source_temperature.get::<degree_celsius>();

    let required = MassRate::new::<kilogram_per_second>(q_set / (eps * cp * (t_in - t_source)));
    let mass_rate = bounds.clamp(required);
    debug!(
        required = required.get::<kilogram_per_second>(),
        flow = mass_rate.get::<kilogram_per_second>(),
        "surface control resolved"
    );

    Ok(FlowRequest {
        mass_rate,
        outcome: ControlOutcome::Modulated,
    })
}
