//! Heat exchanger relations for buried pipe networks.
//!
//! A rink floor behaves as a single-stream heat exchanger: refrigerant flows
//! through pipe circuits whose walls sit at the (locally uniform) slab source
//! temperature. With one stream of finite capacitance and an isothermal wall,
//! the capacity ratio is zero and the effectiveness reduces to
//! `ε = 1 - exp(-NTU)`.
//!
//! - **Core types**: [`CapacitanceRate`], [`Effectiveness`], [`Ntu`]
//! - **Internal flow**: [`ReynoldsNumber`], [`FlowRegime`], [`NusseltNumber`]
//!
//! # Example
//!
//! ```
//! use twine_ice_rink::support::constraint::ConstraintResult;
//! use twine_ice_rink::support::hx::{CapacitanceRate, Effectiveness, Ntu};
//! use uom::si::{
//!     f64::ThermalConductance, ratio::ratio, thermal_conductance::kilowatt_per_kelvin,
//! };
//!
//! fn main() -> ConstraintResult<()> {
//!     let ua = ThermalConductance::new::<kilowatt_per_kelvin>(4.0);
//!     let capacitance_rate = CapacitanceRate::new::<kilowatt_per_kelvin>(8.0)?;
//!
//!     let ntu = Ntu::from_conductance_and_capacitance_rate(ua, capacitance_rate)?;
//!     let effectiveness = Effectiveness::isothermal_wall(ntu);
//!
//!     assert!((effectiveness.get::<ratio>() - (1.0 - (-0.5_f64).exp())).abs() < 1e-12);
//!     Ok(())
//! }
//! ```

mod capacitance_rate;
mod effectiveness_ntu;
mod internal_flow;

pub use capacitance_rate::CapacitanceRate;
pub use effectiveness_ntu::{Effectiveness, NTU_SATURATION, Ntu};
pub use internal_flow::{
    FlowRegime, LAMINAR_NUSSELT, NusseltNumber, ReynoldsNumber, TRANSITION_REYNOLDS,
};
