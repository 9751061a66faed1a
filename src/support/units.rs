//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical quantities. This module provides
//! the pieces the ice rink models need that [`uom`] does not ship.
//!
//! ## Temperature differences
//!
//! [`TemperatureDifference::minus`] subtracts one absolute temperature from
//! another and yields a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use uom::si::temperature_interval::kelvin;
//! use twine_ice_rink::support::units::TemperatureDifference;
//!
//! let flood = ThermodynamicTemperature::new::<degree_celsius>(40.0);
//! let ice = ThermodynamicTemperature::new::<degree_celsius>(-5.0);
//! assert!((flood.minus(ice).get::<kelvin>() - 45.0).abs() < 1e-12);
//! ```

mod temperature_difference;

pub use temperature_difference::TemperatureDifference;
