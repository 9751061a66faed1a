//! Supporting utilities used by the ice rink models.
//!
//! - [`constraint`]: Type-level numeric constraints for validated inputs.
//! - [`hx`]: Effectiveness-NTU and internal-flow relations for buried pipe networks.
//! - [`thermo`]: Tabulated transport properties of refrigerants, brines and water.
//! - [`units`]: Extensions to [`uom`].

pub mod constraint;
pub mod hx;
pub mod thermo;
pub mod units;
