//! Tabulated transport properties of rink working fluids.
//!
//! Properties are stored as piecewise-linear tables over temperature. A
//! lookup between breakpoints interpolates every property with the same
//! fraction; a lookup outside the breakpoints returns the boundary row
//! unchanged rather than extrapolating.

mod error;
mod table;

pub mod fluid;

pub use error::PropertyError;
pub use table::{PropertyTable, TransportProperties};

pub(crate) use table::Bracket;
