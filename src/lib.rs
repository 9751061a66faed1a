//! # Twine Ice Rink
//!
//! Indoor ice rink refrigeration models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! A rink floor is cooled by refrigerant (a direct system) or a secondary
//! brine (an indirect system) flowing through pipe circuits buried in the
//! slab. Each simulation step the models combine a buried-pipe heat
//! exchanger with the host's linear slab heat balance, resolve the flow
//! needed to meet an outlet-temperature or surface-temperature setpoint, and
//! report the cooling delivered along with the auxiliary loads from freezing
//! and resurfacing the ice.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Code that only one model needs lives in that model's internal `core`
//! module and moves to [`support`] once a second consumer appears.

pub mod models;
pub mod support;
