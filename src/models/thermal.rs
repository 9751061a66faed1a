//! Thermal systems models.
//!
//! This module contains models for refrigerated floors and the loads they serve.

pub mod ice_rink;
