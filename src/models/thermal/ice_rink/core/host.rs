//! Interfaces to the simulation host.
//!
//! The rink does not own the building heat balance, the plant loop or the
//! schedules. It reaches them through [`Host`] during a step and through
//! [`SurfaceCatalog`] once, when the system is initialized.

use uom::si::f64::{MassRate, Power};

use super::SurfaceInfo;

/// Handle to a heat balance surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub usize);

/// Handle to a plant loop node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Handle to a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleId(pub usize);

/// Services the host provides during a step.
pub trait Host {
    /// Current value of a schedule.
    fn schedule_value(&self, schedule: ScheduleId) -> f64;

    /// Requests a mass flow at a node and returns the flow actually granted.
    ///
    /// The plant may grant less than requested. The granted value is the one
    /// the rink uses.
    fn request_flow_rate(&mut self, node: NodeId, desired: MassRate) -> MassRate;

    /// Applies the heat source to a surface for the host's next heat balance.
    ///
    /// Negative values extract heat from the slab.
    fn set_heat_source(&mut self, surface: SurfaceId, heat_source: Power);
}

/// Name lookups the host provides while a system is being initialized.
pub trait SurfaceCatalog {
    /// Describes the surface with the given name, if there is one.
    fn surface(&self, name: &str) -> Option<SurfaceInfo>;

    /// Resolves a plant node name.
    fn node(&self, name: &str) -> Option<NodeId>;
}
