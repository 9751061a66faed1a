use uom::si::f64::Area;

use crate::support::constraint::{Constrained, StrictlyPositive};

use super::{ConfigurationError, SurfaceId};

/// Geometric class of a heat balance surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceClass {
    Floor,
    Wall,
    Roof,
    Ceiling,
    Window,
    Other,
}

/// Heat balance algorithm the host uses for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatBalanceAlgorithm {
    ConductionTransferFunction,
    Other,
}

/// A surface's construction, as far as the rink cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionInfo {
    pub name: String,

    /// Whether the construction embeds a source/sink layer for the pipes.
    pub has_source_sink: bool,
}

/// Host description of a surface, used to validate the rink floor.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceInfo {
    pub id: SurfaceId,
    pub name: String,
    pub class: SurfaceClass,
    pub area: Area,
    pub algorithm: HeatBalanceAlgorithm,

    /// `None` when the host could not resolve the surface's construction.
    pub construction: Option<ConstructionInfo>,
}

/// The validated floor surface a rink system cools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorSurface {
    id: SurfaceId,
    area: Constrained<Area, StrictlyPositive>,
}

impl FloorSurface {
    /// Accepts a surface as a rink floor.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the surface is not handled by the
    /// conduction transfer function balance, is a window or otherwise not a
    /// floor, has no valid construction, its construction lacks a source/sink
    /// layer, or its area is not positive.
    pub fn from_surface(surface: SurfaceInfo) -> Result<Self, ConfigurationError> {
        let SurfaceInfo {
            id,
            name,
            class,
            area,
            algorithm,
            construction,
        } = surface;

        if algorithm != HeatBalanceAlgorithm::ConductionTransferFunction {
            return Err(ConfigurationError::NotConductionTransferFunction { name });
        }
        match class {
            SurfaceClass::Floor => {}
            SurfaceClass::Window => return Err(ConfigurationError::WindowSurface { name }),
            _ => return Err(ConfigurationError::NotFloor { name }),
        }
        let Some(construction) = construction else {
            return Err(ConfigurationError::InvalidConstruction { name });
        };
        if !construction.has_source_sink {
            return Err(ConfigurationError::NoSourceSink {
                name,
                construction: construction.name,
            });
        }

        let area = StrictlyPositive::new(area).map_err(ConfigurationError::invalid("floor area"))?;
        Ok(Self { id, area })
    }

    #[must_use]
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    #[must_use]
    pub fn area(&self) -> Area {
        self.area.into_inner()
    }
}
