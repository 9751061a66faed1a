use thiserror::Error;
use uom::si::f64::MassRate;

use crate::support::{constraint::ConstraintError, thermo::PropertyError};

/// Errors that abort a rink simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RinkError {
    /// The system definition is invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A step produced an ill-posed or non-physical calculation.
    #[error(transparent)]
    Numerical(#[from] NumericalError),
}

impl From<PropertyError> for RinkError {
    fn from(err: PropertyError) -> Self {
        Self::Numerical(err.into())
    }
}

/// Problems found while building a rink system from its definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("floor surface not found: {name}")]
    SurfaceNotFound { name: String },

    #[error("surface {name} does not use the conduction transfer function heat balance")]
    NotConductionTransferFunction { name: String },

    #[error("surface {name} is a window")]
    WindowSurface { name: String },

    #[error("surface {name} is not a floor")]
    NotFloor { name: String },

    #[error("surface {name} has an invalid construction")]
    InvalidConstruction { name: String },

    #[error("construction {construction} of surface {name} has no source/sink")]
    NoSourceSink { name: String, construction: String },

    #[error("inlet node not found: {name}")]
    UnresolvedNode { name: String },

    #[error("unrecognized {field}: {value}")]
    UnrecognizedKeyword { field: &'static str, value: String },

    #[error("invalid {parameter}")]
    InvalidParameter {
        parameter: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error("minimum flow {min:?} exceeds maximum flow {max:?}")]
    InvertedFlowBounds { min: MassRate, max: MassRate },

    #[error("refrigerant has no property data")]
    UnsupportedRefrigerant(#[source] PropertyError),
}

impl ConfigurationError {
    /// Wraps a constraint violation with the name of the offending parameter.
    pub(crate) fn invalid(parameter: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::InvalidParameter { parameter, source }
    }
}

/// Calculations that cannot produce a meaningful result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericalError {
    /// A heat balance denominator vanishes, so the balance has no unique
    /// solution.
    #[error("degenerate heat balance: denominator = {denominator}")]
    DegenerateHeatBalance { denominator: f64 },

    /// The surface temperature does not depend on the heat source.
    #[error("surface temperature is insensitive to the heat source")]
    InsensitiveSurface,

    #[error("heat balance coefficient {name} is not finite")]
    NonFiniteCoefficient { name: &'static str },

    #[error("non-physical {quantity}")]
    NonPhysical {
        quantity: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error("property lookup failed")]
    Property(#[from] PropertyError),
}

impl NumericalError {
    pub(crate) fn non_physical(quantity: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::NonPhysical { quantity, source }
    }
}
