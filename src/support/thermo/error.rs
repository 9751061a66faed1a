use thiserror::Error;

/// Errors that may occur when evaluating tabulated fluid properties.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// No table exists for the requested brine concentration.
    ///
    /// Concentrations are matched exactly and never rounded to a neighbour.
    #[error("no {fluid} table at {concentration}% concentration")]
    UnsupportedConcentration {
        fluid: &'static str,
        concentration: f64,
    },

    /// The table breakpoints are not strictly increasing.
    #[error("invalid table: {context}")]
    InvalidTable { context: String },

    /// The lookup temperature is not a number.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },
}
