//! Working fluids of a refrigerated rink floor.
//!
//! Direct systems pump ammonia through the floor. Indirect systems pump a
//! secondary brine, either calcium chloride or ethylene glycol, at one of the
//! tabulated concentrations in [`BRINE_CONCENTRATIONS`]. [`Water`] is the
//! flood and resurfacing water.

mod ammonia;
mod calcium_chloride;
mod ethylene_glycol;
mod water;

use std::{fmt, str::FromStr};

use thiserror::Error;
use uom::si::f64::ThermodynamicTemperature;

use super::{PropertyError, PropertyTable, TransportProperties};

pub use water::Water;

/// Temperature breakpoints (°C) shared by the ammonia and brine tables.
const REFRIGERANT_TEMPERATURES: [f64; 11] =
    [-10.0, -9.0, -8.0, -7.0, -6.0, -5.0, -4.0, -3.0, -2.0, -1.0, 0.0];

/// Brine concentrations, in mass percent, that have property tables.
pub const BRINE_CONCENTRATIONS: [f64; 6] = [25.0, 26.0, 27.0, 28.0, 29.0, 30.0];

/// Secondary coolant used by indirect systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrineKind {
    CalciumChloride,
    EthyleneGlycol,
}

impl BrineKind {
    fn tables(self) -> &'static [PropertyTable<11>; BRINE_CONCENTRATIONS.len()] {
        match self {
            Self::CalciumChloride => &calcium_chloride::TABLES,
            Self::EthyleneGlycol => &ethylene_glycol::TABLES,
        }
    }

    /// Returns the table for a concentration in mass percent.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::UnsupportedConcentration`] unless the
    /// concentration equals one of [`BRINE_CONCENTRATIONS`] exactly.
    pub fn table(self, concentration: f64) -> Result<&'static PropertyTable<11>, PropertyError> {
        BRINE_CONCENTRATIONS
            .iter()
            .position(|&supported| supported == concentration)
            .map(|index| &self.tables()[index])
            .ok_or(PropertyError::UnsupportedConcentration {
                fluid: self.name(),
                concentration,
            })
    }

    fn name(self) -> &'static str {
        match self {
            Self::CalciumChloride => "CaCl2",
            Self::EthyleneGlycol => "EG",
        }
    }
}

impl fmt::Display for BrineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a fluid keyword is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized fluid: {0}")]
pub struct UnknownFluid(pub String);

impl FromStr for BrineKind {
    type Err = UnknownFluid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("CaCl2") || s.eq_ignore_ascii_case("CalciumChloride") {
            Ok(Self::CalciumChloride)
        } else if s.eq_ignore_ascii_case("EG") || s.eq_ignore_ascii_case("EthyleneGlycol") {
            Ok(Self::EthyleneGlycol)
        } else {
            Err(UnknownFluid(s.to_owned()))
        }
    }
}

/// A brine at a given concentration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brine {
    pub kind: BrineKind,

    /// Mass percent of solute.
    pub concentration: f64,
}

impl Brine {
    /// Creates a brine, checking that its concentration is tabulated.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::UnsupportedConcentration`] for untabulated concentrations.
    pub fn new(kind: BrineKind, concentration: f64) -> Result<Self, PropertyError> {
        kind.table(concentration)?;
        Ok(Self {
            kind,
            concentration,
        })
    }
}

/// The fluid circulating through the floor pipes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refrigerant {
    Ammonia,
    Brine(Brine),
}

impl Refrigerant {
    /// Transport properties at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the brine concentration has no table or
    /// the temperature is `NaN`.
    pub fn properties(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<TransportProperties, PropertyError> {
        match self {
            Self::Ammonia => ammonia::TABLE.lookup(temperature),
            Self::Brine(brine) => brine.kind.table(brine.concentration)?.lookup(temperature),
        }
    }
}

impl FromStr for Refrigerant {
    type Err = UnknownFluid;

    /// Parses `NH3`/`Ammonia`. Brines need a concentration and are built with
    /// [`Brine::new`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("NH3") || s.eq_ignore_ascii_case("Ammonia") {
            Ok(Self::Ammonia)
        } else {
            Err(UnknownFluid(s.to_owned()))
        }
    }
}
