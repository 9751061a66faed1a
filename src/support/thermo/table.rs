use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{
        DynamicViscosity, Ratio, SpecificHeatCapacity, ThermalConductivity,
        ThermodynamicTemperature,
    },
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use super::PropertyError;

/// Transport properties needed to size forced convection in a pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportProperties {
    pub viscosity: DynamicViscosity,
    pub conductivity: ThermalConductivity,
    pub prandtl: Ratio,
    pub specific_heat: SpecificHeatCapacity,
}

/// Piecewise-linear transport properties over `N` temperature breakpoints.
///
/// Columns are stored in fixed units: temperatures in °C, viscosity in Pa·s,
/// conductivity in W/(m·K), Prandtl number dimensionless and specific heat in
/// J/(kg·K).
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTable<const N: usize> {
    temperatures: [f64; N],
    viscosity: [f64; N],
    conductivity: [f64; N],
    prandtl: [f64; N],
    specific_heat: [f64; N],
}

impl<const N: usize> PropertyTable<N> {
    /// Creates a table from property columns.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidTable`] if the temperature breakpoints
    /// are not strictly increasing or any entry is not finite.
    pub fn new(
        temperatures: [f64; N],
        viscosity: [f64; N],
        conductivity: [f64; N],
        prandtl: [f64; N],
        specific_heat: [f64; N],
    ) -> Result<Self, PropertyError> {
        let table =
            Self::from_columns(temperatures, viscosity, conductivity, prandtl, specific_heat);
        table.validate()?;
        Ok(table)
    }

    /// Creates a table without checking the breakpoints.
    ///
    /// Used for the built-in tables, which are validated by tests.
    pub(crate) const fn from_columns(
        temperatures: [f64; N],
        viscosity: [f64; N],
        conductivity: [f64; N],
        prandtl: [f64; N],
        specific_heat: [f64; N],
    ) -> Self {
        Self {
            temperatures,
            viscosity,
            conductivity,
            prandtl,
            specific_heat,
        }
    }

    /// Checks that breakpoints strictly increase and every entry is finite.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidTable`] describing the first problem found.
    pub fn validate(&self) -> Result<(), PropertyError> {
        if N < 2 {
            return Err(PropertyError::InvalidTable {
                context: format!("{N} breakpoints, at least 2 required"),
            });
        }

        let columns = [
            ("temperature", &self.temperatures),
            ("viscosity", &self.viscosity),
            ("conductivity", &self.conductivity),
            ("prandtl", &self.prandtl),
            ("specific heat", &self.specific_heat),
        ];
        for (name, column) in columns {
            if let Some(row) = column.iter().position(|v| !v.is_finite()) {
                return Err(PropertyError::InvalidTable {
                    context: format!("{name} at row {row} is not finite"),
                });
            }
        }

        if let Some(row) = self.temperatures.windows(2).position(|w| w[1] <= w[0]) {
            return Err(PropertyError::InvalidTable {
                context: format!(
                    "breakpoint {} ({} °C) does not exceed {} °C",
                    row + 1,
                    self.temperatures[row + 1],
                    self.temperatures[row]
                ),
            });
        }

        Ok(())
    }

    /// Looks up transport properties at a temperature.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if the temperature is `NaN`.
    pub fn lookup(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<TransportProperties, PropertyError> {
        let bracket = Bracket::locate(&self.temperatures, temperature.get::<degree_celsius>())?;
        Ok(TransportProperties {
            viscosity: DynamicViscosity::new::<pascal_second>(bracket.interpolate(&self.viscosity)),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(
                bracket.interpolate(&self.conductivity),
            ),
            prandtl: Ratio::new::<ratio>(bracket.interpolate(&self.prandtl)),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
                bracket.interpolate(&self.specific_heat),
            ),
        })
    }
}

/// Where a value falls among a column of strictly increasing breakpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Bracket {
    /// Below the first or above the last breakpoint.
    Clamped(usize),
    /// Between breakpoints `lower` and `lower + 1`.
    Between { lower: usize, fraction: f64 },
}

impl Bracket {
    /// Locates `x` among `breakpoints`, which must be non-empty.
    pub(crate) fn locate(breakpoints: &[f64], x: f64) -> Result<Self, PropertyError> {
        if x.is_nan() {
            return Err(PropertyError::OutOfDomain {
                context: "lookup temperature is NaN".into(),
            });
        }

        Ok(match breakpoints.iter().position(|&b| x < b) {
            Some(0) => Self::Clamped(0),
            None => Self::Clamped(breakpoints.len() - 1),
            Some(upper) => {
                let lower = upper - 1;
                let span = breakpoints[upper] - breakpoints[lower];
                Self::Between {
                    lower,
                    fraction: (x - breakpoints[lower]) / span,
                }
            }
        })
    }

    pub(crate) fn interpolate(self, column: &[f64]) -> f64 {
        match self {
            Self::Clamped(row) => column[row],
            Self::Between { lower, fraction } => {
                column[lower] + fraction * (column[lower + 1] - column[lower])
            }
        }
    }
}
