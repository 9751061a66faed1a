use uom::si::{
    f64::{MassDensity, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::thermo::{Bracket, PropertyError};

const TEMPERATURES: [f64; 11] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];

const DENSITY: [f64; 11] = [
    999.8, 999.7, 998.2, 995.7, 992.2, 988.0, 983.2, 977.8, 971.8, 965.3, 958.4,
];

const SPECIFIC_HEAT: [f64; 11] = [
    4217.0, 4192.0, 4182.0, 4178.0, 4179.0, 4181.0, 4184.0, 4190.0, 4196.0, 4205.0, 4216.0,
];

/// Liquid water at atmospheric pressure, 0 °C to 100 °C.
///
/// Used for flood and resurfacing water. Lookups outside the range return
/// the boundary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Water;

impl Water {
    /// Density at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if the temperature is `NaN`.
    pub fn density(
        self,
        temperature: ThermodynamicTemperature,
    ) -> Result<MassDensity, PropertyError> {
        let bracket = Bracket::locate(&TEMPERATURES, temperature.get::<degree_celsius>())?;
        Ok(MassDensity::new::<kilogram_per_cubic_meter>(
            bracket.interpolate(&DENSITY),
        ))
    }

    /// Specific heat at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if the temperature is `NaN`.
    pub fn specific_heat(
        self,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificHeatCapacity, PropertyError> {
        let bracket = Bracket::locate(&TEMPERATURES, temperature.get::<degree_celsius>())?;
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            bracket.interpolate(&SPECIFIC_HEAT),
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    #[test]
    fn breakpoints_increase() {
        assert!(TEMPERATURES.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn flood_water_at_fifteen_degrees() {
        let rho = Water.density(celsius(15.0)).unwrap();
        assert_relative_eq!(
            rho.get::<kilogram_per_cubic_meter>(),
            998.95,
            max_relative = 1e-12
        );

        let cp = Water.specific_heat(celsius(15.0)).unwrap();
        assert_relative_eq!(
            cp.get::<joule_per_kilogram_kelvin>(),
            4187.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn clamps_above_boiling() {
        let rho = Water.density(celsius(120.0)).unwrap();
        assert_eq!(rho.get::<kilogram_per_cubic_meter>(), 958.4);

        let cp = Water.specific_heat(celsius(120.0)).unwrap();
        assert_eq!(cp.get::<joule_per_kilogram_kelvin>(), 4216.0);
    }

    #[test]
    fn nan_is_out_of_domain() {
        assert!(matches!(
            Water.density(celsius(f64::NAN)),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }
}
