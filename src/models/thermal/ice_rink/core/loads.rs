//! Auxiliary loads on the rink beyond the radiant floor.
//!
//! Freezing is the one-off energy to turn flood water into the initial ice
//! sheet. Resurfacing repeats on a smaller scale each time a machine floods
//! the ice, plus the energy to heat its tank and the latent load of the humid
//! air it leaves behind. Spectators add a convective gain per unit area.

use uom::si::{
    area::square_meter,
    f64::{Area, Energy, Length, Power, ThermodynamicTemperature, Volume},
    energy::{joule, kilojoule},
    mass_density::kilogram_per_cubic_meter,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
    volume::cubic_meter,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    thermo::{PropertyError, fluid::Water},
    units::TemperatureDifference,
};

use super::{ConfigurationError, Host, ScheduleId};

/// Latent heat of fusion of water, J/kg.
pub const LATENT_HEAT_OF_FUSION: f64 = 333_550.0;

/// Specific heat of ice, J/(kg·K).
pub const ICE_SPECIFIC_HEAT: f64 = 2108.0;

/// Molar mass of water, g/mol.
const WATER_MOLAR_MASS: f64 = 18.015;

/// Universal gas constant, L·bar/(mol·K).
const GAS_CONSTANT: f64 = 0.083_14;

/// Dimensions of the rink and its ice sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RinkGeometry {
    length: Constrained<Length, StrictlyPositive>,
    width: Constrained<Length, StrictlyPositive>,
    depth: Constrained<Length, StrictlyPositive>,
    ice_thickness: Constrained<Length, StrictlyPositive>,
}

impl RinkGeometry {
    /// Creates a rink geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidParameter`] if any dimension is
    /// not strictly positive.
    pub fn new(
        length: Length,
        width: Length,
        depth: Length,
        ice_thickness: Length,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            length: StrictlyPositive::new(length)
                .map_err(ConfigurationError::invalid("rink length"))?,
            width: StrictlyPositive::new(width).map_err(ConfigurationError::invalid("rink width"))?,
            depth: StrictlyPositive::new(depth).map_err(ConfigurationError::invalid("rink depth"))?,
            ice_thickness: StrictlyPositive::new(ice_thickness)
                .map_err(ConfigurationError::invalid("ice thickness"))?,
        })
    }

    fn plan_area(&self) -> Area {
        self.length.into_inner() * self.width.into_inner()
    }

    /// Volume of the ice sheet.
    #[must_use]
    pub fn ice_volume(&self) -> Volume {
        self.plan_area() * self.ice_thickness.into_inner()
    }

    /// Volume of air above the rink that resurfacing humidifies.
    #[must_use]
    pub fn air_volume(&self) -> Volume {
        self.plan_area() * self.depth.into_inner()
    }
}

/// Heat released per kilogram of water at `flood` frozen to ice at `ice`, J/kg.
fn freezing_heat_per_kg(cp_water: f64, flood: f64, ice: f64) -> f64 {
    cp_water * flood + LATENT_HEAT_OF_FUSION - ICE_SPECIFIC_HEAT * ice
}

/// Energy to freeze the initial ice sheet from flood water.
///
/// Water properties are taken at the flood temperature.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if a temperature is `NaN`.
pub fn freezing_energy(
    geometry: &RinkGeometry,
    flood_temperature: ThermodynamicTemperature,
    ice_setpoint: ThermodynamicTemperature,
) -> Result<Energy, PropertyError> {
    let rho = Water.density(flood_temperature)?;
    let cp = Water.specific_heat(flood_temperature)?;
    let heat = freezing_heat_per_kg(
        cp.get::<joule_per_kilogram_kelvin>(),
        flood_temperature.get::<degree_celsius>(),
        ice_setpoint.get::<degree_celsius>(),
    );
    let mass = rho.get::<kilogram_per_cubic_meter>() * geometry.ice_volume().get::<cubic_meter>();
    Ok(Energy::new::<kilojoule>(0.001 * mass * heat))
}

/// Absolute humidity term of air at `temperature` (°C) and relative humidity
/// `rh` (0 to 1), normalized by the water density.
fn absolute_humidity(temperature: f64, rh: f64, rho_water: f64) -> f64 {
    let saturation = 6.112 * (17.67 * temperature / (temperature + 243.5)).exp();
    saturation * rh * WATER_MOLAR_MASS / (100.0 * GAS_CONSTANT * (273.15 + temperature)) / rho_water
}

/// How many resurfacing events happen in a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventCount {
    Fixed(u32),
    Scheduled(ScheduleId),
}

impl EventCount {
    /// Events in the current step; negative schedule values count as none.
    pub fn resolve(&self, host: &impl Host) -> f64 {
        match *self {
            Self::Fixed(count) => f64::from(count),
            Self::Scheduled(schedule) => host.schedule_value(schedule).max(0.0),
        }
    }
}

/// Definition of a resurfacing machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResurfacerConfig {
    pub tank_capacity: Volume,

    /// Temperature of the water laid on the ice.
    pub flood_temperature: ThermodynamicTemperature,

    /// Temperature of the water before the machine heats it.
    pub initial_water_temperature: ThermodynamicTemperature,

    pub events: EventCount,
}

/// A validated resurfacing machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resurfacer {
    tank_capacity: Constrained<Volume, StrictlyPositive>,
    flood_temperature: ThermodynamicTemperature,
    initial_water_temperature: ThermodynamicTemperature,
    events: EventCount,
}

/// Energies of one resurfacing event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResurfacingLoad {
    /// Heat the flood water releases while freezing onto the ice.
    pub resurfacing: Energy,

    /// Energy to heat the tank from its initial temperature.
    pub water_heating: Energy,

    /// Latent load of the air humidified by the flood.
    pub humidity: Energy,
}

impl ResurfacingLoad {
    #[must_use]
    pub fn total(&self) -> Energy {
        self.resurfacing + self.water_heating + self.humidity
    }
}

impl Resurfacer {
    /// Validates a resurfacer definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidParameter`] if the tank capacity
    /// is not strictly positive.
    pub fn new(config: ResurfacerConfig) -> Result<Self, ConfigurationError> {
        let ResurfacerConfig {
            tank_capacity,
            flood_temperature,
            initial_water_temperature,
            events,
        } = config;
        Ok(Self {
            tank_capacity: StrictlyPositive::new(tank_capacity)
                .map_err(ConfigurationError::invalid("tank capacity"))?,
            flood_temperature,
            initial_water_temperature,
            events,
        })
    }

    #[must_use]
    pub fn events(&self) -> EventCount {
        self.events
    }

    /// Energies of a single event on ice at `ice_surface`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if a temperature is `NaN`.
    pub fn event_load(
        &self,
        geometry: &RinkGeometry,
        ice_surface: ThermodynamicTemperature,
    ) -> Result<ResurfacingLoad, PropertyError> {
        let rho = Water
            .density(self.flood_temperature)?
            .get::<kilogram_per_cubic_meter>();
        let cp = Water
            .specific_heat(self.flood_temperature)?
            .get::<joule_per_kilogram_kelvin>();
        let tank = self.tank_capacity.into_inner().get::<cubic_meter>();
        let flood = self.flood_temperature.get::<degree_celsius>();
        let ice = ice_surface.get::<degree_celsius>();
        let heating_rise = self
            .flood_temperature
            .minus(self.initial_water_temperature)
            .get::<delta_kelvin>();

        let resurfacing = 0.001 * rho * tank * freezing_heat_per_kg(cp, flood, ice);
        let water_heating = 0.001 * tank * rho * cp * heating_rise;

        // Dry air at the ice before the flood, saturated air at the flood
        // temperature after it.
        let delta_ah =
            (absolute_humidity(ice, 0.0, rho) - absolute_humidity(flood, 1.0, rho)).abs();
        let delta_t = ice_surface
            .minus(self.flood_temperature)
            .get::<delta_kelvin>()
            .abs();
        let humidity = delta_ah * geometry.air_volume().get::<cubic_meter>() * delta_t * cp;

        Ok(ResurfacingLoad {
            resurfacing: Energy::new::<kilojoule>(resurfacing),
            water_heating: Energy::new::<kilojoule>(water_heating),
            humidity: Energy::new::<joule>(humidity),
        })
    }
}

/// Convective gain from spectators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectatorGain {
    /// Schedule of the gain per unit spectator area, in W/m².
    pub schedule: ScheduleId,

    pub area: Area,
}

impl SpectatorGain {
    /// Current gain.
    pub fn gain(&self, host: &impl Host) -> Power {
        Power::new::<watt>(host.schedule_value(self.schedule) * self.area.get::<square_meter>())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::length::meter;

    use super::*;
    use crate::models::thermal::ice_rink::core::test_support::{EVENTS, RecordingHost, SPECTATORS};

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn geometry(
        length: f64,
        width: f64,
        depth: f64,
        ice_thickness: f64,
    ) -> Result<RinkGeometry, ConfigurationError> {
        RinkGeometry::new(
            Length::new::<meter>(length),
            Length::new::<meter>(width),
            Length::new::<meter>(depth),
            Length::new::<meter>(ice_thickness),
        )
    }

    fn rink() -> RinkGeometry {
        geometry(30.0, 15.0, 6.0, 0.03).unwrap()
    }

    #[test]
    fn freezing_a_small_rink() {
        let energy = freezing_energy(&rink(), celsius(15.0), celsius(-5.0)).unwrap();

        let volume = 30.0 * 15.0 * 0.03;
        let expected = 0.001 * 998.95 * volume * (4187.0 * 15.0 + 333_550.0 + 2108.0 * 5.0);
        assert_relative_eq!(energy.get::<kilojoule>(), expected, max_relative = 1e-6);
    }

    #[test]
    fn resurfacing_event() {
        let resurfacer = Resurfacer::new(ResurfacerConfig {
            tank_capacity: Volume::new::<cubic_meter>(0.5),
            flood_temperature: celsius(40.0),
            initial_water_temperature: celsius(10.0),
            events: EventCount::Fixed(1),
        })
        .unwrap();

        let load = resurfacer.event_load(&rink(), celsius(-5.0)).unwrap();

        let (rho, cp) = (992.2, 4179.0);
        let resurfacing = 0.001 * rho * 0.5 * (cp * 40.0 + 333_550.0 + 2108.0 * 5.0);
        let heating = 0.001 * 0.5 * rho * cp * 30.0;
        assert_relative_eq!(
            load.resurfacing.get::<kilojoule>(),
            resurfacing,
            max_relative = 1e-6
        );
        assert_relative_eq!(load.water_heating.get::<kilojoule>(), heating, max_relative = 1e-6);

        let ah_post = 6.112 * (17.67 * 40.0 / 283.5_f64).exp() * 18.015
            / (100.0 * 0.083_14 * 313.15)
            / rho;
        let humidity = ah_post * (30.0 * 15.0 * 6.0) * 45.0 * cp;
        assert!(load.humidity.get::<joule>() >= 0.0);
        assert_relative_eq!(load.humidity.get::<joule>(), humidity, max_relative = 1e-6);

        assert_relative_eq!(
            load.total().get::<joule>(),
            1000.0 * (resurfacing + heating) + humidity,
            max_relative = 1e-9
        );
    }

    #[test]
    fn rejects_empty_tank() {
        let result = Resurfacer::new(ResurfacerConfig {
            tank_capacity: Volume::new::<cubic_meter>(0.0),
            flood_temperature: celsius(40.0),
            initial_water_temperature: celsius(10.0),
            events: EventCount::Fixed(1),
        });
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidParameter {
                parameter: "tank capacity",
                ..
            })
        ));
    }

    #[test]
    fn rejects_flat_rink() {
        assert!(geometry(30.0, 15.0, 6.0, 0.0).is_err());
        assert!(geometry(-30.0, 15.0, 6.0, 0.03).is_err());
    }

    #[test]
    fn schedules_drive_events_and_spectators() {
        let host = RecordingHost::with_schedules(&[(EVENTS, 2.0), (SPECTATORS, 12.0)]);

        assert_eq!(EventCount::Scheduled(EVENTS).resolve(&host), 2.0);
        assert_eq!(EventCount::Fixed(3).resolve(&host), 3.0);

        let spectators = SpectatorGain {
            schedule: SPECTATORS,
            area: Area::new::<square_meter>(400.0),
        };
        assert_relative_eq!(spectators.gain(&host).get::<watt>(), 4800.0);
    }
}
