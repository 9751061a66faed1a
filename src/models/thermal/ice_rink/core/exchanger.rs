use std::f64::consts::PI;

use tracing::debug;
use uom::si::{
    f64::{Length, MassRate, ThermalConductance, ThermodynamicTemperature},
    length::meter,
    ratio::ratio,
    thermal_conductance::watt_per_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    hx::{CapacitanceRate, Effectiveness, FlowRegime, Ntu, NusseltNumber, ReynoldsNumber},
    thermo::{TransportProperties, fluid::Refrigerant},
};

use super::{ConfigurationError, NumericalError};

/// Geometry of the pipe circuits embedded in the slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeNetwork {
    tube_length: Constrained<Length, StrictlyPositive>,
    tube_diameter: Constrained<Length, StrictlyPositive>,
    circuits: Constrained<u32, StrictlyPositive>,
}

impl PipeNetwork {
    /// Creates a pipe network.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidParameter`] if the length,
    /// diameter or circuit count is not strictly positive.
    pub fn new(
        tube_length: Length,
        tube_diameter: Length,
        circuits: u32,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            tube_length: StrictlyPositive::new(tube_length)
                .map_err(ConfigurationError::invalid("tube length"))?,
            tube_diameter: StrictlyPositive::new(tube_diameter)
                .map_err(ConfigurationError::invalid("tube diameter"))?,
            circuits: StrictlyPositive::new(circuits)
                .map_err(ConfigurationError::invalid("circuit count"))?,
        })
    }

    #[must_use]
    pub fn tube_length(&self) -> Length {
        self.tube_length.into_inner()
    }

    #[must_use]
    pub fn tube_diameter(&self) -> Length {
        self.tube_diameter.into_inner()
    }

    #[must_use]
    pub fn circuits(&self) -> u32 {
        self.circuits.into_inner()
    }

    /// Evaluates the heat exchanger formed by the pipes at a mass flow.
    ///
    /// Properties are taken at the inlet temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`NumericalError`] if the property lookup fails or the
    /// tabulated properties give a non-physical result.
    pub fn evaluate(
        &self,
        refrigerant: &Refrigerant,
        inlet: ThermodynamicTemperature,
        mass_rate: Constrained<MassRate, StrictlyPositive>,
    ) -> Result<ExchangerPerformance, NumericalError> {
        let properties = refrigerant.properties(inlet)?;
        let mass_rate = mass_rate.into_inner();

        let reynolds = ReynoldsNumber::for_parallel_circuits(
            mass_rate,
            properties.viscosity,
            self.tube_diameter,
            self.circuits,
        )
        .map_err(NumericalError::non_physical("Reynolds number"))?;
        let nusselt = NusseltNumber::fully_developed(reynolds, properties.prandtl);

        let ua = ThermalConductance::new::<watt_per_kelvin>(
            PI * properties.conductivity.get::<watt_per_meter_kelvin>()
                * nusselt.get::<ratio>()
                * self.tube_length().get::<meter>(),
        );
        let capacitance_rate =
            CapacitanceRate::from_mass_rate_and_specific_heat(mass_rate, properties.specific_heat)
                .map_err(NumericalError::non_physical("capacitance rate"))?;
        let ntu = Ntu::from_conductance_and_capacitance_rate(ua, capacitance_rate)
            .map_err(NumericalError::non_physical("NTU"))?;
        let effectiveness = Effectiveness::isothermal_wall(ntu);

        debug!(
            reynolds = reynolds.get::<ratio>(),
            regime = ?nusselt.regime(),
            ntu = ntu.get::<ratio>(),
            effectiveness = effectiveness.get::<ratio>(),
            "evaluated floor pipes"
        );

        Ok(ExchangerPerformance {
            mass_rate,
            properties,
            reynolds,
            nusselt,
            ntu,
            effectiveness,
            capacitance_rate,
        })
    }
}

/// Heat exchanger metrics of the pipe network at one flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangerPerformance {
    pub mass_rate: MassRate,
    pub properties: TransportProperties,
    pub reynolds: ReynoldsNumber,
    pub nusselt: NusseltNumber,
    pub ntu: Ntu,
    pub effectiveness: Effectiveness,
    pub capacitance_rate: CapacitanceRate,
}

impl ExchangerPerformance {
    #[must_use]
    pub fn regime(&self) -> FlowRegime {
        self.nusselt.regime()
    }

    /// `ε * m_dot * c_p`, the conductance between the inlet and the pipe wall.
    #[must_use]
    pub fn effective_conductance(&self) -> ThermalConductance {
        *self.capacitance_rate * self.effectiveness.get::<ratio>()
    }
}
