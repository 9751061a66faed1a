use std::{f64::consts::PI, ops::Deref};

use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, Length, MassRate, Ratio},
    length::meter,
    mass_rate::kilogram_per_second,
    ratio::ratio,
};

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, StrictlyPositive};

/// Reynolds number at which pipe flow is treated as turbulent.
pub const TRANSITION_REYNOLDS: f64 = 2300.0;

/// Fully developed laminar Nusselt number for a constant wall temperature.
pub const LAMINAR_NUSSELT: f64 = 3.66;

/// Flow regime inside a pipe circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

/// Reynolds number of flow inside a circular pipe.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ReynoldsNumber(Constrained<Ratio, NonNegative>);

impl ReynoldsNumber {
    /// Create a [`ReynoldsNumber`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative or `NaN`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(Ratio::new::<ratio>(value))?))
    }

    /// Reynolds number of a total flow split evenly over parallel circuits.
    ///
    /// `Re = 4 m_dot / (π μ D n)`
    ///
    /// # Errors
    ///
    /// Returns `Err` if the mass rate or viscosity is negative, or if the
    /// result is not a number.
    pub fn for_parallel_circuits(
        mass_rate: MassRate,
        viscosity: DynamicViscosity,
        diameter: Constrained<Length, StrictlyPositive>,
        circuits: Constrained<u32, StrictlyPositive>,
    ) -> ConstraintResult<Self> {
        let m_dot = mass_rate.get::<kilogram_per_second>();
        let mu = viscosity.get::<pascal_second>();
        let d = diameter.into_inner().get::<meter>();
        let n = f64::from(circuits.into_inner());
        Self::new(4.0 * m_dot / (PI * mu * d * n))
    }

    /// Returns the regime this Reynolds number falls in.
    ///
    /// There is no transitional band: the switch at [`TRANSITION_REYNOLDS`]
    /// is a step.
    #[must_use]
    pub fn regime(&self) -> FlowRegime {
        if self.get::<ratio>() >= TRANSITION_REYNOLDS {
            FlowRegime::Turbulent
        } else {
            FlowRegime::Laminar
        }
    }
}

impl Deref for ReynoldsNumber {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Nusselt number for fully developed flow in a circular pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NusseltNumber {
    value: Ratio,
    regime: FlowRegime,
}

impl NusseltNumber {
    /// Selects the correlation from the flow regime.
    ///
    /// Laminar flow uses [`LAMINAR_NUSSELT`]. Turbulent flow uses the Colburn
    /// form of Dittus-Boelter, `Nu = 0.023 Re^0.8 Pr^(1/3)`.
    #[must_use]
    pub fn fully_developed(reynolds: ReynoldsNumber, prandtl: Ratio) -> Self {
        let regime = reynolds.regime();
        let value = match regime {
            FlowRegime::Laminar => LAMINAR_NUSSELT,
            FlowRegime::Turbulent => {
                let re = reynolds.get::<ratio>();
                let pr = prandtl.get::<ratio>();
                0.023 * re.powf(0.8) * pr.cbrt()
            }
        };
        Self {
            value: Ratio::new::<ratio>(value),
            regime,
        }
    }

    /// Returns the regime the correlation was selected for.
    #[must_use]
    pub fn regime(&self) -> FlowRegime {
        self.regime
    }
}

impl Deref for NusseltNumber {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}
