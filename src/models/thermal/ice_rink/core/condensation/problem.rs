//! Problem formulation for limiting flow at the dew point.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    f64::{MassRate, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    temperature_interval::kelvin as delta_kelvin,
};

use crate::{
    models::thermal::ice_rink::core::{FloorContext, FloorResponse, NumericalError},
    support::units::TemperatureDifference,
};

/// Model adapter exposing the refrigerant flow as the sole input.
pub(super) struct FloorFlowModel<'a> {
    floor: &'a FloorContext<'a>,
}

impl<'a> FloorFlowModel<'a> {
    pub(super) fn new(floor: &'a FloorContext<'a>) -> Self {
        Self { floor }
    }
}

impl Model for FloorFlowModel<'_> {
    type Input = MassRate;
    type Output = FloorResponse;
    type Error = NumericalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.floor.evaluate(*input)
    }
}

/// Residual `surface - limit`, in kelvin.
///
/// Positive while the surface stays above the condensation limit.
pub(super) struct DewPointProblem {
    limit: ThermodynamicTemperature,
}

impl DewPointProblem {
    pub(super) fn new(limit: ThermodynamicTemperature) -> Self {
        Self { limit }
    }
}

impl EquationProblem<1> for DewPointProblem {
    type Input = MassRate;
    type Output = FloorResponse;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(MassRate::new::<kilogram_per_second>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let margin = output.balance.surface_temperature.minus(self.limit);
        Ok([margin.get::<delta_kelvin>()])
    }
}
