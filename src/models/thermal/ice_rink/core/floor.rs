use uom::{
    ConstZero,
    si::f64::{Area, MassRate, ThermodynamicTemperature},
};

use crate::support::{constraint::StrictlyPositive, thermo::fluid::Refrigerant};

use super::{ExchangerPerformance, HeatBalance, NumericalError, PipeNetwork, SlabResponse};

/// Everything needed to evaluate the floor at a trial flow during one step.
#[derive(Debug, Clone, Copy)]
pub struct FloorContext<'a> {
    pub pipes: &'a PipeNetwork,
    pub refrigerant: &'a Refrigerant,
    pub slab: &'a SlabResponse,
    pub area: Area,
    pub inlet: ThermodynamicTemperature,
}

/// Floor conditions at one refrigerant flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorResponse {
    pub mass_rate: MassRate,

    /// `None` when no refrigerant flows.
    pub exchanger: Option<ExchangerPerformance>,

    pub balance: HeatBalance,
}

impl FloorContext<'_> {
    /// Solves the coupled pipe and slab balance at `mass_rate`.
    ///
    /// A flow that is zero or negative leaves the slab idle.
    ///
    /// # Errors
    ///
    /// Returns a [`NumericalError`] if the exchanger cannot be evaluated.
    pub fn evaluate(&self, mass_rate: MassRate) -> Result<FloorResponse, NumericalError> {
        let Ok(flowing) = StrictlyPositive::new(mass_rate) else {
            return Ok(FloorResponse {
                mass_rate: MassRate::ZERO,
                exchanger: None,
                balance: HeatBalance::idle(self.slab, self.inlet),
            });
        };

        let exchanger = self
            .pipes
            .evaluate(self.refrigerant, self.inlet, flowing)?;
        let balance = HeatBalance::solve(self.slab, self.area, &exchanger, self.inlet)?;

        Ok(FloorResponse {
            mass_rate,
            exchanger: Some(exchanger),
            balance,
        })
    }
}
