use std::ops::Deref;

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, UnitInterval};
use uom::si::{
    f64::{Ratio, ThermalConductance},
    ratio::ratio,
};

use super::CapacitanceRate;

/// NTU above which the effectiveness is taken as exactly one.
///
/// `exp(-50)` is below `1e-21`, so the saturation changes no result that
/// matters while keeping the exponential away from underflow.
pub const NTU_SATURATION: f64 = 50.0;

/// The effectiveness of a heat exchanger.
///
/// The ratio of the heat actually transferred to the most that could be
/// transferred. Always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Effectiveness(Constrained<Ratio, UnitInterval>);

impl Effectiveness {
    /// Create an [`Effectiveness`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the interval [0, 1].
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create an [`Effectiveness`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside the interval [0, 1].
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(quantity)?))
    }

    /// Effectiveness of a single stream exchanging heat with an isothermal wall.
    ///
    /// Returns `1 - exp(-NTU)`, or exactly one once NTU exceeds [`NTU_SATURATION`].
    #[must_use]
    pub fn isothermal_wall(ntu: Ntu) -> Self {
        let ntu = ntu.get::<ratio>();
        if ntu > NTU_SATURATION {
            return Self(UnitInterval::one());
        }
        Self::new(1.0 - (-ntu).exp()).expect("non-negative ntu always yields valid effectiveness")
    }
}

impl Deref for Effectiveness {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// The number of transfer units of a heat exchanger.
///
/// Must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ntu(Constrained<Ratio, NonNegative>);

impl Ntu {
    /// Create an [`Ntu`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create an [`Ntu`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is negative.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(quantity)?))
    }

    /// Create an [`Ntu`] from a conductance and the flowing stream's capacitance rate.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ua` is negative.
    pub fn from_conductance_and_capacitance_rate(
        ua: ThermalConductance,
        capacitance_rate: CapacitanceRate,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(ua / *capacitance_rate)
    }
}

impl Deref for Ntu {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
