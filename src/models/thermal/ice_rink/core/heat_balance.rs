//! Coupling between the buried pipe network and the slab heat balance.
//!
//! The host linearizes the floor's conduction transfer functions around the
//! current step into ten coefficients. With `q` the heat source per unit
//! floor area (W/m², negative when cooling):
//!
//! ```text
//! T_surface = (Ca + Cb*Cd + q*(Cc + Cb*Cf)) / (1 - Cb*Ce)
//! T_source  = Ck + Cl*q
//! ```
//!
//! where `Ck` and `Cl` fold the slab-history terms `Cg..Cj` into the source
//! plane. Temperatures are in °C and `Cc`, `Cf`, `Ch`, `Cl` in K·m²/W.
//! Equating `T_source` with the pipe wall temperature seen by the refrigerant
//! closes the balance.

use uom::si::{
    area::square_meter,
    f64::{Area, Power, ThermodynamicTemperature},
    power::watt,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use super::{ExchangerPerformance, NumericalError};

/// Smallest denominator accepted as a well-posed heat balance.
const MIN_DENOMINATOR: f64 = 1e-12;

/// Per-step linear heat balance coefficients of the floor surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeatBalanceCoefficients {
    pub ca: f64,
    pub cb: f64,
    pub cc: f64,
    pub cd: f64,
    pub ce: f64,
    pub cf: f64,
    pub cg: f64,
    pub ch: f64,
    pub ci: f64,
    pub cj: f64,
}

impl HeatBalanceCoefficients {
    /// Reduces the coefficients to the slab's response at the source plane.
    ///
    /// # Errors
    ///
    /// Returns [`NumericalError::NonFiniteCoefficient`] if any coefficient is
    /// not finite and [`NumericalError::DegenerateHeatBalance`] if `1 - Ce*Cb`
    /// vanishes.
    pub fn slab_response(&self) -> Result<SlabResponse, NumericalError> {
        let named = [
            ("Ca", self.ca),
            ("Cb", self.cb),
            ("Cc", self.cc),
            ("Cd", self.cd),
            ("Ce", self.ce),
            ("Cf", self.cf),
            ("Cg", self.cg),
            ("Ch", self.ch),
            ("Ci", self.ci),
            ("Cj", self.cj),
        ];
        if let Some((name, _)) = named.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(NumericalError::NonFiniteCoefficient { name });
        }

        let Self {
            ca,
            cb,
            cc,
            cd,
            ce,
            cf,
            cg,
            ch,
            ci,
            cj,
        } = *self;

        let denominator = 1.0 - ce * cb;
        if denominator.abs() < MIN_DENOMINATOR {
            return Err(NumericalError::DegenerateHeatBalance { denominator });
        }

        let ck = cg + (ci * (ca + cb * cd) + cj * (cd + ce * ca)) / denominator;
        let cl = ch + (ci * (cc + cb * cf) + cj * (cf + ce * cc)) / denominator;

        Ok(SlabResponse {
            coefficients: *self,
            denominator,
            ck,
            cl,
        })
    }
}

/// How the slab responds to a heat source during one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabResponse {
    coefficients: HeatBalanceCoefficients,
    denominator: f64,
    ck: f64,
    cl: f64,
}

impl SlabResponse {
    /// Source-plane temperature with no heat source (`Ck`), in °C.
    #[must_use]
    pub fn ck(&self) -> f64 {
        self.ck
    }

    /// Source-plane temperature rise per unit heat flux (`Cl`), in K·m²/W.
    #[must_use]
    pub fn cl(&self) -> f64 {
        self.cl
    }

    /// Surface temperature for a heat flux in W/m².
    #[must_use]
    pub fn surface_temperature(&self, heat_flux: f64) -> ThermodynamicTemperature {
        let HeatBalanceCoefficients {
            ca, cb, cc, cd, cf, ..
        } = self.coefficients;
        let celsius = (ca + cb * cd + heat_flux * (cc + cb * cf)) / self.denominator;
        ThermodynamicTemperature::new::<degree_celsius>(celsius)
    }

    /// Surface temperature the slab settles to when no refrigerant flows.
    #[must_use]
    pub fn idle_surface_temperature(&self) -> ThermodynamicTemperature {
        self.surface_temperature(0.0)
    }

    /// Source-plane temperature for a heat flux in W/m².
    #[must_use]
    pub fn source_temperature(&self, heat_flux: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.ck + self.cl * heat_flux)
    }

    /// Heat flux in W/m² that holds the surface at `target`.
    ///
    /// # Errors
    ///
    /// Returns [`NumericalError::InsensitiveSurface`] if the surface
    /// temperature does not depend on the heat source.
    pub fn heat_flux_for_surface_temperature(
        &self,
        target: ThermodynamicTemperature,
    ) -> Result<f64, NumericalError> {
        let HeatBalanceCoefficients {
            ca, cb, cc, cd, cf, ..
        } = self.coefficients;
        let sensitivity = cc + cb * cf;
        if sensitivity == 0.0 {
            return Err(NumericalError::InsensitiveSurface);
        }
        Ok((self.denominator * target.get::<degree_celsius>() - ca - cb * cd) / sensitivity)
    }
}

/// Floor conditions once the pipes and slab agree on a heat source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatBalance {
    /// Heat added to the slab; negative when cooling.
    pub heat_source: Power,
    pub surface_temperature: ThermodynamicTemperature,
    pub source_temperature: ThermodynamicTemperature,
    pub outlet_temperature: ThermodynamicTemperature,
}

impl HeatBalance {
    /// Floor conditions with no refrigerant flow.
    #[must_use]
    pub fn idle(slab: &SlabResponse, inlet: ThermodynamicTemperature) -> Self {
        Self {
            heat_source: Power::new::<watt>(0.0),
            surface_temperature: slab.idle_surface_temperature(),
            source_temperature: slab.source_temperature(0.0),
            outlet_temperature: inlet,
        }
    }

    /// Solves the pipe/slab coupling for a flowing refrigerant.
    ///
    /// `Q = εC (T_in - Ck) / (1 + εC Cl / A)`, with the outlet following from
    /// `Q = C (T_in - T_out)`.
    ///
    /// # Errors
    ///
    /// Returns [`NumericalError::DegenerateHeatBalance`] if `1 + εC Cl / A`
    /// vanishes or is not finite.
    pub fn solve(
        slab: &SlabResponse,
        area: Area,
        exchanger: &ExchangerPerformance,
        inlet: ThermodynamicTemperature,
    ) -> Result<Self, NumericalError> {
        let area = area.get::<square_meter>();
        let eps_c = exchanger.effective_conductance().get::<watt_per_kelvin>();
        let c = exchanger.capacitance_rate.get::<watt_per_kelvin>();
        let t_in = inlet.get::<degree_celsius>();

        let denominator = 1.0 + eps_c * slab.cl / area;
        if !denominator.is_finite() || denominator.abs() < MIN_DENOMINATOR {
            return Err(NumericalError::DegenerateHeatBalance { denominator });
        }

        let q = eps_c * (t_in - slab.ck) / denominator;
        let heat_flux = q / area;

        Ok(Self {
            heat_source: Power::new::<watt>(q),
            surface_temperature: slab.surface_temperature(heat_flux),
            source_temperature: slab.source_temperature(heat_flux),
            outlet_temperature: ThermodynamicTemperature::new::<degree_celsius>(t_in - q / c),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};

    use super::*;
    use crate::{
        models::thermal::ice_rink::core::test_support::{coefficients, floor_area, pipes},
        support::{constraint::StrictlyPositive, thermo::fluid::Refrigerant},
    };

    #[test]
    fn derived_coefficients() {
        let slab = coefficients().slab_response().unwrap();

        assert_relative_eq!(slab.ck(), 2.0, max_relative = 1e-12);
        assert_relative_eq!(slab.cl(), 0.005 + 0.0168 / 0.98, max_relative = 1e-12);
        assert_relative_eq!(
            slab.idle_surface_temperature().get::<degree_celsius>(),
            1.4 / 0.98,
            max_relative = 1e-9
        );
    }

    #[test]
    fn degenerate_denominator_fails() {
        let coeffs = HeatBalanceCoefficients {
            cb: 2.0,
            ce: 0.5,
            ..coefficients()
        };
        assert!(matches!(
            coeffs.slab_response(),
            Err(NumericalError::DegenerateHeatBalance { .. })
        ));
    }

    #[test]
    fn non_finite_coefficient_fails() {
        let coeffs = HeatBalanceCoefficients {
            ch: f64::NAN,
            ..coefficients()
        };
        assert_eq!(
            coeffs.slab_response(),
            Err(NumericalError::NonFiniteCoefficient { name: "Ch" })
        );
    }

    #[test]
    fn heat_flux_for_target_reproduces_target() {
        let slab = coefficients().slab_response().unwrap();
        let target = ThermodynamicTemperature::new::<degree_celsius>(-3.0);

        let q = slab.heat_flux_for_surface_temperature(target).unwrap();

        assert!(q < 0.0);
        assert_relative_eq!(
            slab.surface_temperature(q).get::<degree_celsius>(),
            -3.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn insensitive_surface_fails() {
        let slab = HeatBalanceCoefficients {
            cc: 0.0,
            cf: 0.0,
            ..coefficients()
        }
        .slab_response()
        .unwrap();
        let target = ThermodynamicTemperature::new::<degree_celsius>(-3.0);
        assert_eq!(
            slab.heat_flux_for_surface_temperature(target),
            Err(NumericalError::InsensitiveSurface)
        );
    }

    #[test]
    fn idle_floor_passes_refrigerant_unchanged() {
        let slab = coefficients().slab_response().unwrap();
        let inlet = ThermodynamicTemperature::new::<degree_celsius>(-8.0);

        let balance = HeatBalance::idle(&slab, inlet);

        assert_eq!(balance.heat_source.get::<watt>(), 0.0);
        assert_eq!(balance.outlet_temperature, inlet);
        assert_eq!(balance.surface_temperature, slab.idle_surface_temperature());
    }

    #[test]
    fn slab_cancelling_the_pipes_fails() {
        let inlet = ThermodynamicTemperature::new::<degree_celsius>(-8.0);
        let mass_rate = StrictlyPositive::new(MassRate::new::<kilogram_per_second>(2.0)).unwrap();
        let exchanger = pipes()
            .evaluate(&Refrigerant::Ammonia, inlet, mass_rate)
            .unwrap();
        let eps_c = exchanger.effective_conductance().get::<watt_per_kelvin>();
        let area = floor_area();

        let base = coefficients();
        let folded = base.slab_response().unwrap().cl() - base.ch;
        let slab = HeatBalanceCoefficients {
            ch: -area.get::<square_meter>() / eps_c - folded,
            ..base
        }
        .slab_response()
        .unwrap();

        assert!(matches!(
            HeatBalance::solve(&slab, area, &exchanger, inlet),
            Err(NumericalError::DegenerateHeatBalance { .. })
        ));
    }

    #[test]
    fn flowing_floor_balances() {
        let inlet = ThermodynamicTemperature::new::<degree_celsius>(-8.0);
        let mass_rate = StrictlyPositive::new(MassRate::new::<kilogram_per_second>(2.0)).unwrap();
        let exchanger = pipes()
            .evaluate(&Refrigerant::Ammonia, inlet, mass_rate)
            .unwrap();
        let slab = coefficients().slab_response().unwrap();

        let balance = HeatBalance::solve(&slab, floor_area(), &exchanger, inlet).unwrap();

        let q = balance.heat_source.get::<watt>();
        let c = exchanger.capacitance_rate.get::<watt_per_kelvin>();
        assert!(q < 0.0);
        assert_relative_eq!(
            balance.outlet_temperature.get::<degree_celsius>(),
            -8.0 - q / c,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            balance.source_temperature.get::<degree_celsius>(),
            slab.ck() + slab.cl() * q / 1800.0,
            max_relative = 1e-9
        );
    }
}
