//! One simulation step of a rink system.

use tracing::{debug, warn};
use uom::{
    ConstZero,
    si::{
        f64::{Energy, MassRate, Power, ThermodynamicTemperature, Time},
        mass_rate::kilogram_per_second,
        power::watt,
        thermodynamic_temperature::degree_celsius,
    },
};

use crate::support::constraint::StrictlyPositive;

use super::{
    CondensationAction, ControlOutcome, FloorContext, FloorResponse, HeatBalanceCoefficients,
    Host, NumericalError, Resurfacer, RinkError, RinkSystem, freezing_energy,
};

/// Zone convection from the host's heat balance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneConvection {
    /// Sum of surface convection with the floor's heat source applied.
    pub with_source: Power,

    /// Sum of surface convection with the floor's heat source removed.
    pub without_source: Power,
}

/// A request to freeze the initial ice sheet during the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreezeRequest {
    pub flood_temperature: ThermodynamicTemperature,
    pub ice_temperature: ThermodynamicTemperature,
}

/// Host snapshot a step runs against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    pub inlet_temperature: ThermodynamicTemperature,

    /// Flow at the inlet node before this step's request.
    pub inlet_mass_rate: MassRate,

    pub floor: HeatBalanceCoefficients,
    pub zone_convection: ZoneConvection,

    /// Zone air dew point, if condensation is tracked.
    pub dew_point: Option<ThermodynamicTemperature>,

    pub timestep: Time,
    pub freezing: Option<FreezeRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    NotOperating,
    Cooling,
}

/// Resolved state of the system for a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingState {
    pub mode: OperatingMode,
    pub mass_rate: MassRate,

    /// Heat added to the slab; negative when cooling.
    pub heat_source: Power,

    pub surface_temperature: ThermodynamicTemperature,
    pub inlet_temperature: ThermodynamicTemperature,
    pub outlet_temperature: ThermodynamicTemperature,
}

/// Parts of the load delivered to the zone, averaged over the step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadBreakdown {
    pub radiant: Power,
    pub spectators: Power,
    pub freezing: Power,
    pub resurfacing: Power,
}

impl LoadBreakdown {
    #[must_use]
    pub fn total(&self) -> Power {
        self.radiant + self.spectators + self.freezing + self.resurfacing
    }
}

/// Everything a step resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub state: OperatingState,

    /// `None` when the system was not available.
    pub control: Option<ControlOutcome>,

    /// `None` when condensation was not checked.
    pub condensation: Option<CondensationAction>,

    /// Flow was shut off because the floor would have been heated.
    pub reverse_cutoff: bool,

    /// Rate heat is removed from the slab.
    pub cooling_power: Power,

    /// Heat removed from the slab over the step.
    pub cooling_energy: Energy,

    pub freezing: Energy,
    pub resurfacing: Energy,
    pub breakdown: LoadBreakdown,

    /// Load met in the zone; negative when cooling.
    pub load_met: Power,
}

impl RinkSystem {
    /// Runs one step against a host snapshot.
    ///
    /// The floor heat source is written to the host exactly once.
    ///
    /// # Errors
    ///
    /// Returns a [`RinkError`] if the heat balance is ill-posed, a property
    /// lookup fails, or the timestep is not strictly positive.
    pub fn simulate_step(
        &self,
        input: &StepInput,
        resurfacers: &[Resurfacer],
        host: &mut impl Host,
    ) -> Result<StepOutcome, RinkError> {
        let timestep = StrictlyPositive::new(input.timestep)
            .map_err(NumericalError::non_physical("timestep"))?
            .into_inner();
        let slab = input.floor.slab_response()?;
        let floor = FloorContext {
            pipes: &self.pipes,
            refrigerant: &self.refrigerant,
            slab: &slab,
            area: self.floor.area(),
            inlet: input.inlet_temperature,
        };

        let mut control = None;
        let mut condensation = None;
        let mut reverse_cutoff = false;

        let (mode, response) = if host.schedule_value(self.availability) <= 0.0 {
            debug!(system = %self.name, "not available");
            host.request_flow_rate(self.inlet, MassRate::ZERO);
            (OperatingMode::NotOperating, floor.evaluate(MassRate::ZERO)?)
        } else {
            let target = self.control.setpoint.resolve(&*host);
            let request =
                self.control
                    .required_flow(&floor, &self.bounds, target, input.inlet_mass_rate)?;
            control = Some(request.outcome);

            let granted = host.request_flow_rate(self.inlet, request.mass_rate);
            let mut response = floor.evaluate(granted)?;
            debug!(
                system = %self.name,
                requested = request.mass_rate.get::<kilogram_per_second>(),
                granted = granted.get::<kilogram_per_second>(),
                target = target.get::<degree_celsius>(),
                "flow committed"
            );

            if response.exchanger.is_some() && response.balance.heat_source >= Power::ZERO {
                warn!(
                    system = %self.name,
                    heat_source = response.balance.heat_source.get::<watt>(),
                    "refrigerant would heat the floor, shutting off"
                );
                reverse_cutoff = true;
                response = self.shut_off(&floor, host)?;
            } else if let (Some(dew_point), Some(_)) = (input.dew_point, response.exchanger) {
                let action = self.condensation.check(&floor, &response, dew_point)?;
                condensation = Some(action);
                match action {
                    CondensationAction::Unrestricted => {}
                    CondensationAction::ShutOff => response = self.shut_off(&floor, host)?,
                    CondensationAction::Limited(flow) => {
                        let granted = host.request_flow_rate(self.inlet, flow);
                        response = floor.evaluate(granted)?;
                    }
                }
            }

            (OperatingMode::Cooling, response)
        };

        let balance = response.balance;
        host.set_heat_source(self.floor.id(), balance.heat_source);

        let freezing = match input.freezing {
            Some(request) => freezing_energy(
                &self.geometry,
                request.flood_temperature,
                request.ice_temperature,
            )?,
            None => Energy::ZERO,
        };
        let mut resurfacing = Energy::ZERO;
        for resurfacer in resurfacers {
            let events = resurfacer.events().resolve(&*host);
            if events > 0.0 {
                let load = resurfacer.event_load(&self.geometry, balance.surface_temperature)?;
                resurfacing += load.total() * events;
            }
        }

        let breakdown = LoadBreakdown {
            radiant: input.zone_convection.with_source - input.zone_convection.without_source,
            spectators: self
                .spectators
                .map_or(Power::ZERO, |spectators| spectators.gain(&*host)),
            freezing: freezing / timestep,
            resurfacing: resurfacing / timestep,
        };

        Ok(StepOutcome {
            state: OperatingState {
                mode,
                mass_rate: response.mass_rate,
                heat_source: balance.heat_source,
                surface_temperature: balance.surface_temperature,
                inlet_temperature: input.inlet_temperature,
                outlet_temperature: balance.outlet_temperature,
            },
            control,
            condensation,
            reverse_cutoff,
            cooling_power: -balance.heat_source,
            cooling_energy: -balance.heat_source * timestep,
            freezing,
            resurfacing,
            breakdown,
            load_met: breakdown.total(),
        })
    }

    fn shut_off(
        &self,
        floor: &FloorContext<'_>,
        host: &mut impl Host,
    ) -> Result<FloorResponse, NumericalError> {
        host.request_flow_rate(self.inlet, MassRate::ZERO);
        floor.evaluate(MassRate::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::{
        area::square_meter,
        energy::joule,
        f64::{Area, Volume},
        time::second,
        volume::cubic_meter,
    };

    use super::*;
    use crate::models::thermal::ice_rink::core::{
        CondensationControl, CondensationKind, ControlKind, ControlStrategy, EventCount,
        ResurfacerConfig, RinkSystemConfig, Setpoint, SpectatorGain,
        test_support::{
            AVAILABILITY, Catalog, EVENTS, FLOOR, INLET, RecordingHost, SETPOINT, SPECTATORS,
            coefficients, floor_area, pipes, system_config,
        },
    };
    use crate::support::thermo::fluid::Refrigerant;

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn flow(kg_per_s: f64) -> MassRate {
        MassRate::new::<kilogram_per_second>(kg_per_s)
    }

    fn watts(value: f64) -> Power {
        Power::new::<watt>(value)
    }

    fn input(inlet: f64) -> StepInput {
        StepInput {
            inlet_temperature: celsius(inlet),
            inlet_mass_rate: flow(2.0),
            floor: coefficients(),
            zone_convection: ZoneConvection {
                with_source: watts(-1500.0),
                without_source: watts(500.0),
            },
            dew_point: None,
            timestep: Time::new::<second>(3600.0),
            freezing: None,
        }
    }

    fn system(config: RinkSystemConfig) -> RinkSystem {
        RinkSystem::initialize(config, &Catalog::default()).unwrap()
    }

    fn running(setpoint: f64) -> RecordingHost {
        RecordingHost::with_schedules(&[(AVAILABILITY, 1.0), (SETPOINT, setpoint)])
    }

    #[test]
    fn unavailable_system_does_nothing() {
        let mut host = RecordingHost::with_schedules(&[(SETPOINT, -3.0)]);

        let outcome = system(system_config())
            .simulate_step(&input(-8.0), &[], &mut host)
            .unwrap();

        assert_eq!(outcome.state.mode, OperatingMode::NotOperating);
        assert_eq!(outcome.state.mass_rate, MassRate::ZERO);
        assert_eq!(outcome.control, None);
        assert_eq!(host.requests, vec![(INLET, MassRate::ZERO)]);
        assert_eq!(host.heat_sources, vec![(FLOOR, Power::ZERO)]);
        assert_relative_eq!(outcome.load_met.get::<watt>(), -2000.0);
    }

    #[test]
    fn surface_control_modulates_flow() {
        let mut host = running(-3.0);

        let outcome = system(system_config())
            .simulate_step(&input(-8.0), &[], &mut host)
            .unwrap();

        assert_eq!(outcome.state.mode, OperatingMode::Cooling);
        assert_eq!(outcome.control, Some(ControlOutcome::Modulated));
        assert_relative_eq!(
            outcome.state.mass_rate.get::<kilogram_per_second>(),
            37.785,
            max_relative = 1e-3
        );
        assert!(outcome.state.surface_temperature < celsius(-3.0));
        assert!(!outcome.reverse_cutoff);

        assert_eq!(host.heat_sources.len(), 1);
        let (surface, heat_source) = host.heat_sources[0];
        assert_eq!(surface, FLOOR);
        assert_eq!(heat_source, outcome.state.heat_source);
        assert!(heat_source < Power::ZERO);
        assert_relative_eq!(outcome.cooling_power.get::<watt>(), -heat_source.get::<watt>());
        assert_relative_eq!(
            outcome.cooling_energy.get::<joule>(),
            -heat_source.get::<watt>() * 3600.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn granted_flow_is_authoritative() {
        let mut host = running(-3.0);
        host.grant_limit = Some(flow(10.0));

        let outcome = system(system_config())
            .simulate_step(&input(-8.0), &[], &mut host)
            .unwrap();

        assert_eq!(outcome.state.mass_rate, flow(10.0));

        let slab = coefficients().slab_response().unwrap();
        let pipes = pipes();
        let floor = FloorContext {
            pipes: &pipes,
            refrigerant: &Refrigerant::Ammonia,
            slab: &slab,
            area: floor_area(),
            inlet: celsius(-8.0),
        };
        let expected = floor.evaluate(flow(10.0)).unwrap().balance.heat_source;
        assert_eq!(outcome.state.heat_source, expected);
    }

    #[test]
    fn warm_inlet_triggers_reverse_cutoff() {
        let mut host = running(-3.0);

        let outcome = system(system_config())
            .simulate_step(&input(5.0), &[], &mut host)
            .unwrap();

        assert!(outcome.reverse_cutoff);
        assert_eq!(outcome.state.mass_rate, MassRate::ZERO);
        assert_eq!(outcome.state.heat_source, Power::ZERO);
        assert_eq!(host.last_request(), Some(MassRate::ZERO));
        assert_eq!(host.heat_sources, vec![(FLOOR, Power::ZERO)]);
    }

    #[test]
    fn surface_already_cold_needs_no_flow() {
        let mut host = running(2.0);

        let outcome = system(system_config())
            .simulate_step(&input(-8.0), &[], &mut host)
            .unwrap();

        assert_eq!(outcome.control, Some(ControlOutcome::AtSetpoint));
        assert_eq!(outcome.state.mass_rate, MassRate::ZERO);
        assert_eq!(outcome.state.heat_source, Power::ZERO);
        assert!(!outcome.reverse_cutoff);
    }

    #[test]
    fn outlet_control_inverts_from_node_flow() {
        let config = RinkSystemConfig {
            control: ControlStrategy {
                kind: ControlKind::OutletTemperature,
                setpoint: Setpoint::Fixed(celsius(-6.0)),
            },
            ..system_config()
        };
        let mut host = running(0.0);

        let outcome = system(config)
            .simulate_step(&input(-8.0), &[], &mut host)
            .unwrap();

        assert_eq!(outcome.control, Some(ControlOutcome::Modulated));
        assert_relative_eq!(
            host.requests[0].1.get::<kilogram_per_second>(),
            31.03,
            max_relative = 0.01
        );
    }

    #[test]
    fn simple_off_condensation_shuts_off() {
        let config = RinkSystemConfig {
            condensation: CondensationControl {
                kind: CondensationKind::SimpleOff,
                ..CondensationControl::default()
            },
            ..system_config()
        };
        let mut host = running(-6.0);
        let step = StepInput {
            dew_point: Some(celsius(-4.0)),
            ..input(-8.0)
        };

        let outcome = system(config).simulate_step(&step, &[], &mut host).unwrap();

        assert_eq!(outcome.control, Some(ControlOutcome::Saturated));
        assert_eq!(outcome.condensation, Some(CondensationAction::ShutOff));
        assert_eq!(outcome.state.mass_rate, MassRate::ZERO);
        assert_eq!(host.requests, vec![(INLET, flow(50.0)), (INLET, MassRate::ZERO)]);
        assert_eq!(host.heat_sources.len(), 1);
    }

    #[test]
    fn variable_off_condensation_keeps_surface_above_limit() {
        let config = RinkSystemConfig {
            condensation: CondensationControl {
                kind: CondensationKind::VariableOff,
                ..CondensationControl::default()
            },
            ..system_config()
        };
        let mut host = running(-6.0);
        let step = StepInput {
            dew_point: Some(celsius(-4.0)),
            ..input(-8.0)
        };

        let outcome = system(config).simulate_step(&step, &[], &mut host).unwrap();

        assert!(matches!(
            outcome.condensation,
            Some(CondensationAction::Limited(_))
        ));
        assert!(outcome.state.mass_rate > MassRate::ZERO);
        assert!(outcome.state.mass_rate < flow(50.0));
        assert_relative_eq!(
            outcome.state.surface_temperature.get::<degree_celsius>(),
            -3.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn auxiliary_loads_add_to_load_met() {
        let config = RinkSystemConfig {
            spectators: Some(SpectatorGain {
                schedule: SPECTATORS,
                area: Area::new::<square_meter>(400.0),
            }),
            ..system_config()
        };
        let resurfacer = Resurfacer::new(ResurfacerConfig {
            tank_capacity: Volume::new::<cubic_meter>(0.5),
            flood_temperature: celsius(40.0),
            initial_water_temperature: celsius(10.0),
            events: EventCount::Scheduled(EVENTS),
        })
        .unwrap();
        let mut host = RecordingHost::with_schedules(&[
            (AVAILABILITY, 1.0),
            (SETPOINT, -3.0),
            (EVENTS, 2.0),
            (SPECTATORS, 10.0),
        ]);
        let step = StepInput {
            freezing: Some(FreezeRequest {
                flood_temperature: celsius(15.0),
                ice_temperature: celsius(-5.0),
            }),
            ..input(-8.0)
        };
        let system = system(config);

        let outcome = system
            .simulate_step(&step, &[resurfacer], &mut host)
            .unwrap();

        let per_event = resurfacer
            .event_load(&system.geometry, outcome.state.surface_temperature)
            .unwrap()
            .total();
        assert_relative_eq!(
            outcome.resurfacing.get::<joule>(),
            2.0 * per_event.get::<joule>(),
            max_relative = 1e-12
        );
        assert!(outcome.freezing > Energy::ZERO);

        let breakdown = outcome.breakdown;
        assert_relative_eq!(breakdown.radiant.get::<watt>(), -2000.0);
        assert_relative_eq!(breakdown.spectators.get::<watt>(), 4000.0);
        assert_relative_eq!(
            breakdown.freezing.get::<watt>(),
            outcome.freezing.get::<joule>() / 3600.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            outcome.load_met.get::<watt>(),
            -2000.0
                + 4000.0
                + (outcome.freezing.get::<joule>() + outcome.resurfacing.get::<joule>()) / 3600.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn zero_timestep_is_rejected() {
        let mut host = running(-3.0);
        let step = StepInput {
            timestep: Time::new::<second>(0.0),
            ..input(-8.0)
        };
        assert!(matches!(
            system(system_config()).simulate_step(&step, &[], &mut host),
            Err(RinkError::Numerical(NumericalError::NonPhysical { .. }))
        ));
        assert!(host.heat_sources.is_empty());
    }

    proptest! {
        #[test]
        fn floor_is_never_heated(
            inlet in -15.0..10.0f64,
            setpoint in -10.0..5.0f64,
            node_flow in 0.0..60.0f64,
            outlet_control in any::<bool>(),
        ) {
            let kind = if outlet_control {
                ControlKind::OutletTemperature
            } else {
                ControlKind::SurfaceTemperature
            };
            let config = RinkSystemConfig {
                control: ControlStrategy {
                    kind,
                    setpoint: Setpoint::Scheduled(SETPOINT),
                },
                ..system_config()
            };
            let step = StepInput {
                inlet_mass_rate: flow(node_flow),
                ..input(inlet)
            };
            let mut host = running(setpoint);

            let outcome = system(config)
                .simulate_step(&step, &[], &mut host)
                .unwrap();
            let heat_source = outcome.state.heat_source;

            prop_assert!(heat_source.get::<watt>().is_finite());
            prop_assert!(outcome.state.mass_rate.get::<kilogram_per_second>().is_finite());
            prop_assert!(heat_source <= Power::ZERO);
            if heat_source == Power::ZERO {
                prop_assert_eq!(outcome.state.mass_rate, MassRate::ZERO);
            }
            prop_assert_eq!(host.heat_sources.len(), 1);
            prop_assert_eq!(host.heat_sources[0], (FLOOR, heat_source));
        }
    }
}
