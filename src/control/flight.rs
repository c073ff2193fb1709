use crate::constants::ROCKET_STAGE;
use crate::errors::SimulationError;
use crate::event;
use crate::telemetry_system::telemetry::TelemetryState;
use crate::trajectory_system::{aerodynamics::Aerodynamics, kinematics::Kinematics};

use super::{config::SimulationConfig, mission_phase::MissionPhase, propulsion::PropulsionSystem};

#[derive(Debug, Clone)]
pub struct Flight {
    config: SimulationConfig,
    propulsion: PropulsionSystem,
    aerodynamics: Aerodynamics,
    kinematics: Kinematics,
    thrust: f64,
    time: f64,
    status: MissionPhase,
}

impl Flight {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Flight {
            propulsion: PropulsionSystem::from_config(&config),
            aerodynamics: Aerodynamics::new(config.drag_coefficient, config.air_density_sea_level),
            kinematics: Kinematics::default(),
            thrust: 0.0,
            time: 0.0,
            status: MissionPhase::PreLaunch,
            config,
        })
    }

    pub fn launched(config: SimulationConfig) -> Result<Self, SimulationError> {
        let mut flight = Self::new(config)?;
        flight.ignite();
        Ok(flight)
    }

    pub fn ignite(&mut self) {
        if self.status == MissionPhase::PreLaunch {
            self.status = MissionPhase::Ignition;
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn status(&self) -> MissionPhase {
        self.status
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn mass(&self) -> f64 {
        self.config.dry_mass + self.propulsion.fuel_mass
    }

    /// Builds the observer snapshot. Mass is derived here, never stored.
    pub fn state(&self) -> TelemetryState {
        TelemetryState {
            time: self.time,
            altitude: self.kinematics.altitude,
            velocity: self.kinematics.velocity,
            acceleration: self.kinematics.acceleration,
            thrust: self.thrust,
            fuel: self.propulsion.fuel_mass,
            mass: self.mass(),
            stage: ROCKET_STAGE,
            status: self.status,
        }
    }

    pub fn step(&mut self) -> TelemetryState {
        if self.status.is_terminal() {
            return self.state();
        }

        let dt = self.config.dt();
        let previous = self.state();

        if self.status != MissionPhase::PreLaunch {
            self.time += dt;
        }

        let mut status = self.status.next(&previous);
        self.thrust = if status.is_burning() {
            self.propulsion.burn(dt)
        } else {
            0.0
        };

        let mass = self.mass();
        let gravity_force = mass * self.config.gravity;
        let drag_force = self
            .aerodynamics
            .calculate_drag(previous.altitude, previous.velocity);
        let net_force = self.thrust - gravity_force + drag_force;
        let mut acceleration = net_force / mass;

        if self.kinematics.is_grounded()
            && self.thrust < gravity_force
            && self.kinematics.velocity <= 0.0
        {
            acceleration = 0.0;
            if status != MissionPhase::PreLaunch {
                status = MissionPhase::Landed;
            }
        }

        self.kinematics.update(dt, acceleration);
        self.status = status;

        let state = self.state();
        event!(
            "t={:.2}s {} alt={:.1}m vel={:.1}m/s fuel={:.1}kg",
            state.time,
            state.status,
            state.altitude,
            state.velocity,
            state.fuel
        );
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn launched_default() -> Flight {
        Flight::launched(SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            dry_mass: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Flight::new(config),
            Err(SimulationError::Configuration(_))
        ));
    }

    #[test]
    fn test_initial_snapshot() {
        let flight = Flight::new(SimulationConfig::default()).unwrap();
        assert_eq!(
            flight.state(),
            TelemetryState::initial(&SimulationConfig::default())
        );
        assert_eq!(
            launched_default().state(),
            TelemetryState::launched(&SimulationConfig::default())
        );
    }

    #[test]
    fn test_ignite_only_from_pad() {
        let mut flight = Flight::new(SimulationConfig::default()).unwrap();
        flight.ignite();
        assert_eq!(flight.status(), MissionPhase::Ignition);

        flight.step();
        flight.ignite();
        assert_eq!(flight.status(), MissionPhase::Ascent);
    }

    #[test]
    fn test_pre_launch_tick_holds_on_pad() {
        let mut flight = Flight::new(SimulationConfig::default()).unwrap();
        let state = flight.step();
        assert_eq!(state, TelemetryState::initial(&SimulationConfig::default()));
    }

    #[test]
    fn test_first_tick_ignites_and_lifts_off() {
        let mut flight = launched_default();
        let state = flight.step();

        let config = SimulationConfig::default();
        let fuel = 18_000.0 - config.burn_rate() * 0.05;
        let mass = 2_500.0 + fuel;
        let expected_acc = (380_000.0 - mass * 9.81) / mass;

        assert_eq!(state.status, MissionPhase::Ascent);
        assert_eq!(state.thrust, 380_000.0);
        assert_relative_eq!(state.time, 0.05);
        assert_relative_eq!(state.fuel, fuel, epsilon = 1e-9);
        assert_relative_eq!(state.acceleration, expected_acc, epsilon = 1e-9);
        assert_relative_eq!(state.velocity, expected_acc * 0.05, epsilon = 1e-9);
        assert_relative_eq!(state.altitude, expected_acc * 0.05 * 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_mass_tracks_fuel_exactly() {
        let mut flight = launched_default();
        for _ in 0..200 {
            let state = flight.step();
            assert_eq!(state.mass, 2_500.0 + state.fuel);
        }
    }

    #[test]
    fn test_engine_cuts_off_when_tanks_empty() {
        let config = SimulationConfig {
            fuel_mass: 100.0,
            burn_time: 1.0,
            ..Default::default()
        };
        let mut flight = Flight::launched(config).unwrap();

        let mut saw_meco = false;
        for _ in 0..40 {
            let state = flight.step();
            if state.status == MissionPhase::Meco {
                saw_meco = true;
                assert_eq!(state.thrust, 0.0);
                assert_eq!(state.fuel, 0.0);
            }
        }
        assert!(saw_meco);
    }

    #[test]
    fn test_without_thrust_vehicle_lands_on_pad() {
        let config = SimulationConfig {
            max_thrust: 0.0,
            ..Default::default()
        };
        let mut flight = Flight::launched(config).unwrap();
        let state = flight.step();

        assert_eq!(state.status, MissionPhase::Landed);
        assert_eq!(state.acceleration, 0.0);
        assert_eq!(state.altitude, 0.0);
        assert_eq!(state.velocity, 0.0);
    }

    #[test]
    fn test_landed_is_terminal() {
        let config = SimulationConfig {
            max_thrust: 0.0,
            ..Default::default()
        };
        let mut flight = Flight::launched(config).unwrap();
        let landed = flight.step();
        for _ in 0..10 {
            assert_eq!(flight.step(), landed);
        }
    }

    #[test]
    fn test_descent_lands_when_altitude_reaches_ground() {
        let config = SimulationConfig {
            fuel_mass: 50.0,
            burn_time: 0.5,
            ..Default::default()
        };
        let mut flight = Flight::launched(config).unwrap();

        let mut last = flight.state();
        for _ in 0..10_000 {
            last = flight.step();
            if last.status == MissionPhase::Landed {
                break;
            }
        }
        assert_eq!(last.status, MissionPhase::Landed);
        assert_eq!(last.altitude, 0.0);
        assert_eq!(last.acceleration, 0.0);
    }
}
