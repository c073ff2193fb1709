use serde::{Deserialize, Serialize};

use crate::constants::ROCKET_STAGE;
use crate::control::config::SimulationConfig;
use crate::control::mission_phase::MissionPhase;

/// Immutable snapshot of one completed tick, handed to observers by value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TelemetryState {
    pub time: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub thrust: f64,
    pub fuel: f64,
    /// Always `dry_mass + fuel`; filled in when the snapshot is built.
    pub mass: f64,
    pub stage: u8,
    pub status: MissionPhase,
}

impl TelemetryState {
    pub fn initial(config: &SimulationConfig) -> Self {
        TelemetryState {
            time: 0.0,
            altitude: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
            thrust: 0.0,
            fuel: config.fuel_mass,
            mass: config.initial_mass(),
            stage: ROCKET_STAGE,
            status: MissionPhase::PreLaunch,
        }
    }

    pub fn launched(config: &SimulationConfig) -> Self {
        TelemetryState {
            status: MissionPhase::Ignition,
            ..Self::initial(config)
        }
    }
}

pub struct Telemetry {
    max_velocity: f64,
    max_altitude: f64,
    min_fuel: f64,
    max_acceleration: f64,
    state_times: Vec<(MissionPhase, f64)>,
    last: Option<TelemetryState>,
    samples: usize,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            max_velocity: 0.0,
            max_altitude: 0.0,
            min_fuel: f64::MAX,
            max_acceleration: 0.0,
            state_times: Vec::new(),
            last: None,
            samples: 0,
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn collect(&mut self, state: &TelemetryState) -> Option<MissionPhase> {
        self.samples += 1;
        self.max_velocity = self.max_velocity.max(state.velocity.abs());
        self.max_altitude = self.max_altitude.max(state.altitude);
        self.min_fuel = self.min_fuel.min(state.fuel);
        self.max_acceleration = self.max_acceleration.max(state.acceleration.abs());

        let entered = match self.state_times.last() {
            Some((last_phase, _)) if *last_phase == state.status => None,
            _ => {
                self.state_times.push((state.status, state.time));
                Some(state.status)
            }
        };
        self.last = Some(*state);
        entered
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    pub fn min_fuel(&self) -> Option<f64> {
        (self.samples > 0).then_some(self.min_fuel)
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn last(&self) -> Option<&TelemetryState> {
        self.last.as_ref()
    }

    pub fn state_times(&self) -> &[(MissionPhase, f64)] {
        &self.state_times
    }

    pub fn time_of(&self, phase: MissionPhase) -> Option<f64> {
        self.state_times
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, t)| *t)
    }

    pub fn summary(&self) -> String {
        let mut out = String::from("--- Simulation Summary ---\n");
        out += &format!("Samples: {}\n", self.samples);
        out += &format!("Max Velocity: {:.2} m/s\n", self.max_velocity);
        out += &format!("Max Altitude: {}\n", Self::format_altitude(self.max_altitude));
        out += &format!("Max Acceleration: {:.2} m/s²\n", self.max_acceleration);
        if let Some(min_fuel) = self.min_fuel() {
            out += &format!("Min Fuel: {:.2} kg\n", min_fuel);
        }
        if let Some(last) = &self.last {
            out += &format!(
                "Final: {} at {} (altitude {}, velocity {:.2} m/s)\n",
                last.status,
                Self::format_time(last.time),
                Self::format_altitude(last.altitude),
                last.velocity
            );
        }

        out += "\n--- State Transitions ---\n";
        for (phase, time) in &self.state_times {
            out += &format!("State {} reached at: {}\n", phase, Self::format_time(*time));
        }
        out
    }
}
