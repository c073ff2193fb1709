//! Command line driver for the flight simulator

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use crate::constants::MAX_SIMULATION_TIME;
use crate::control::{
    config::SimulationConfig, flight::Flight, mission_phase::MissionPhase,
    simulator::FlightSimulator,
};
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::{Telemetry, TelemetryState};
use crate::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "flight.toml";

/// Single-stage rocket flight telemetry simulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Tick at wall-clock cadence instead of as fast as possible
    #[arg(long)]
    pub realtime: bool,

    /// Write every snapshot to stdout as one JSON line
    #[arg(long)]
    pub json: bool,
}

fn record(
    telemetry: &mut Telemetry,
    state: &TelemetryState,
    json: Option<&mut (dyn Write + '_)>,
) -> Result<(), SimulationError> {
    if let Some(out) = json {
        serde_json::to_writer(&mut *out, state)?;
        writeln!(out)?;
    }
    if let Some(phase) = telemetry.collect(state) {
        info!("{} at t={:.2}s", phase, state.time);
    }
    Ok(())
}

/// Steps the flight as fast as possible until it lands or times out.
pub fn run_offline(
    config: SimulationConfig,
    mut json: Option<&mut dyn Write>,
) -> Result<Telemetry, SimulationError> {
    let mut flight = Flight::launched(config)?;
    let limit = config.max_mission_time.unwrap_or(MAX_SIMULATION_TIME);
    let mut telemetry = Telemetry::new();
    record(&mut telemetry, &flight.state(), json.as_deref_mut())?;

    while flight.time() < limit {
        let state = flight.step();
        record(&mut telemetry, &state, json.as_deref_mut())?;
        if state.status == MissionPhase::Landed {
            info!("Rocket has landed. Ending simulation.");
            return Ok(telemetry);
        }
    }

    warn!(
        "Mission time limit of {limit:.1}s reached in {}",
        flight.status()
    );
    Ok(telemetry)
}

/// Runs the wall-clock simulator and observes it like a display would.
pub async fn run_realtime(
    config: SimulationConfig,
    mut json: Option<&mut dyn Write>,
) -> Result<Telemetry, SimulationError> {
    let mut simulator = FlightSimulator::new(config)?;
    let mut updates = simulator.subscribe();
    let mut telemetry = Telemetry::new();

    simulator.launch();
    loop {
        let state = *updates.borrow_and_update();
        record(&mut telemetry, &state, json.as_deref_mut())?;
        if state.status == MissionPhase::Landed || !simulator.is_running() {
            break;
        }
        if updates.changed().await.is_err() {
            break;
        }
    }

    simulator.stop();
    Ok(telemetry)
}

pub async fn run(args: Args) -> Result<Telemetry, SimulationError> {
    let config = SimulationConfig::load_or_default(&args.config);
    let mut stdout = std::io::stdout().lock();
    let json: Option<&mut dyn Write> = if args.json { Some(&mut stdout) } else { None };

    if args.realtime {
        run_realtime(config, json).await
    } else {
        run_offline(config, json)
    }
}
