use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};

use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::TelemetryState;
use crate::{info, warn};

use super::{config::SimulationConfig, flight::Flight, mission_phase::MissionPhase};

/// At most one tick loop exists per simulator. Every command that replaces
/// the state first retires the running loop: its task is aborted and the run
/// epoch is bumped, so a loop caught mid-tick can no longer publish.
pub struct FlightSimulator {
    config: SimulationConfig,
    pad: Flight,
    runtime: Handle,
    state_tx: Arc<watch::Sender<TelemetryState>>,
    epoch: Arc<AtomicU64>,
    ticker: Option<JoinHandle<()>>,
}

impl FlightSimulator {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let pad = Flight::new(config)?;
        let runtime = Handle::try_current().map_err(|_| SimulationError::RuntimeUnavailable)?;
        let (state_tx, _) = watch::channel(TelemetryState::initial(&config));

        Ok(FlightSimulator {
            config,
            pad,
            runtime,
            state_tx: Arc::new(state_tx),
            epoch: Arc::new(AtomicU64::new(0)),
            ticker: None,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Latest published snapshot. Never waits on the tick loop.
    pub fn state(&self) -> TelemetryState {
        *self.state_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TelemetryState> {
        self.state_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn launch(&mut self) {
        let epoch = self.retire_ticker();
        let mut flight = self.pad.clone();
        flight.ignite();
        self.state_tx.send_replace(flight.state());
        info!("Launch commanded, ticking every {} ms", self.config.tick_interval_ms);

        let state_tx = Arc::clone(&self.state_tx);
        let current_epoch = Arc::clone(&self.epoch);
        self.ticker = Some(self.runtime.spawn(run_ticks(
            flight,
            state_tx,
            current_epoch,
            epoch,
        )));
    }

    pub fn reset(&mut self) {
        self.retire_ticker();
        self.state_tx.send_replace(TelemetryState::initial(&self.config));
        info!("Simulation reset");
    }

    pub fn stop(&mut self) {
        self.retire_ticker();
    }

    fn retire_ticker(&mut self) -> u64 {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        epoch
    }
}

impl Drop for FlightSimulator {
    fn drop(&mut self) {
        self.retire_ticker();
    }
}

async fn run_ticks(
    mut flight: Flight,
    state_tx: Arc<watch::Sender<TelemetryState>>,
    current_epoch: Arc<AtomicU64>,
    epoch: u64,
) {
    let period = flight.config().tick_interval();
    let cutoff = flight.config().max_mission_time;
    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;
        let previous_status = flight.status();
        let state = flight.step();

        // The epoch check runs under the channel's write lock, so a reset or
        // relaunch that has already bumped the epoch always wins.
        let published = state_tx.send_if_modified(|current| {
            if current_epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            *current = state;
            true
        });
        if !published {
            return;
        }

        if state.status != previous_status {
            info!(
                "{} at t={:.2}s, altitude {:.1} m",
                state.status,
                state.time,
                state.altitude
            );
        }
        if state.status == MissionPhase::Landed {
            info!("Vehicle landed at t={:.2}s, tick loop finished", state.time);
            return;
        }
        if let Some(limit) = cutoff {
            if state.time >= limit {
                warn!(
                    "Mission time limit of {limit:.1}s reached in {}, tick loop stopped",
                    state.status
                );
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_requires_runtime() {
        assert!(matches!(
            FlightSimulator::new(SimulationConfig::default()),
            Err(SimulationError::RuntimeUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            burn_time: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            FlightSimulator::new(config),
            Err(SimulationError::Configuration(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_until_launch() {
        let sim = FlightSimulator::new(SimulationConfig::default()).unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(!sim.is_running());
        assert_eq!(sim.state(), TelemetryState::initial(sim.config()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_launch_publishes_ignition_immediately() {
        let mut sim = FlightSimulator::new(SimulationConfig::default()).unwrap();
        sim.launch();

        assert!(sim.is_running());
        assert_eq!(sim.state(), TelemetryState::launched(sim.config()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_every_tick() {
        let mut sim = FlightSimulator::new(SimulationConfig::default()).unwrap();
        sim.launch();
        let mut rx = sim.subscribe();

        for _ in 0..5 {
            rx.changed().await.unwrap();
            let state = *rx.borrow_and_update();
            assert_eq!(state.status, MissionPhase::Ascent);
            assert_eq!(state.mass, state.fuel + 2_500.0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_state() {
        let mut sim = FlightSimulator::new(SimulationConfig::default()).unwrap();
        sim.launch();
        tokio::time::sleep(Duration::from_millis(510)).await;

        sim.stop();
        let frozen = sim.state();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(!sim.is_running());
        assert_eq!(sim.state(), frozen);
        assert!(frozen.time > 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_stops_at_mission_cutoff() {
        let config = SimulationConfig {
            max_mission_time: Some(1.0),
            ..Default::default()
        };
        let mut sim = FlightSimulator::new(config).unwrap();
        sim.launch();
        tokio::time::sleep(Duration::from_secs(3)).await;

        let state = sim.state();
        assert!(!sim.is_running());
        assert!((1.0..1.06).contains(&state.time), "time {}", state.time);
        assert_eq!(state.status, MissionPhase::Ascent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_ticker() {
        let mut sim = FlightSimulator::new(SimulationConfig::default()).unwrap();
        let rx = sim.subscribe();
        sim.launch();
        drop(sim);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(rx.borrow().time, 0.0);
    }
}
