pub mod cli;
pub mod constants;
pub mod control;
pub mod errors;
pub mod logger;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use control::config::SimulationConfig;
pub use control::flight::Flight;
pub use control::mission_phase::MissionPhase;
pub use control::propulsion::PropulsionSystem;
pub use control::simulator::FlightSimulator;
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::{aerodynamics::Aerodynamics, kinematics::Kinematics};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{Telemetry, TelemetryState};
