pub mod config;
pub mod flight;
pub mod mission_phase;
pub mod propulsion;
pub mod simulator;
