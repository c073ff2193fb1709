// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²

// Aerodynamic Constants
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const ATMOSPHERE_SCALE_HEIGHT: f64 = 8_500.0; // m
pub const ROCKET_DRAG_COEFFICIENT: f64 = 0.25;

// Vehicle Constants (single stage)
pub const ROCKET_DRY_MASS: f64 = 2_500.0; // kg
pub const ROCKET_FUEL_MASS: f64 = 18_000.0; // kg
pub const ROCKET_THRUST: f64 = 380_000.0; // N
pub const ROCKET_BURN_TIME: f64 = 55.0; // s
pub const ROCKET_STAGE: u8 = 1;

// Simulation Parameters
pub const TICK_INTERVAL_MS: u64 = 50; // 20 Hz
pub const MAX_SIMULATION_TIME: f64 = 86_400.0; // s, offline runs only
