use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AIR_DENSITY_SEA_LEVEL, GRAVITY, ROCKET_BURN_TIME, ROCKET_DRAG_COEFFICIENT, ROCKET_DRY_MASS,
    ROCKET_FUEL_MASS, ROCKET_THRUST, TICK_INTERVAL_MS,
};
use crate::errors::SimulationError;
use crate::{info, warn};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    pub gravity: f64,
    pub dry_mass: f64,
    pub fuel_mass: f64,
    pub max_thrust: f64,
    pub burn_time: f64,
    pub drag_coefficient: f64,
    pub air_density_sea_level: f64,
    /// Mission time after which the tick loop gives up. `None` runs until landing.
    pub max_mission_time: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            gravity: GRAVITY,
            dry_mass: ROCKET_DRY_MASS,
            fuel_mass: ROCKET_FUEL_MASS,
            max_thrust: ROCKET_THRUST,
            burn_time: ROCKET_BURN_TIME,
            drag_coefficient: ROCKET_DRAG_COEFFICIENT,
            air_density_sea_level: AIR_DENSITY_SEA_LEVEL,
            max_mission_time: None,
        }
    }
}

impl SimulationConfig {
    pub fn burn_rate(&self) -> f64 {
        self.fuel_mass / self.burn_time
    }

    pub fn dt(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn initial_mass(&self) -> f64 {
        self.dry_mass + self.fuel_mass
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms must be greater than zero"));
        }

        let fields = [
            ("gravity", self.gravity),
            ("dry_mass", self.dry_mass),
            ("fuel_mass", self.fuel_mass),
            ("max_thrust", self.max_thrust),
            ("burn_time", self.burn_time),
            ("drag_coefficient", self.drag_coefficient),
            ("air_density_sea_level", self.air_density_sea_level),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(invalid(&format!("{name} must be finite, got {value}")));
            }
        }

        if self.dry_mass <= 0.0 {
            return Err(invalid(&format!(
                "dry_mass must be positive, got {}",
                self.dry_mass
            )));
        }
        if self.burn_time <= 0.0 {
            return Err(invalid(&format!(
                "burn_time must be positive, got {}",
                self.burn_time
            )));
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("fuel_mass", self.fuel_mass),
            ("max_thrust", self.max_thrust),
            ("drag_coefficient", self.drag_coefficient),
            ("air_density_sea_level", self.air_density_sea_level),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(invalid(&format!("{name} must not be negative, got {value}")));
            }
        }

        if let Some(cutoff) = self.max_mission_time {
            if !cutoff.is_finite() || cutoff <= 0.0 {
                return Err(invalid(&format!(
                    "max_mission_time must be positive, got {cutoff}"
                )));
            }
        }

        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| SimulationError::ConfigLoad {
                path: path.to_path_buf(),
                source,
            })?;
        let config: Self =
            toml::from_str(&content).map_err(|source| SimulationError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(SimulationError::ConfigLoad { path, .. }) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{e}. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimulationError> {
        let path = path.as_ref();
        let save_error = |reason: String| SimulationError::ConfigSave {
            path: path.to_path_buf(),
            reason,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_error(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_error(e.to_string()))
    }
}

fn invalid(reason: &str) -> SimulationError {
    SimulationError::Configuration(reason.to_string())
}
