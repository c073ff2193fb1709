use super::config::SimulationConfig;

#[derive(Debug, Clone, Copy)]
pub struct PropulsionSystem {
    pub max_thrust: f64,
    pub fuel_mass: f64,
    pub fuel_burn_rate: f64,
}

impl PropulsionSystem {
    pub fn new(max_thrust: f64, initial_fuel_mass: f64, burn_rate: f64) -> Self {
        PropulsionSystem {
            max_thrust,
            fuel_mass: initial_fuel_mass,
            fuel_burn_rate: burn_rate,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.max_thrust, config.fuel_mass, config.burn_rate())
    }

    /// Full thrust is delivered for the whole step whenever the tanks held
    /// propellant at its start, even if this step empties them.
    pub fn burn(&mut self, delta_time: f64) -> f64 {
        if self.is_out_of_fuel() {
            return 0.0;
        }

        self.fuel_mass = (self.fuel_mass - self.fuel_burn_rate * delta_time).max(0.0);
        self.max_thrust
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.fuel_mass <= 0.0
    }
}
