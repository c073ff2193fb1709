use crate::constants::ATMOSPHERE_SCALE_HEIGHT;

#[derive(Debug, Clone, Copy)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
    pub air_density_sea_level: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64, air_density_sea_level: f64) -> Self {
        Aerodynamics {
            drag_coefficient,
            air_density_sea_level,
        }
    }

    pub fn air_density(&self, altitude: f64) -> f64 {
        self.air_density_sea_level * (-altitude / ATMOSPHERE_SCALE_HEIGHT).exp()
    }

    pub fn calculate_drag(&self, altitude: f64, velocity: f64) -> f64 {
        let direction = if velocity > 0.0 { -1.0 } else { 1.0 };
        self.calculate_dynamic_pressure(altitude, velocity) * self.drag_coefficient * direction
    }

    fn calculate_dynamic_pressure(&self, altitude: f64, velocity: f64) -> f64 {
        0.5 * self.air_density(altitude) * velocity.powi(2)
    }
}
