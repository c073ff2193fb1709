#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    pub altitude: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl Kinematics {
    pub fn new(altitude: f64, velocity: f64) -> Self {
        Kinematics {
            altitude,
            velocity,
            acceleration: 0.0,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.altitude <= 0.0
    }

    /// Semi-implicit Euler step: velocity first, then altitude from the new
    /// velocity, clamped at the ground.
    pub fn update(&mut self, delta_time: f64, acceleration: f64) {
        self.acceleration = acceleration;
        self.velocity += acceleration * delta_time;
        self.altitude = (self.altitude + self.velocity * delta_time).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_update_uses_new_velocity_for_position() {
        let mut k = Kinematics::new(0.0, 0.0);
        k.update(0.5, 10.0);
        assert_relative_eq!(k.velocity, 5.0);
        assert_relative_eq!(k.altitude, 2.5);
        assert_eq!(k.acceleration, 10.0);
    }

    #[test]
    fn test_altitude_clamped_at_ground() {
        let mut k = Kinematics::new(1.0, -100.0);
        k.update(0.1, -9.81);
        assert_eq!(k.altitude, 0.0);
        assert!(k.velocity < -100.0);
        assert!(k.is_grounded());
    }
}
