use nalgebra::Vector3;

use crate::dynamics::state::FlightState;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Release conditions
// ---------------------------------------------------------------------------

/// Conditions at the moment the disc leaves the hand. Angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Throw {
    pub speed: f64,             // m/s, along the throw line
    pub spin_rate: f64,         // rad/s, positive counter-clockwise seen from above
    pub position: Vector3<f64>, // m, z = release height
    pub pitch: f64,             // deg, launch angle of the velocity above horizontal
    pub nose: f64,              // deg, disc nose-up relative to the velocity
    pub roll: f64,              // deg, positive lifts the left edge
}

impl Default for Throw {
    /// A solid backhand drive at shoulder height.
    fn default() -> Self {
        Self {
            speed: 24.2,
            spin_rate: 116.8,
            position: Vector3::new(0.0, 0.0, 1.3),
            pitch: 15.5,
            nose: 0.0,
            roll: 14.7,
        }
    }
}

impl Throw {
    pub fn new(speed: f64, spin_rate: f64) -> Self {
        Self {
            speed,
            spin_rate,
            ..Self::default()
        }
    }

    pub fn speed(mut self, v: f64) -> Self { self.speed = v; self }
    pub fn spin_rate(mut self, v: f64) -> Self { self.spin_rate = v; self }
    pub fn position(mut self, v: Vector3<f64>) -> Self { self.position = v; self }
    pub fn height(mut self, v: f64) -> Self { self.position.z = v; self }
    pub fn pitch(mut self, v: f64) -> Self { self.pitch = v; self }
    pub fn nose(mut self, v: f64) -> Self { self.nose = v; self }
    pub fn roll(mut self, v: f64) -> Self { self.roll = v; self }

    /// Reject release conditions outside the physical range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidThrowParameters(msg));

        if !self.speed.is_finite() || self.speed < 0.0 {
            return invalid(format!("speed must be >= 0 m/s, got {}", self.speed));
        }
        if !self.spin_rate.is_finite() {
            return invalid(format!("spin rate must be finite, got {}", self.spin_rate));
        }
        if self.position.iter().any(|c| !c.is_finite()) {
            return invalid(format!("release position must be finite, got {:?}", self.position));
        }
        if self.position.z < 0.0 {
            return invalid(format!(
                "release height must be >= 0 m, got {}",
                self.position.z
            ));
        }
        check_angle("pitch", self.pitch, 0.0, 90.0)?;
        check_angle("nose", self.nose, 0.0, 90.0)?;
        check_angle("roll", self.roll, -90.0, 90.0)?;
        Ok(())
    }

    /// Flight state at release: velocity along the launch angle, disc
    /// pitched `nose` degrees above it and rolled by `roll`.
    pub fn initial_state(&self) -> FlightState {
        let launch = self.pitch.to_radians();
        FlightState {
            time: 0.0,
            pos: self.position,
            vel: Vector3::new(launch.cos(), 0.0, launch.sin()) * self.speed,
            roll: self.roll.to_radians(),
            pitch: (self.pitch + self.nose).to_radians(),
            spin: self.spin_rate,
        }
    }
}

fn check_angle(name: &str, value: f64, lo: f64, hi: f64) -> Result<()> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidThrowParameters(format!(
            "{} angle must be within [{}, {}] deg, got {}",
            name, lo, hi, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::aerodynamics::flow_angles;

    #[test]
    fn default_throw_is_valid() {
        assert!(Throw::default().validate().is_ok());
    }

    #[test]
    fn negative_speed_rejected() {
        let err = Throw::default().speed(-1.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidThrowParameters(_)));
    }

    #[test]
    fn angles_out_of_range_rejected() {
        assert!(Throw::default().pitch(91.0).validate().is_err());
        assert!(Throw::default().nose(-0.5).validate().is_err());
        assert!(Throw::default().roll(-90.5).validate().is_err());
        assert!(Throw::default().roll(-90.0).validate().is_ok());
        assert!(Throw::default().pitch(f64::NAN).validate().is_err());
    }

    #[test]
    fn below_ground_release_rejected() {
        assert!(Throw::default().height(-0.1).validate().is_err());
        assert!(Throw::default().height(0.0).validate().is_ok());
    }

    #[test]
    fn nose_angle_is_release_angle_of_attack() {
        let s = Throw::default().roll(0.0).nose(4.0).initial_state();
        let vel_disc = s.attitude().inverse() * s.vel;
        let a = flow_angles(&vel_disc);
        assert!((a.alpha.to_degrees() - 4.0).abs() < 1e-9);
        assert!((s.vel.norm() - 24.2).abs() < 1e-12);
    }
}
