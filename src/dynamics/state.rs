use nalgebra::{UnitQuaternion, Vector3};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665; // standard gravity, m/s^2

// ---------------------------------------------------------------------------
// Flight state: position, velocity, disc attitude, spin
// ---------------------------------------------------------------------------

/// Disc state at a single point in time.
///
/// World frame: x forward along the throw line, y left, z up, origin on the
/// ground below the thrower. The disc's yaw about its own normal is not
/// tracked: an axisymmetric disc looks the same at every yaw.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    pub time: f64,         // s
    pub pos: Vector3<f64>, // m
    pub vel: Vector3<f64>, // m/s
    pub roll: f64,         // rad, about the forward axis, positive lifts the left edge
    pub pitch: f64,        // rad, nose-up positive
    pub spin: f64,         // rad/s about the disc normal, positive counter-clockwise from above
}

impl FlightState {
    /// Advance state by a derivative scaled by dt (used inside RK4).
    pub fn apply(&self, d: &Deriv, dt: f64) -> FlightState {
        FlightState {
            time: self.time + dt,
            pos: self.pos + d.dpos * dt,
            vel: self.vel + d.dvel * dt,
            roll: self.roll + d.droll * dt,
            pitch: self.pitch + d.dpitch * dt,
            spin: self.spin + d.dspin * dt,
        }
    }

    /// Disc → world rotation.
    pub fn attitude(&self) -> UnitQuaternion<f64> {
        // nalgebra pitch is about +y (left), which lowers the nose.
        UnitQuaternion::from_euler_angles(self.roll, -self.pitch, 0.0)
    }

    /// Disc normal (the spin axis) in the world frame.
    pub fn normal(&self) -> Vector3<f64> {
        self.attitude() * Vector3::z()
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.pos.iter().all(|c| c.is_finite())
            && self.vel.iter().all(|c| c.is_finite())
            && self.roll.is_finite()
            && self.pitch.is_finite()
            && self.spin.is_finite()
    }
}

// ---------------------------------------------------------------------------
// State derivative
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Deriv {
    pub dpos: Vector3<f64>, // velocity
    pub dvel: Vector3<f64>, // acceleration
    pub droll: f64,         // rad/s
    pub dpitch: f64,        // rad/s
    pub dspin: f64,         // rad/s^2
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Integration timestep, s.
    pub dt: f64,
    /// Hard cap on integration steps before the flight is abandoned.
    pub max_steps: usize,
    /// Course elevation above sea level, m. Sets the ISA air density.
    pub site_altitude: f64,
    /// Explicit air density, kg/m^3. Overrides `site_altitude` when set.
    pub air_density: Option<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.005,         // 200 Hz
            max_steps: 20_000, // 100 s of flight at the default dt
            site_altitude: 0.0,
            air_density: None,
        }
    }
}

impl SimConfig {
    /// Load a config from a YAML file. Missing keys take their defaults.
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&contents)
            .map_err(|e| crate::Error::InvalidConfig(format!("{}: {}", path.display(), e)))
    }
}
