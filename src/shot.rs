use nalgebra::Vector3;

use crate::dynamics::state::FlightState;

// ---------------------------------------------------------------------------
// Shot record: time-ordered flight history
// ---------------------------------------------------------------------------

/// The output of one simulated throw, one entry per recorded sample.
///
/// Built by the simulation loop and read-only afterwards. Time is strictly
/// increasing; for any throw with speed > 0 the last sample sits on the
/// ground.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotRecord {
    time: Vec<f64>,
    position: Vec<Vector3<f64>>,
    velocity: Vec<Vector3<f64>>,
    roll: Vec<f64>,
    pitch: Vec<f64>,
    spin: Vec<f64>,
    air_density: f64,
}

impl ShotRecord {
    pub(crate) fn with_capacity(capacity: usize, air_density: f64) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            position: Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
            roll: Vec::with_capacity(capacity),
            pitch: Vec::with_capacity(capacity),
            spin: Vec::with_capacity(capacity),
            air_density,
        }
    }

    pub(crate) fn push(&mut self, state: &FlightState) {
        self.time.push(state.time);
        self.position.push(state.pos);
        self.velocity.push(state.vel);
        self.roll.push(state.roll);
        self.pitch.push(state.pitch);
        self.spin.push(state.spin);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Sample times, s.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Positions, m (x forward, y left, z up).
    pub fn position(&self) -> &[Vector3<f64>] {
        &self.position
    }

    /// Velocities, m/s.
    pub fn velocity(&self) -> &[Vector3<f64>] {
        &self.velocity
    }

    /// Disc roll angles, rad.
    pub fn roll(&self) -> &[f64] {
        &self.roll
    }

    /// Disc pitch angles, rad (nose-up positive).
    pub fn pitch(&self) -> &[f64] {
        &self.pitch
    }

    /// Spin rates, rad/s.
    pub fn spin(&self) -> &[f64] {
        &self.spin
    }

    /// Air density the flight was integrated with, kg/m^3.
    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    /// Full state at sample `i`.
    pub fn state(&self, i: usize) -> Option<FlightState> {
        if i >= self.len() {
            return None;
        }
        Some(FlightState {
            time: self.time[i],
            pos: self.position[i],
            vel: self.velocity[i],
            roll: self.roll[i],
            pitch: self.pitch[i],
            spin: self.spin[i],
        })
    }

    pub fn states(&self) -> impl Iterator<Item = FlightState> + '_ {
        (0..self.len()).filter_map(move |i| self.state(i))
    }

    /// First sample (the release).
    pub fn release(&self) -> Option<FlightState> {
        self.state(0)
    }

    /// Last sample: the landing point for any throw with speed > 0.
    pub fn landing(&self) -> Option<FlightState> {
        self.len().checked_sub(1).and_then(|i| self.state(i))
    }
}
