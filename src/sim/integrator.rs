use crate::dynamics;
use crate::dynamics::state::FlightState;
use crate::profile::DiscProfile;

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta step
// ---------------------------------------------------------------------------

/// Single RK4 step: advance state by dt.
pub fn rk4_step(state: &FlightState, profile: &DiscProfile, density: f64, dt: f64) -> FlightState {
    let k1 = dynamics::derivatives(state, profile, density);
    let k2 = dynamics::derivatives(&state.apply(&k1, dt * 0.5), profile, density);
    let k3 = dynamics::derivatives(&state.apply(&k2, dt * 0.5), profile, density);
    let k4 = dynamics::derivatives(&state.apply(&k3, dt), profile, density);

    FlightState {
        time: state.time + dt,
        pos: state.pos + (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * (dt / 6.0),
        vel: state.vel + (k1.dvel + 2.0 * k2.dvel + 2.0 * k3.dvel + k4.dvel) * (dt / 6.0),
        roll: state.roll + (k1.droll + 2.0 * k2.droll + 2.0 * k3.droll + k4.droll) * (dt / 6.0),
        pitch: state.pitch
            + (k1.dpitch + 2.0 * k2.dpitch + 2.0 * k3.dpitch + k4.dpitch) * (dt / 6.0),
        spin: state.spin + (k1.dspin + 2.0 * k2.dspin + 2.0 * k3.dspin + k4.dspin) * (dt / 6.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::G0;
    use crate::profile::ProfileRegistry;
    use nalgebra::Vector3;

    #[test]
    fn dropped_disc_falls_like_a_rock_at_first() {
        let reg = ProfileRegistry::builtin().unwrap();
        let p = reg.get("cd1").unwrap();
        let s0 = FlightState {
            time: 0.0,
            pos: Vector3::new(0.0, 0.0, 10.0),
            vel: Vector3::zeros(),
            roll: 0.0,
            pitch: 0.0,
            spin: 0.0,
        };
        let dt = 0.01;
        let s1 = rk4_step(&s0, &p, 1.225, dt);
        // Drag on a 0.05 m/s fall is negligible over one step.
        let expected = 10.0 - 0.5 * G0 * dt * dt;
        assert!((s1.pos.z - expected).abs() < 1e-6);
        assert!((s1.time - dt).abs() < 1e-15);
    }
}
