use nalgebra::Vector3;

use crate::dynamics::state::{Deriv, FlightState, G0};
use crate::physics::aerodynamics;
use crate::profile::DiscProfile;

/// Regularisation spin for the gyroscopic inverse, rad/s. Well below any
/// thrown disc; keeps a non-spinning disc from dividing by zero.
const SPIN_REGULARISATION: f64 = 1.0;

/// Floor on |cos(roll)| in the attitude kinematics (gimbal-lock guard).
const MIN_COS_ROLL: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Disc equations of motion
// ---------------------------------------------------------------------------

/// Compute flight state derivatives.
///
/// Forces & moments:
///   1. Gravity, uniform
///   2. Lift and drag from the profile's coefficient tables
///   3. Pitching moment, turned into attitude change by gyroscopic precession
///   4. Spin-down torque, linear in spin and airspeed
pub fn derivatives(state: &FlightState, profile: &DiscProfile, density: f64) -> Deriv {
    let attitude = state.attitude();
    let loads = aerodynamics::disc_loads(&state.vel, &attitude, density, profile);

    // --- Translational ---
    let gravity = Vector3::new(0.0, 0.0, -G0);
    let accel = (loads.lift + loads.drag) / profile.mass() + gravity;

    // --- Attitude: precession of the spin axis ---
    let (p, q) = precession_rates(&loads.moment, state.spin, profile.spin_inertia());
    let cos_roll = state.roll.cos();
    let cos_roll = if cos_roll.abs() < MIN_COS_ROLL {
        MIN_COS_ROLL.copysign(cos_roll)
    } else {
        cos_roll
    };

    // --- Spin decay ---
    let d = profile.diameter();
    let speed = state.vel.norm();
    let dspin = -profile.spin_damping() * density * speed * profile.area() * d * d * state.spin
        / (4.0 * profile.spin_inertia());

    Deriv {
        dpos: state.vel,
        dvel: accel,
        droll: p,
        dpitch: -q / cos_roll,
        dspin,
    }
}

/// Disc-frame roll and pitch rates (p, q) produced by a disc-frame moment.
///
/// The spin angular momentum H = I_z·ω·n dominates, so dH/dt = M moves the
/// normal rather than spinning the disc up: ṅ = M⊥ / (I_z·ω). With ṅ = Ω × n
/// this gives q = M_x / (I_z·ω) and p = -M_y / (I_z·ω). The inverse spin is
/// regularised as ω / (ω² + ω_r²).
pub fn precession_rates(moment: &Vector3<f64>, spin: f64, spin_inertia: f64) -> (f64, f64) {
    let k = spin / (spin_inertia * (spin * spin + SPIN_REGULARISATION * SPIN_REGULARISATION));
    (-moment.y * k, moment.x * k)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileRegistry;
    use std::sync::Arc;

    fn firebird() -> Arc<DiscProfile> {
        ProfileRegistry::builtin().unwrap().get("cd1").unwrap()
    }

    fn cruising(spin: f64) -> FlightState {
        FlightState {
            time: 0.0,
            pos: Vector3::new(0.0, 0.0, 2.0),
            vel: Vector3::new(20.0, 0.0, -5.0),
            roll: 0.0,
            pitch: 0.0,
            spin,
        }
    }

    #[test]
    fn free_fall_at_rest() {
        let p = firebird();
        let mut s = cruising(0.0);
        s.vel = Vector3::zeros();
        let d = derivatives(&s, &p, 1.225);
        assert!((d.dvel - Vector3::new(0.0, 0.0, -G0)).norm() < 1e-12);
        assert_eq!(d.droll, 0.0);
        assert_eq!(d.dspin, 0.0);
    }

    #[test]
    fn lift_counteracts_gravity_in_glide() {
        let p = firebird();
        let d = derivatives(&cruising(100.0), &p, 1.225);
        assert!(d.dvel.z > -G0, "lift should reduce the net fall rate");
        assert!(d.dvel.x < 0.0, "drag should slow the disc");
    }

    #[test]
    fn spin_decays_toward_zero() {
        let p = firebird();
        let up = derivatives(&cruising(100.0), &p, 1.225);
        let down = derivatives(&cruising(-100.0), &p, 1.225);
        assert!(up.dspin < 0.0);
        assert!(down.dspin > 0.0);
        assert!((up.dspin + down.dspin).abs() < 1e-12);
    }

    #[test]
    fn spin_direction_sets_roll_direction() {
        let p = firebird();
        // Descending at ~14 deg alpha: nose-up moment, so the disc rolls.
        let ccw = derivatives(&cruising(100.0), &p, 1.225);
        let cw = derivatives(&cruising(-100.0), &p, 1.225);
        assert!(ccw.droll.abs() > 1e-3);
        assert!((ccw.droll + cw.droll).abs() < 1e-12);
    }

    #[test]
    fn non_spinning_disc_holds_attitude() {
        let p = firebird();
        let d = derivatives(&cruising(0.0), &p, 1.225);
        assert_eq!(d.droll, 0.0);
        assert_eq!(d.dpitch, 0.0);
    }

    #[test]
    fn faster_spin_precesses_slower() {
        let m = Vector3::new(0.0, -0.1, 0.0);
        let (p_slow, _) = precession_rates(&m, 50.0, 1e-3);
        let (p_fast, _) = precession_rates(&m, 150.0, 1e-3);
        assert!(p_slow > p_fast && p_fast > 0.0);
    }
}
