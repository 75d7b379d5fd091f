use nalgebra::Vector3;

use crate::dynamics::state::FlightState;

/// Bisection iterations on the step fraction; 2^-60 is below f64 resolution
/// for any sane dt.
const BISECTION_ITERS: usize = 60;

// ---------------------------------------------------------------------------
// Ground contact
// ---------------------------------------------------------------------------

/// True when the step from `prev` to `next` crosses the ground from above.
pub fn crosses_ground(prev: &FlightState, next: &FlightState) -> bool {
    prev.pos.z >= 0.0 && next.pos.z < 0.0
}

/// State at the instant the disc reaches z = 0 inside the step `prev → next`.
///
/// Height and horizontal position follow the cubic Hermite interpolant
/// built from positions and velocities at both ends; the crossing fraction
/// is found by bisection. Velocity, attitude and spin are interpolated
/// linearly at that fraction. A step that starts exactly on the ground is
/// clamped to its end point.
pub fn touchdown(prev: &FlightState, next: &FlightState) -> FlightState {
    let dt = next.time - prev.time;
    let s = if prev.pos.z > 0.0 {
        crossing_fraction(prev, next, dt)
    } else {
        1.0
    };

    let lerp = |a: f64, b: f64| a + (b - a) * s;
    let mut pos = Vector3::from_fn(|i, _| {
        hermite(prev.pos[i], next.pos[i], prev.vel[i] * dt, next.vel[i] * dt, s)
    });
    pos.z = 0.0;

    FlightState {
        time: lerp(prev.time, next.time),
        pos,
        vel: prev.vel + (next.vel - prev.vel) * s,
        roll: lerp(prev.roll, next.roll),
        pitch: lerp(prev.pitch, next.pitch),
        spin: lerp(prev.spin, next.spin),
    }
}

fn crossing_fraction(prev: &FlightState, next: &FlightState, dt: f64) -> f64 {
    let z = |s: f64| {
        hermite(
            prev.pos.z,
            next.pos.z,
            prev.vel.z * dt,
            next.vel.z * dt,
            s,
        )
    };

    // z(0) > 0 and z(1) < 0 by construction.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..BISECTION_ITERS {
        let mid = 0.5 * (lo + hi);
        if z(mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

/// Cubic Hermite on the unit interval; `m0`, `m1` are end slopes already
/// scaled by the interval length.
fn hermite(p0: f64, p1: f64, m0: f64, m1: f64, s: f64) -> f64 {
    let s2 = s * s;
    let s3 = s2 * s;
    (2.0 * s3 - 3.0 * s2 + 1.0) * p0
        + (s3 - 2.0 * s2 + s) * m0
        + (-2.0 * s3 + 3.0 * s2) * p1
        + (s3 - s2) * m1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(t: f64, x: f64, z: f64, vx: f64, vz: f64) -> FlightState {
        FlightState {
            time: t,
            pos: Vector3::new(x, 0.0, z),
            vel: Vector3::new(vx, 0.0, vz),
            roll: 0.1,
            pitch: 0.2,
            spin: 100.0,
        }
    }

    #[test]
    fn detects_downward_crossing_only() {
        let above = state(0.0, 0.0, 0.5, 10.0, -5.0);
        let below = state(0.1, 1.0, -0.1, 10.0, -5.0);
        assert!(crosses_ground(&above, &below));
        assert!(!crosses_ground(&below, &above));
        assert!(!crosses_ground(&above, &above));
    }

    #[test]
    fn linear_descent_lands_at_exact_point() {
        // z = 0.5 - 5t, x = 10t: ground at t = 0.1, x = 1.0.
        let prev = state(0.0, 0.0, 0.5, 10.0, -5.0);
        let next = state(0.2, 2.0, -0.5, 10.0, -5.0);
        let land = touchdown(&prev, &next);
        assert_eq!(land.pos.z, 0.0);
        assert!((land.time - 0.1).abs() < 1e-12);
        assert!((land.pos.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ballistic_arc_is_captured_exactly() {
        // z = 1 - 5t^2 (cubic Hermite is exact for quadratics): lands at t = sqrt(0.2).
        let z = |t: f64| 1.0 - 5.0 * t * t;
        let prev = state(0.4, 0.0, z(0.4), 0.0, -10.0 * 0.4);
        let next = state(0.5, 0.0, z(0.5), 0.0, -10.0 * 0.5);
        let land = touchdown(&prev, &next);
        assert!((land.time - 0.2_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn step_starting_on_ground_is_clamped() {
        let prev = state(0.0, 0.0, 0.0, 10.0, 0.0);
        let next = state(0.01, 0.1, -0.0005, 10.0, -0.1);
        let land = touchdown(&prev, &next);
        assert_eq!(land.time, 0.01);
        assert_eq!(land.pos.z, 0.0);
        assert!((land.pos.x - 0.1).abs() < 1e-12);
    }
}
