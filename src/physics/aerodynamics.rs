use nalgebra::{UnitQuaternion, Vector3};

use crate::profile::{AeroCoefficients, DiscProfile};

/// Below this airspeed the disc carries no aerodynamic load.
const MIN_AIRSPEED: f64 = 1e-9;

/// Flow angles of the relative wind in the disc frame, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowAngles {
    /// Angle of attack: positive when the air strikes the underside.
    pub alpha: f64,
    /// Sideslip: heading of the in-plane velocity from the disc's forward axis.
    pub beta: f64,
}

/// Aerodynamic loads on the disc at one instant.
#[derive(Debug, Clone)]
pub struct DiscLoads {
    pub angles: FlowAngles,
    pub coefficients: AeroCoefficients,
    pub dynamic_pressure: f64,   // Pa
    pub lift: Vector3<f64>,      // N, world frame
    pub drag: Vector3<f64>,      // N, world frame
    pub moment: Vector3<f64>,    // N·m, disc frame
}

impl DiscLoads {
    /// Signed lift magnitude (N): q·S·CL.
    pub fn lift_force(&self, area: f64) -> f64 {
        self.dynamic_pressure * area * self.coefficients.cl
    }

    /// Drag magnitude (N): q·S·CD.
    pub fn drag_force(&self, area: f64) -> f64 {
        self.dynamic_pressure * area * self.coefficients.cd
    }

    /// Signed pitching moment (N·m): q·S·d·CM, positive nose-up.
    pub fn pitching_moment(&self, area: f64, diameter: f64) -> f64 {
        self.dynamic_pressure * area * diameter * self.coefficients.cm
    }
}

/// Angle of attack and sideslip from the disc-frame air velocity.
pub fn flow_angles(vel_disc: &Vector3<f64>) -> FlowAngles {
    let in_plane = vel_disc.x.hypot(vel_disc.y);
    if in_plane < MIN_AIRSPEED && vel_disc.z.abs() < MIN_AIRSPEED {
        return FlowAngles { alpha: 0.0, beta: 0.0 };
    }
    FlowAngles {
        alpha: (-vel_disc.z).atan2(in_plane),
        beta: vel_disc.y.atan2(vel_disc.x),
    }
}

/// Lift, drag and pitching moment for a disc moving at `vel` (world frame,
/// still air) with attitude `attitude` (disc → world).
///
///   drag   = -q·S·CD · v̂
///   lift   =  q·S·CL · l̂,  l̂ = unit(n - (n·v̂)v̂), n the disc normal
///   moment = -q·S·d·CM · ŷ_w (disc frame), ŷ_w the in-plane axis
///            perpendicular to the relative wind
pub fn disc_loads(
    vel: &Vector3<f64>,
    attitude: &UnitQuaternion<f64>,
    density: f64,
    profile: &DiscProfile,
) -> DiscLoads {
    let speed = vel.norm();
    let vel_disc = attitude.inverse() * vel;
    let angles = flow_angles(&vel_disc);
    let coefficients = profile.aero_coefficients(angles.alpha);

    if speed < MIN_AIRSPEED {
        return DiscLoads {
            angles,
            coefficients,
            dynamic_pressure: 0.0,
            lift: Vector3::zeros(),
            drag: Vector3::zeros(),
            moment: Vector3::zeros(),
        };
    }

    let q_dyn = 0.5 * density * speed * speed;
    let qs = q_dyn * profile.area();
    let v_hat = vel / speed;

    let drag = -v_hat * (qs * coefficients.cd);

    let normal = attitude * Vector3::z();
    let lift_dir = normal - v_hat * normal.dot(&v_hat);
    let lift = match lift_dir.try_normalize(1e-12) {
        Some(dir) => dir * (qs * coefficients.cl),
        None => Vector3::zeros(),
    };

    let (sin_b, cos_b) = angles.beta.sin_cos();
    let wind_lateral = Vector3::new(-sin_b, cos_b, 0.0);
    let moment = -wind_lateral * (qs * profile.diameter() * coefficients.cm);

    DiscLoads {
        angles,
        coefficients,
        dynamic_pressure: q_dyn,
        lift,
        drag,
        moment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileRegistry;

    fn level() -> UnitQuaternion<f64> {
        UnitQuaternion::identity()
    }

    #[test]
    fn descending_flight_has_positive_alpha() {
        let a = flow_angles(&Vector3::new(10.0, 0.0, -1.0));
        assert!(a.alpha > 0.0);
        assert!(a.beta.abs() < 1e-12);
    }

    #[test]
    fn sideslip_follows_in_plane_heading() {
        let a = flow_angles(&Vector3::new(1.0, 1.0, 0.0));
        assert!((a.beta - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn drag_opposes_velocity() {
        let reg = ProfileRegistry::builtin().unwrap();
        let p = reg.get("cd1").unwrap();
        let vel = Vector3::new(20.0, 0.0, 0.0);
        let loads = disc_loads(&vel, &level(), 1.225, &p);
        assert!(loads.drag.x < 0.0);
        assert!(loads.drag.cross(&vel).norm() < 1e-9);
    }

    #[test]
    fn lift_is_perpendicular_to_velocity() {
        let reg = ProfileRegistry::builtin().unwrap();
        let p = reg.get("cd1").unwrap();
        let vel = Vector3::new(20.0, 0.0, -3.0);
        let loads = disc_loads(&vel, &level(), 1.225, &p);
        assert!(loads.lift.dot(&vel).abs() < 1e-9);
        assert!(loads.lift.z > 0.0, "positive alpha lifts the disc");
    }

    #[test]
    fn no_loads_at_rest() {
        let reg = ProfileRegistry::builtin().unwrap();
        let p = reg.get("cd1").unwrap();
        let loads = disc_loads(&Vector3::zeros(), &level(), 1.225, &p);
        assert_eq!(loads.lift.norm() + loads.drag.norm() + loads.moment.norm(), 0.0);
        assert_eq!(loads.angles, FlowAngles { alpha: 0.0, beta: 0.0 });
    }

    #[test]
    fn nose_up_moment_is_about_negative_lateral_axis() {
        let reg = ProfileRegistry::builtin().unwrap();
        let p = reg.get("cd1").unwrap();
        // 20 deg alpha: cd1 has a positive (nose-up) CM there.
        let vel = Vector3::new(20.0, 0.0, -20.0 * 20.0_f64.to_radians().tan());
        let loads = disc_loads(&vel, &level(), 1.225, &p);
        assert!(loads.coefficients.cm > 0.0);
        assert!(loads.moment.y < 0.0);
        assert!(loads.moment.x.abs() < 1e-12);
        let m = loads.pitching_moment(p.area(), p.diameter());
        assert!((loads.moment.norm() - m).abs() < 1e-12);
    }
}
