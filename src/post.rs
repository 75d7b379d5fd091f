//! Per-sample aerodynamic diagnostics recomputed from a finished shot.

use crate::dynamics::precession_rates;
use crate::error::{Error, Result};
use crate::physics::aerodynamics::disc_loads;
use crate::profile::DiscProfile;
use crate::shot::ShotRecord;

/// Diagnostics aligned sample-for-sample with a [`ShotRecord`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedQuantities {
    /// Distance flown along the 3-D path, m. Starts at zero.
    pub arc_length: Vec<f64>,
    /// Angle of attack, deg.
    pub alpha: Vec<f64>,
    /// Sideslip angle, deg.
    pub beta: Vec<f64>,
    /// Signed lift, N.
    pub lift: Vec<f64>,
    /// Drag, N.
    pub drag: Vec<f64>,
    /// Pitching moment, N·m, positive nose-up.
    pub moment: Vec<f64>,
    /// Roll rate of the disc attitude, rad/s.
    pub roll_rate: Vec<f64>,
    /// Recorded spin as a fraction of the release spin.
    pub spin_ratio: Vec<f64>,
}

impl DerivedQuantities {
    pub fn len(&self) -> usize {
        self.arc_length.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arc_length.is_empty()
    }

    /// Total path length, m.
    pub fn total_arc_length(&self) -> f64 {
        self.arc_length.last().copied().unwrap_or(0.0)
    }
}

/// Recompute flow angles, loads and roll rate at every sample of `shot`.
///
/// Loads come from the same profile evaluation the integrator uses, at the
/// air density the shot was flown in. The roll rate is the precession rate
/// produced by the sample's pitching moment at that sample's recorded spin;
/// nothing is integrated here.
pub fn derive(profile: &DiscProfile, shot: &ShotRecord, spin_rate: f64) -> Result<DerivedQuantities> {
    let n = shot.len();
    if n < 2 {
        return Err(Error::InsufficientSamples(n));
    }
    if !spin_rate.is_finite() {
        return Err(Error::InvalidThrowParameters(format!(
            "release spin rate must be finite, got {}",
            spin_rate
        )));
    }

    let mut out = DerivedQuantities {
        arc_length: Vec::with_capacity(n),
        alpha: Vec::with_capacity(n),
        beta: Vec::with_capacity(n),
        lift: Vec::with_capacity(n),
        drag: Vec::with_capacity(n),
        moment: Vec::with_capacity(n),
        roll_rate: Vec::with_capacity(n),
        spin_ratio: Vec::with_capacity(n),
    };

    let (area, diameter) = (profile.area(), profile.diameter());
    let mut arc = 0.0;
    let mut prev_pos = shot.position()[0];

    for state in shot.states() {
        arc += (state.pos - prev_pos).norm();
        prev_pos = state.pos;

        let loads = disc_loads(&state.vel, &state.attitude(), shot.air_density(), profile);
        let (p, _) = precession_rates(&loads.moment, state.spin, profile.spin_inertia());

        out.arc_length.push(arc);
        out.alpha.push(loads.angles.alpha.to_degrees());
        out.beta.push(loads.angles.beta.to_degrees());
        out.lift.push(loads.lift_force(area));
        out.drag.push(loads.drag_force(area));
        out.moment.push(loads.pitching_moment(area, diameter));
        out.roll_rate.push(p);
        out.spin_ratio.push(if spin_rate == 0.0 {
            0.0
        } else {
            state.spin / spin_rate
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::SimConfig;
    use crate::profile::ProfileRegistry;
    use crate::sim::simulate;
    use crate::throw::Throw;

    fn flown() -> (std::sync::Arc<DiscProfile>, ShotRecord) {
        let p = ProfileRegistry::builtin().unwrap().get("cd1").unwrap();
        let rec = simulate(&p, &Throw::default(), &SimConfig::default()).unwrap();
        (p, rec)
    }

    #[test]
    fn arrays_match_record_length() {
        let (p, rec) = flown();
        let d = derive(&p, &rec, 116.8).unwrap();
        assert_eq!(d.len(), rec.len());
        for v in [&d.alpha, &d.beta, &d.lift, &d.drag, &d.moment, &d.roll_rate, &d.spin_ratio] {
            assert_eq!(v.len(), rec.len());
        }
    }

    #[test]
    fn arc_length_starts_at_zero_and_grows() {
        let (p, rec) = flown();
        let d = derive(&p, &rec, 116.8).unwrap();
        assert_eq!(d.arc_length[0], 0.0);
        assert!(d.arc_length.windows(2).all(|w| w[1] >= w[0]));
        let land = rec.landing().unwrap();
        let start = rec.release().unwrap();
        assert!(d.total_arc_length() >= (land.pos - start.pos).norm());
    }

    #[test]
    fn release_alpha_equals_nose_angle_without_roll() {
        let p = ProfileRegistry::builtin().unwrap().get("cd1").unwrap();
        let t = Throw::default().roll(0.0).nose(3.0);
        let rec = simulate(&p, &t, &SimConfig::default()).unwrap();
        let d = derive(&p, &rec, t.spin_rate).unwrap();
        assert!((d.alpha[0] - 3.0).abs() < 1e-9);
        assert!(d.beta[0].abs() < 1e-9);
    }

    #[test]
    fn drag_is_positive_and_spin_decays() {
        let (p, rec) = flown();
        let d = derive(&p, &rec, 116.8).unwrap();
        assert!(d.drag.iter().all(|&f| f > 0.0));
        assert!((d.spin_ratio[0] - 1.0).abs() < 1e-12);
        let last = *d.spin_ratio.last().unwrap();
        assert!(last < 1.0 && last > 0.0);
    }

    #[test]
    fn single_sample_record_is_rejected() {
        let p = ProfileRegistry::builtin().unwrap().get("cd1").unwrap();
        let rec = simulate(&p, &Throw::default().speed(0.0), &SimConfig::default()).unwrap();
        assert_eq!(rec.len(), 1);
        assert!(matches!(derive(&p, &rec, 116.8), Err(Error::InsufficientSamples(1))));
    }

    #[test]
    fn zero_release_spin_gives_zero_ratio() {
        let (p, rec) = flown();
        let d = derive(&p, &rec, 0.0).unwrap();
        assert!(d.spin_ratio.iter().all(|&r| r == 0.0));
    }
}
