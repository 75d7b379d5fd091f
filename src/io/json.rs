use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::profile::DiscProfile;
use crate::shot::ShotRecord;

/// Summary statistics computed from a shot record.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub distance_m: f64,      // horizontal, release to landing
    pub lateral_m: f64,       // landing y minus release y, positive left
    pub apex_m: f64,
    pub apex_time_s: f64,
    pub flight_time_s: f64,
    pub max_speed_ms: f64,
    pub landing_speed_ms: f64,
    pub release_spin_rad_s: f64,
    pub landing_spin_rad_s: f64,
}

impl FlightSummary {
    /// Compute summary from a shot record. `None` for an empty record.
    pub fn from_shot(shot: &ShotRecord) -> Option<Self> {
        let release = shot.release()?;
        let landing = shot.landing()?;

        let (apex_idx, apex_m) = shot
            .position()
            .iter()
            .map(|p| p.z)
            .enumerate()
            .fold((0, f64::MIN), |best, (i, z)| if z > best.1 { (i, z) } else { best });

        let max_speed_ms = shot
            .velocity()
            .iter()
            .map(|v| v.norm())
            .fold(0.0_f64, f64::max);

        let delta = landing.pos - release.pos;
        Some(FlightSummary {
            distance_m: delta.x.hypot(delta.y),
            lateral_m: delta.y,
            apex_m,
            apex_time_s: shot.time()[apex_idx],
            flight_time_s: landing.time - release.time,
            max_speed_ms,
            landing_speed_ms: landing.vel.norm(),
            release_spin_rad_s: release.spin,
            landing_spin_rad_s: landing.spin,
        })
    }
}

#[derive(Serialize)]
struct DiscInfo<'a> {
    key: &'a str,
    name: &'a str,
    mass_kg: f64,
    diameter_m: f64,
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    disc: DiscInfo<'a>,
    flight: &'a FlightSummary,
}

/// Write flight summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(
    writer: W,
    profile: &DiscProfile,
    summary: &FlightSummary,
) -> serde_json::Result<()> {
    let doc = SummaryDocument {
        disc: DiscInfo {
            key: profile.key(),
            name: profile.name(),
            mass_kg: profile.mass(),
            diameter_m: profile.diameter(),
        },
        flight: summary,
    };
    serde_json::to_writer_pretty(writer, &doc)
}

/// Write flight summary JSON to a file.
pub fn write_summary_file<P: AsRef<Path>>(
    path: P,
    profile: &DiscProfile,
    summary: &FlightSummary,
) -> std::io::Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_summary(std::io::BufWriter::new(file), profile, summary).map_err(std::io::Error::from)
}
