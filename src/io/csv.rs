use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::post::DerivedQuantities;
use crate::shot::ShotRecord;

/// One CSV row. Derived columns are left empty when no diagnostics are given.
#[derive(Serialize)]
struct Row {
    time: f64,
    pos_x: f64,
    pos_y: f64,
    pos_z: f64,
    vel_x: f64,
    vel_y: f64,
    vel_z: f64,
    roll_deg: f64,
    pitch_deg: f64,
    spin: f64,
    arc_length: Option<f64>,
    alpha_deg: Option<f64>,
    beta_deg: Option<f64>,
    lift: Option<f64>,
    drag: Option<f64>,
    moment: Option<f64>,
    roll_rate: Option<f64>,
}

/// Write the shot (and optionally its diagnostics) as CSV, one row per sample.
/// `derived` must come from the same shot.
pub fn write_trajectory<W: Write>(
    writer: W,
    shot: &ShotRecord,
    derived: Option<&DerivedQuantities>,
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for (i, s) in shot.states().enumerate() {
        wtr.serialize(Row {
            time: s.time,
            pos_x: s.pos.x,
            pos_y: s.pos.y,
            pos_z: s.pos.z,
            vel_x: s.vel.x,
            vel_y: s.vel.y,
            vel_z: s.vel.z,
            roll_deg: s.roll.to_degrees(),
            pitch_deg: s.pitch.to_degrees(),
            spin: s.spin,
            arc_length: derived.map(|d| d.arc_length[i]),
            alpha_deg: derived.map(|d| d.alpha[i]),
            beta_deg: derived.map(|d| d.beta[i]),
            lift: derived.map(|d| d.lift[i]),
            drag: derived.map(|d| d.drag[i]),
            moment: derived.map(|d| d.moment[i]),
            roll_rate: derived.map(|d| d.roll_rate[i]),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the shot to a CSV file at the given path.
pub fn write_trajectory_file<P: AsRef<Path>>(
    path: P,
    shot: &ShotRecord,
    derived: Option<&DerivedQuantities>,
) -> csv::Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_trajectory(file, shot, derived)
}
