use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use nalgebra::Vector3;
use tracing::Level;

use disc_flight::io::json::FlightSummary;
use disc_flight::io::{csv, json};
use disc_flight::sim::air_density;
use disc_flight::{derive, simulate, DiscProfile, ProfileRegistry, SimConfig, Throw};

#[derive(Parser)]
#[command(author, version, about = "Simulate one disc-golf throw from release to landing")]
struct Cli {
    /// Disc profile key (cd1, cd5, dd2, fd2 or a file stem in --profile-dir)
    #[arg(long, default_value = "cd1")]
    disc: String,

    /// Release speed, m/s
    #[arg(long, default_value_t = 24.2)]
    speed: f64,

    /// Spin rate, rad/s (positive = counter-clockwise seen from above)
    #[arg(long, default_value_t = 116.8, allow_negative_numbers = true)]
    spin: f64,

    /// Release height, m
    #[arg(long, default_value_t = 1.3)]
    height: f64,

    /// Launch angle of the velocity, deg
    #[arg(long, default_value_t = 15.5)]
    pitch: f64,

    /// Nose angle relative to the velocity, deg
    #[arg(long, default_value_t = 0.0)]
    nose: f64,

    /// Roll angle, deg (positive lifts the left edge)
    #[arg(long, default_value_t = 14.7, allow_negative_numbers = true)]
    roll: f64,

    /// Override the disc mass, kg
    #[arg(long)]
    mass: Option<f64>,

    /// Integration timestep, s (overrides --config)
    #[arg(long)]
    dt: Option<f64>,

    /// Directory of <key>.yaml profiles to use instead of the bundled discs
    #[arg(long)]
    profile_dir: Option<PathBuf>,

    /// YAML simulation config (dt, max_steps, site_altitude, air_density)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the trajectory and diagnostics to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the flight summary to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let registry = match &cli.profile_dir {
        Some(dir) => ProfileRegistry::from_dir(dir)
            .with_context(|| format!("loading profiles from {}", dir.display()))?,
        None => ProfileRegistry::builtin()?,
    };
    let mut profile = registry.get(&cli.disc)?;
    if let Some(mass) = cli.mass {
        profile = std::sync::Arc::new(profile.with_mass(mass)?);
    }

    let mut config = match &cli.config {
        Some(path) => SimConfig::from_yaml_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(dt) = cli.dt {
        config.dt = dt;
    }

    let throw = Throw::new(cli.speed, cli.spin)
        .position(Vector3::new(0.0, 0.0, cli.height))
        .pitch(cli.pitch)
        .nose(cli.nose)
        .roll(cli.roll);

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let shot = simulate(&profile, &throw, &config)?;
    let summary = FlightSummary::from_shot(&shot).context("empty shot record")?;

    print_report(&profile, &throw, &config, &summary);

    if shot.len() < 2 {
        println!("  Zero-speed throw: nothing to plot.");
        println!();
        return Ok(());
    }

    let derived = derive(&profile, &shot, throw.spin_rate)?;
    print_trajectory(&shot, &derived);

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------
    if let Some(path) = &cli.csv {
        csv::write_trajectory_file(path, &shot, Some(&derived))
            .with_context(|| format!("writing {}", path.display()))?;
        println!("  Exported trajectory: {}", path.display());
    }
    if let Some(path) = &cli.json {
        json::write_summary_file(path, &profile, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("  Exported summary:    {}", path.display());
    }

    Ok(())
}

fn print_report(profile: &DiscProfile, throw: &Throw, config: &SimConfig, summary: &FlightSummary) {
    println!();
    println!("====================================================================");
    println!("  DISC FLIGHT: {} ({})", profile.name(), profile.key());
    println!("====================================================================");
    println!();
    println!("  Disc");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.3} kg    Diameter:     {:>8.3} m",
        profile.mass(),
        profile.diameter()
    );
    println!(
        "  Area:          {:>8.4} m^2   Spin inertia: {:>8.2e} kg m^2",
        profile.area(),
        profile.spin_inertia()
    );
    println!();

    println!("  Release");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Speed:         {:>8.1} m/s   Spin:         {:>8.1} rad/s",
        throw.speed, throw.spin_rate
    );
    println!(
        "  Height:        {:>8.2} m     Pitch:        {:>8.1} deg",
        throw.position.z, throw.pitch
    );
    println!(
        "  Nose:          {:>8.1} deg   Roll:         {:>8.1} deg",
        throw.nose, throw.roll
    );
    println!(
        "  Air density:   {:>8.4} kg/m^3  dt:         {:>8.4} s",
        air_density(config),
        config.dt
    );
    println!();

    println!("  Flight");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  APEX      t={:>5.2}s   height={:>6.2}m",
        summary.apex_time_s, summary.apex_m
    );
    println!(
        "  LANDING   t={:>5.2}s   distance={:>6.1}m   drift={:>+6.1}m   speed={:>5.1}m/s",
        summary.flight_time_s, summary.distance_m, summary.lateral_m, summary.landing_speed_ms
    );
    println!(
        "  Spin:     {:>6.1} -> {:>6.1} rad/s",
        summary.release_spin_rad_s, summary.landing_spin_rad_s
    );
    println!();
}

fn print_trajectory(shot: &disc_flight::ShotRecord, derived: &disc_flight::DerivedQuantities) {
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>6}  {:>7}  {:>7}  {:>6}  {:>6}  {:>6}  {:>6}  {:>7}",
        "t (s)", "x (m)", "y (m)", "z (m)", "alpha", "L (N)", "D (N)", "roll(d)"
    );
    println!("  {}", "─".repeat(64));

    let sample_interval = (shot.len() / 25).max(1);
    for (i, s) in shot.states().enumerate() {
        if i % sample_interval != 0 && i != shot.len() - 1 {
            continue;
        }
        println!(
            "  {:>6.2}  {:>7.2}  {:>7.2}  {:>6.2}  {:>6.1}  {:>6.2}  {:>6.2}  {:>7.1}",
            s.time,
            s.pos.x,
            s.pos.y,
            s.pos.z,
            derived.alpha[i],
            derived.lift[i],
            derived.drag[i],
            s.roll.to_degrees(),
        );
    }

    println!();
    println!(
        "  Simulation: {} samples, path length {:.1} m",
        shot.len(),
        derived.total_arc_length()
    );
    println!("====================================================================");
    println!();
}
