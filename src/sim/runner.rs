use nalgebra::Vector3;
use tracing::{debug, warn};

use super::integrator::rk4_step;
use super::landing;
use crate::dynamics::state::{FlightState, SimConfig};
use crate::error::{Error, Result};
use crate::physics::atmosphere;
use crate::profile::DiscProfile;
use crate::shot::ShotRecord;
use crate::throw::Throw;

/// Upper bound on the up-front record allocation.
const MAX_PREALLOCATED_SAMPLES: usize = 4096;

// ---------------------------------------------------------------------------
// Flight phases
// ---------------------------------------------------------------------------

/// Where the step loop stands. Every exit from the loop goes through one of
/// the terminal phases.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Flying,
    Landed,
    Diverged { step: usize, time: f64 },
    StepBudgetExceeded,
}

fn validate_config(config: &SimConfig) -> Result<()> {
    if !config.dt.is_finite() || config.dt <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "dt must be a positive number of seconds, got {}",
            config.dt
        )));
    }
    if config.max_steps == 0 {
        return Err(Error::InvalidConfig("max_steps must be at least 1".into()));
    }
    if !config.site_altitude.is_finite() {
        return Err(Error::InvalidConfig(format!(
            "site_altitude must be finite, got {}",
            config.site_altitude
        )));
    }
    if let Some(rho) = config.air_density {
        if !rho.is_finite() || rho <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "air_density must be positive, got {}",
                rho
            )));
        }
    }
    Ok(())
}

/// Air density used for the whole flight.
pub fn air_density(config: &SimConfig) -> f64 {
    config
        .air_density
        .unwrap_or_else(|| atmosphere::isa(config.site_altitude).density)
}

// ---------------------------------------------------------------------------
// Full flight simulation
// ---------------------------------------------------------------------------

/// Simulate one throw from release to landing.
///
/// A zero-speed throw returns just the release sample. A flight that
/// produces a non-finite state, or that is still airborne after
/// `config.max_steps` steps, is abandoned with an error and no partial
/// record.
pub fn simulate(profile: &DiscProfile, throw: &Throw, config: &SimConfig) -> Result<ShotRecord> {
    throw.validate()?;
    validate_config(config)?;

    let density = air_density(config);
    let mut state = throw.initial_state();
    debug!(
        disc = profile.key(),
        speed = throw.speed,
        spin = throw.spin_rate,
        pitch = throw.pitch,
        nose = throw.nose,
        roll = throw.roll,
        density,
        dt = config.dt,
        "simulating throw"
    );

    let capacity = (config.max_steps + 1).min(MAX_PREALLOCATED_SAMPLES);
    let mut record = ShotRecord::with_capacity(capacity, density);
    record.push(&state);

    if throw.speed == 0.0 {
        debug!("zero-speed throw, returning release sample only");
        return Ok(record);
    }

    let mut steps = 0usize;
    let mut phase = Phase::Flying;

    loop {
        match phase {
            Phase::Flying => {
                if steps >= config.max_steps {
                    phase = Phase::StepBudgetExceeded;
                    continue;
                }

                let next = rk4_step(&state, profile, density, config.dt);
                steps += 1;

                if !next.is_finite() {
                    phase = Phase::Diverged {
                        step: steps,
                        time: next.time,
                    };
                } else if landing::crosses_ground(&state, &next) {
                    record.push(&landing::touchdown(&state, &next));
                    phase = Phase::Landed;
                } else {
                    record.push(&next);
                    state = next;
                }
            }
            Phase::Landed => {
                if let Some(land) = record.landing() {
                    debug!(
                        steps,
                        flight_time = land.time,
                        x = land.pos.x,
                        y = land.pos.y,
                        "disc landed"
                    );
                }
                return Ok(record);
            }
            Phase::Diverged { step, time } => {
                warn!(disc = profile.key(), step, time, "integration diverged");
                return Err(Error::IntegrationDiverged { step, time });
            }
            Phase::StepBudgetExceeded => {
                warn!(
                    disc = profile.key(),
                    max_steps = config.max_steps,
                    altitude = state.pos.z,
                    "disc still airborne at step budget"
                );
                return Err(Error::IntegrationExceededStepBudget {
                    max_steps: config.max_steps,
                });
            }
        }
    }
}

/// Single-shot entry point with the default [`SimConfig`]. Angles in degrees.
pub fn shoot(
    profile: &DiscProfile,
    speed: f64,
    spin_rate: f64,
    position: Vector3<f64>,
    pitch: f64,
    nose: f64,
    roll: f64,
) -> Result<ShotRecord> {
    let throw = Throw {
        speed,
        spin_rate,
        position,
        pitch,
        nose,
        roll,
    };
    simulate(profile, &throw, &SimConfig::default())
}

/// Run a flight to the ground and hand back only the landing state.
pub fn landing_state(profile: &DiscProfile, throw: &Throw, config: &SimConfig) -> Result<FlightState> {
    let record = simulate(profile, throw, config)?;
    record
        .landing()
        .ok_or(Error::InsufficientSamples(record.len()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
