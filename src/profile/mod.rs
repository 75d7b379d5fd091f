//! Disc aerodynamic profiles: mass, geometry and coefficient tables.

pub mod coefficients;
pub mod registry;

use std::f64::consts::PI;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

pub use coefficients::{AeroCoefficients, CoefficientTable};
pub use registry::ProfileRegistry;

/// Spin-damping coefficient used when a profile does not specify one.
pub const DEFAULT_SPIN_DAMPING: f64 = 0.002;

/// On-disk layout of a profile resource (`<key>.yaml`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileConfig {
    name: String,
    mass: f64,     // kg
    diameter: f64, // m
    #[serde(default)]
    spin_inertia: Option<f64>, // kg·m^2
    #[serde(default)]
    spin_damping: Option<f64>,
    /// Rows of `[alpha_deg, cl, cd, cm]`.
    coefficients: Vec<[f64; 4]>,
}

/// Immutable description of one disc.
#[derive(Debug, Clone)]
pub struct DiscProfile {
    key: String,
    name: String,
    mass: f64,         // kg
    diameter: f64,     // m
    area: f64,         // m^2, planform reference area
    spin_inertia: f64, // kg·m^2, about the disc normal
    spin_damping: f64,
    table: CoefficientTable,
}

impl DiscProfile {
    /// Parse and validate a YAML profile resource.
    pub fn from_yaml_str(key: &str, yaml: &str) -> Result<Self> {
        let config: ProfileConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::malformed(key, e.to_string()))?;
        Self::from_config(key, config)
    }

    /// Load a profile from a YAML file; the key is the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let key = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ProfileNotFound(key.clone())
            } else {
                Error::malformed(&key, format!("failed to read {}: {}", path.display(), e))
            }
        })?;
        Self::from_yaml_str(&key, &contents)
    }

    fn from_config(key: &str, config: ProfileConfig) -> Result<Self> {
        let positive = |what: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(v)
            } else {
                Err(Error::malformed(key, format!("{} must be positive, got {}", what, v)))
            }
        };

        let mass = positive("mass", config.mass)?;
        let diameter = positive("diameter", config.diameter)?;
        let spin_inertia = match config.spin_inertia {
            Some(i) => positive("spin_inertia", i)?,
            None => thin_disc_inertia(mass, diameter),
        };
        let spin_damping = config.spin_damping.unwrap_or(DEFAULT_SPIN_DAMPING);
        if !spin_damping.is_finite() || spin_damping < 0.0 {
            return Err(Error::malformed(
                key,
                format!("spin_damping must be non-negative, got {}", spin_damping),
            ));
        }
        let table = CoefficientTable::from_rows_deg(&config.coefficients)
            .map_err(|reason| Error::malformed(key, reason))?;

        Ok(Self {
            key: key.to_string(),
            name: config.name,
            mass,
            diameter,
            area: PI * diameter * diameter / 4.0,
            spin_inertia,
            spin_damping,
            table,
        })
    }

    /// Same disc at a different mass. The spin inertia scales with it.
    pub fn with_mass(&self, mass: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::malformed(
                &self.key,
                format!("mass must be positive, got {}", mass),
            ));
        }
        Ok(Self {
            mass,
            spin_inertia: self.spin_inertia * mass / self.mass,
            ..self.clone()
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn spin_inertia(&self) -> f64 {
        self.spin_inertia
    }

    pub fn spin_damping(&self) -> f64 {
        self.spin_damping
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    /// (CL, CD, CM) at angle of attack `alpha` (rad). Pure; clamped outside
    /// the tabulated range.
    pub fn aero_coefficients(&self, alpha: f64) -> AeroCoefficients {
        self.table.eval(alpha)
    }
}

/// Uniform thin disc about its normal: m·r²/2.
fn thin_disc_inertia(mass: f64, diameter: f64) -> f64 {
    mass * diameter * diameter / 8.0
}

/// Load `<dir>/<key>.yaml`.
pub fn load<P: AsRef<Path>>(dir: P, key: &str) -> Result<DiscProfile> {
    let path = dir.as_ref().join(format!("{}.yaml", key));
    if !path.is_file() {
        return Err(Error::ProfileNotFound(key.to_string()));
    }
    DiscProfile::from_file(path)
}
