use thiserror::Error;

/// Every way a profile load, a simulation or a post-processing call can fail.
///
/// Nothing in the crate retries; each variant aborts the call that raised it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no disc profile named `{0}`")]
    ProfileNotFound(String),

    #[error("malformed disc profile `{key}`: {reason}")]
    ProfileMalformed { key: String, reason: String },

    #[error("invalid throw parameters: {0}")]
    InvalidThrowParameters(String),

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("integration diverged at step {step} (t = {time:.4} s)")]
    IntegrationDiverged { step: usize, time: f64 },

    #[error("integration exceeded the step budget of {max_steps} steps")]
    IntegrationExceededStepBudget { max_steps: usize },

    #[error("post-processing needs at least 2 samples, got {0}")]
    InsufficientSamples(usize),
}

impl Error {
    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        Error::ProfileMalformed {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
