//! Probe error types

use std::fmt;
use thiserror::Error;

/// Transient failure of a single probe on a single tick.
///
/// The aggregators log these and treat the probe as having reported nothing.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Temporary probe failure: {0}")]
    Temporary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    pub fn temporary(msg: impl Into<String>) -> Self {
        Self::Temporary(msg.into())
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;

/// Which capability a probe provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeRole {
    Activity,
    Wake,
}

impl fmt::Display for ProbeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeRole::Activity => write!(f, "activity"),
            ProbeRole::Wake => write!(f, "wakeup"),
        }
    }
}

/// Fatal error while turning configuration into probe instances
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Unknown {role} probe class '{class}'")]
    UnknownClass { role: ProbeRole, class: String },

    #[error("Class '{class}' is not a {expected} probe")]
    WrongRole { class: String, expected: ProbeRole },

    #[error("Probe '{name}': {message}")]
    InvalidOptions { name: String, message: String },

    #[error("No activity probes enabled")]
    NoActivityProbes,
}

impl SetupError {
    pub fn invalid_options(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            name: name.into(),
            message: message.into(),
        }
    }
}

pub type SetupResult<T> = Result<T, SetupError>;
