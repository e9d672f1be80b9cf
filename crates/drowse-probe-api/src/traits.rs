//! Probe capability traits

use chrono::{DateTime, Utc};

use crate::ProbeResult;

/// A check answering "is the system in use right now".
pub trait ActivityProbe: Send + Sync {
    /// Configured name, unique among activity probes
    fn name(&self) -> &str;

    /// Returns a human-readable reason if the system is active, `None` if
    /// this probe saw no activity.
    fn check(&self) -> ProbeResult<Option<String>>;
}

/// A check answering "when must the system next be awake".
pub trait WakeProbe: Send + Sync {
    /// Configured name, unique among wake probes
    fn name(&self) -> &str;

    /// Returns the earliest instant the system must be awake, if known.
    ///
    /// Implementations are expected to return instants after `now`; the
    /// aggregator discards anything else.
    fn check(&self, now: DateTime<Utc>) -> ProbeResult<Option<DateTime<Utc>>>;
}
