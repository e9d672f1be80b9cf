//! Idle-tracking state

use chrono::{DateTime, Utc};
use tracing::info;

/// The only state carried between ticks: when continuous idleness began.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdleState {
    idle_since: Option<DateTime<Utc>>,
}

impl IdleState {
    /// Start out active (not idle)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out idle since `since`
    pub fn idle_since_at(since: DateTime<Utc>) -> Self {
        Self {
            idle_since: Some(since),
        }
    }

    pub fn idle_since(&self) -> Option<DateTime<Utc>> {
        self.idle_since
    }

    pub fn is_idle(&self) -> bool {
        self.idle_since.is_some()
    }

    /// Record idleness at `now` unless already idle; returns the anchor
    pub(crate) fn mark_idle(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        *self.idle_since.get_or_insert(now)
    }

    pub(crate) fn reset(&mut self, reason: &str) {
        info!(reason, "Resetting idle state");
        self.idle_since = None;
    }
}
