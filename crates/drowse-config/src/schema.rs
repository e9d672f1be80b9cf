//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Timing settings and commands
    #[serde(default)]
    pub general: RawGeneralConfig,

    /// Activity probe sections (`[[activity]]`)
    #[serde(default)]
    pub activity: Vec<RawProbeSection>,

    /// Wake probe sections (`[[wakeup]]`)
    #[serde(default)]
    pub wakeup: Vec<RawProbeSection>,
}

/// The `[general]` table
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawGeneralConfig {
    /// Command that suspends the system (required)
    pub suspend_cmd: Option<String>,

    /// Template scheduling the wake-up; required when wake probes are enabled
    pub wakeup_cmd: Option<String>,

    /// Template run before suspending when a wake-up is scheduled
    pub notify_cmd_wakeup: Option<String>,

    /// Command run before suspending when no wake-up is scheduled
    pub notify_cmd_no_wakeup: Option<String>,

    /// Seconds of continuous inactivity before suspending (default 300)
    pub idle_time: Option<RawSeconds>,

    /// Skip suspending if the next wake-up is closer than this (default 1200)
    pub min_sleep_time: Option<RawSeconds>,

    /// Seconds to wake up before the requested time (default 30)
    pub wakeup_delta: Option<RawSeconds>,

    /// Seconds between checks (default 60)
    pub interval: Option<RawSeconds>,

    /// Marker file written by the resume hook
    pub woke_up_file: Option<PathBuf>,
}

/// A number of seconds: `300` or `300.0`; fractions are truncated
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawSeconds {
    Whole(u32),
    Fractional(f64),
}

impl RawSeconds {
    /// Whole seconds, or `None` if negative, not finite, or beyond `u32`
    pub fn whole_seconds(self) -> Option<u32> {
        match self {
            RawSeconds::Whole(secs) => Some(secs),
            RawSeconds::Fractional(secs)
                if secs.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&secs) =>
            {
                Some(secs.trunc() as u32)
            }
            RawSeconds::Fractional(_) => None,
        }
    }
}

/// One `[[activity]]` or `[[wakeup]]` section
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawProbeSection {
    /// Unique name within the role
    pub name: String,

    /// Registered probe class; defaults to `name`
    pub class: Option<String>,

    /// Disabled sections are ignored
    #[serde(default)]
    pub enabled: bool,

    /// Probe-specific options
    #[serde(flatten)]
    pub options: toml::Table,
}

impl RawProbeSection {
    /// The class to instantiate, falling back to the section name
    pub fn class_name(&self) -> &str {
        self.class.as_deref().unwrap_or(&self.name)
    }
}
