//! Validated settings structures

use crate::schema::{RawConfig, RawGeneralConfig, RawProbeSection, RawSeconds};
use crate::template::CommandTemplate;
use crate::validation::ValidationError;
use crate::{ConfigError, ConfigResult};
use chrono::TimeDelta;
use drowse_probe_api::ProbeOptions;
use drowse_util::default_woke_up_file;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_IDLE_TIME_SECS: u32 = 300;
pub const DEFAULT_MIN_SLEEP_TIME_SECS: u32 = 1200;
pub const DEFAULT_WAKEUP_DELTA_SECS: u32 = 30;
pub const DEFAULT_INTERVAL_SECS: u32 = 60;

/// Validated settings ready for use by the daemon
#[derive(Debug, Clone)]
pub struct Settings {
    pub general: GeneralSettings,
    pub commands: CommandSettings,

    /// Enabled activity probes, in file order
    pub activities: Vec<ProbeSpec>,

    /// Enabled wake probes, in file order
    pub wakeups: Vec<ProbeSpec>,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> ConfigResult<Self> {
        let commands = CommandSettings::from_raw(&raw.general)?;

        Ok(Self {
            general: GeneralSettings::from_raw(&raw.general),
            commands,
            activities: enabled_specs("activity", raw.activity),
            wakeups: enabled_specs("wakeup", raw.wakeup),
        })
    }
}

/// Timing parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralSettings {
    pub idle_time: TimeDelta,
    pub min_sleep_time: TimeDelta,
    pub wakeup_delta: TimeDelta,
    pub interval: Duration,
    pub woke_up_file: PathBuf,
}

impl GeneralSettings {
    fn from_raw(raw: &RawGeneralConfig) -> Self {
        Self {
            idle_time: seconds(whole_or(raw.idle_time, DEFAULT_IDLE_TIME_SECS)),
            min_sleep_time: seconds(whole_or(raw.min_sleep_time, DEFAULT_MIN_SLEEP_TIME_SECS)),
            wakeup_delta: seconds(whole_or(raw.wakeup_delta, DEFAULT_WAKEUP_DELTA_SECS)),
            interval: Duration::from_secs(u64::from(whole_or(raw.interval, DEFAULT_INTERVAL_SECS))),
            woke_up_file: raw
                .woke_up_file
                .clone()
                .unwrap_or_else(default_woke_up_file),
        }
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self::from_raw(&RawGeneralConfig::default())
    }
}

/// External commands run around suspension
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSettings {
    pub suspend: String,
    pub wakeup: Option<CommandTemplate>,
    pub notify_wakeup: Option<CommandTemplate>,
    pub notify_no_wakeup: Option<String>,
}

impl CommandSettings {
    fn from_raw(raw: &RawGeneralConfig) -> ConfigResult<Self> {
        Ok(Self {
            suspend: raw.suspend_cmd.clone().unwrap_or_default(),
            wakeup: template("wakeup_cmd", &raw.wakeup_cmd)?,
            notify_wakeup: template("notify_cmd_wakeup", &raw.notify_cmd_wakeup)?,
            notify_no_wakeup: raw.notify_cmd_no_wakeup.clone(),
        })
    }
}

/// An enabled probe section
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSpec {
    pub name: String,
    pub class: String,
    pub options: ProbeOptions,
}

fn enabled_specs(role: &str, sections: Vec<RawProbeSection>) -> Vec<ProbeSpec> {
    sections
        .into_iter()
        .filter(|section| {
            if !section.enabled {
                debug!(role, name = %section.name, "Skipping disabled probe");
            }
            section.enabled
        })
        .map(|section| ProbeSpec {
            class: section.class_name().to_string(),
            name: section.name,
            options: ProbeOptions::new(section.options),
        })
        .collect()
}

fn template(field: &str, value: &Option<String>) -> ConfigResult<Option<CommandTemplate>> {
    value
        .as_deref()
        .map(CommandTemplate::parse)
        .transpose()
        .map_err(|error| ConfigError::ValidationFailed {
            errors: vec![ValidationError::InvalidTemplate {
                field: field.into(),
                error,
            }],
        })
}

fn whole_or(value: Option<RawSeconds>, default: u32) -> u32 {
    value.and_then(RawSeconds::whole_seconds).unwrap_or(default)
}

fn seconds(secs: u32) -> TimeDelta {
    TimeDelta::seconds(i64::from(secs))
}
