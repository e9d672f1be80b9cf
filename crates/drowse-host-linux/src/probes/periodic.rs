//! Fixed-interval wake-ups

use chrono::{DateTime, TimeDelta, Utc};
use drowse_probe_api::{
    ProbeError, ProbeOptions, ProbeResult, SetupError, SetupResult, WakeProbe,
};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl PeriodUnit {
    fn seconds(self) -> i64 {
        match self {
            PeriodUnit::Seconds => 1,
            PeriodUnit::Minutes => 60,
            PeriodUnit::Hours => 3600,
            PeriodUnit::Days => 86_400,
            PeriodUnit::Weeks => 604_800,
        }
    }
}

const MAX_PERIOD_SECS: i64 = 100 * 366 * 86_400;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PeriodicOptions {
    unit: PeriodUnit,
    value: u32,
}

/// Always requests a wake-up a fixed period after the query time
#[derive(Debug)]
pub struct Periodic {
    name: String,
    period: TimeDelta,
}

impl Periodic {
    pub fn new(name: impl Into<String>, period: TimeDelta) -> Self {
        Self {
            name: name.into(),
            period,
        }
    }

    pub fn create(name: &str, options: &ProbeOptions) -> SetupResult<Self> {
        let opts: PeriodicOptions = options.parse(name)?;
        if opts.value == 0 {
            return Err(SetupError::invalid_options(name, "value must be positive"));
        }
        let secs = i64::from(opts.value) * opts.unit.seconds();
        if secs > MAX_PERIOD_SECS {
            return Err(SetupError::invalid_options(name, "period must not exceed 100 years"));
        }
        Ok(Self::new(name, TimeDelta::seconds(secs)))
    }
}

impl WakeProbe for Periodic {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, now: DateTime<Utc>) -> ProbeResult<Option<DateTime<Utc>>> {
        now.checked_add_signed(self.period).map(Some).ok_or_else(|| {
            ProbeError::temporary(format!("{now} + {} is out of range", self.period))
        })
    }
}
