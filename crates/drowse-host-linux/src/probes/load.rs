//! System load average

use drowse_probe_api::{
    ActivityProbe, ProbeError, ProbeOptions, ProbeResult, SetupError, SetupResult,
};
use serde::Deserialize;
use std::path::PathBuf;

const LOADAVG_PATH: &str = "/proc/loadavg";
const DEFAULT_THRESHOLD: f64 = 2.5;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoadOptions {
    threshold: Option<f64>,
}

/// Active while the 5-minute load average exceeds a threshold
#[derive(Debug)]
pub struct Load {
    name: String,
    threshold: f64,
    source: PathBuf,
}

impl Load {
    pub fn new(name: impl Into<String>, threshold: f64) -> Self {
        Self::with_source(name, threshold, LOADAVG_PATH)
    }

    pub fn with_source(
        name: impl Into<String>,
        threshold: f64,
        source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            threshold,
            source: source.into(),
        }
    }

    pub fn create(name: &str, options: &ProbeOptions) -> SetupResult<Self> {
        let opts: LoadOptions = options.parse(name)?;
        let threshold = opts.threshold.unwrap_or(DEFAULT_THRESHOLD);
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(SetupError::invalid_options(
                name,
                "threshold must be a non-negative number",
            ));
        }
        Ok(Self::new(name, threshold))
    }

    fn five_minute_load(&self) -> ProbeResult<f64> {
        let content = std::fs::read_to_string(&self.source)?;
        content
            .split_whitespace()
            .nth(1)
            .and_then(|field| field.parse().ok())
            .ok_or_else(|| {
                ProbeError::temporary(format!("Unexpected content in {}", self.source.display()))
            })
    }
}

impl ActivityProbe for Load {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> ProbeResult<Option<String>> {
        let load = self.five_minute_load()?;
        if load > self.threshold {
            Ok(Some(format!("Load {} > threshold {}", load, self.threshold)))
        } else {
            Ok(None)
        }
    }
}
