//! Wake-up time read from a file

use chrono::{DateTime, Utc};
use drowse_probe_api::{ProbeError, ProbeOptions, ProbeResult, SetupResult, WakeProbe};
use drowse_util::parse_epoch_seconds;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOptions {
    path: PathBuf,
}

/// Wakes at the epoch-seconds timestamp stored in a file.
///
/// A missing file means no wake-up is needed.
#[derive(Debug)]
pub struct FileWake {
    name: String,
    path: PathBuf,
}

impl FileWake {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn create(name: &str, options: &ProbeOptions) -> SetupResult<Self> {
        let opts: FileOptions = options.parse(name)?;
        Ok(Self::new(name, opts.path))
    }
}

impl WakeProbe for FileWake {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, _now: DateTime<Utc>) -> ProbeResult<Option<DateTime<Utc>>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        parse_epoch_seconds(&content).map(Some).ok_or_else(|| {
            ProbeError::temporary(format!(
                "{} does not contain a timestamp",
                self.path.display()
            ))
        })
    }
}
