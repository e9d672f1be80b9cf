//! Hosts answering ping

use drowse_probe_api::{
    ActivityProbe, ProbeError, ProbeOptions, ProbeResult, SetupError, SetupResult,
};
use serde::Deserialize;
use std::process::{Command, Stdio};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PingOptions {
    hosts: Vec<String>,
}

/// Active while any of the given hosts answers a single ping
#[derive(Debug)]
pub struct Ping {
    name: String,
    hosts: Vec<String>,
}

impl Ping {
    pub fn new(name: impl Into<String>, hosts: Vec<String>) -> Self {
        Self {
            name: name.into(),
            hosts,
        }
    }

    pub fn create(name: &str, options: &ProbeOptions) -> SetupResult<Self> {
        let opts: PingOptions = options.parse(name)?;
        if opts.hosts.is_empty() {
            return Err(SetupError::invalid_options(name, "hosts cannot be empty"));
        }
        Ok(Self::new(name, opts.hosts))
    }
}

impl ActivityProbe for Ping {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> ProbeResult<Option<String>> {
        for host in &self.hosts {
            let status = Command::new("ping")
                .args(["-q", "-c", "1", host])
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map_err(|e| ProbeError::temporary(format!("Unable to run ping: {}", e)))?;

            if status.success() {
                return Ok(Some(format!("Host {} is up", host)));
            }
        }

        Ok(None)
    }
}
