//! Probes backed by external commands

use chrono::{DateTime, Utc};
use drowse_probe_api::{
    ActivityProbe, CommandError, CommandExecutor, ProbeError, ProbeOptions, ProbeResult,
    SetupResult, WakeProbe,
};
use drowse_util::parse_epoch_seconds;
use serde::Deserialize;
use tracing::debug;

use crate::ShellExecutor;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommandOptions {
    command: String,
}

/// Active while a shell command exits successfully
#[derive(Debug)]
pub struct ExternalCommand {
    name: String,
    command: String,
    shell: ShellExecutor,
}

impl ExternalCommand {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            shell: ShellExecutor::new(),
        }
    }

    pub fn create(name: &str, options: &ProbeOptions) -> SetupResult<Self> {
        let opts: CommandOptions = options.parse(name)?;
        Ok(Self::new(name, opts.command))
    }
}

impl ActivityProbe for ExternalCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> ProbeResult<Option<String>> {
        match self.shell.execute(&self.command) {
            Ok(()) => Ok(Some(format!("Command {} succeeded", self.command))),
            Err(CommandError::Exited { code, .. }) => {
                debug!(probe = %self.name, code, "Command reported no activity");
                Ok(None)
            }
            Err(e) => Err(ProbeError::temporary(e.to_string())),
        }
    }
}

/// Wakes at the epoch-seconds timestamp printed by a shell command.
///
/// Empty output means no wake-up is needed.
#[derive(Debug)]
pub struct CommandWake {
    name: String,
    command: String,
    shell: ShellExecutor,
}

impl CommandWake {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            shell: ShellExecutor::new(),
        }
    }

    pub fn create(name: &str, options: &ProbeOptions) -> SetupResult<Self> {
        let opts: CommandOptions = options.parse(name)?;
        Ok(Self::new(name, opts.command))
    }
}

impl WakeProbe for CommandWake {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, _now: DateTime<Utc>) -> ProbeResult<Option<DateTime<Utc>>> {
        let output = self
            .shell
            .output(&self.command)
            .map_err(|e| ProbeError::temporary(e.to_string()))?;

        let text = output.trim();
        if text.is_empty() {
            return Ok(None);
        }

        parse_epoch_seconds(text)
            .map(Some)
            .ok_or_else(|| {
                ProbeError::temporary(format!("Invalid timestamp from command: {:?}", text))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn external_command_success_is_activity() {
        let probe = ExternalCommand::new("ok", "true");
        assert_eq!(probe.check().unwrap().as_deref(), Some("Command true succeeded"));
    }

    #[test]
    fn external_command_failure_is_idle() {
        let probe = ExternalCommand::new("no", "exit 1");
        assert_eq!(probe.check().unwrap(), None);
    }

    #[test]
    fn external_command_requires_command_option() {
        let result = ExternalCommand::create("x", &ProbeOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn command_wake_parses_output() {
        let probe = CommandWake::new("w", "echo 1704110400");
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(probe.check(now()).unwrap(), Some(expected));
    }

    #[test]
    fn command_wake_empty_output_is_none() {
        let probe = CommandWake::new("w", "true");
        assert_eq!(probe.check(now()).unwrap(), None);
    }

    #[test]
    fn command_wake_errors_are_temporary() {
        assert!(CommandWake::new("w", "echo soon").check(now()).is_err());
        assert!(CommandWake::new("w", "echo 1704110400; exit 2").check(now()).is_err());
    }
}
