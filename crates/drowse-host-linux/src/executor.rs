//! Shell command execution

use drowse_probe_api::{CommandError, CommandExecutor, CommandResult};
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

const DEFAULT_SHELL: &str = "/bin/sh";

/// Runs command strings through `sh -c`, blocking until they finish.
///
/// There is no timeout: a hung command stalls the caller.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: PathBuf,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self {
            shell: PathBuf::from(DEFAULT_SHELL),
        }
    }

    pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    fn command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command).stdin(Stdio::null());
        cmd
    }

    /// Run a command and capture its standard output.
    ///
    /// A non-zero exit is an error even if output was produced.
    pub fn output(&self, command: &str) -> CommandResult<String> {
        let output = self
            .command(command)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;

        check_status(command, output.status)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &str) -> CommandResult<()> {
        debug!(command, "Executing shell command");
        let status = self
            .command(command)
            .status()
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;

        check_status(command, status)
    }
}

fn check_status(command: &str, status: ExitStatus) -> CommandResult<()> {
    match (status.code(), status.signal()) {
        (Some(0), _) => Ok(()),
        (Some(code), _) => Err(CommandError::Exited {
            command: command.to_string(),
            code,
        }),
        (None, Some(signal)) => Err(CommandError::Signaled {
            command: command.to_string(),
            signal,
        }),
        (None, None) => Err(CommandError::Exited {
            command: command.to_string(),
            code: -1,
        }),
    }
}
