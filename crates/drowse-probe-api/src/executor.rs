//! External command execution interface

use thiserror::Error;

/// Errors from running an external command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' exited with status {code}")]
    Exited { command: String, code: i32 },

    #[error("Command '{command}' was terminated by signal {signal}")]
    Signaled { command: String, signal: i32 },
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Runs shell-like command strings.
///
/// Implementations block until the command completes and report failure
/// through the result; callers decide whether a failure matters.
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, command: &str) -> CommandResult<()>;
}
