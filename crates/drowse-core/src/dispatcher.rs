//! Side effects of a suspend decision

use chrono::{DateTime, Utc};
use drowse_config::CommandSettings;
use drowse_probe_api::CommandExecutor;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the notify, wake-scheduling and suspend commands.
///
/// Command failures are logged and swallowed; they never change the state
/// machine's decision for the tick.
pub struct ActionDispatcher {
    executor: Arc<dyn CommandExecutor>,
    commands: CommandSettings,
}

impl ActionDispatcher {
    pub fn new(executor: Arc<dyn CommandExecutor>, commands: CommandSettings) -> Self {
        Self { executor, commands }
    }

    /// Run the matching notification command, then the suspend command
    pub fn notify_and_suspend(&self, wakeup_at: Option<DateTime<Utc>>) {
        self.notify(wakeup_at);

        info!(command = %self.commands.suspend, "Suspending");
        self.run("suspend", &self.commands.suspend);
    }

    /// Schedule the system to wake up at `wakeup_at`
    pub fn schedule_wakeup(&self, wakeup_at: DateTime<Utc>) {
        let Some(template) = &self.commands.wakeup else {
            warn!(wakeup_at = %wakeup_at, "No wakeup command configured, cannot schedule wake-up");
            return;
        };

        let command = template.render(&wakeup_at);
        info!(wakeup_at = %wakeup_at, command = %command, "Scheduling wake-up");
        self.run("wakeup", &command);
    }

    fn notify(&self, wakeup_at: Option<DateTime<Utc>>) {
        let command = match (
            wakeup_at,
            &self.commands.notify_wakeup,
            &self.commands.notify_no_wakeup,
        ) {
            (Some(at), Some(template), _) => template.render(&at),
            (None, _, Some(command)) => command.clone(),
            _ => {
                info!("No suitable notification command configured");
                return;
            }
        };

        info!(command = %command, "Notifying about suspension");
        self.run("notify", &command);
    }

    fn run(&self, kind: &str, command: &str) {
        if let Err(e) = self.executor.execute(command) {
            warn!(kind, command, error = %e, "Command failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use drowse_config::CommandTemplate;
    use drowse_probe_api::MockExecutor;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn commands() -> CommandSettings {
        CommandSettings {
            suspend: "systemctl suspend".into(),
            wakeup: Some(CommandTemplate::parse("rtcwake -m no -t {timestamp}").unwrap()),
            notify_wakeup: Some(CommandTemplate::parse("notify back at {iso}").unwrap()),
            notify_no_wakeup: Some("notify good night".into()),
        }
    }

    fn dispatcher(commands: CommandSettings) -> (ActionDispatcher, MockExecutor) {
        let executor = MockExecutor::new();
        (ActionDispatcher::new(Arc::new(executor.clone()), commands), executor)
    }

    #[test]
    fn notify_with_wakeup_then_suspend() {
        let (dispatcher, executor) = dispatcher(commands());
        dispatcher.notify_and_suspend(Some(at()));
        assert_eq!(
            executor.commands(),
            vec!["notify back at 2024-01-01T12:00:00+00:00", "systemctl suspend"]
        );
    }

    #[test]
    fn notify_without_wakeup_then_suspend() {
        let (dispatcher, executor) = dispatcher(commands());
        dispatcher.notify_and_suspend(None);
        assert_eq!(executor.commands(), vec!["notify good night", "systemctl suspend"]);
    }

    #[test]
    fn missing_notification_only_suspends() {
        let mut commands = commands();
        commands.notify_wakeup = None;
        let (dispatcher, executor) = dispatcher(commands);

        // a wake-up without a wake-up template does not fall back to the other command
        dispatcher.notify_and_suspend(Some(at()));
        assert_eq!(executor.commands(), vec!["systemctl suspend"]);
    }

    #[test]
    fn schedule_wakeup_renders_timestamp() {
        let (dispatcher, executor) = dispatcher(commands());
        dispatcher.schedule_wakeup(at());
        assert_eq!(executor.commands(), vec!["rtcwake -m no -t 1704110400"]);
    }

    #[test]
    fn schedule_without_template_is_skipped() {
        let mut commands = commands();
        commands.wakeup = None;
        let (dispatcher, executor) = dispatcher(commands);
        dispatcher.schedule_wakeup(at());
        assert!(executor.commands().is_empty());
    }

    #[test]
    fn failures_do_not_block_later_commands() {
        let (dispatcher, executor) = dispatcher(commands());
        executor.set_fail(true);
        dispatcher.schedule_wakeup(at());
        dispatcher.notify_and_suspend(Some(at()));
        assert_eq!(executor.commands().len(), 3);
    }
}
