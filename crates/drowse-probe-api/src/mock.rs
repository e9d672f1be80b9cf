//! Mock probes and executor for testing

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{
    ActivityProbe, CommandError, CommandExecutor, CommandResult, ProbeError, ProbeResult,
    WakeProbe,
};

/// One scripted activity reading
#[derive(Debug, Clone, PartialEq)]
pub enum MockActivityStep {
    Idle,
    Active(String),
    Fail(String),
}

/// Activity probe that replays a script, then repeats a fallback reading.
///
/// Clones share state, so a test can keep a handle after boxing the probe.
#[derive(Debug, Clone)]
pub struct MockActivity {
    name: String,
    script: Arc<Mutex<VecDeque<MockActivityStep>>>,
    fallback: Arc<Mutex<MockActivityStep>>,
    calls: Arc<AtomicUsize>,
}

impl MockActivity {
    pub fn new(name: impl Into<String>, fallback: MockActivityStep) -> Self {
        Self {
            name: name.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(Mutex::new(fallback)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn idle(name: impl Into<String>) -> Self {
        Self::new(name, MockActivityStep::Idle)
    }

    pub fn active(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, MockActivityStep::Active(reason.into()))
    }

    pub fn failing(name: impl Into<String>) -> Self {
        Self::new(name, MockActivityStep::Fail("mock failure".into()))
    }

    /// Queue readings returned before the fallback
    pub fn with_script(self, steps: impl IntoIterator<Item = MockActivityStep>) -> Self {
        self.script.lock().unwrap().extend(steps);
        self
    }

    /// Number of times `check` has been called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ActivityProbe for MockActivity {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> ProbeResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.lock().unwrap().clone());

        match step {
            MockActivityStep::Idle => Ok(None),
            MockActivityStep::Active(reason) => Ok(Some(reason)),
            MockActivityStep::Fail(msg) => Err(ProbeError::Temporary(msg)),
        }
    }
}

/// One scripted wake reading
#[derive(Debug, Clone, PartialEq)]
pub enum MockWakeStep {
    None,
    /// A fixed instant, regardless of the query time
    At(DateTime<Utc>),
    /// An offset from the query time
    After(TimeDelta),
    Fail(String),
}

/// Wake probe that replays a script, then repeats a fallback reading.
#[derive(Debug, Clone)]
pub struct MockWake {
    name: String,
    script: Arc<Mutex<VecDeque<MockWakeStep>>>,
    fallback: Arc<Mutex<MockWakeStep>>,
    calls: Arc<AtomicUsize>,
}

impl MockWake {
    pub fn new(name: impl Into<String>, fallback: MockWakeStep) -> Self {
        Self {
            name: name.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(Mutex::new(fallback)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn none(name: impl Into<String>) -> Self {
        Self::new(name, MockWakeStep::None)
    }

    pub fn at(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(name, MockWakeStep::At(at))
    }

    pub fn after(name: impl Into<String>, delta: TimeDelta) -> Self {
        Self::new(name, MockWakeStep::After(delta))
    }

    pub fn failing(name: impl Into<String>) -> Self {
        Self::new(name, MockWakeStep::Fail("mock failure".into()))
    }

    pub fn with_script(self, steps: impl IntoIterator<Item = MockWakeStep>) -> Self {
        self.script.lock().unwrap().extend(steps);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WakeProbe for MockWake {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, now: DateTime<Utc>) -> ProbeResult<Option<DateTime<Utc>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.lock().unwrap().clone());

        match step {
            MockWakeStep::None => Ok(None),
            MockWakeStep::At(at) => Ok(Some(at)),
            MockWakeStep::After(delta) => Ok(Some(now + delta)),
            MockWakeStep::Fail(msg) => Err(ProbeError::Temporary(msg)),
        }
    }
}

/// Executor that records every command instead of running it
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    commands: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands executed so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    /// Make every following command fail with exit status 1
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

impl CommandExecutor for MockExecutor {
    fn execute(&self, command: &str) -> CommandResult<()> {
        self.commands.lock().unwrap().push(command.to_string());

        if *self.fail.lock().unwrap() {
            return Err(CommandError::Exited {
                command: command.to_string(),
                code: 1,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn activity_script_then_fallback() {
        let probe = MockActivity::idle("mock").with_script([
            MockActivityStep::Active("busy".into()),
            MockActivityStep::Fail("flaky".into()),
        ]);

        assert_eq!(probe.check().unwrap().as_deref(), Some("busy"));
        assert!(probe.check().is_err());
        assert_eq!(probe.check().unwrap(), None);
        assert_eq!(probe.check().unwrap(), None);
        assert_eq!(probe.calls(), 4);
    }

    #[test]
    fn wake_after_is_relative_to_query() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let probe = MockWake::after("mock", TimeDelta::hours(1));
        assert_eq!(probe.check(now).unwrap(), Some(now + TimeDelta::hours(1)));
    }

    #[test]
    fn executor_records_even_when_failing() {
        let executor = MockExecutor::new();
        executor.execute("one").unwrap();
        executor.set_fail(true);
        assert!(matches!(
            executor.execute("two"),
            Err(CommandError::Exited { code: 1, .. })
        ));
        assert_eq!(executor.commands(), vec!["one", "two"]);
    }
}
