//! The idle-tracking state machine

use chrono::{DateTime, TimeDelta, Utc};
use drowse_config::GeneralSettings;
use drowse_probe_api::{ActivityProbe, WakeProbe};
use drowse_util::format_duration;
use tracing::{debug, info};

use crate::{any_active, earliest_wakeup, ActionDispatcher, IdleState, Probes};

/// Decision parameters for the processor
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorConfig {
    /// Continuous inactivity required before suspending (strictly exceeded)
    pub idle_time: TimeDelta,
    /// Do not suspend if the next wake-up is closer than this
    pub min_sleep_time: TimeDelta,
    /// Subtracted from every computed wake-up
    pub wakeup_delta: TimeDelta,
    /// Run every activity probe even after one matched
    pub all_activities: bool,
}

impl ProcessorConfig {
    pub fn from_settings(general: &GeneralSettings, all_activities: bool) -> Self {
        Self {
            idle_time: general.idle_time,
            min_sleep_time: general.min_sleep_time,
            wakeup_delta: general.wakeup_delta,
            all_activities,
        }
    }
}

/// What a single tick decided
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// First tick after resuming; state reset
    JustWokeUp,

    /// An activity probe matched; state reset
    Active,

    /// Idle, but not for long enough yet
    IdleTooShort {
        idle_since: DateTime<Utc>,
        elapsed: TimeDelta,
    },

    /// Idle long enough, but the next wake-up is too close to bother
    WakeupTooClose {
        wakeup_at: DateTime<Utc>,
        wakeup_in: TimeDelta,
    },

    /// Suspend dispatched (after scheduling `wakeup_at`, if any); state reset
    Suspended { wakeup_at: Option<DateTime<Utc>> },
}

/// Decides once per tick whether to suspend.
///
/// Probes and dispatcher are fixed at construction; the idle state is owned
/// by the caller and passed into every iteration.
pub struct IdleProcessor {
    activities: Vec<Box<dyn ActivityProbe>>,
    wakeups: Vec<Box<dyn WakeProbe>>,
    config: ProcessorConfig,
    dispatcher: ActionDispatcher,
}

impl IdleProcessor {
    pub fn new(probes: Probes, config: ProcessorConfig, dispatcher: ActionDispatcher) -> Self {
        info!(
            activity_probes = probes.activities.len(),
            wake_probes = probes.wakeups.len(),
            idle_time = %format_duration(config.idle_time),
            min_sleep_time = %format_duration(config.min_sleep_time),
            wakeup_delta = %format_duration(config.wakeup_delta),
            all_activities = config.all_activities,
            "Idle processor initialized"
        );

        Self {
            activities: probes.activities,
            wakeups: probes.wakeups,
            config,
            dispatcher,
        }
    }

    /// Run one tick at `now`.
    ///
    /// All probes are polled every tick, so wake-up information stays
    /// current and shows up in the logs even when the tick ends early.
    pub fn iteration(
        &self,
        state: &mut IdleState,
        now: DateTime<Utc>,
        just_woke_up: bool,
    ) -> TickOutcome {
        info!(now = %now, "Starting new check iteration");

        let active = any_active(&self.activities, self.config.all_activities);
        debug!(active, "All activity probes have been executed");

        let wakeup_at =
            earliest_wakeup(&self.wakeups, now).map(|at| at - self.config.wakeup_delta);
        debug!(wakeup_at = ?wakeup_at, "Wake-up after applying delta");

        if just_woke_up {
            state.reset("Just woke up from suspension");
            return TickOutcome::JustWokeUp;
        }
        if active {
            state.reset("System is active");
            return TickOutcome::Active;
        }

        let idle_since = state.mark_idle(now);
        let elapsed = now - idle_since;
        info!(idle_since = %idle_since, elapsed = %format_duration(elapsed), "System is idle");

        if elapsed <= self.config.idle_time {
            info!(
                idle_time = %format_duration(self.config.idle_time),
                "Desired idle time not reached yet"
            );
            return TickOutcome::IdleTooShort { idle_since, elapsed };
        }

        info!("System is idle long enough");

        if let Some(at) = wakeup_at {
            let wakeup_in = at - now;
            if wakeup_in < self.config.min_sleep_time {
                info!(
                    wakeup_in = %format_duration(wakeup_in),
                    min_sleep_time = %format_duration(self.config.min_sleep_time),
                    "Next wake-up is below the minimum sleep time, not suspending"
                );
                return TickOutcome::WakeupTooClose {
                    wakeup_at: at,
                    wakeup_in,
                };
            }

            self.dispatcher.schedule_wakeup(at);
        }

        state.reset("Going to suspend");
        self.dispatcher.notify_and_suspend(wakeup_at);

        TickOutcome::Suspended { wakeup_at }
    }
}
