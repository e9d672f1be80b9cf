//! Combining per-probe results into a single answer

use chrono::{DateTime, Utc};
use drowse_probe_api::{ActivityProbe, WakeProbe};
use tracing::{debug, info, warn};

/// Run activity probes in order and report whether any saw activity.
///
/// A failing probe counts as "no activity" and never stops the remaining
/// probes. Unless `run_all` is set, iteration stops at the first match.
pub fn any_active(probes: &[Box<dyn ActivityProbe>], run_all: bool) -> bool {
    let mut matched = false;

    for probe in probes {
        debug!(probe = probe.name(), "Executing activity probe");
        match probe.check() {
            Ok(Some(reason)) => {
                info!(probe = probe.name(), reason = %reason, "Activity probe matched");
                matched = true;
                if !run_all {
                    debug!("Skipping further activity probes");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(probe = probe.name(), error = %e, "Activity probe failed, ignoring");
            }
        }
    }

    matched
}

/// Run wake probes and return the earliest wake-up strictly after `now`.
///
/// Failing probes are skipped. Instants at or before `now` are logged and
/// discarded entirely.
pub fn earliest_wakeup(
    probes: &[Box<dyn WakeProbe>],
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let mut earliest: Option<DateTime<Utc>> = None;

    for probe in probes {
        debug!(probe = probe.name(), "Executing wake probe");
        let candidate = match probe.check(now) {
            Ok(Some(at)) => at,
            Ok(None) => continue,
            Err(e) => {
                warn!(probe = probe.name(), error = %e, "Wake probe failed, ignoring");
                continue;
            }
        };

        if candidate <= now {
            warn!(
                probe = probe.name(),
                wakeup_at = %candidate,
                now = %now,
                "Wake probe returned a wake-up that is not in the future, ignoring"
            );
            continue;
        }

        earliest = Some(match earliest {
            Some(current) => current.min(candidate),
            None => candidate,
        });
    }

    earliest
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use drowse_probe_api::{MockActivity, MockActivityStep, MockWake, MockWakeStep};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 3, 0, 0).unwrap()
    }

    fn boxed(probes: &[MockActivity]) -> Vec<Box<dyn ActivityProbe>> {
        probes
            .iter()
            .map(|p| Box::new(p.clone()) as Box<dyn ActivityProbe>)
            .collect()
    }

    fn boxed_wake(probes: &[MockWake]) -> Vec<Box<dyn WakeProbe>> {
        probes
            .iter()
            .map(|p| Box::new(p.clone()) as Box<dyn WakeProbe>)
            .collect()
    }

    #[test]
    fn no_probes_is_inactive() {
        assert!(!any_active(&[], false));
        assert_eq!(earliest_wakeup(&[], now()), None);
    }

    #[test]
    fn activity_is_logical_or() {
        let probes = boxed(&[
            MockActivity::idle("a"),
            MockActivity::failing("b"),
            MockActivity::active("c", "users logged in"),
        ]);
        assert!(any_active(&probes, false));

        let probes = boxed(&[MockActivity::idle("a"), MockActivity::failing("b")]);
        assert!(!any_active(&probes, false));
    }

    #[test]
    fn failing_probe_does_not_abort_remaining() {
        let later = MockActivity::active("later", "busy");
        let probes = boxed(&[MockActivity::failing("broken"), later.clone()]);
        assert!(any_active(&probes, false));
        assert_eq!(later.calls(), 1);
    }

    #[test]
    fn short_circuits_unless_run_all() {
        let first = MockActivity::active("first", "busy");
        let second = MockActivity::active("second", "also busy");
        let probes = boxed(&[first.clone(), second.clone()]);

        assert!(any_active(&probes, false));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);

        assert!(any_active(&probes, true));
        assert_eq!(first.calls(), 2);
        assert_eq!(second.calls(), 1);
    }

    #[test]
    fn wakeup_is_minimum_of_future_candidates() {
        let probes = boxed_wake(&[
            MockWake::after("a", TimeDelta::hours(3)),
            MockWake::none("b"),
            MockWake::after("c", TimeDelta::hours(1)),
            MockWake::failing("d"),
            MockWake::after("e", TimeDelta::hours(2)),
        ]);
        assert_eq!(earliest_wakeup(&probes, now()), Some(now() + TimeDelta::hours(1)));
    }

    #[test]
    fn past_and_present_wakeups_are_excluded() {
        let probes = boxed_wake(&[
            MockWake::at("past", now() - TimeDelta::seconds(1)),
            MockWake::at("present", now()),
            MockWake::after("future", TimeDelta::seconds(1)),
        ]);
        assert_eq!(earliest_wakeup(&probes, now()), Some(now() + TimeDelta::seconds(1)));

        let probes = boxed_wake(&[
            MockWake::at("past", now() - TimeDelta::hours(1)),
            MockWake::at("present", now()),
        ]);
        assert_eq!(earliest_wakeup(&probes, now()), None);
    }

    #[test]
    fn all_wake_probes_are_polled() {
        let flaky = MockWake::none("flaky").with_script([MockWakeStep::Fail("timeout".into())]);
        let steady = MockWake::after("steady", TimeDelta::minutes(90));
        let probes = boxed_wake(&[flaky.clone(), steady.clone()]);

        assert_eq!(earliest_wakeup(&probes, now()), Some(now() + TimeDelta::minutes(90)));
        assert_eq!(flaky.calls(), 1);
        assert_eq!(steady.calls(), 1);
    }

    #[test]
    fn scripted_activity_changes_between_ticks() {
        let probe = MockActivity::idle("p").with_script([MockActivityStep::Active("x".into())]);
        let probes = boxed(&[probe]);
        assert!(any_active(&probes, false));
        assert!(!any_active(&probes, false));
    }
}
