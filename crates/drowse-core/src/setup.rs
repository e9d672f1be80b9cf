//! Building probe instances from settings

use drowse_config::{ProbeSpec, Settings};
use drowse_probe_api::{ActivityProbe, ProbeRegistry, SetupError, SetupResult, WakeProbe};
use tracing::info;

/// The probes polled on every tick, in configuration order
pub struct Probes {
    pub activities: Vec<Box<dyn ActivityProbe>>,
    pub wakeups: Vec<Box<dyn WakeProbe>>,
}

/// Instantiate every enabled probe through the registry.
///
/// Fails if any class cannot be resolved for its role, if a probe rejects
/// its options, or if no activity probe is enabled.
pub fn build_probes(registry: &ProbeRegistry, settings: &Settings) -> SetupResult<Probes> {
    let activities = settings
        .activities
        .iter()
        .map(|spec| {
            log_spec("activity", spec);
            registry.create_activity(&spec.name, &spec.class, &spec.options)
        })
        .collect::<SetupResult<Vec<_>>>()?;

    if activities.is_empty() {
        return Err(SetupError::NoActivityProbes);
    }

    let wakeups = settings
        .wakeups
        .iter()
        .map(|spec| {
            log_spec("wakeup", spec);
            registry.create_wake(&spec.name, &spec.class, &spec.options)
        })
        .collect::<SetupResult<Vec<_>>>()?;

    Ok(Probes {
        activities,
        wakeups,
    })
}

fn log_spec(role: &str, spec: &ProbeSpec) {
    info!(
        role,
        name = %spec.name,
        class = %spec.class,
        options = ?spec.options.table(),
        "Configuring probe"
    );
}
