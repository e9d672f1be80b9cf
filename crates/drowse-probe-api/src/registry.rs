//! Class-name to factory registry for probes

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::{ActivityProbe, ProbeOptions, ProbeRole, SetupError, SetupResult, WakeProbe};

/// Builds an activity probe from its configured name and options
pub type ActivityFactory =
    Box<dyn Fn(&str, &ProbeOptions) -> SetupResult<Box<dyn ActivityProbe>> + Send + Sync>;

/// Builds a wake probe from its configured name and options
pub type WakeFactory =
    Box<dyn Fn(&str, &ProbeOptions) -> SetupResult<Box<dyn WakeProbe>> + Send + Sync>;

/// Registry of probe classes, one namespace per role.
///
/// Built-in classes use short names (`Load`, `Periodic`); externally
/// registered classes conventionally use dotted names (`acme.Backup`).
/// Lookup is always by exact key.
#[derive(Default)]
pub struct ProbeRegistry {
    activities: HashMap<String, ActivityFactory>,
    wakeups: HashMap<String, WakeFactory>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an activity probe class, replacing any previous factory
    pub fn register_activity<F>(&mut self, class: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&str, &ProbeOptions) -> SetupResult<Box<dyn ActivityProbe>> + Send + Sync + 'static,
    {
        let class = class.into();
        if self.activities.insert(class.clone(), Box::new(factory)).is_some() {
            warn!(class = %class, "Replacing registered activity probe class");
        }
        self
    }

    /// Register a wake probe class, replacing any previous factory
    pub fn register_wake<F>(&mut self, class: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&str, &ProbeOptions) -> SetupResult<Box<dyn WakeProbe>> + Send + Sync + 'static,
    {
        let class = class.into();
        if self.wakeups.insert(class.clone(), Box::new(factory)).is_some() {
            warn!(class = %class, "Replacing registered wake probe class");
        }
        self
    }

    /// Construct an activity probe
    pub fn create_activity(
        &self,
        name: &str,
        class: &str,
        options: &ProbeOptions,
    ) -> SetupResult<Box<dyn ActivityProbe>> {
        let Some(factory) = self.activities.get(class) else {
            return Err(self.lookup_error(class, ProbeRole::Activity));
        };

        debug!(name, class, "Creating activity probe");
        factory(name, options)
    }

    /// Construct a wake probe
    pub fn create_wake(
        &self,
        name: &str,
        class: &str,
        options: &ProbeOptions,
    ) -> SetupResult<Box<dyn WakeProbe>> {
        let Some(factory) = self.wakeups.get(class) else {
            return Err(self.lookup_error(class, ProbeRole::Wake));
        };

        debug!(name, class, "Creating wake probe");
        factory(name, options)
    }

    /// Registered classes for a role, sorted
    pub fn classes(&self, role: ProbeRole) -> Vec<&str> {
        let mut classes: Vec<&str> = match role {
            ProbeRole::Activity => self.activities.keys().map(String::as_str).collect(),
            ProbeRole::Wake => self.wakeups.keys().map(String::as_str).collect(),
        };
        classes.sort_unstable();
        classes
    }

    fn lookup_error(&self, class: &str, expected: ProbeRole) -> SetupError {
        let registered_elsewhere = match expected {
            ProbeRole::Activity => self.wakeups.contains_key(class),
            ProbeRole::Wake => self.activities.contains_key(class),
        };

        if registered_elsewhere {
            SetupError::WrongRole {
                class: class.to_string(),
                expected,
            }
        } else {
            SetupError::UnknownClass {
                role: expected,
                class: class.to_string(),
            }
        }
    }
}

impl std::fmt::Debug for ProbeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeRegistry")
            .field("activities", &self.classes(ProbeRole::Activity))
            .field("wakeups", &self.classes(ProbeRole::Wake))
            .finish()
    }
}
