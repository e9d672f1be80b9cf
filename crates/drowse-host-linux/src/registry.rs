//! The built-in probe table

use drowse_probe_api::ProbeRegistry;

use crate::{CommandWake, ExternalCommand, FileWake, Load, Periodic, Ping, Processes};

/// A registry holding every built-in probe class.
///
/// Callers may register additional classes before building probes.
pub fn builtin_registry() -> ProbeRegistry {
    let mut registry = ProbeRegistry::new();

    registry
        .register_activity("ExternalCommand", |name, options| {
            Ok(Box::new(ExternalCommand::create(name, options)?))
        })
        .register_activity("Load", |name, options| Ok(Box::new(Load::create(name, options)?)))
        .register_activity("Ping", |name, options| Ok(Box::new(Ping::create(name, options)?)))
        .register_activity("Processes", |name, options| {
            Ok(Box::new(Processes::create(name, options)?))
        });

    registry
        .register_wake("Command", |name, options| {
            Ok(Box::new(CommandWake::create(name, options)?))
        })
        .register_wake("File", |name, options| Ok(Box::new(FileWake::create(name, options)?)))
        .register_wake("Periodic", |name, options| {
            Ok(Box::new(Periodic::create(name, options)?))
        });

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use drowse_probe_api::{ProbeOptions, ProbeRole, SetupError};

    #[test]
    fn builtin_classes() {
        let registry = builtin_registry();
        assert_eq!(
            registry.classes(ProbeRole::Activity),
            vec!["ExternalCommand", "Load", "Ping", "Processes"]
        );
        assert_eq!(registry.classes(ProbeRole::Wake), vec!["Command", "File", "Periodic"]);
    }

    #[test]
    fn builds_builtin_probe_from_options() {
        let options = ProbeOptions::new(toml::from_str("unit = \"days\"\nvalue = 1").unwrap());
        let probe = builtin_registry().create_wake("daily", "Periodic", &options).unwrap();
        assert_eq!(probe.name(), "daily");
    }

    #[test]
    fn wake_class_used_as_activity() {
        let result = builtin_registry().create_activity("x", "Periodic", &ProbeOptions::default());
        assert!(matches!(result, Err(SetupError::WrongRole { .. })));
    }
}
