//! Configuration validation

use crate::schema::{RawConfig, RawGeneralConfig, RawProbeSection, RawSeconds};
use crate::template::{CommandTemplate, TemplateError};
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("general.{field}: {message}")]
    GeneralError { field: String, message: String },

    #[error("general.{field}: {error}")]
    InvalidTemplate { field: String, error: TemplateError },

    #[error("Duplicate {role} probe name: {name}")]
    DuplicateProbeName { role: String, name: String },

    #[error("{role} probe '{name}': {message}")]
    ProbeError {
        role: String,
        name: String,
        message: String,
    },

    #[error("No activity probes enabled")]
    NoActivityProbes,
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = validate_general(&config.general);

    errors.extend(validate_sections("activity", &config.activity));
    errors.extend(validate_sections("wakeup", &config.wakeup));

    if !config.activity.iter().any(|s| s.enabled) {
        errors.push(ValidationError::NoActivityProbes);
    }

    let wakeups_enabled = config.wakeup.iter().any(|s| s.enabled);
    if wakeups_enabled && !has_text(&config.general.wakeup_cmd) {
        errors.push(ValidationError::GeneralError {
            field: "wakeup_cmd".into(),
            message: "required when wakeup probes are enabled".into(),
        });
    }

    errors
}

fn validate_general(general: &RawGeneralConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !has_text(&general.suspend_cmd) {
        errors.push(ValidationError::GeneralError {
            field: "suspend_cmd".into(),
            message: "a suspend command is required".into(),
        });
    }

    let durations = [
        ("idle_time", general.idle_time),
        ("min_sleep_time", general.min_sleep_time),
        ("wakeup_delta", general.wakeup_delta),
        ("interval", general.interval),
    ];
    for (field, value) in durations {
        if value.is_some_and(|v| v.whole_seconds().is_none()) {
            errors.push(ValidationError::GeneralError {
                field: field.into(),
                message: "must be a non-negative number of seconds".into(),
            });
        }
    }

    if general.interval.and_then(RawSeconds::whole_seconds) == Some(0) {
        errors.push(ValidationError::GeneralError {
            field: "interval".into(),
            message: "must be at least 1 second".into(),
        });
    }

    let templates = [
        ("wakeup_cmd", &general.wakeup_cmd),
        ("notify_cmd_wakeup", &general.notify_cmd_wakeup),
    ];
    for (field, value) in templates {
        if let Some(text) = value
            && let Err(error) = CommandTemplate::parse(text)
        {
            errors.push(ValidationError::InvalidTemplate {
                field: field.into(),
                error,
            });
        }
    }

    errors
}

fn validate_sections(role: &str, sections: &[RawProbeSection]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen_names = HashSet::new();
    for section in sections {
        if !seen_names.insert(section.name.as_str()) {
            errors.push(ValidationError::DuplicateProbeName {
                role: role.into(),
                name: section.name.clone(),
            });
        }
    }

    for section in sections {
        if section.name.trim().is_empty() {
            errors.push(ValidationError::ProbeError {
                role: role.into(),
                name: section.name.clone(),
                message: "name cannot be empty".into(),
            });
        }
        if section.class.as_deref().is_some_and(|c| c.trim().is_empty()) {
            errors.push(ValidationError::ProbeError {
                role: role.into(),
                name: section.name.clone(),
                message: "class cannot be empty".into(),
            });
        }
    }

    errors
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
