//! Probe-specific configuration options

use serde::de::DeserializeOwned;

use crate::{SetupError, SetupResult};

/// The keys of a probe section other than `name`, `class` and `enabled`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeOptions(toml::Table);

impl ProbeOptions {
    pub fn new(table: toml::Table) -> Self {
        Self(table)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn table(&self) -> &toml::Table {
        &self.0
    }

    /// Deserialize the options into a probe's typed settings.
    ///
    /// Errors are reported against the probe's configured name.
    pub fn parse<T: DeserializeOwned>(&self, probe_name: &str) -> SetupResult<T> {
        toml::Value::Table(self.0.clone())
            .try_into()
            .map_err(|e: toml::de::Error| SetupError::invalid_options(probe_name, e.message()))
    }
}

impl From<toml::Table> for ProbeOptions {
    fn from(table: toml::Table) -> Self {
        Self(table)
    }
}
