use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::BatchError;

/// Persisted settings, stored as a flat JSON object with camelCase keys.
///
/// Every field is optional; an empty string counts as unset. Keys this type
/// does not know about are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photoshop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_json_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe_jsx_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_list_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A settable key of [`AppConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    PhotoshopPath,
    JsxPath,
    InputDir,
    OutputDir,
    RulesJsonPath,
    ProbeJsxPath,
    AllowListPath,
}

impl ConfigKey {
    pub const ALL: [Self; 7] = [
        Self::PhotoshopPath,
        Self::JsxPath,
        Self::InputDir,
        Self::OutputDir,
        Self::RulesJsonPath,
        Self::ProbeJsxPath,
        Self::AllowListPath,
    ];

    /// Key as written in `config.json`.
    #[must_use]
    pub const fn json_name(self) -> &'static str {
        match self {
            Self::PhotoshopPath => "photoshopPath",
            Self::JsxPath => "jsxPath",
            Self::InputDir => "inputDir",
            Self::OutputDir => "outputDir",
            Self::RulesJsonPath => "rulesJsonPath",
            Self::ProbeJsxPath => "probeJsxPath",
            Self::AllowListPath => "allowListPath",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_name())
    }
}

impl FromStr for ConfigKey {
    type Err = BatchError;

    /// Accepts the JSON name or its kebab-case spelling (`photoshop-path`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.json_name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.json_name()).collect();
                BatchError::Config(format!(
                    "Unknown config key '{s}'. Expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

impl AppConfig {
    /// Value of `key`, treating an empty string as unset.
    #[must_use]
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        self.slot(key)
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }

    /// Value of `key` as a path.
    #[must_use]
    pub fn path(&self, key: ConfigKey) -> Option<PathBuf> {
        self.get(key).map(PathBuf::from)
    }

    /// Sets or clears `key`.
    pub fn set(&mut self, key: ConfigKey, value: Option<String>) {
        *self.slot_mut(key) = value.filter(|v| !v.trim().is_empty());
    }

    /// Every known key with its current value.
    pub fn entries(&self) -> impl Iterator<Item = (ConfigKey, Option<&str>)> {
        ConfigKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }

    const fn slot(&self, key: ConfigKey) -> &Option<String> {
        match key {
            ConfigKey::PhotoshopPath => &self.photoshop_path,
            ConfigKey::JsxPath => &self.jsx_path,
            ConfigKey::InputDir => &self.input_dir,
            ConfigKey::OutputDir => &self.output_dir,
            ConfigKey::RulesJsonPath => &self.rules_json_path,
            ConfigKey::ProbeJsxPath => &self.probe_jsx_path,
            ConfigKey::AllowListPath => &self.allow_list_path,
        }
    }

    const fn slot_mut(&mut self, key: ConfigKey) -> &mut Option<String> {
        match key {
            ConfigKey::PhotoshopPath => &mut self.photoshop_path,
            ConfigKey::JsxPath => &mut self.jsx_path,
            ConfigKey::InputDir => &mut self.input_dir,
            ConfigKey::OutputDir => &mut self.output_dir,
            ConfigKey::RulesJsonPath => &mut self.rules_json_path,
            ConfigKey::ProbeJsxPath => &mut self.probe_jsx_path,
            ConfigKey::AllowListPath => &mut self.allow_list_path,
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
