// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for results-tracker.
//!
//! Settings are layered. Built-in defaults come first, then the optional `results-tracker.toml`
//! file, then [`ConfigOverrides`] supplied on the command line or through the environment.
//!
//! ```toml
//! [report]
//! input = "reports/test-report.json"
//! output = "reports/test-results.md"
//! json-summary = "reports/test-results.json"
//! title = "AddVantage API Test Results"
//!
//! [criteria]
//! mode = "per-category"
//! ```
//!
//! Relative paths in the config file are resolved against the directory containing it.

use crate::{criteria::CriteriaMode, errors::ConfigError, render::DEFAULT_TITLE};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::{collections::BTreeSet, io};
use tracing::{debug, warn};

/// The name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "results-tracker.toml";

/// Special value for `--config-file` and `RESULTS_TRACKER_CONFIG` that skips config loading.
pub const CONFIG_NONE: &str = "none";

/// The default path to the execution report.
pub const DEFAULT_INPUT_PATH: &str = "test-report.json";

/// The default path to the markdown results document.
pub const DEFAULT_OUTPUT_PATH: &str = "test-results.md";

/// Specifies where to load configuration from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigLocation<'a> {
    /// Load `results-tracker.toml` from the working directory, if it exists.
    Default,

    /// Skip config loading entirely, using only built-in defaults.
    Isolated,

    /// Load config from an explicit path.
    ///
    /// Returns an error if the file does not exist.
    Explicit(&'a Utf8Path),
}

impl<'a> ConfigLocation<'a> {
    /// Creates a config location from a CLI or environment variable value.
    ///
    /// Returns `Default` if `None`, `Isolated` if `"none"`, otherwise `Explicit` with the path.
    pub fn from_cli_or_env(s: Option<&'a str>) -> Self {
        match s {
            None => Self::Default,
            Some(CONFIG_NONE) => Self::Isolated,
            Some(s) => Self::Explicit(Utf8Path::new(s)),
        }
    }
}

/// Resolved configuration for a results-tracker run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// The execution report to read.
    pub input: Utf8PathBuf,

    /// Where to write the markdown results document.
    pub output: Utf8PathBuf,

    /// Where to write the JSON summary, if anywhere.
    pub json_summary: Option<Utf8PathBuf>,

    /// The title of the results document.
    pub title: String,

    /// How acceptance criteria are decided.
    pub criteria_mode: CriteriaMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_PATH.into(),
            output: DEFAULT_OUTPUT_PATH.into(),
            json_summary: None,
            title: DEFAULT_TITLE.to_owned(),
            criteria_mode: CriteriaMode::default(),
        }
    }
}

impl TrackerConfig {
    /// Loads configuration from the given location, on top of the built-in defaults.
    ///
    /// Unknown keys in the config file are logged as warnings.
    pub fn from_location(location: ConfigLocation<'_>) -> Result<Self, ConfigError> {
        Self::from_location_with_warnings(location, &mut DefaultConfigWarnings)
    }

    fn from_location_with_warnings(
        location: ConfigLocation<'_>,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        match location {
            ConfigLocation::Isolated => {
                debug!("config: skipping (isolated)");
            }
            ConfigLocation::Explicit(path) => {
                debug!("config: loading from explicit path {path}");
                match DeserializedConfig::from_path_with_warnings(path, warnings)? {
                    Some(file) => config.apply_file(file, path),
                    None => {
                        return Err(ConfigError::NotFound {
                            path: path.to_owned(),
                        });
                    }
                }
            }
            ConfigLocation::Default => {
                let path = Utf8Path::new(CONFIG_FILE_NAME);
                if let Some(file) = DeserializedConfig::from_path_with_warnings(path, warnings)? {
                    config.apply_file(file, path);
                }
            }
        }
        Ok(config)
    }

    /// Applies command-line or environment overrides on top of this config.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            input,
            output,
            json_summary,
            title,
            criteria_mode,
        } = overrides;
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(output) = output {
            self.output = output;
        }
        if let Some(json_summary) = json_summary {
            self.json_summary = Some(json_summary);
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(criteria_mode) = criteria_mode {
            self.criteria_mode = criteria_mode;
        }
    }

    fn apply_file(&mut self, file: DeserializedConfig, config_path: &Utf8Path) {
        let base_dir = config_path.parent().unwrap_or(Utf8Path::new(""));
        let resolve = |path: Utf8PathBuf| {
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        let DeserializedConfig { report, criteria } = file;
        if let Some(input) = report.input {
            self.input = resolve(input);
        }
        if let Some(output) = report.output {
            self.output = resolve(output);
        }
        if let Some(json_summary) = report.json_summary {
            self.json_summary = Some(resolve(json_summary));
        }
        if let Some(title) = report.title {
            self.title = title;
        }
        if let Some(mode) = criteria.mode {
            self.criteria_mode = mode;
        }
    }
}

/// Settings that take precedence over the config file.
///
/// Paths are used as given, relative to the working directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Overrides [`TrackerConfig::input`].
    pub input: Option<Utf8PathBuf>,

    /// Overrides [`TrackerConfig::output`].
    pub output: Option<Utf8PathBuf>,

    /// Overrides [`TrackerConfig::json_summary`].
    pub json_summary: Option<Utf8PathBuf>,

    /// Overrides [`TrackerConfig::title`].
    pub title: Option<String>,

    /// Overrides [`TrackerConfig::criteria_mode`].
    pub criteria_mode: Option<CriteriaMode>,
}

/// Handles warnings produced while loading a config file.
trait ConfigWarnings {
    /// Called with unknown keys found in a config file.
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>);
}

/// Logs config warnings through tracing.
struct DefaultConfigWarnings;

impl ConfigWarnings for DefaultConfigWarnings {
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>) {
        let mut unknown_str = String::new();
        if let (1, Some(key)) = (unknown.len(), unknown.first()) {
            // Print this on the same line.
            unknown_str.push_str("key: ");
            unknown_str.push_str(key);
        } else {
            unknown_str.push_str("keys:\n");
            for ignored_key in unknown {
                unknown_str.push_str("\n  - ");
                unknown_str.push_str(ignored_key);
            }
        }

        warn!("in config file {config_file}, ignoring unknown configuration {unknown_str}");
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedConfig {
    #[serde(default)]
    report: DeserializedReportConfig,

    #[serde(default)]
    criteria: DeserializedCriteriaConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedReportConfig {
    input: Option<Utf8PathBuf>,
    output: Option<Utf8PathBuf>,
    json_summary: Option<Utf8PathBuf>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedCriteriaConfig {
    mode: Option<CriteriaMode>,
}

impl DeserializedConfig {
    /// Returns `Ok(None)` if the file doesn't exist.
    fn from_path_with_warnings(
        path: &Utf8Path,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Option<Self>, ConfigError> {
        debug!("config: attempting to load from {path}");
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("config: file does not exist at {path}");
                return Ok(None);
            }
            Err(error) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    error,
                });
            }
        };

        let (config, unknown) =
            Self::deserialize_toml(&contents).map_err(|error| ConfigError::Parse {
                path: path.to_owned(),
                error,
            })?;
        if !unknown.is_empty() {
            warnings.unknown_config_keys(path, &unknown);
        }

        debug!("config: loaded from {path}");
        Ok(Some(config))
    }

    fn deserialize_toml(contents: &str) -> Result<(Self, BTreeSet<String>), toml::de::Error> {
        let deserializer = toml::Deserializer::parse(contents)?;
        let mut unknown = BTreeSet::new();
        let config: DeserializedConfig = serde_ignored::deserialize(deserializer, |path| {
            unknown.insert(path.to_string());
        })?;
        Ok((config, unknown))
    }
}
