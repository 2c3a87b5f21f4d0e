//! Configuration loading for dg.
//!
//! `defaults/dg.default.yaml` is embedded into the binary so that documentation and
//! runtime behavior stay in sync. Applications layer user-specific files on top of
//! those defaults via [`Loader`] before deserializing into [`DgConfig`]. A user file
//! only has to name the values it changes.

use crate::dg::generation::{GenerateOptions, LengthLimits};
use crate::dg::parsing::ParseOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_YAML: &str = include_str!("../../defaults/dg.default.yaml");

/// Top-level configuration consumed by dg applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DgConfig {
    pub limits: LengthLimits,
    pub generation: GenerationConfig,
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub skip_long: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub strict_markers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "tsv".to_string(),
        }
    }
}

impl DgConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict_markers: self.parser.strict_markers,
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            skip_long: self.generation.skip_long,
            limits: self.limits,
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.limits.title == 0 || self.limits.text == 0 {
            return Err(ConfigError::Message(
                "limits.title and limits.text must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_YAML, FileFormat::Yaml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Yaml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Yaml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DgConfig, ConfigError> {
        let config: DgConfig = self.builder.build()?.try_deserialize()?;
        config.validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DgConfig, ConfigError> {
    Loader::new().build()
}
