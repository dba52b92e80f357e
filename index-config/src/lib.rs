//! Shared configuration loader for the content-index helpers.
//!
//! `defaults/index.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer deployment-specific files and
//! environment variables on top of those defaults via [`Loader`] before
//! deserializing into [`IndexConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/index.default.toml");

/// Prefix of environment variables read by [`Loader::with_environment`].
pub const ENV_PREFIX: &str = "CONTENT_INDEX";

/// Top-level configuration consumed by the indexing helpers.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    pub fulltext: FulltextConfig,
    pub cleanup: CleanupConfig,
}

/// Full-text bucket behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct FulltextConfig {
    /// Plain-text mode: compute `text` once from the whole fragment.
    pub plain: bool,
}

/// Characters stripped by the presentation cleanup step.
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    pub marker: char,
    pub fillers: Vec<char>,
}

/// Layers deployment sources over the embedded defaults.
///
/// Sources added later win: defaults, then files in the order given, then
/// environment variables, then explicit overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Adds a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Adds a TOML file that is skipped when absent, e.g. a per-site override.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    /// Adds `<PREFIX>_<SECTION>__<KEY>` environment variables,
    /// e.g. `CONTENT_INDEX_FULLTEXT__PLAIN=true`.
    pub fn with_environment(mut self, prefix: &str) -> Self {
        let source = Environment::with_prefix(prefix)
            .prefix_separator("_")
            .separator("__");
        self.builder = self.builder.add_source(source);
        self
    }

    /// Forces `key` (dotted, e.g. `fulltext.plain`) regardless of every other source.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merges all sources into an [`IndexConfig`].
    pub fn build(self) -> Result<IndexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone, without files or environment.
pub fn load_defaults() -> Result<IndexConfig, ConfigError> {
    Loader::new().build()
}
