//! Shared configuration loader for the tokensmith toolchain.
//!
//! `defaults/tokensmith.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`TokensmithConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokensmith_babel::{FileSpec, PlatformSpec};
use tokensmith_core::{BuildOptions, CollisionPolicy, Strictness};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/tokensmith.default.toml");

/// Name of the project file picked up from the working directory.
pub const PROJECT_FILE: &str = "tokensmith.toml";

/// Top-level configuration consumed by tokensmith applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TokensmithConfig {
    pub source: SourceConfig,
    pub build: BuildConfig,
    pub logging: LoggingConfig,
    /// Output platforms by name
    pub platforms: BTreeMap<String, PlatformConfig>,
}

/// Where token sources are read from.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub patterns: Vec<String>,
}

/// Mirrors [`BuildOptions`] plus the output root.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    pub strictness: Strictness,
    pub collisions: CollisionPolicy,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub build_path: PathBuf,
    #[serde(default)]
    pub files: Vec<FileSpec>,
}

fn enabled_by_default() -> bool {
    true
}

impl TokensmithConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            strictness: self.build.strictness,
            collisions: self.build.collisions,
        }
    }

    /// Platforms to render, in name order.
    ///
    /// With an empty `selected` every enabled platform is returned. Otherwise exactly the
    /// named platforms are, enabled or not; an unknown name is an error.
    pub fn platform_specs(&self, selected: &[String]) -> Result<Vec<PlatformSpec>, ConfigError> {
        if let Some(unknown) = selected
            .iter()
            .find(|name| !self.platforms.contains_key(name.as_str()))
        {
            let known: Vec<&str> = self.platforms.keys().map(String::as_str).collect();
            return Err(ConfigError::Message(format!(
                "unknown platform `{unknown}` (configured: {})",
                known.join(", ")
            )));
        }

        Ok(self
            .platforms
            .iter()
            .filter(|(name, platform)| {
                if selected.is_empty() {
                    platform.enabled
                } else {
                    selected.iter().any(|s| s == *name)
                }
            })
            .map(|(name, platform)| PlatformSpec {
                name: name.clone(),
                build_path: platform.build_path.clone(),
                files: platform.files.clone(),
            })
            .collect())
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
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
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
    pub fn build(self) -> Result<TokensmithConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TokensmithConfig, ConfigError> {
    Loader::new().build()
}
