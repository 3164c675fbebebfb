//! Target application profiles
//!
//! This module handles:
//! - Profile definitions (TargetProfile, FieldRule)
//! - Built-in profiles for Windsurf and Cursor
//! - Resolving a profile's storage file under the user's config directory
//! - Loading user-defined profiles (via loader module)
//! - Profile lookup (via ProfileRegistry)

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ResetterError};
use crate::identifier::IdStrategy;

pub mod loader;
pub mod registry;

pub use registry::ProfileRegistry;

/// Environment variable that replaces the platform config directory
pub const CONFIG_HOME_ENV: &str = "RESETTER_CONFIG_HOME";

/// Where VS Code based editors keep their telemetry identifiers
const STORAGE_FILE: &str = "User/globalStorage/storage.json";

/// One identifier field and how to regenerate it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Top-level JSON key, e.g. `telemetry.machineId`
    pub key: String,

    /// Generation strategy for the new value
    pub strategy: IdStrategy,
}

impl FieldRule {
    pub fn new(key: impl Into<String>, strategy: IdStrategy) -> Self {
        Self {
            key: key.into(),
            strategy,
        }
    }
}

/// A supported application whose identifiers can be reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Profile identifier (e.g., "cursor", "windsurf")
    pub id: String,

    /// Display name used in messages
    pub name: String,

    /// Storage file path relative to the user's config directory
    pub config_path: PathBuf,

    /// Fields rewritten by a reset, in order
    #[serde(rename = "fields")]
    pub field_rules: Vec<FieldRule>,
}

impl TargetProfile {
    /// Create a new profile with no fields
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        config_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config_path: config_path.into(),
            field_rules: Vec::new(),
        }
    }

    /// Add a field rule
    pub fn with_field(mut self, key: impl Into<String>, strategy: IdStrategy) -> Self {
        self.field_rules.push(FieldRule::new(key, strategy));
        self
    }

    /// Absolute path of the storage file under `config_home`
    pub fn resolve_in(&self, config_home: &Path) -> PathBuf {
        config_home.join(&self.config_path)
    }

    /// Absolute path of the storage file under the user's config directory
    pub fn resolve(&self) -> Result<PathBuf> {
        Ok(self.resolve_in(&config_home()?))
    }

    /// Reject profiles that could never be reset or that point outside the config directory
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ResetterError::ConfigInvalid {
                message: "profile id must not be empty".to_string(),
            });
        }

        if self.field_rules.is_empty() {
            return Err(ResetterError::ConfigInvalid {
                message: format!("profile '{}' has no fields", self.id),
            });
        }

        let escapes = self
            .config_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || self.config_path.as_os_str().is_empty() {
            return Err(ResetterError::ConfigInvalid {
                message: format!(
                    "profile '{}' config_path must be a relative path inside the config directory: {}",
                    self.id,
                    self.config_path.display()
                ),
            });
        }

        Ok(())
    }
}

/// Base directory that profile paths are resolved against
///
/// Uses the platform's application-data location (`%APPDATA%` on Windows,
/// `~/Library/Application Support` on macOS, `~/.config` on Linux). Can be
/// overridden with the `RESETTER_CONFIG_HOME` environment variable.
pub fn config_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_HOME_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::config_dir().ok_or(ResetterError::ConfigDirUnavailable)
}

fn storage_path(app_dir: &str) -> PathBuf {
    Path::new(app_dir).join(STORAGE_FILE)
}

/// Built-in profiles
pub fn default_profiles() -> Vec<TargetProfile> {
    vec![
        TargetProfile::new("windsurf", "Windsurf", storage_path("Windsurf"))
            .with_field("telemetry.machineId", IdStrategy::RandomUuidV4Pair)
            .with_field("telemetry.sqmId", IdStrategy::RandomUuidV4BracedUpper)
            .with_field("telemetry.devDeviceId", IdStrategy::RandomUuidV4),
        TargetProfile::new("cursor", "Cursor", storage_path("Cursor"))
            .with_field("telemetry.macMachineId", IdStrategy::RandomHex32)
            .with_field("telemetry.machineId", IdStrategy::RandomUuidV4Pair)
            .with_field("telemetry.sqmId", IdStrategy::RandomUuidV4BracedUpper)
            .with_field("telemetry.devDeviceId", IdStrategy::RandomUuidV4),
    ]
}
