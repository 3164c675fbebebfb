//! Common test utilities for Resetter integration tests

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fake config home holding application storage files
pub struct TestHome {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path used as `RESETTER_CONFIG_HOME`
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestHome {
    /// Create a new empty config home
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Path of an application's storage file, e.g. `storage_path("Cursor")`
    pub fn storage_path(&self, app_dir: &str) -> PathBuf {
        self.path
            .join(app_dir)
            .join("User")
            .join("globalStorage")
            .join("storage.json")
    }

    /// Write an application's storage file
    pub fn write_storage(&self, app_dir: &str, content: &str) -> PathBuf {
        let path = self.storage_path(app_dir);
        std::fs::create_dir_all(path.parent().expect("storage path has a parent"))
            .expect("Failed to create storage directory");
        std::fs::write(&path, content).expect("Failed to write storage file");
        path
    }

    /// Write Resetter's own profiles file
    pub fn write_profiles(&self, content: &str) {
        let dir = self.path.join("resetter");
        std::fs::create_dir_all(&dir).expect("Failed to create settings directory");
        std::fs::write(dir.join("profiles.jsonc"), content).expect("Failed to write profiles");
    }

    /// Parse a JSON file
    pub fn read_json(path: &Path) -> serde_json::Value {
        let content = std::fs::read_to_string(path).expect("Failed to read file");
        serde_json::from_str(&content).expect("Failed to parse JSON")
    }
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

/// Command for the real resetter binary, isolated to `home`
#[allow(deprecated)]
pub fn resetter_cmd_for_home(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("resetter").expect("resetter binary is built");
    cmd.env("RESETTER_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Whether `value` is 64 lowercase hex characters
#[allow(dead_code)]
pub fn is_hex64(value: &str) -> bool {
    value.len() == 64
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Whether `value` is a canonical lowercase UUID
#[allow(dead_code)]
pub fn is_uuid(value: &str) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    groups.len() == 5
        && groups.iter().zip([8, 4, 4, 4, 12]).all(|(g, len)| {
            g.len() == len
                && g.chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        })
}

/// Whether `value` is `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}` with uppercase hex
#[allow(dead_code)]
pub fn is_braced_upper_uuid(value: &str) -> bool {
    value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .is_some_and(|inner| is_uuid(&inner.to_lowercase()) && inner == inner.to_uppercase())
}
