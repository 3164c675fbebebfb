//! Profile configuration loading and merging
//!
//! This module handles loading user-defined profiles from a `profiles.jsonc`
//! file and merging them with the built-in profile definitions.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{TargetProfile, config_home, default_profiles};
use crate::error::{Result, ResetterError};

/// Directory under the config home holding Resetter's own settings
const APP_DIR: &str = "resetter";

/// User profiles file name
const PROFILES_FILE: &str = "profiles.jsonc";

/// Profile configuration loader
pub struct ProfileLoader {
    /// Directory the profiles file is looked up in
    settings_dir: PathBuf,
}

impl ProfileLoader {
    /// Create a loader reading `<dir>/profiles.jsonc`
    pub fn new(settings_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_dir: settings_dir.into(),
        }
    }

    /// Create a loader for `<config home>/resetter/profiles.jsonc`
    pub fn from_config_home() -> Result<Self> {
        Ok(Self::new(config_home()?.join(APP_DIR)))
    }

    /// Path of the profiles file this loader reads
    pub fn profiles_path(&self) -> PathBuf {
        self.settings_dir.join(PROFILES_FILE)
    }

    /// Load profiles
    ///
    /// Built-in profiles come first; user profiles with a matching id replace
    /// them and new ids are appended. Ids compare case-insensitively, and
    /// after merging no two profiles may share an id or a name.
    pub fn load(&self) -> Result<Vec<TargetProfile>> {
        let mut profiles = default_profiles();

        if let Some(user_profiles) = self.load_user_profiles()? {
            ensure_unique(&user_profiles, |p| &p.id, "id")?;
            profiles = Self::merge_profiles(profiles, user_profiles);
            ensure_unique(&profiles, |p| &p.name, "name")?;
        }

        Ok(profiles)
    }

    fn load_user_profiles(&self) -> Result<Option<Vec<TargetProfile>>> {
        let profiles_path = self.profiles_path();

        if !profiles_path.exists() {
            debug!(path = %profiles_path.display(), "no user profiles file");
            return Ok(None);
        }

        let content =
            fs::read_to_string(&profiles_path).map_err(|e| ResetterError::ConfigReadFailed {
                path: profiles_path.display().to_string(),
                reason: e.to_string(),
            })?;

        let json_content = strip_jsonc_comments(&content);
        let loaded = parse_profiles_json(&json_content, &profiles_path)?;

        for profile in &loaded {
            profile.validate()?;
        }

        debug!(
            path = %profiles_path.display(),
            count = loaded.len(),
            "loaded user profiles"
        );
        Ok(Some(loaded))
    }

    /// Later profiles override earlier profiles with matching IDs
    fn merge_profiles(
        base: Vec<TargetProfile>,
        overrides: Vec<TargetProfile>,
    ) -> Vec<TargetProfile> {
        let mut merged = base;

        for profile in overrides {
            if let Some(pos) = merged
                .iter()
                .position(|p| p.id.to_lowercase() == profile.id.to_lowercase())
            {
                merged[pos] = profile;
            } else {
                merged.push(profile);
            }
        }

        merged
    }
}

/// Fail on two profiles whose `field` is equal ignoring case
fn ensure_unique(
    profiles: &[TargetProfile],
    field: impl Fn(&TargetProfile) -> &String,
    label: &str,
) -> Result<()> {
    let mut seen = HashSet::new();

    for profile in profiles {
        let value = field(profile);
        if !seen.insert(value.to_lowercase()) {
            return Err(ResetterError::ConfigInvalid {
                message: format!("duplicate profile {label} '{value}'"),
            });
        }
    }

    Ok(())
}

/// Parse profiles JSON, supporting both array format and object with "profiles" key
fn parse_profiles_json(json_content: &str, path: &Path) -> Result<Vec<TargetProfile>> {
    let parse_failed = |e: serde_json::Error| ResetterError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let value: serde_json::Value = serde_json::from_str(json_content).map_err(parse_failed)?;

    match value {
        serde_json::Value::Array(items) => {
            serde_json::from_value(serde_json::Value::Array(items)).map_err(parse_failed)
        }
        serde_json::Value::Object(mut obj) => match obj.remove("profiles") {
            Some(profiles @ serde_json::Value::Array(_)) => {
                serde_json::from_value(profiles).map_err(parse_failed)
            }
            _ => Err(ResetterError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: "expected a 'profiles' array".to_string(),
            }),
        },
        _ => Err(ResetterError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: "expected an array of profiles".to_string(),
        }),
    }
}

/// Remove `//` and `/* */` comments outside of string literals
fn strip_jsonc_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut in_single_comment = false;
    let mut in_multi_comment = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_single_comment {
            if c == '\n' {
                in_single_comment = false;
                result.push(c);
            }
        } else if in_multi_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                in_multi_comment = false;
                chars.next();
            }
        } else if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else {
            match (c, chars.peek()) {
                ('/', Some('/')) => {
                    in_single_comment = true;
                    chars.next();
                }
                ('/', Some('*')) => {
                    in_multi_comment = true;
                    chars.next();
                }
                ('"', _) => {
                    in_string = true;
                    result.push(c);
                }
                _ => result.push(c),
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::IdStrategy;
    use tempfile::TempDir;

    const VSCODIUM: &str = r#"{
        // Extra editor
        "profiles": [
            {
                "id": "vscodium",
                "name": "VSCodium",
                "config_path": "VSCodium/User/globalStorage/storage.json",
                "fields": [
                    { "key": "telemetry.machineId", "strategy": "random-hex32" } /* hex */
                ]
            }
        ]
    }"#;

    #[test]
    fn test_load_without_user_file_returns_builtins() {
        let temp = TempDir::new().unwrap();
        let profiles = ProfileLoader::new(temp.path()).load().unwrap();
        assert_eq!(profiles, default_profiles());
    }

    #[test]
    fn test_load_appends_new_profile() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROFILES_FILE), VSCODIUM).unwrap();

        let profiles = ProfileLoader::new(temp.path()).load().unwrap();
        assert_eq!(profiles.len(), 3);
        let vscodium = &profiles[2];
        assert_eq!(vscodium.name, "VSCodium");
        assert_eq!(vscodium.field_rules[0].strategy, IdStrategy::RandomHex32);
    }

    #[test]
    fn test_load_overrides_builtin_by_id() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROFILES_FILE),
            r#"[{
                "id": "cursor",
                "name": "Cursor Nightly",
                "config_path": "Cursor Nightly/User/globalStorage/storage.json",
                "fields": [{ "key": "telemetry.devDeviceId", "strategy": "random-uuid-v4" }]
            }]"#,
        )
        .unwrap();

        let profiles = ProfileLoader::new(temp.path()).load().unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[1].name, "Cursor Nightly");
        assert_eq!(profiles[1].field_rules.len(), 1);
    }

    #[test]
    fn test_load_overrides_builtin_ignoring_id_case() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROFILES_FILE),
            r#"[{
                "id": "Cursor",
                "name": "Cursor Nightly",
                "config_path": "Cursor Nightly/User/globalStorage/storage.json",
                "fields": [{ "key": "telemetry.devDeviceId", "strategy": "random-uuid-v4" }]
            }]"#,
        )
        .unwrap();

        let profiles = ProfileLoader::new(temp.path()).load().unwrap();
        let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["windsurf", "Cursor"]);
        assert_eq!(profiles[1].name, "Cursor Nightly");
    }

    #[test]
    fn test_load_rejects_duplicate_user_ids() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROFILES_FILE),
            r#"[
                {"id": "zed", "name": "Zed", "config_path": "Zed/s.json",
                 "fields": [{"key": "k", "strategy": "random-uuid-v4"}]},
                {"id": "ZED", "name": "Zed Preview", "config_path": "ZedP/s.json",
                 "fields": [{"key": "k", "strategy": "random-uuid-v4"}]}
            ]"#,
        )
        .unwrap();

        let err = ProfileLoader::new(temp.path()).load().unwrap_err();
        assert!(matches!(err, ResetterError::ConfigInvalid { .. }));
        assert!(err.to_string().contains("duplicate profile id"));
    }

    #[test]
    fn test_load_rejects_name_shared_with_builtin() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROFILES_FILE),
            r#"[{"id": "cursor-insiders", "name": "cursor", "config_path": "CI/s.json",
                "fields": [{"key": "k", "strategy": "random-uuid-v4"}]}]"#,
        )
        .unwrap();

        let err = ProfileLoader::new(temp.path()).load().unwrap_err();
        assert!(err.to_string().contains("duplicate profile name 'cursor'"));
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROFILES_FILE), "{ not json").unwrap();

        let err = ProfileLoader::new(temp.path()).load().unwrap_err();
        assert!(matches!(err, ResetterError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_strategy() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROFILES_FILE),
            r#"[{"id": "x", "name": "X", "config_path": "X/s.json",
                "fields": [{"key": "k", "strategy": "sequential"}]}]"#,
        )
        .unwrap();

        let err = ProfileLoader::new(temp.path()).load().unwrap_err();
        assert!(matches!(err, ResetterError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_load_rejects_escaping_path() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROFILES_FILE),
            r#"[{"id": "x", "name": "X", "config_path": "../x.json",
                "fields": [{"key": "k", "strategy": "random-uuid-v4"}]}]"#,
        )
        .unwrap();

        let err = ProfileLoader::new(temp.path()).load().unwrap_err();
        assert!(matches!(err, ResetterError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_strip_jsonc_comments_keeps_strings() {
        let stripped = strip_jsonc_comments(r#"{"a": "http://x/*y*/", // c
"b": "q\"//"} /* tail */"#);
        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["a"], "http://x/*y*/");
        assert_eq!(value["b"], "q\"//");
    }

    #[test]
    fn test_parse_rejects_object_without_profiles() {
        let err = parse_profiles_json(r#"{"other": []}"#, Path::new("p.jsonc")).unwrap_err();
        assert!(err.to_string().contains("p.jsonc"));
    }
}
