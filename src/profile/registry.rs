//! Profile registry for looking up target applications

use std::collections::HashMap;

use super::TargetProfile;
use super::loader::ProfileLoader;
use crate::error::{Result, ResetterError};

/// Registry of all known target profiles
pub struct ProfileRegistry {
    profiles: Vec<TargetProfile>,
    by_id: HashMap<String, usize>,
}

impl ProfileRegistry {
    /// Create a new registry with the given profiles
    pub fn new(profiles: Vec<TargetProfile>) -> Self {
        let by_id: HashMap<String, usize> = profiles
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id.to_lowercase(), idx))
            .collect();

        Self { profiles, by_id }
    }

    /// Built-in profiles plus the user's `profiles.jsonc`
    pub fn load() -> Result<Self> {
        Ok(Self::new(ProfileLoader::from_config_home()?.load()?))
    }

    /// Get a profile by id or display name, ignoring case
    pub fn get(&self, id: &str) -> Option<&TargetProfile> {
        let key = id.trim().to_lowercase();

        if let Some(&idx) = self.by_id.get(&key) {
            return self.profiles.get(idx);
        }

        self.profiles.iter().find(|p| p.name.to_lowercase() == key)
    }

    /// Like [`get`](Self::get), but unknown ids are an error
    pub fn require(&self, id: &str) -> Result<&TargetProfile> {
        self.get(id).ok_or_else(|| ResetterError::ProfileNotFound { id: id.to_string() })
    }

    /// All profiles, in load order
    pub fn all(&self) -> &[TargetProfile] {
        &self.profiles
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new(super::default_profiles())
    }
}
