//! Author profile lookup
//!
//! Profiles live outside this crate; comment reads only consult them to
//! fill in display fields.

use crate::error::{QaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Display fields of a user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub slug: String,
    /// Display name
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl Profile {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            profile: None,
            profile_image: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.profile_image = Some(image.into());
        self
    }
}

/// Read-only lookup of profiles by slug
pub trait ProfileDirectory: Send + Sync {
    /// `Ok(None)` when no profile has this slug
    fn find_by_slug(&self, slug: &str) -> Result<Option<Profile>>;
}

/// In-memory profile directory
#[derive(Default)]
pub struct MemoryProfiles {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl MemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile
    pub fn insert(&self, profile: Profile) -> Result<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| QaError::Storage("profile directory lock poisoned".to_string()))?;
        profiles.insert(profile.slug.clone(), profile);
        Ok(())
    }
}

impl FromIterator<Profile> for MemoryProfiles {
    fn from_iter<I: IntoIterator<Item = Profile>>(iter: I) -> Self {
        let profiles = iter.into_iter().map(|p| (p.slug.clone(), p)).collect();
        Self {
            profiles: RwLock::new(profiles),
        }
    }
}

impl ProfileDirectory for MemoryProfiles {
    fn find_by_slug(&self, slug: &str) -> Result<Option<Profile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| QaError::Storage("profile directory lock poisoned".to_string()))?;
        Ok(profiles.get(slug).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let profiles: MemoryProfiles = [Profile::new("u1").with_name("Ada")].into_iter().collect();

        let found = profiles.find_by_slug("u1").unwrap().unwrap();
        assert_eq!(found.profile.as_deref(), Some("Ada"));
        assert!(found.profile_image.is_none());
        assert!(profiles.find_by_slug("u2").unwrap().is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let profiles = MemoryProfiles::new();
        profiles.insert(Profile::new("u1").with_name("Old")).unwrap();
        profiles.insert(Profile::new("u1").with_name("New")).unwrap();
        let found = profiles.find_by_slug("u1").unwrap().unwrap();
        assert_eq!(found.profile.as_deref(), Some("New"));
    }

    #[test]
    fn test_profile_field_names() {
        let p: Profile =
            serde_json::from_str(r#"{"slug":"u1","profile":"Ada","profileImage":"a.png"}"#).unwrap();
        assert_eq!(p.profile_image.as_deref(), Some("a.png"));
    }
}
