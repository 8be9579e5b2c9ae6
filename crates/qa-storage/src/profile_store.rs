//! File system storage for author profiles

use crate::comment_store::ensure_dir;
use crate::json_file::{read_records, write_records, CollectionLock};
use qa_core::error::Result;
use qa_core::profile::{Profile, ProfileDirectory};
use std::path::PathBuf;
use tracing::debug;

/// Profiles collection file name
const PROFILES_FILE: &str = "profiles.json";

/// Profile directory backed by a JSON collection file.
///
/// The comment service only reads through [`ProfileDirectory`]; `upsert`
/// exists so tooling can seed the file. Access is guarded by the same
/// advisory file lock as the comment collection.
pub struct FileSystemProfiles {
    profiles_path: PathBuf,
}

impl FileSystemProfiles {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        ensure_dir(&base_dir)?;
        Ok(Self {
            profiles_path: base_dir.join(PROFILES_FILE),
        })
    }

    fn read_locked(&self) -> Result<Vec<Profile>> {
        let _lock = CollectionLock::shared(&self.profiles_path)?;
        read_records(&self.profiles_path)
    }

    /// Insert or replace the profile with the same slug
    pub fn upsert(&self, profile: Profile) -> Result<()> {
        let _lock = CollectionLock::exclusive(&self.profiles_path)?;
        let mut profiles: Vec<Profile> = read_records(&self.profiles_path)?;
        match profiles.iter_mut().find(|p| p.slug == profile.slug) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }
        write_records(&self.profiles_path, &profiles)?;
        debug!("Saved profile collection {:?}", self.profiles_path);
        Ok(())
    }

    /// All stored profiles
    pub fn list(&self) -> Result<Vec<Profile>> {
        self.read_locked()
    }
}

impl ProfileDirectory for FileSystemProfiles {
    fn find_by_slug(&self, slug: &str) -> Result<Option<Profile>> {
        Ok(self.read_locked()?.into_iter().find(|p| p.slug == slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let profiles = FileSystemProfiles::new(temp.path()).unwrap();
        assert!(profiles.find_by_slug("u1").unwrap().is_none());
        assert!(profiles.list().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_and_find() {
        let temp = TempDir::new().unwrap();
        let profiles = FileSystemProfiles::new(temp.path()).unwrap();

        profiles
            .upsert(Profile::new("u1").with_name("Ada").with_image("ada.png"))
            .unwrap();
        profiles.upsert(Profile::new("u2").with_name("Brian")).unwrap();
        profiles.upsert(Profile::new("u1").with_name("Ada L.")).unwrap();

        let found = profiles.find_by_slug("u1").unwrap().unwrap();
        assert_eq!(found, Profile::new("u1").with_name("Ada L."));
        assert_eq!(profiles.list().unwrap().len(), 2);
    }

    #[test]
    fn test_upserts_from_two_handles_all_land() {
        let temp = TempDir::new().unwrap();
        let first = FileSystemProfiles::new(temp.path()).unwrap();
        let second = FileSystemProfiles::new(temp.path()).unwrap();

        std::thread::scope(|scope| {
            for (prefix, profiles) in [("a", &first), ("b", &second)] {
                scope.spawn(move || {
                    for n in 0..20 {
                        profiles
                            .upsert(Profile::new(format!("{}{}", prefix, n)))
                            .unwrap();
                    }
                });
            }
        });

        assert_eq!(first.list().unwrap().len(), 40);
    }
}
