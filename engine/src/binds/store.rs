//! Profile Store
//!
//! Persistence for binding profiles and the active-profile pointer.
//!
//! [`JsonProfileStore`] keeps every profile plus the active name in one JSON
//! document and rewrites it after each successful mutation.
//! [`MemoryProfileStore`] has the same rules without a file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::profile::BindingProfile;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Maximum number of stored profiles, bundled ones included.
pub const MAX_PROFILES: usize = 16;

/// Maximum profile name length in characters.
pub const MAX_PROFILE_NAME_LEN: usize = 32;

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug)]
pub enum ProfileError {
    /// Another profile already uses this name.
    NameTaken(String),
    /// The store already holds [`MAX_PROFILES`] profiles.
    LimitReached,
    /// The profile is bundled and cannot be changed or removed.
    ReadOnly(String),
    NotFound(String),
    /// The active profile cannot be deleted.
    InUse(String),
    /// Empty, too long, or containing control characters.
    InvalidName(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::NameTaken(name) => write!(f, "A profile named \"{name}\" already exists"),
            ProfileError::LimitReached => write!(f, "Profile limit reached ({MAX_PROFILES})"),
            ProfileError::ReadOnly(name) => write!(f, "\"{name}\" is read-only"),
            ProfileError::NotFound(name) => write!(f, "No profile named \"{name}\""),
            ProfileError::InUse(name) => write!(f, "\"{name}\" is in use"),
            ProfileError::InvalidName(name) => write!(f, "Invalid profile name \"{name}\""),
            ProfileError::IoError(e) => write!(f, "Could not save profiles: {e}"),
            ProfileError::JsonError(e) => write!(f, "Profile file is corrupt: {e}"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<std::io::Error> for ProfileError {
    fn from(e: std::io::Error) -> Self {
        ProfileError::IoError(e)
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::JsonError(e)
    }
}

/// Check a user-supplied profile name.
pub fn validate_name(name: &str) -> Result<(), ProfileError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed != name
        || name.chars().count() > MAX_PROFILE_NAME_LEN
        || name.chars().any(char::is_control)
    {
        return Err(ProfileError::InvalidName(name.to_string()));
    }
    Ok(())
}

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Summary row for profile pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInfo {
    pub name: String,
    pub read_only: bool,
    pub binding_count: usize,
}

/// Backing store for binding profiles.
///
/// Failed operations leave the stored data unchanged.
pub trait ProfileStore {
    fn list_profiles(&self) -> Vec<ProfileInfo>;

    fn load_profile(&self, name: &str) -> Result<BindingProfile, ProfileError>;

    /// Insert or overwrite by name. `is_default` stores the profile as
    /// read-only; a read-only profile can only be overwritten by another
    /// default save.
    fn save_profile(&mut self, profile: &BindingProfile, is_default: bool) -> Result<(), ProfileError>;

    fn rename_profile(&mut self, old: &str, new: &str) -> Result<(), ProfileError>;

    fn delete_profile(&mut self, name: &str) -> Result<(), ProfileError>;

    /// Last name written with [`ProfileStore::set_active_name`].
    fn active_name(&self) -> Option<String>;

    fn set_active_name(&mut self, name: &str) -> Result<(), ProfileError>;

    fn contains(&self, name: &str) -> bool {
        self.list_profiles().iter().any(|p| p.name == name)
    }
}

// ============================================================================
// PROFILE DOCUMENT
// ============================================================================

/// All stored profiles plus the active pointer; the on-disk document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ProfileDocument {
    active: Option<String>,
    profiles: Vec<BindingProfile>,
}

impl ProfileDocument {
    fn find(&self, name: &str) -> Option<&BindingProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.name == name)
    }

    fn list(&self) -> Vec<ProfileInfo> {
        self.profiles
            .iter()
            .map(|p| ProfileInfo {
                name: p.name.clone(),
                read_only: p.read_only,
                binding_count: p.total_bindings(),
            })
            .collect()
    }

    fn load(&self, name: &str) -> Result<BindingProfile, ProfileError> {
        self.find(name)
            .cloned()
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))
    }

    fn save(&mut self, profile: &BindingProfile, is_default: bool) -> Result<(), ProfileError> {
        validate_name(&profile.name)?;
        let mut stored = profile.clone();
        stored.read_only = is_default;
        match self.position(&profile.name) {
            Some(index) => {
                if self.profiles[index].read_only && !is_default {
                    return Err(ProfileError::ReadOnly(profile.name.clone()));
                }
                self.profiles[index] = stored;
            }
            None => {
                if self.profiles.len() >= MAX_PROFILES {
                    return Err(ProfileError::LimitReached);
                }
                self.profiles.push(stored);
            }
        }
        Ok(())
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<(), ProfileError> {
        validate_name(new)?;
        let index = self
            .position(old)
            .ok_or_else(|| ProfileError::NotFound(old.to_string()))?;
        if self.profiles[index].read_only {
            return Err(ProfileError::ReadOnly(old.to_string()));
        }
        if old == new {
            return Ok(());
        }
        if self.find(new).is_some() {
            return Err(ProfileError::NameTaken(new.to_string()));
        }
        self.profiles[index].name = new.to_string();
        if self.active.as_deref() == Some(old) {
            self.active = Some(new.to_string());
        }
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), ProfileError> {
        let index = self
            .position(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;
        if self.profiles[index].read_only {
            return Err(ProfileError::ReadOnly(name.to_string()));
        }
        if self.active.as_deref() == Some(name) {
            return Err(ProfileError::InUse(name.to_string()));
        }
        self.profiles.remove(index);
        Ok(())
    }

    fn set_active(&mut self, name: &str) -> Result<(), ProfileError> {
        if self.find(name).is_none() {
            return Err(ProfileError::NotFound(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// Profile store that lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    doc: ProfileDocument,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn list_profiles(&self) -> Vec<ProfileInfo> {
        self.doc.list()
    }

    fn load_profile(&self, name: &str) -> Result<BindingProfile, ProfileError> {
        self.doc.load(name)
    }

    fn save_profile(&mut self, profile: &BindingProfile, is_default: bool) -> Result<(), ProfileError> {
        self.doc.save(profile, is_default)
    }

    fn rename_profile(&mut self, old: &str, new: &str) -> Result<(), ProfileError> {
        self.doc.rename(old, new)
    }

    fn delete_profile(&mut self, name: &str) -> Result<(), ProfileError> {
        self.doc.delete(name)
    }

    fn active_name(&self) -> Option<String> {
        self.doc.active.clone()
    }

    fn set_active_name(&mut self, name: &str) -> Result<(), ProfileError> {
        self.doc.set_active(name)
    }
}

// ============================================================================
// JSON STORE
// ============================================================================

/// Profile store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonProfileStore {
    path: PathBuf,
    doc: ProfileDocument,
}

impl JsonProfileStore {
    /// Open the store at `path`. A missing file starts an empty store; a
    /// corrupt file is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref().to_path_buf();
        let doc = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no profile file at {}, starting empty", path.display());
                ProfileDocument::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), ProfileError> {
        let json = serde_json::to_string_pretty(&self.doc)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Apply `op` to a scratch copy, persist it, and only then commit it.
    fn mutate(
        &mut self,
        op: impl FnOnce(&mut ProfileDocument) -> Result<(), ProfileError>,
    ) -> Result<(), ProfileError> {
        let previous = self.doc.clone();
        op(&mut self.doc)?;
        if let Err(e) = self.persist() {
            log::warn!("failed to write {}: {e}", self.path.display());
            self.doc = previous;
            return Err(e);
        }
        Ok(())
    }
}

impl ProfileStore for JsonProfileStore {
    fn list_profiles(&self) -> Vec<ProfileInfo> {
        self.doc.list()
    }

    fn load_profile(&self, name: &str) -> Result<BindingProfile, ProfileError> {
        self.doc.load(name)
    }

    fn save_profile(&mut self, profile: &BindingProfile, is_default: bool) -> Result<(), ProfileError> {
        self.mutate(|doc| doc.save(profile, is_default))
    }

    fn rename_profile(&mut self, old: &str, new: &str) -> Result<(), ProfileError> {
        self.mutate(|doc| doc.rename(old, new))
    }

    fn delete_profile(&mut self, name: &str) -> Result<(), ProfileError> {
        self.mutate(|doc| doc.delete(name))
    }

    fn active_name(&self) -> Option<String> {
        self.doc.active.clone()
    }

    fn set_active_name(&mut self, name: &str) -> Result<(), ProfileError> {
        if self.doc.active.as_deref() == Some(name) {
            return Ok(());
        }
        self.mutate(|doc| doc.set_active(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("menu_forge_profiles_{}_{name}", std::process::id()))
            .join("profiles.json")
    }

    fn bundled() -> BindingProfile {
        BindingProfile::new("Default")
    }

    #[test]
    fn test_read_only_profile_rejects_writes() {
        let mut store = MemoryProfileStore::new();
        store.save_profile(&bundled(), true).unwrap();
        assert!(matches!(
            store.save_profile(&bundled(), false),
            Err(ProfileError::ReadOnly(_))
        ));
        assert!(matches!(
            store.rename_profile("Default", "Mine"),
            Err(ProfileError::ReadOnly(_))
        ));
        assert!(matches!(store.delete_profile("Default"), Err(ProfileError::ReadOnly(_))));
        assert!(store.load_profile("Default").unwrap().read_only);
    }

    #[test]
    fn test_rename_collision_and_active_follow() {
        let mut store = MemoryProfileStore::new();
        store.save_profile(&BindingProfile::new("A"), false).unwrap();
        store.save_profile(&BindingProfile::new("B"), false).unwrap();
        store.set_active_name("A").unwrap();

        assert!(matches!(store.rename_profile("A", "B"), Err(ProfileError::NameTaken(_))));
        store.rename_profile("A", "C").unwrap();
        assert_eq!(store.active_name().as_deref(), Some("C"));
        assert!(!store.contains("A"));
    }

    #[test]
    fn test_active_profile_cannot_be_deleted() {
        let mut store = MemoryProfileStore::new();
        store.save_profile(&BindingProfile::new("A"), false).unwrap();
        store.save_profile(&BindingProfile::new("B"), false).unwrap();
        store.set_active_name("A").unwrap();

        assert!(matches!(store.delete_profile("A"), Err(ProfileError::InUse(_))));
        store.delete_profile("B").unwrap();
        assert_eq!(store.list_profiles().len(), 1);
    }

    #[test]
    fn test_profile_limit() {
        let mut store = MemoryProfileStore::new();
        for i in 0..MAX_PROFILES {
            store.save_profile(&BindingProfile::new(format!("P{i}")), false).unwrap();
        }
        assert!(matches!(
            store.save_profile(&BindingProfile::new("One more"), false),
            Err(ProfileError::LimitReached)
        ));
        // Overwriting an existing profile is still allowed at the cap.
        store.save_profile(&BindingProfile::new("P0"), false).unwrap();
        assert_eq!(store.list_profiles().len(), MAX_PROFILES);
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name("  padded ").is_err());
        assert!(validate_name("tab\there").is_err());
        assert!(validate_name(&"x".repeat(MAX_PROFILE_NAME_LEN + 1)).is_err());
        assert!(validate_name("Racing (Custom)").is_ok());
    }

    #[test]
    fn test_json_store_round_trip() {
        let path = temp_path("round_trip");
        let _ = std::fs::remove_file(&path);
        {
            let mut store = JsonProfileStore::open(&path).unwrap();
            store.save_profile(&bundled(), true).unwrap();
            store.save_profile(&BindingProfile::new("Mine"), false).unwrap();
            store.set_active_name("Mine").unwrap();
        }
        let store = JsonProfileStore::open(&path).unwrap();
        assert_eq!(store.active_name().as_deref(), Some("Mine"));
        let names: Vec<_> = store.list_profiles().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Default", "Mine"]);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_json_store_corrupt_file_is_error() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonProfileStore::open(&path), Err(ProfileError::JsonError(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
