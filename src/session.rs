use anyhow::{Context, Result};
use log::warn;
use std::{fs, path::PathBuf, sync::RwLock};

use crate::models::UserProfile;

/// File-backed record of the logged-in user, the only thing that survives a
/// restart. One pretty-printed JSON file holding one profile; written on
/// login, deleted on logout, read once at construction.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<UserProfile>>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let current = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {}", path.display()))?;
            match serde_json::from_str(&contents) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    warn!("Discarding unreadable session file {}: {err}", path.display());
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            path,
            current: RwLock::new(current),
        })
    }

    pub fn current(&self) -> Option<UserProfile> {
        self.current.read().unwrap().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().unwrap().is_some()
    }

    pub fn login(&self, profile: UserProfile) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&profile)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;
        *self.current.write().unwrap() = Some(profile);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session at {}", self.path.display()))?;
        }
        *self.current.write().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            phone: Some("555-0100".into()),
        }
    }

    #[test]
    fn starts_logged_out_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json")).unwrap();
        assert!(!store.is_authenticated());
        assert!(store.current().is_none());
    }

    #[test]
    fn login_survives_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::new(path.clone()).unwrap();
        store.login(profile()).unwrap();
        assert_eq!(store.current(), Some(profile()));

        let reloaded = SessionStore::new(path).unwrap();
        assert_eq!(reloaded.current(), Some(profile()));
    }

    #[test]
    fn logout_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::new(path.clone()).unwrap();
        store.login(profile()).unwrap();
        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(!path.exists());

        let reloaded = SessionStore::new(path).unwrap();
        assert!(reloaded.current().is_none());
    }

    #[test]
    fn garbage_in_the_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = SessionStore::new(path).unwrap();
        assert!(!store.is_authenticated());
    }
}
