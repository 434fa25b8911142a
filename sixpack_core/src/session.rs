//! Signed-in identity for the local CLI.
//!
//! The session file only remembers which identity is active. Progress
//! itself lives in the store.

use crate::store::ProgressStore;
use crate::types::{UserId, UserRole};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Session {
    #[serde(default)]
    pub user_id: Option<UserId>,
}

impl Session {
    pub const FILE_NAME: &'static str = "session.json";

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(Self::FILE_NAME)
    }

    /// Load the session, treating a missing or unreadable file as signed out
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::warn!("Failed to parse session {:?}: {}. Signing out.", path, e);
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(self)?)?;
        tracing::debug!("Saved session to {:?}", path);
        Ok(())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// Identity of the signed-in user, or `NotAuthenticated`
    pub fn require_user(&self) -> Result<UserId> {
        self.user_id.ok_or(Error::NotAuthenticated)
    }

    /// Sign in, reusing the current identity or creating a new one
    ///
    /// The session only changes once the store accepted the identity.
    pub fn sign_in(&mut self, store: &mut impl ProgressStore) -> Result<(UserId, UserRole)> {
        let user = self.user_id.unwrap_or_else(Uuid::new_v4);
        let role = store.register(&user)?;
        self.user_id = Some(user);
        Ok((user, role))
    }

    pub fn sign_out(&mut self) {
        self.user_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;

    #[test]
    fn test_signed_out_by_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let session = Session::load(&Session::path_in(temp_dir.path())).unwrap();
        assert!(!session.is_signed_in());
        assert!(matches!(session.require_user(), Err(Error::NotAuthenticated)));
    }

    #[test]
    fn test_sign_in_persists_and_is_reused() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = Session::path_in(temp_dir.path());
        let mut store = LocalStore::in_dir(temp_dir.path());

        let mut session = Session::default();
        let (user, role) = session.sign_in(&mut store).unwrap();
        assert_eq!(role, UserRole::Admin);
        session.save(&path).unwrap();

        let mut reloaded = Session::load(&path).unwrap();
        assert_eq!(reloaded.require_user().unwrap(), user);
        let (again, _) = reloaded.sign_in(&mut store).unwrap();
        assert_eq!(again, user);
    }

    #[test]
    fn test_sign_out() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::in_dir(temp_dir.path());

        let mut session = Session::default();
        session.sign_in(&mut store).unwrap();
        session.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_failed_sign_in_leaves_session_untouched() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::in_dir(temp_dir.path());
        std::fs::write(store.path(), "not json").unwrap();

        let mut session = Session::default();
        assert!(session.sign_in(&mut store).is_err());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_corrupt_session_means_signed_out() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = Session::path_in(temp_dir.path());
        std::fs::write(&path, "{ broken").unwrap();

        assert!(!Session::load(&path).unwrap().is_signed_in());
    }
}
