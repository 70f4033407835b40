//! Durable session store.
//!
//! Persists the auth token and user identity to `~/.komp/session.json` so a
//! login survives restarts. Cleared on explicit logout or when the backend
//! rejects the token with a 401.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Authenticated user identity, as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
}

/// A stored session: bearer token plus the identity it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}

/// Handle to the session file on disk.
///
/// No expiry validation or refresh flow: `is_authenticated` is a synchronous
/// presence check of the stored token.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default location: `~/.komp/session.json`.
    pub fn new() -> Self {
        let path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".komp")
            .join("session.json");
        Self { path }
    }

    /// Store at an explicit path.
    pub const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the session from disk. A missing or unparseable file is treated
    /// as "not logged in".
    pub fn load(&self) -> Option<Session> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persist a session, creating the parent directory if needed.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove the stored session, if any.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Whether a token is present on disk.
    pub fn is_authenticated(&self) -> bool {
        self.load().is_some()
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }

    /// The stored user identity, if any.
    pub fn user(&self) -> Option<AuthUser> {
        self.load().map(|s| s.user)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));
        (dir, store)
    }

    fn session() -> Session {
        Session {
            token: "tok-123".into(),
            user: AuthUser {
                id: 7,
                username: "alice".into(),
                email: Some("alice@example.com".into()),
                role: "USER".into(),
            },
        }
    }

    #[test]
    fn missing_file_is_not_authenticated() {
        let (_dir, store) = temp_store();
        assert!(!store.is_authenticated());
        assert!(store.load().is_none());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let (_dir, store) = temp_store();
        store.save(&session()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.user.username, "alice");
        assert!(store.is_authenticated());
    }

    #[test]
    fn clear_removes_session() {
        let (_dir, store) = temp_store();
        store.save(&session()).unwrap();
        store.clear().unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clear_on_missing_file_is_ok() {
        let (_dir, store) = temp_store();
        assert!(store.clear().is_ok());
    }

    #[test]
    fn corrupt_file_is_not_authenticated() {
        let (_dir, store) = temp_store();
        store.save(&session()).unwrap();
        std::fs::write(store.path.clone(), "not json").unwrap();
        assert!(store.load().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn user_without_email_deserializes() {
        let json = r#"{"token":"t","user":{"id":1,"username":"bob","role":"USER"}}"#;
        let loaded: Session = serde_json::from_str(json).unwrap();
        assert!(loaded.user.email.is_none());
    }
}
