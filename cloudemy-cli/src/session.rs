//! Session persistence and the demo account table
//!
//! The session is created at login, stored as a small JSON file in the state
//! directory, handed read-only to every command that needs it, and removed at
//! logout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cloudemy_core::domain::session::{Role, Session};

/// Fixed demo accounts: (email, password, display name, role).
const ACCOUNTS: &[(&str, &str, &str, Role)] = &[
    (
        "student@cloudemy.com",
        "password123",
        "Student Kim",
        Role::Student,
    ),
    ("ta@cloudemy.com", "password123", "TA Lee", Role::Ta),
];

/// Check credentials against the demo account table.
pub fn authenticate(role: Role, email: &str, password: &str) -> Option<Session> {
    ACCOUNTS
        .iter()
        .find(|(acct_email, acct_password, _, acct_role)| {
            *acct_role == role && *acct_email == email && *acct_password == password
        })
        .map(|(email, _, name, role)| Session::new(*email, *name, *role))
}

fn session_path(state_dir: &Path) -> PathBuf {
    state_dir.join("session.json")
}

pub fn store(state_dir: &Path, session: &Session) -> Result<()> {
    fs::create_dir_all(state_dir)
        .with_context(|| format!("Failed to create state directory {:?}", state_dir))?;
    let json = serde_json::to_string_pretty(session)?;
    fs::write(session_path(state_dir), json)
        .with_context(|| format!("Failed to write session file in {:?}", state_dir))
}

pub fn load(state_dir: &Path) -> Result<Option<Session>> {
    let path = session_path(state_dir);
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read session file {:?}", path))?;
    let session = serde_json::from_str(&raw)
        .with_context(|| format!("Corrupt session file {:?}; log in again", path))?;
    Ok(Some(session))
}

/// Remove the session file. Returns false when nobody was logged in.
pub fn clear(state_dir: &Path) -> Result<bool> {
    let path = session_path(state_dir);
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(&path).with_context(|| format!("Failed to remove session file {:?}", path))?;
    Ok(true)
}

/// Load the session and require the role a command needs.
pub fn require(state_dir: &Path, role: Role) -> Result<Session> {
    match load(state_dir)? {
        Some(session) if session.role == role => Ok(session),
        Some(session) => anyhow::bail!(
            "this command needs a {} session, but {} is logged in as {}",
            role,
            session.display_name,
            session.role
        ),
        None => anyhow::bail!("not logged in; run `cloudemy login` first"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_demo_accounts() {
        let session = authenticate(Role::Student, "student@cloudemy.com", "password123").unwrap();
        assert_eq!(session.display_name, "Student Kim");
        assert_eq!(session.role, Role::Student);

        let session = authenticate(Role::Ta, "ta@cloudemy.com", "password123").unwrap();
        assert_eq!(session.role, Role::Ta);
    }

    #[test]
    fn test_wrong_password_or_role_rejected() {
        assert!(authenticate(Role::Student, "student@cloudemy.com", "nope").is_none());
        // A valid student account cannot log in as TA.
        assert!(authenticate(Role::Ta, "student@cloudemy.com", "password123").is_none());
    }

    #[test]
    fn test_store_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let state_dir = dir.path().join("state");

        assert!(load(&state_dir).unwrap().is_none());

        let session = Session::new("student@cloudemy.com", "Student Kim", Role::Student);
        store(&state_dir, &session).unwrap();

        let loaded = load(&state_dir).unwrap().unwrap();
        assert_eq!(loaded.email, "student@cloudemy.com");

        assert!(clear(&state_dir).unwrap());
        assert!(!clear(&state_dir).unwrap());
        assert!(load(&state_dir).unwrap().is_none());
    }

    #[test]
    fn test_require_enforces_role() {
        let dir = tempfile::tempdir().unwrap();
        let state_dir = dir.path().to_path_buf();

        assert!(require(&state_dir, Role::Student).is_err());

        let session = Session::new("ta@cloudemy.com", "TA Lee", Role::Ta);
        store(&state_dir, &session).unwrap();

        assert!(require(&state_dir, Role::Ta).is_ok());
        assert!(require(&state_dir, Role::Student).is_err());
    }
}
