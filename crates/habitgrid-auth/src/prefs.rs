// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session preferences file.
//!
//! A small JSON file holding the active session, so a restart lands the
//! user back in their account without re-entering credentials.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use habitgrid_core::HabitgridError;

use crate::types::Session;

/// On-disk session storage.
pub struct SessionPrefs {
    path: PathBuf,
}

impl SessionPrefs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted session. A missing file means no session; an
    /// unreadable or malformed file is treated the same way, with a
    /// warning, so a corrupt prefs file never locks the user out.
    pub fn load(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read session prefs");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed session prefs");
                None
            }
        }
    }

    /// Persist the session, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> Result<(), HabitgridError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| HabitgridError::Auth(format!("cannot create prefs dir: {e}")))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| HabitgridError::Internal(format!("session serialization: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| HabitgridError::Auth(format!("cannot write session prefs: {e}")))
    }

    /// Remove the persisted session. Clearing an absent file is a no-op.
    pub fn clear(&self) -> Result<(), HabitgridError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HabitgridError::Auth(format!(
                "cannot clear session prefs: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_session() -> Session {
        Session {
            token: "tok-1".to_string(),
            user_id: "user-1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn round_trips_a_session() {
        let dir = tempdir().unwrap();
        let prefs = SessionPrefs::new(dir.path().join("session.json"));

        assert!(prefs.load().is_none());
        prefs.save(&make_session()).unwrap();
        assert_eq!(prefs.load(), Some(make_session()));

        prefs.clear().unwrap();
        assert!(prefs.load().is_none());
        prefs.clear().unwrap();
    }

    #[test]
    fn malformed_file_reads_as_no_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let prefs = SessionPrefs::new(path);
        assert!(prefs.load().is_none());
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tempdir().unwrap();
        let prefs = SessionPrefs::new(dir.path().join("nested/deeper/session.json"));
        prefs.save(&make_session()).unwrap();
        assert!(prefs.load().is_some());
    }
}
