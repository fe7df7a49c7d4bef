// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock credential map.
//!
//! A JSON file mapping email to a SHA-256 digest of the password. This is
//! a stand-in for a real backend, not a security boundary: no salt, no
//! KDF, local file only. Email uniqueness is enforced here rather than by
//! a store-level constraint.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::warn;

use habitgrid_core::HabitgridError;

/// Password-equivalent digest.
pub fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// On-disk email → digest map.
pub struct CredentialMap {
    path: PathBuf,
}

impl CredentialMap {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HashMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read credential map");
                return HashMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed credential map");
                HashMap::new()
            }
        }
    }

    fn save(&self, map: &HashMap<String, String>) -> Result<(), HabitgridError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| HabitgridError::Auth(format!("cannot create credential dir: {e}")))?;
        }
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| HabitgridError::Internal(format!("credential serialization: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| HabitgridError::Auth(format!("cannot write credential map: {e}")))
    }

    /// Whether an account exists for this email.
    pub fn contains(&self, email: &str) -> bool {
        self.load().contains_key(email)
    }

    /// Record credentials for an email, overwriting any previous digest.
    pub fn set(&self, email: &str, password: &str) -> Result<(), HabitgridError> {
        let mut map = self.load();
        map.insert(email.to_string(), digest(password));
        self.save(&map)
    }

    /// Check a password attempt. Unknown emails verify as false.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        self.load()
            .get(email)
            .is_some_and(|stored| *stored == digest(password))
    }

    /// Remove an account's credentials. Removing an absent entry is a no-op.
    pub fn remove(&self, email: &str) -> Result<(), HabitgridError> {
        let mut map = self.load();
        if map.remove(email).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }

    /// Move an entry to a new email, keeping the digest. Used when a
    /// profile update changes the address.
    pub fn rekey(&self, old_email: &str, new_email: &str) -> Result<(), HabitgridError> {
        let mut map = self.load();
        if let Some(stored) = map.remove(old_email) {
            map.insert(new_email.to_string(), stored);
            self.save(&map)?;
        }
        Ok(())
    }
}
