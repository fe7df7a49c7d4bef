// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Habitgrid.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Habitgrid configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HabitgridConfig {
    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Local auth service settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    data_file("habitgrid.db")
}

fn default_wal_mode() -> bool {
    true
}

/// Local auth service configuration.
///
/// Both files hold mock state: a JSON session snapshot and a JSON map of
/// email to password digest. Neither is real credential security.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Path to the JSON file holding the persisted session (token, user).
    #[serde(default = "default_session_path")]
    pub session_path: String,

    /// Path to the JSON file holding the email -> password-digest map.
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_path: default_session_path(),
            credentials_path: default_credentials_path(),
        }
    }
}

fn default_session_path() -> String {
    data_file("session.json")
}

fn default_credentials_path() -> String {
    data_file("credentials.json")
}

fn data_file(name: &str) -> String {
    dirs::data_dir()
        .map(|p| p.join("habitgrid").join(name))
        .and_then(|p| p.to_str().map(str::to_string))
        .unwrap_or_else(|| format!("./{name}"))
}
