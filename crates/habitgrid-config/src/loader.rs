// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./habitgrid.toml` > `~/.config/habitgrid/habitgrid.toml`
//! > `/etc/habitgrid/habitgrid.toml` with environment variable overrides via
//! the `HABITGRID_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HabitgridConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/habitgrid/habitgrid.toml` (system-wide)
/// 3. `~/.config/habitgrid/habitgrid.toml` (user XDG config)
/// 4. `./habitgrid.toml` (local directory)
/// 5. `HABITGRID_*` environment variables
pub fn load_config() -> Result<HabitgridConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HabitgridConfig::default()))
        .merge(Toml::file("/etc/habitgrid/habitgrid.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("habitgrid/habitgrid.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("habitgrid.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HabitgridConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HabitgridConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HabitgridConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HabitgridConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HABITGRID_STORAGE_DATABASE_PATH` must
/// map to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("HABITGRID_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("storage_", "storage.", 1)
            .replacen("auth_", "auth.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_file() {
        let config = load_config_from_str("").expect("defaults should load");
        assert!(config.storage.wal_mode);
        assert!(config.storage.database_path.ends_with("habitgrid.db"));
        assert!(config.auth.session_path.ends_with("session.json"));
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [storage]
            database_path = "/tmp/test.db"
            wal_mode = false

            [auth]
            credentials_path = "/tmp/creds.json"
            "#,
        )
        .expect("config should load");
        assert_eq!(config.storage.database_path, "/tmp/test.db");
        assert!(!config.storage.wal_mode);
        assert_eq!(config.auth.credentials_path, "/tmp/creds.json");
        // Untouched section keeps its default.
        assert!(config.auth.session_path.ends_with("session.json"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_config_from_str(
            r#"
            [storage]
            databse_path = "/tmp/typo.db"
            "#,
        );
        assert!(result.is_err(), "typo'd key should be rejected");
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = load_config_from_str("[metrics]\nenabled = true\n");
        assert!(result.is_err(), "unknown section should be rejected");
    }
}
