// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Habitgrid data core.

use thiserror::Error;

/// The primary error type used across all Habitgrid crates.
#[derive(Debug, Error)]
pub enum HabitgridError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An update or delete targeted a row that does not exist.
    ///
    /// The store signals this as a zero-rows-affected result; repositories
    /// translate that into this variant.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Input rejected before reaching the store (blank name, blank email).
    #[error("validation error: {0}")]
    Validation(String),

    /// Authentication failures (unknown email, wrong password, duplicate registration).
    #[error("auth error: {0}")]
    Auth(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HabitgridError {
    /// Convenience constructor for [`HabitgridError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
