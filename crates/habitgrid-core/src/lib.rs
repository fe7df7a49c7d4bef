// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Habitgrid habit-tracking data layer.
//!
//! This crate provides the foundational trait definitions, error types,
//! entity types, and date helpers used throughout the Habitgrid workspace.
//! The SQLite store, repositories, check cache, and auth service all build
//! on what is defined here.

pub mod date;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HabitgridError;
pub use traits::HabitStore;
pub use types::{
    DEFAULT_CHECK_EMOJI, Habit, HabitCheck, HabitList, HealthStatus, StoreTable, User,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        let _config = HabitgridError::Config("test".into());
        let _storage = HabitgridError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _not_found = HabitgridError::not_found("habit", 7);
        let _validation = HabitgridError::Validation("test".into());
        let _auth = HabitgridError::Auth("test".into());
        let _internal = HabitgridError::Internal("test".into());
    }

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = HabitgridError::not_found("habit list", 42);
        assert_eq!(err.to_string(), "habit list not found: 42");
    }

    #[test]
    fn store_table_round_trips_through_strings() {
        use std::str::FromStr;

        let variants = [
            StoreTable::Users,
            StoreTable::HabitLists,
            StoreTable::Habits,
            StoreTable::HabitChecks,
        ];
        for variant in &variants {
            let s = variant.to_string();
            let parsed = StoreTable::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn entities_serialize_to_json() {
        let check = HabitCheck {
            id: 1,
            habit_id: 2,
            date: 19875,
            emoji: DEFAULT_CHECK_EMOJI.to_string(),
            note: None,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_string(&check).expect("should serialize");
        let parsed: HabitCheck = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(check, parsed);
    }
}
