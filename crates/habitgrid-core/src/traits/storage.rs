// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait for the habit persistence backend.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::HabitgridError;
use crate::types::{Habit, HabitCheck, HabitList, HealthStatus, StoreTable, User};

/// The persistence surface for the four habit entities.
///
/// Implementations own the database lifecycle and guarantee that:
///
/// - `insert_*` assigns a store id when the entity's id is 0 and replaces
///   the existing row on primary-key conflict (upsert-by-id);
/// - `update_*` and `delete_*` return the number of rows affected — 0 is
///   the "not found" signal, not an error;
/// - deleting a parent cascades atomically to all its descendants
///   (user → lists → habits → checks);
/// - every successful mutation is announced on the change bus returned by
///   [`subscribe`](HabitStore::subscribe).
#[async_trait]
pub trait HabitStore: Send + Sync + 'static {
    /// Opens the database, applies migrations, and prepares the change bus.
    async fn initialize(&self) -> Result<(), HabitgridError>;

    /// Flushes pending writes to durable storage. The connection itself
    /// lives until the store is dropped.
    async fn close(&self) -> Result<(), HabitgridError>;

    /// Performs a liveness probe against the backend.
    async fn health_check(&self) -> Result<HealthStatus, HabitgridError>;

    /// Subscribes to table-change notifications.
    fn subscribe(&self) -> broadcast::Receiver<StoreTable>;

    // --- Users ---

    async fn insert_user(&self, user: &User) -> Result<(), HabitgridError>;
    async fn update_user(&self, user: &User) -> Result<u64, HabitgridError>;
    async fn delete_user_by_id(&self, id: &str) -> Result<u64, HabitgridError>;
    async fn get_user(&self, id: &str) -> Result<Option<User>, HabitgridError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, HabitgridError>;
    async fn get_user_by_username(&self, username: &str)
    -> Result<Option<User>, HabitgridError>;

    // --- Habit lists ---

    async fn insert_habit_list(&self, list: &HabitList) -> Result<i64, HabitgridError>;
    async fn update_habit_list(&self, list: &HabitList) -> Result<u64, HabitgridError>;
    async fn delete_habit_list(&self, id: i64) -> Result<u64, HabitgridError>;
    async fn get_habit_list(&self, id: i64) -> Result<Option<HabitList>, HabitgridError>;
    /// Lists for one user, most recently updated first.
    async fn habit_lists_for_user(&self, user_id: &str)
    -> Result<Vec<HabitList>, HabitgridError>;

    // --- Habits ---

    async fn insert_habit(&self, habit: &Habit) -> Result<i64, HabitgridError>;
    async fn update_habit(&self, habit: &Habit) -> Result<u64, HabitgridError>;
    async fn delete_habit(&self, id: i64) -> Result<u64, HabitgridError>;
    async fn get_habit(&self, id: i64) -> Result<Option<Habit>, HabitgridError>;
    /// Habits within a list, oldest first.
    async fn habits_in_list(&self, list_id: i64) -> Result<Vec<Habit>, HabitgridError>;

    // --- Habit checks ---

    async fn insert_check(&self, check: &HabitCheck) -> Result<i64, HabitgridError>;
    async fn update_check(&self, check: &HabitCheck) -> Result<u64, HabitgridError>;
    async fn delete_check(&self, id: i64) -> Result<u64, HabitgridError>;
    /// Bulk delete of one habit's entire check history.
    async fn delete_checks_for_habit(&self, habit_id: i64) -> Result<u64, HabitgridError>;
    async fn get_check(&self, id: i64) -> Result<Option<HabitCheck>, HabitgridError>;
    /// Point lookup by the natural key `(habit_id, date)`.
    async fn check_by_date(
        &self,
        habit_id: i64,
        date: i64,
    ) -> Result<Option<HabitCheck>, HabitgridError>;
    /// Full history for a habit, newest date first.
    async fn checks_for_habit(&self, habit_id: i64)
    -> Result<Vec<HabitCheck>, HabitgridError>;
    /// Checks for a habit within `[start, end]` (inclusive), ascending by date.
    async fn checks_by_date_range(
        &self,
        habit_id: i64,
        start: i64,
        end: i64,
    ) -> Result<Vec<HabitCheck>, HabitgridError>;
}
