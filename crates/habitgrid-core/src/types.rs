// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity types shared across the Habitgrid workspace.
//!
//! Timestamps (`created_at`, `updated_at`) are epoch milliseconds. Check
//! dates are epoch days (see [`crate::date`]) so that a check's identity is
//! independent of time zone and time-of-day.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Emoji recorded for a check when the user does not pick one.
pub const DEFAULT_CHECK_EMOJI: &str = "✅";

/// An account owning habit lists.
///
/// `id` is an opaque UUID string assigned at registration and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
}

/// A named collection of habits owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitList {
    /// Store-assigned rowid; 0 means "not yet inserted".
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A single habit within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Store-assigned rowid; 0 means "not yet inserted".
    pub id: i64,
    pub list_id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A daily check mark against a habit.
///
/// At most one check exists per `(habit_id, date)` pair. That invariant is
/// enforced by the check repository's upsert, not by a SQL constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitCheck {
    /// Store-assigned rowid; 0 means "not yet inserted".
    pub id: i64,
    pub habit_id: i64,
    /// Epoch day (days since 1970-01-01).
    pub date: i64,
    pub emoji: String,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Identifies which table a store mutation touched.
///
/// Published on the store's change bus after every successful mutation so
/// that reactive query subscriptions know when to re-run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum StoreTable {
    Users,
    HabitLists,
    Habits,
    HabitChecks,
}

/// Health status reported by the store's health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is operational but experiencing issues.
    Degraded(String),
    /// Store is not operational.
    Unhealthy(String),
}
