// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Habit check repository.
//!
//! Enforces the at-most-one-check-per-day invariant: [`create_or_update`]
//! is the only write path that creates checks, and it upserts by the
//! natural key `(habit_id, date)` rather than by row id.
//!
//! [`create_or_update`]: HabitCheckRepository::create_or_update

use std::collections::HashSet;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;

use habitgrid_core::date::now_millis;
use habitgrid_core::{DEFAULT_CHECK_EMOJI, HabitCheck, HabitStore, HabitgridError, StoreTable};

use crate::watch::watch_query;

/// Domain façade over habit check storage.
pub struct HabitCheckRepository {
    store: Arc<dyn HabitStore>,
}

impl HabitCheckRepository {
    pub fn new(store: Arc<dyn HabitStore>) -> Self {
        Self { store }
    }

    /// Record a check for `(habit_id, date)`, updating the existing row in
    /// place when one exists. The returned check carries the row's id, which
    /// is stable across repeated calls for the same day. An empty emoji
    /// falls back to the default.
    pub async fn create_or_update(
        &self,
        habit_id: i64,
        date: i64,
        emoji: &str,
        note: Option<&str>,
    ) -> Result<HabitCheck, HabitgridError> {
        let emoji = if emoji.is_empty() {
            DEFAULT_CHECK_EMOJI
        } else {
            emoji
        };
        let now = now_millis();

        if let Some(existing) = self.store.check_by_date(habit_id, date).await? {
            let updated = HabitCheck {
                emoji: emoji.to_string(),
                note: note.map(str::to_string),
                updated_at: now,
                ..existing
            };
            let rows = self.store.update_check(&updated).await?;
            if rows == 0 {
                return Err(HabitgridError::not_found("habit check", updated.id));
            }
            return Ok(updated);
        }

        let mut check = HabitCheck {
            id: 0,
            habit_id,
            date,
            emoji: emoji.to_string(),
            note: note.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        check.id = self.store.insert_check(&check).await?;
        Ok(check)
    }

    /// Remove the check for `(habit_id, date)` if one exists. Unchecking a
    /// day that was never checked is a no-op, not an error.
    pub async fn delete_for_date(&self, habit_id: i64, date: i64) -> Result<(), HabitgridError> {
        if let Some(existing) = self.store.check_by_date(habit_id, date).await? {
            self.store.delete_check(existing.id).await?;
        }
        Ok(())
    }

    /// Delete one habit's entire check history. Returns the number of rows
    /// removed. Other habits are untouched.
    pub async fn clear_history(&self, habit_id: i64) -> Result<u64, HabitgridError> {
        self.store.delete_checks_for_habit(habit_id).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<HabitCheck>, HabitgridError> {
        self.store.get_check(id).await
    }

    /// Point lookup by the natural key.
    pub async fn check_by_date(
        &self,
        habit_id: i64,
        date: i64,
    ) -> Result<Option<HabitCheck>, HabitgridError> {
        self.store.check_by_date(habit_id, date).await
    }

    /// Full history for a habit, newest date first.
    pub async fn history(&self, habit_id: i64) -> Result<Vec<HabitCheck>, HabitgridError> {
        self.store.checks_for_habit(habit_id).await
    }

    /// Checks within `[start, end]` inclusive, ascending by date.
    pub async fn checks_in_range(
        &self,
        habit_id: i64,
        start: i64,
        end: i64,
    ) -> Result<Vec<HabitCheck>, HabitgridError> {
        self.store.checks_by_date_range(habit_id, start, end).await
    }

    /// Number of consecutive checked days ending at `today`. When `today`
    /// itself is unchecked, a streak ending yesterday still counts, so a
    /// user who has not checked in yet does not see their streak reset.
    pub async fn current_streak(
        &self,
        habit_id: i64,
        today: i64,
    ) -> Result<u32, HabitgridError> {
        let history = self.store.checks_for_habit(habit_id).await?;
        let dates: HashSet<i64> = history.iter().map(|c| c.date).collect();

        let mut day = if dates.contains(&today) {
            today
        } else if dates.contains(&(today - 1)) {
            today - 1
        } else {
            return Ok(0);
        };

        let mut streak = 0u32;
        while dates.contains(&day) {
            streak += 1;
            day -= 1;
        }
        Ok(streak)
    }

    /// Reactive variant of [`history`](Self::history).
    pub fn watch_checks_for_habit(&self, habit_id: i64) -> watch::Receiver<Vec<HabitCheck>> {
        watch_query(
            self.store.clone(),
            &[StoreTable::HabitChecks],
            move |store| async move { store.checks_for_habit(habit_id).await }.boxed(),
        )
    }

    /// Reactive variant of [`checks_in_range`](Self::checks_in_range).
    pub fn watch_checks_in_range(
        &self,
        habit_id: i64,
        start: i64,
        end: i64,
    ) -> watch::Receiver<Vec<HabitCheck>> {
        watch_query(
            self.store.clone(),
            &[StoreTable::HabitChecks],
            move |store| {
                async move { store.checks_by_date_range(habit_id, start, end).await }.boxed()
            },
        )
    }
}
