// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Habit repository.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;

use habitgrid_core::date::now_millis;
use habitgrid_core::{Habit, HabitStore, HabitgridError, StoreTable};

use crate::watch::watch_query;

/// Domain façade over habit storage.
pub struct HabitRepository {
    store: Arc<dyn HabitStore>,
}

impl HabitRepository {
    pub fn new(store: Arc<dyn HabitStore>) -> Self {
        Self { store }
    }

    /// Create a habit inside `list_id`. A blank name is rejected before
    /// the store is touched.
    pub async fn create(&self, list_id: i64, name: &str) -> Result<Habit, HabitgridError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitgridError::Validation(
                "habit name must not be blank".into(),
            ));
        }
        let now = now_millis();
        let mut habit = Habit {
            id: 0,
            list_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        habit.id = self.store.insert_habit(&habit).await?;
        Ok(habit)
    }

    /// Update a habit, refreshing `updated_at`. Zero rows affected means the
    /// habit no longer exists.
    pub async fn update(&self, habit: &Habit) -> Result<Habit, HabitgridError> {
        if habit.name.trim().is_empty() {
            return Err(HabitgridError::Validation(
                "habit name must not be blank".into(),
            ));
        }
        let mut updated = habit.clone();
        updated.updated_at = now_millis();
        let rows = self.store.update_habit(&updated).await?;
        if rows == 0 {
            return Err(HabitgridError::not_found("habit", habit.id));
        }
        Ok(updated)
    }

    /// Delete a habit. The store cascades to its checks.
    pub async fn delete(&self, id: i64) -> Result<(), HabitgridError> {
        let rows = self.store.delete_habit(id).await?;
        if rows == 0 {
            return Err(HabitgridError::not_found("habit", id));
        }
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Habit>, HabitgridError> {
        self.store.get_habit(id).await
    }

    /// Habits within a list, oldest first.
    pub async fn habits_in_list(&self, list_id: i64) -> Result<Vec<Habit>, HabitgridError> {
        self.store.habits_in_list(list_id).await
    }

    /// Reactive variant of [`habits_in_list`](Self::habits_in_list).
    pub fn watch_habits_in_list(&self, list_id: i64) -> watch::Receiver<Vec<Habit>> {
        watch_query(self.store.clone(), &[StoreTable::Habits], move |store| {
            async move { store.habits_in_list(list_id).await }.boxed()
        })
    }

    /// Reactive point lookup; yields `None` once the habit is deleted.
    pub fn watch_habit(&self, id: i64) -> watch::Receiver<Option<Habit>> {
        watch_query(self.store.clone(), &[StoreTable::Habits], move |store| {
            async move { store.get_habit(id).await }.boxed()
        })
    }
}
