// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Habit list repository.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;

use habitgrid_core::date::now_millis;
use habitgrid_core::{HabitList, HabitStore, HabitgridError, StoreTable};

use crate::watch::watch_query;

/// Domain façade over habit list storage.
///
/// Owns timestamp bookkeeping: `create` stamps both timestamps, every
/// `update` overwrites `updated_at` whether or not a visible field changed.
pub struct HabitListRepository {
    store: Arc<dyn HabitStore>,
}

impl HabitListRepository {
    pub fn new(store: Arc<dyn HabitStore>) -> Self {
        Self { store }
    }

    /// Create a list owned by `user_id`. A blank name is rejected before
    /// the store is touched.
    pub async fn create(&self, user_id: &str, name: &str) -> Result<HabitList, HabitgridError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitgridError::Validation(
                "habit list name must not be blank".into(),
            ));
        }
        let now = now_millis();
        let mut list = HabitList {
            id: 0,
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        list.id = self.store.insert_habit_list(&list).await?;
        Ok(list)
    }

    /// Update a list, refreshing `updated_at`. Zero rows affected means the
    /// list no longer exists.
    pub async fn update(&self, list: &HabitList) -> Result<HabitList, HabitgridError> {
        if list.name.trim().is_empty() {
            return Err(HabitgridError::Validation(
                "habit list name must not be blank".into(),
            ));
        }
        let mut updated = list.clone();
        updated.updated_at = now_millis();
        let rows = self.store.update_habit_list(&updated).await?;
        if rows == 0 {
            return Err(HabitgridError::not_found("habit list", list.id));
        }
        Ok(updated)
    }

    /// Delete a list. The store cascades to its habits and their checks.
    pub async fn delete(&self, id: i64) -> Result<(), HabitgridError> {
        let rows = self.store.delete_habit_list(id).await?;
        if rows == 0 {
            return Err(HabitgridError::not_found("habit list", id));
        }
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Option<HabitList>, HabitgridError> {
        self.store.get_habit_list(id).await
    }

    /// One user's lists, most recently updated first.
    pub async fn lists_for_user(&self, user_id: &str) -> Result<Vec<HabitList>, HabitgridError> {
        self.store.habit_lists_for_user(user_id).await
    }

    /// Reactive variant of [`lists_for_user`](Self::lists_for_user).
    pub fn watch_lists_for_user(&self, user_id: &str) -> watch::Receiver<Vec<HabitList>> {
        let user_id = user_id.to_string();
        watch_query(
            self.store.clone(),
            &[StoreTable::HabitLists],
            move |store| {
                let user_id = user_id.clone();
                async move { store.habit_lists_for_user(&user_id).await }.boxed()
            },
        )
    }

    /// Reactive point lookup; yields `None` once the list is deleted.
    pub fn watch_list(&self, id: i64) -> watch::Receiver<Option<HabitList>> {
        watch_query(
            self.store.clone(),
            &[StoreTable::HabitLists],
            move |store| async move { store.get_habit_list(id).await }.boxed(),
        )
    }
}
