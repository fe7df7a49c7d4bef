// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Window behavior against a real SQLite store, with a counting store
//! decorator to prove when I/O does and does not happen.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tempfile::tempdir;
use tokio::sync::broadcast;

use habitgrid_cache::CheckWindow;
use habitgrid_config::StorageConfig;
use habitgrid_core::date::to_epoch_day;
use habitgrid_core::{
    Habit, HabitCheck, HabitList, HabitStore, HabitgridError, HealthStatus, StoreTable, User,
};
use habitgrid_repo::{HabitCheckRepository, HabitListRepository, HabitRepository};
use habitgrid_storage::SqliteStore;

/// Store decorator that counts range fetches and can fail them for chosen
/// habit ids. Everything else delegates.
struct CountingStore {
    inner: Arc<dyn HabitStore>,
    range_fetches: AtomicUsize,
    habit_list_fetches: AtomicUsize,
    failing_habit: Option<i64>,
}

impl CountingStore {
    fn new(inner: Arc<dyn HabitStore>) -> Self {
        Self {
            inner,
            range_fetches: AtomicUsize::new(0),
            habit_list_fetches: AtomicUsize::new(0),
            failing_habit: None,
        }
    }

    fn failing_for(inner: Arc<dyn HabitStore>, habit_id: i64) -> Self {
        Self {
            failing_habit: Some(habit_id),
            ..Self::new(inner)
        }
    }

    fn range_fetches(&self) -> usize {
        self.range_fetches.load(Ordering::SeqCst)
    }

    fn habit_list_fetches(&self) -> usize {
        self.habit_list_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HabitStore for CountingStore {
    async fn initialize(&self) -> Result<(), HabitgridError> {
        self.inner.initialize().await
    }

    async fn close(&self) -> Result<(), HabitgridError> {
        self.inner.close().await
    }

    async fn health_check(&self) -> Result<HealthStatus, HabitgridError> {
        self.inner.health_check().await
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreTable> {
        self.inner.subscribe()
    }

    async fn insert_user(&self, user: &User) -> Result<(), HabitgridError> {
        self.inner.insert_user(user).await
    }

    async fn update_user(&self, user: &User) -> Result<u64, HabitgridError> {
        self.inner.update_user(user).await
    }

    async fn delete_user_by_id(&self, id: &str) -> Result<u64, HabitgridError> {
        self.inner.delete_user_by_id(id).await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, HabitgridError> {
        self.inner.get_user(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, HabitgridError> {
        self.inner.get_user_by_email(email).await
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, HabitgridError> {
        self.inner.get_user_by_username(username).await
    }

    async fn insert_habit_list(&self, list: &HabitList) -> Result<i64, HabitgridError> {
        self.inner.insert_habit_list(list).await
    }

    async fn update_habit_list(&self, list: &HabitList) -> Result<u64, HabitgridError> {
        self.inner.update_habit_list(list).await
    }

    async fn delete_habit_list(&self, id: i64) -> Result<u64, HabitgridError> {
        self.inner.delete_habit_list(id).await
    }

    async fn get_habit_list(&self, id: i64) -> Result<Option<HabitList>, HabitgridError> {
        self.inner.get_habit_list(id).await
    }

    async fn habit_lists_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<HabitList>, HabitgridError> {
        self.inner.habit_lists_for_user(user_id).await
    }

    async fn insert_habit(&self, habit: &Habit) -> Result<i64, HabitgridError> {
        self.inner.insert_habit(habit).await
    }

    async fn update_habit(&self, habit: &Habit) -> Result<u64, HabitgridError> {
        self.inner.update_habit(habit).await
    }

    async fn delete_habit(&self, id: i64) -> Result<u64, HabitgridError> {
        self.inner.delete_habit(id).await
    }

    async fn get_habit(&self, id: i64) -> Result<Option<Habit>, HabitgridError> {
        self.inner.get_habit(id).await
    }

    async fn habits_in_list(&self, list_id: i64) -> Result<Vec<Habit>, HabitgridError> {
        self.habit_list_fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.habits_in_list(list_id).await
    }

    async fn insert_check(&self, check: &HabitCheck) -> Result<i64, HabitgridError> {
        self.inner.insert_check(check).await
    }

    async fn update_check(&self, check: &HabitCheck) -> Result<u64, HabitgridError> {
        self.inner.update_check(check).await
    }

    async fn delete_check(&self, id: i64) -> Result<u64, HabitgridError> {
        self.inner.delete_check(id).await
    }

    async fn delete_checks_for_habit(&self, habit_id: i64) -> Result<u64, HabitgridError> {
        self.inner.delete_checks_for_habit(habit_id).await
    }

    async fn get_check(&self, id: i64) -> Result<Option<HabitCheck>, HabitgridError> {
        self.inner.get_check(id).await
    }

    async fn check_by_date(
        &self,
        habit_id: i64,
        date: i64,
    ) -> Result<Option<HabitCheck>, HabitgridError> {
        self.inner.check_by_date(habit_id, date).await
    }

    async fn checks_for_habit(&self, habit_id: i64) -> Result<Vec<HabitCheck>, HabitgridError> {
        self.inner.checks_for_habit(habit_id).await
    }

    async fn checks_by_date_range(
        &self,
        habit_id: i64,
        start: i64,
        end: i64,
    ) -> Result<Vec<HabitCheck>, HabitgridError> {
        self.range_fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing_habit == Some(habit_id) {
            return Err(HabitgridError::Internal("injected fetch failure".into()));
        }
        self.inner.checks_by_date_range(habit_id, start, end).await
    }
}

fn day(y: i32, m: u32, d: u32) -> i64 {
    to_epoch_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

async fn setup_list_with_habits(names: &[&str]) -> (Arc<dyn HabitStore>, i64, Vec<i64>, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("window.db");
    let store = SqliteStore::new(StorageConfig {
        database_path: db_path.to_str().unwrap().to_string(),
        wal_mode: true,
    });
    store.initialize().await.unwrap();
    let store: Arc<dyn HabitStore> = Arc::new(store);

    store
        .insert_user(&User {
            id: "user-1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            profile_picture_url: None,
        })
        .await
        .unwrap();
    let lists = HabitListRepository::new(store.clone());
    let habits = HabitRepository::new(store.clone());
    let list = lists.create("user-1", "Fitness").await.unwrap();

    let mut habit_ids = Vec::new();
    for name in names {
        habit_ids.push(habits.create(list.id, name).await.unwrap().id);
    }
    (store, list.id, habit_ids, dir)
}

#[tokio::test]
async fn window_spans_two_weeks_either_side_of_the_display_week() {
    let (store, list_id, habit_ids, _dir) = setup_list_with_habits(&["Run"]).await;
    let checks = HabitCheckRepository::new(store.clone());

    // One check inside the window, one outside it.
    checks
        .create_or_update(habit_ids[0], day(2024, 5, 20), "✅", None)
        .await
        .unwrap();
    checks
        .create_or_update(habit_ids[0], day(2024, 6, 24), "✅", None)
        .await
        .unwrap();

    let mut window = CheckWindow::new(store, list_id);
    window.load_week(day(2024, 6, 3)).await.unwrap();

    let expected = day(2024, 5, 20)..=day(2024, 6, 23);
    assert_eq!(window.loaded_range(), Some(&expected));
    assert_eq!(window.focus_week_start(), Some(day(2024, 6, 3)));

    let cached = window.checks_for(habit_ids[0]).unwrap();
    assert_eq!(cached.len(), 1, "the 06-24 check lies outside the window");
    assert_eq!(cached[0].date, day(2024, 5, 20));
}

#[tokio::test]
async fn reloading_the_same_week_does_no_io() {
    let (store, list_id, _habit_ids, _dir) = setup_list_with_habits(&["Run", "Read"]).await;
    let counting = Arc::new(CountingStore::new(store));

    let mut window = CheckWindow::new(counting.clone(), list_id);
    let monday = day(2024, 6, 3);

    window.load_week(monday).await.unwrap();
    assert_eq!(counting.habit_list_fetches(), 1);
    assert_eq!(counting.range_fetches(), 2, "one fetch per habit");

    window.load_week(monday).await.unwrap();
    assert_eq!(counting.habit_list_fetches(), 1, "second call must not fetch");
    assert_eq!(counting.range_fetches(), 2);
}

#[tokio::test]
async fn moving_the_display_week_out_of_range_reloads() {
    let (store, list_id, _habit_ids, _dir) = setup_list_with_habits(&["Run"]).await;
    let counting = Arc::new(CountingStore::new(store));

    let mut window = CheckWindow::new(counting.clone(), list_id);
    window.load_week(day(2024, 6, 3)).await.unwrap();
    assert_eq!(counting.range_fetches(), 1);

    window.load_week(day(2024, 6, 10)).await.unwrap();
    assert_eq!(counting.range_fetches(), 2);
    let expected = day(2024, 5, 27)..=day(2024, 6, 30);
    assert_eq!(window.loaded_range(), Some(&expected));
}

#[tokio::test]
async fn empty_list_records_the_range_without_looping() {
    let (store, list_id, _habit_ids, _dir) = setup_list_with_habits(&[]).await;
    let counting = Arc::new(CountingStore::new(store));

    let mut window = CheckWindow::new(counting.clone(), list_id);
    let monday = day(2024, 6, 3);

    window.load_week(monday).await.unwrap();
    assert!(window.loaded_range().is_some());
    assert!(window.checks_by_habit().is_empty());
    assert_eq!(counting.range_fetches(), 0);

    window.load_week(monday).await.unwrap();
    assert_eq!(counting.habit_list_fetches(), 1, "empty list must not reload");
}

#[tokio::test]
async fn one_failed_habit_fetch_does_not_abort_the_load() {
    let (store, list_id, habit_ids, _dir) = setup_list_with_habits(&["Run", "Read"]).await;
    let checks = HabitCheckRepository::new(store.clone());
    checks
        .create_or_update(habit_ids[1], day(2024, 6, 4), "✅", None)
        .await
        .unwrap();

    let failing = Arc::new(CountingStore::failing_for(store, habit_ids[0]));
    let mut window = CheckWindow::new(failing, list_id);
    window.load_week(day(2024, 6, 3)).await.unwrap();

    assert_eq!(
        window.checks_for(habit_ids[0]),
        Some(&[][..]),
        "failed habit gets an explicit empty entry"
    );
    assert_eq!(window.checks_for(habit_ids[1]).unwrap().len(), 1);
    assert!(window.loaded_range().is_some());
}

#[tokio::test]
async fn narrow_refresh_touches_only_the_mutated_habit_and_focus_week() {
    let (store, list_id, habit_ids, _dir) = setup_list_with_habits(&["Run", "Read"]).await;
    let checks = HabitCheckRepository::new(store.clone());
    let monday = day(2024, 6, 3);

    checks
        .create_or_update(habit_ids[1], day(2024, 6, 4), "✅", None)
        .await
        .unwrap();

    let mut window = CheckWindow::new(store.clone(), list_id);
    window.load_week(monday).await.unwrap();
    let range_before = window.loaded_range().cloned();

    // Check today for the first habit, then refresh just that habit.
    checks
        .create_or_update(habit_ids[0], day(2024, 6, 5), "🔥", None)
        .await
        .unwrap();
    window.refresh_habit(habit_ids[0]).await.unwrap();

    let refreshed = window.checks_for(habit_ids[0]).unwrap();
    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].emoji, "🔥");
    assert_eq!(window.checks_for(habit_ids[1]).unwrap().len(), 1);
    assert_eq!(window.loaded_range().cloned(), range_before);
}

#[tokio::test]
async fn cleared_history_empties_the_cached_entry_without_io() {
    let (store, list_id, habit_ids, _dir) = setup_list_with_habits(&["Run"]).await;
    let checks = HabitCheckRepository::new(store.clone());
    checks
        .create_or_update(habit_ids[0], day(2024, 6, 4), "✅", None)
        .await
        .unwrap();

    let counting = Arc::new(CountingStore::new(store));
    let mut window = CheckWindow::new(counting.clone(), list_id);
    window.load_week(day(2024, 6, 3)).await.unwrap();
    let fetches_after_load = counting.range_fetches();

    window.note_history_cleared(habit_ids[0]);
    assert_eq!(window.checks_for(habit_ids[0]), Some(&[][..]));
    assert_eq!(counting.range_fetches(), fetches_after_load);
}
