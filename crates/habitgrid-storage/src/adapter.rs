// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the HabitStore trait.

use async_trait::async_trait;
use tokio::sync::{OnceCell, broadcast};
use tracing::debug;

use habitgrid_config::StorageConfig;
use habitgrid_core::{
    Habit, HabitCheck, HabitList, HabitStore, HabitgridError, HealthStatus, StoreTable, User,
};

use crate::database::Database;
use crate::queries;

/// Capacity of the table-change broadcast channel. Subscribers that lag
/// beyond this re-run their query instead of replaying missed events.
const CHANGE_BUS_CAPACITY: usize = 64;

/// SQLite-backed habit store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`HabitStore::initialize`]. Every successful mutation publishes
/// the affected table on the change bus, which is what reactive query
/// façades subscribe to.
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
    changes: broadcast::Sender<StoreTable>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called;
    /// the change bus exists from construction so subscriptions taken before
    /// initialization stay valid.
    ///
    /// [`initialize`]: HabitStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUS_CAPACITY);
        Self {
            config,
            db: OnceCell::new(),
            changes,
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, HabitgridError> {
        self.db.get().ok_or_else(|| HabitgridError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }

    /// Announce a table mutation. Having no subscribers is fine.
    fn notify(&self, table: StoreTable) {
        let _ = self.changes.send(table);
    }
}

#[async_trait]
impl HabitStore for SqliteStore {
    async fn initialize(&self) -> Result<(), HabitgridError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| HabitgridError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), HabitgridError> {
        // Checkpoint WAL; the connection itself lives until drop.
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, HabitgridError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreTable> {
        self.changes.subscribe()
    }

    // --- Users ---

    async fn insert_user(&self, user: &User) -> Result<(), HabitgridError> {
        queries::users::insert_user(self.db()?, user).await?;
        self.notify(StoreTable::Users);
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<u64, HabitgridError> {
        let rows = queries::users::update_user(self.db()?, user).await?;
        if rows > 0 {
            self.notify(StoreTable::Users);
        }
        Ok(rows)
    }

    async fn delete_user_by_id(&self, id: &str) -> Result<u64, HabitgridError> {
        let rows = queries::users::delete_user_by_id(self.db()?, id).await?;
        if rows > 0 {
            // The cascade may have touched every table.
            self.notify(StoreTable::Users);
            self.notify(StoreTable::HabitLists);
            self.notify(StoreTable::Habits);
            self.notify(StoreTable::HabitChecks);
        }
        Ok(rows)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, HabitgridError> {
        queries::users::get_user(self.db()?, id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, HabitgridError> {
        queries::users::get_user_by_email(self.db()?, email).await
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, HabitgridError> {
        queries::users::get_user_by_username(self.db()?, username).await
    }

    // --- Habit lists ---

    async fn insert_habit_list(&self, list: &HabitList) -> Result<i64, HabitgridError> {
        let id = queries::lists::insert_habit_list(self.db()?, list).await?;
        self.notify(StoreTable::HabitLists);
        Ok(id)
    }

    async fn update_habit_list(&self, list: &HabitList) -> Result<u64, HabitgridError> {
        let rows = queries::lists::update_habit_list(self.db()?, list).await?;
        if rows > 0 {
            self.notify(StoreTable::HabitLists);
        }
        Ok(rows)
    }

    async fn delete_habit_list(&self, id: i64) -> Result<u64, HabitgridError> {
        let rows = queries::lists::delete_habit_list(self.db()?, id).await?;
        if rows > 0 {
            self.notify(StoreTable::HabitLists);
            self.notify(StoreTable::Habits);
            self.notify(StoreTable::HabitChecks);
        }
        Ok(rows)
    }

    async fn get_habit_list(&self, id: i64) -> Result<Option<HabitList>, HabitgridError> {
        queries::lists::get_habit_list(self.db()?, id).await
    }

    async fn habit_lists_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<HabitList>, HabitgridError> {
        queries::lists::habit_lists_for_user(self.db()?, user_id).await
    }

    // --- Habits ---

    async fn insert_habit(&self, habit: &Habit) -> Result<i64, HabitgridError> {
        let id = queries::habits::insert_habit(self.db()?, habit).await?;
        self.notify(StoreTable::Habits);
        Ok(id)
    }

    async fn update_habit(&self, habit: &Habit) -> Result<u64, HabitgridError> {
        let rows = queries::habits::update_habit(self.db()?, habit).await?;
        if rows > 0 {
            self.notify(StoreTable::Habits);
        }
        Ok(rows)
    }

    async fn delete_habit(&self, id: i64) -> Result<u64, HabitgridError> {
        let rows = queries::habits::delete_habit(self.db()?, id).await?;
        if rows > 0 {
            self.notify(StoreTable::Habits);
            self.notify(StoreTable::HabitChecks);
        }
        Ok(rows)
    }

    async fn get_habit(&self, id: i64) -> Result<Option<Habit>, HabitgridError> {
        queries::habits::get_habit(self.db()?, id).await
    }

    async fn habits_in_list(&self, list_id: i64) -> Result<Vec<Habit>, HabitgridError> {
        queries::habits::habits_in_list(self.db()?, list_id).await
    }

    // --- Habit checks ---

    async fn insert_check(&self, check: &HabitCheck) -> Result<i64, HabitgridError> {
        let id = queries::checks::insert_check(self.db()?, check).await?;
        self.notify(StoreTable::HabitChecks);
        Ok(id)
    }

    async fn update_check(&self, check: &HabitCheck) -> Result<u64, HabitgridError> {
        let rows = queries::checks::update_check(self.db()?, check).await?;
        if rows > 0 {
            self.notify(StoreTable::HabitChecks);
        }
        Ok(rows)
    }

    async fn delete_check(&self, id: i64) -> Result<u64, HabitgridError> {
        let rows = queries::checks::delete_check(self.db()?, id).await?;
        if rows > 0 {
            self.notify(StoreTable::HabitChecks);
        }
        Ok(rows)
    }

    async fn delete_checks_for_habit(&self, habit_id: i64) -> Result<u64, HabitgridError> {
        let rows = queries::checks::delete_checks_for_habit(self.db()?, habit_id).await?;
        if rows > 0 {
            self.notify(StoreTable::HabitChecks);
        }
        Ok(rows)
    }

    async fn get_check(&self, id: i64) -> Result<Option<HabitCheck>, HabitgridError> {
        queries::checks::get_check(self.db()?, id).await
    }

    async fn check_by_date(
        &self,
        habit_id: i64,
        date: i64,
    ) -> Result<Option<HabitCheck>, HabitgridError> {
        queries::checks::check_by_date(self.db()?, habit_id, date).await
    }

    async fn checks_for_habit(
        &self,
        habit_id: i64,
    ) -> Result<Vec<HabitCheck>, HabitgridError> {
        queries::checks::checks_for_habit(self.db()?, habit_id).await
    }

    async fn checks_by_date_range(
        &self,
        habit_id: i64,
        start: i64,
        end: i64,
    ) -> Result<Vec<HabitCheck>, HabitgridError> {
        queries::checks::checks_by_date_range(self.db()?, habit_id, start, end).await
    }
}
