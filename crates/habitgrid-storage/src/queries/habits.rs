// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Habit CRUD operations.

use habitgrid_core::{Habit, HabitgridError};
use rusqlite::params;

use crate::database::Database;

fn row_to_habit(row: &rusqlite::Row<'_>) -> rusqlite::Result<Habit> {
    Ok(Habit {
        id: row.get(0)?,
        list_id: row.get(1)?,
        name: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Insert a habit. An id of 0 lets the store assign the rowid; an existing
/// id replaces that row. Returns the effective id.
pub async fn insert_habit(db: &Database, habit: &Habit) -> Result<i64, HabitgridError> {
    let habit = habit.clone();
    db.connection()
        .call(move |conn| {
            let id = if habit.id == 0 { None } else { Some(habit.id) };
            conn.execute(
                "INSERT OR REPLACE INTO habits (id, list_id, name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, habit.list_id, habit.name, habit.created_at, habit.updated_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a habit row. Returns the number of rows affected (0 = not found).
pub async fn update_habit(db: &Database, habit: &Habit) -> Result<u64, HabitgridError> {
    let habit = habit.clone();
    db.connection()
        .call(move |conn| {
            let rows = conn.execute(
                "UPDATE habits SET list_id = ?1, name = ?2, created_at = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![habit.list_id, habit.name, habit.created_at, habit.updated_at, habit.id],
            )?;
            Ok(rows as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a habit by id, cascading to its checks.
pub async fn delete_habit(db: &Database, id: i64) -> Result<u64, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let rows = conn.execute("DELETE FROM habits WHERE id = ?1", params![id])?;
            Ok(rows as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a habit by id.
pub async fn get_habit(db: &Database, id: i64) -> Result<Option<Habit>, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, list_id, name, created_at, updated_at FROM habits WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], row_to_habit);
            match result {
                Ok(habit) => Ok(Some(habit)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All habits in a list, oldest first.
pub async fn habits_in_list(db: &Database, list_id: i64) -> Result<Vec<Habit>, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, list_id, name, created_at, updated_at FROM habits
                 WHERE list_id = ?1 ORDER BY created_at ASC",
            )?;
            let rows = stmt.query_map(params![list_id], row_to_habit)?;
            let mut habits = Vec::new();
            for row in rows {
                habits.push(row?);
            }
            Ok(habits)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{lists::insert_habit_list, users::insert_user};
    use habitgrid_core::{HabitList, User};
    use tempfile::tempdir;

    async fn setup_db_with_list() -> (Database, i64, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let user = User {
            id: "user-1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            profile_picture_url: None,
        };
        insert_user(&db, &user).await.unwrap();

        let list = HabitList {
            id: 0,
            user_id: "user-1".to_string(),
            name: "Fitness".to_string(),
            created_at: 1,
            updated_at: 1,
        };
        let list_id = insert_habit_list(&db, &list).await.unwrap();
        (db, list_id, dir)
    }

    fn make_habit(list_id: i64, name: &str, created_at: i64) -> Habit {
        Habit {
            id: 0,
            list_id,
            name: name.to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn insert_and_get_habit_roundtrips() {
        let (db, list_id, _dir) = setup_db_with_list().await;

        let id = insert_habit(&db, &make_habit(list_id, "Run", 1)).await.unwrap();
        assert!(id > 0);

        let retrieved = get_habit(&db, id).await.unwrap().unwrap();
        assert_eq!(retrieved.name, "Run");
        assert_eq!(retrieved.list_id, list_id);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn habits_in_list_ordered_by_creation() {
        let (db, list_id, _dir) = setup_db_with_list().await;

        insert_habit(&db, &make_habit(list_id, "Second", 20)).await.unwrap();
        insert_habit(&db, &make_habit(list_id, "First", 10)).await.unwrap();
        insert_habit(&db, &make_habit(list_id, "Third", 30)).await.unwrap();

        let habits = habits_in_list(&db, list_id).await.unwrap();
        let names: Vec<&str> = habits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_missing_habit_affects_zero_rows() {
        let (db, list_id, _dir) = setup_db_with_list().await;

        let mut habit = make_habit(list_id, "Ghost", 1);
        habit.id = 999;
        assert_eq!(update_habit(&db, &habit).await.unwrap(), 0);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn deleting_list_cascades_to_habits() {
        let (db, list_id, _dir) = setup_db_with_list().await;

        let id = insert_habit(&db, &make_habit(list_id, "Run", 1)).await.unwrap();
        crate::queries::lists::delete_habit_list(&db, list_id)
            .await
            .unwrap();

        assert!(get_habit(&db, id).await.unwrap().is_none());
        assert!(habits_in_list(&db, list_id).await.unwrap().is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn empty_list_yields_no_habits() {
        let (db, list_id, _dir) = setup_db_with_list().await;
        assert!(habits_in_list(&db, list_id).await.unwrap().is_empty());
        db.close().await.unwrap();
    }
}
