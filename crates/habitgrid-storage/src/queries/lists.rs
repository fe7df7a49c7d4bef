// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Habit list CRUD operations.

use habitgrid_core::{HabitList, HabitgridError};
use rusqlite::params;

use crate::database::Database;

fn row_to_list(row: &rusqlite::Row<'_>) -> rusqlite::Result<HabitList> {
    Ok(HabitList {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Insert a habit list. An id of 0 lets the store assign the rowid; an
/// existing id replaces that row. Returns the effective id.
pub async fn insert_habit_list(db: &Database, list: &HabitList) -> Result<i64, HabitgridError> {
    let list = list.clone();
    db.connection()
        .call(move |conn| {
            let id = if list.id == 0 { None } else { Some(list.id) };
            conn.execute(
                "INSERT OR REPLACE INTO habit_lists (id, user_id, name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, list.user_id, list.name, list.created_at, list.updated_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a habit list row. Returns the number of rows affected (0 = not found).
pub async fn update_habit_list(db: &Database, list: &HabitList) -> Result<u64, HabitgridError> {
    let list = list.clone();
    db.connection()
        .call(move |conn| {
            let rows = conn.execute(
                "UPDATE habit_lists SET user_id = ?1, name = ?2, created_at = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![list.user_id, list.name, list.created_at, list.updated_at, list.id],
            )?;
            Ok(rows as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a habit list by id, cascading to its habits and their checks.
pub async fn delete_habit_list(db: &Database, id: i64) -> Result<u64, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let rows = conn.execute("DELETE FROM habit_lists WHERE id = ?1", params![id])?;
            Ok(rows as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a habit list by id.
pub async fn get_habit_list(db: &Database, id: i64) -> Result<Option<HabitList>, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, name, created_at, updated_at FROM habit_lists
                 WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], row_to_list);
            match result {
                Ok(list) => Ok(Some(list)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All lists for a user, most recently updated first.
pub async fn habit_lists_for_user(
    db: &Database,
    user_id: &str,
) -> Result<Vec<HabitList>, HabitgridError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, name, created_at, updated_at FROM habit_lists
                 WHERE user_id = ?1 ORDER BY updated_at DESC",
            )?;
            let rows = stmt.query_map(params![user_id], row_to_list)?;
            let mut lists = Vec::new();
            for row in rows {
                lists.push(row?);
            }
            Ok(lists)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
