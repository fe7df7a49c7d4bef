// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Habit check CRUD and date-range queries.
//!
//! `date` columns hold epoch days. Range queries use inclusive bounds and
//! are always scoped to a single habit.

use habitgrid_core::{HabitCheck, HabitgridError};
use rusqlite::params;

use crate::database::Database;

fn row_to_check(row: &rusqlite::Row<'_>) -> rusqlite::Result<HabitCheck> {
    Ok(HabitCheck {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        date: row.get(2)?,
        emoji: row.get(3)?,
        note: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const CHECK_COLUMNS: &str = "id, habit_id, date, emoji, note, created_at, updated_at";

/// Insert a check. An id of 0 lets the store assign the rowid; an existing
/// id replaces that row. Returns the effective id.
pub async fn insert_check(db: &Database, check: &HabitCheck) -> Result<i64, HabitgridError> {
    let check = check.clone();
    db.connection()
        .call(move |conn| {
            let id = if check.id == 0 { None } else { Some(check.id) };
            conn.execute(
                "INSERT OR REPLACE INTO habit_checks
                 (id, habit_id, date, emoji, note, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    id,
                    check.habit_id,
                    check.date,
                    check.emoji,
                    check.note,
                    check.created_at,
                    check.updated_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a check row. Returns the number of rows affected (0 = not found).
pub async fn update_check(db: &Database, check: &HabitCheck) -> Result<u64, HabitgridError> {
    let check = check.clone();
    db.connection()
        .call(move |conn| {
            let rows = conn.execute(
                "UPDATE habit_checks SET habit_id = ?1, date = ?2, emoji = ?3, note = ?4,
                 created_at = ?5, updated_at = ?6 WHERE id = ?7",
                params![
                    check.habit_id,
                    check.date,
                    check.emoji,
                    check.note,
                    check.created_at,
                    check.updated_at,
                    check.id,
                ],
            )?;
            Ok(rows as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a check by id.
pub async fn delete_check(db: &Database, id: i64) -> Result<u64, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let rows = conn.execute("DELETE FROM habit_checks WHERE id = ?1", params![id])?;
            Ok(rows as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete every check belonging to one habit. Other habits are untouched.
pub async fn delete_checks_for_habit(db: &Database, habit_id: i64) -> Result<u64, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let rows = conn.execute(
                "DELETE FROM habit_checks WHERE habit_id = ?1",
                params![habit_id],
            )?;
            Ok(rows as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a check by id.
pub async fn get_check(db: &Database, id: i64) -> Result<Option<HabitCheck>, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CHECK_COLUMNS} FROM habit_checks WHERE id = ?1"
            ))?;
            let result = stmt.query_row(params![id], row_to_check);
            match result {
                Ok(check) => Ok(Some(check)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Point lookup by the natural key `(habit_id, date)`.
pub async fn check_by_date(
    db: &Database,
    habit_id: i64,
    date: i64,
) -> Result<Option<HabitCheck>, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CHECK_COLUMNS} FROM habit_checks
                 WHERE habit_id = ?1 AND date = ?2 LIMIT 1"
            ))?;
            let result = stmt.query_row(params![habit_id, date], row_to_check);
            match result {
                Ok(check) => Ok(Some(check)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Full check history for a habit, newest date first.
pub async fn checks_for_habit(
    db: &Database,
    habit_id: i64,
) -> Result<Vec<HabitCheck>, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CHECK_COLUMNS} FROM habit_checks
                 WHERE habit_id = ?1 ORDER BY date DESC"
            ))?;
            let rows = stmt.query_map(params![habit_id], row_to_check)?;
            let mut checks = Vec::new();
            for row in rows {
                checks.push(row?);
            }
            Ok(checks)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Checks for a habit with `start <= date <= end`, ascending by date.
pub async fn checks_by_date_range(
    db: &Database,
    habit_id: i64,
    start: i64,
    end: i64,
) -> Result<Vec<HabitCheck>, HabitgridError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CHECK_COLUMNS} FROM habit_checks
                 WHERE habit_id = ?1 AND date BETWEEN ?2 AND ?3 ORDER BY date ASC"
            ))?;
            let rows = stmt.query_map(params![habit_id, start, end], row_to_check)?;
            let mut checks = Vec::new();
            for row in rows {
                checks.push(row?);
            }
            Ok(checks)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
