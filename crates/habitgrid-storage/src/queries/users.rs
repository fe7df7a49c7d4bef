// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User CRUD operations.

use habitgrid_core::{HabitgridError, User};
use rusqlite::params;

use crate::database::Database;

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        profile_picture_url: row.get(3)?,
    })
}

/// Insert a user, replacing any existing row with the same id.
pub async fn insert_user(db: &Database, user: &User) -> Result<(), HabitgridError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO users (id, username, email, profile_picture_url)
                 VALUES (?1, ?2, ?3, ?4)",
                params![user.id, user.username, user.email, user.profile_picture_url],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a user row. Returns the number of rows affected (0 = not found).
pub async fn update_user(db: &Database, user: &User) -> Result<u64, HabitgridError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            let rows = conn.execute(
                "UPDATE users SET username = ?1, email = ?2, profile_picture_url = ?3
                 WHERE id = ?4",
                params![user.username, user.email, user.profile_picture_url, user.id],
            )?;
            Ok(rows as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a user by id, cascading to lists, habits, and checks.
///
/// The cascade is carried by SQLite foreign keys inside this single
/// statement, so a partial cascade is never observable.
pub async fn delete_user_by_id(db: &Database, id: &str) -> Result<u64, HabitgridError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let rows = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
            Ok(rows as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by id.
pub async fn get_user(db: &Database, id: &str) -> Result<Option<User>, HabitgridError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, email, profile_picture_url FROM users WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], row_to_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by email.
pub async fn get_user_by_email(db: &Database, email: &str) -> Result<Option<User>, HabitgridError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, email, profile_picture_url FROM users
                 WHERE email = ?1 LIMIT 1",
            )?;
            let result = stmt.query_row(params![email], row_to_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by username.
pub async fn get_user_by_username(
    db: &Database,
    username: &str,
) -> Result<Option<User>, HabitgridError> {
    let username = username.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, email, profile_picture_url FROM users
                 WHERE username = ?1 LIMIT 1",
            )?;
            let result = stmt.query_row(params![username], row_to_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
