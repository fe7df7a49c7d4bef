// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auth session types.

use serde::{Deserialize, Serialize};

/// An authenticated session. Persisted to the session prefs file so the
/// user stays logged in across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
}

/// Current authentication state, delivered over a watch channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(Session),
}

impl AuthState {
    /// The active session, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Unauthenticated => None,
            AuthState::Authenticated(session) => Some(session),
        }
    }
}
