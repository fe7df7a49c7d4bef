// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock local authentication for Habitgrid.
//!
//! Accounts live in the store's `users` table; passwords live as SHA-256
//! digests in a local JSON credential map; the active session is a JSON
//! prefs file. Auth state changes stream over a `tokio::sync::watch`
//! channel. Nothing here talks to a network.

pub mod credentials;
pub mod prefs;
pub mod service;
pub mod types;

pub use credentials::CredentialMap;
pub use prefs::SessionPrefs;
pub use service::AuthService;
pub use types::{AuthState, Session};
