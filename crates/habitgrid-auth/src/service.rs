// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The mock auth service.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use habitgrid_config::AuthConfig;
use habitgrid_core::{HabitStore, HabitgridError, User};

use crate::credentials::CredentialMap;
use crate::prefs::SessionPrefs;
use crate::types::{AuthState, Session};

fn require_non_blank(field: &'static str, value: &str) -> Result<(), HabitgridError> {
    if value.trim().is_empty() {
        return Err(HabitgridError::Validation(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}

/// Local account management backed by the store's `users` table, a JSON
/// credential map, and a JSON session file. There is no backend; tokens
/// are opaque UUIDs with no expiry.
///
/// The user row is the foreign-key root for habit lists, so registration
/// and account deletion go through the store while passwords and the
/// session never do.
pub struct AuthService {
    store: Arc<dyn HabitStore>,
    prefs: SessionPrefs,
    credentials: CredentialMap,
    state_tx: watch::Sender<AuthState>,
}

impl AuthService {
    /// Build the service, recovering any persisted session so the auth
    /// state starts where the last run left off.
    pub fn new(store: Arc<dyn HabitStore>, config: &AuthConfig) -> Self {
        let prefs = SessionPrefs::new(&config.session_path);
        let credentials = CredentialMap::new(&config.credentials_path);
        let initial = match prefs.load() {
            Some(session) => AuthState::Authenticated(session),
            None => AuthState::Unauthenticated,
        };
        let (state_tx, _) = watch::channel(initial);
        Self {
            store,
            prefs,
            credentials,
            state_tx,
        }
    }

    /// Current and future auth states. The receiver starts at the present
    /// state.
    pub fn auth_state(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }

    /// Create an account and log it in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, HabitgridError> {
        require_non_blank("username", username)?;
        require_non_blank("email", email)?;
        require_non_blank("password", password)?;

        if self.credentials.contains(email)
            || self.store.get_user_by_email(email).await?.is_some()
        {
            return Err(HabitgridError::Auth("email already registered".into()));
        }
        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(HabitgridError::Auth("username already taken".into()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            profile_picture_url: None,
        };
        self.store.insert_user(&user).await?;
        self.credentials.set(email, password)?;

        let session = self.open_session(&user)?;
        info!(user_id = %user.id, "account registered");
        Ok(session)
    }

    /// Authenticate against the credential map and open a fresh session.
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, HabitgridError> {
        if !self.credentials.verify(email, password) {
            return Err(HabitgridError::Auth("invalid email or password".into()));
        }
        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| HabitgridError::Auth("invalid email or password".into()))?;

        let session = self.open_session(&user)?;
        debug!(user_id = %user.id, "login succeeded");
        Ok(session)
    }

    /// End the active session, if any.
    pub fn logout(&self) -> Result<(), HabitgridError> {
        self.prefs.clear()?;
        // send_replace stores the state even while nobody subscribes.
        self.state_tx.send_replace(AuthState::Unauthenticated);
        Ok(())
    }

    /// Change username and/or email. A changed email re-keys the
    /// credential map so the existing password keeps working.
    pub async fn update_profile(
        &self,
        user_id: &str,
        username: &str,
        email: &str,
    ) -> Result<User, HabitgridError> {
        require_non_blank("username", username)?;
        require_non_blank("email", email)?;

        let current = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| HabitgridError::not_found("user", user_id))?;

        if email != current.email {
            if self.credentials.contains(email)
                || self.store.get_user_by_email(email).await?.is_some()
            {
                return Err(HabitgridError::Auth("email already registered".into()));
            }
        }
        if username != current.username
            && self.store.get_user_by_username(username).await?.is_some()
        {
            return Err(HabitgridError::Auth("username already taken".into()));
        }

        let updated = User {
            username: username.to_string(),
            email: email.to_string(),
            ..current.clone()
        };
        let rows = self.store.update_user(&updated).await?;
        if rows == 0 {
            return Err(HabitgridError::not_found("user", user_id));
        }
        if email != current.email {
            self.credentials.rekey(&current.email, email)?;
        }

        // Keep the persisted session in step when it belongs to this user.
        let active = self.state_tx.borrow().session().cloned();
        if let Some(session) = active {
            if session.user_id == user_id {
                let refreshed = Session {
                    username: updated.username.clone(),
                    email: updated.email.clone(),
                    ..session
                };
                self.prefs.save(&refreshed)?;
                self.state_tx
                    .send_replace(AuthState::Authenticated(refreshed));
            }
        }
        Ok(updated)
    }

    /// Delete the account and everything under it. The store cascades the
    /// user's lists, habits, and checks in one transaction.
    pub async fn delete_account(&self, user_id: &str) -> Result<(), HabitgridError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| HabitgridError::not_found("user", user_id))?;

        let rows = self.store.delete_user_by_id(user_id).await?;
        if rows == 0 {
            return Err(HabitgridError::not_found("user", user_id));
        }
        self.credentials.remove(&user.email)?;

        let active_is_this_user = self
            .state_tx
            .borrow()
            .session()
            .is_some_and(|s| s.user_id == user_id);
        if active_is_this_user {
            self.logout()?;
        }
        info!(user_id, "account deleted");
        Ok(())
    }

    fn open_session(&self, user: &User) -> Result<Session, HabitgridError> {
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        };
        self.prefs.save(&session)?;
        self.state_tx
            .send_replace(AuthState::Authenticated(session.clone()));
        Ok(session)
    }
}
