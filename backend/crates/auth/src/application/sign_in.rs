//! Sign In Use Case
//!
//! Authenticates an account and issues a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    accounts: Arc<A>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, S> SignInUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    pub fn new(accounts: Arc<A>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            accounts,
            sessions,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<Session> {
        // Inputs that cannot name a stored account are rejected the same way
        // as a wrong password, so probes learn nothing
        let username =
            Username::new(input.username).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .accounts
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.verify_password(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        // Issue a session. A generated id that collides with a stored record
        // fails the whole operation; the caller may retry sign-in.
        let session = Session::issue(account.username.clone(), self.config.session_ttl);
        self.sessions.create(&session).await?;

        tracing::info!(
            username = %session.username,
            session_id = %session.id,
            "User signed in"
        );

        Ok(session)
    }
}
