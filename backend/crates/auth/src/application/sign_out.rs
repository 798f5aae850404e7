//! Sign Out Use Case
//!
//! Terminates a session.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::session_id::SessionId;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    /// Terminate the session named by the raw cookie value
    ///
    /// Terminating a session that is not stored fails with
    /// `SessionNotFound`; a malformed id is `SessionInvalid`.
    pub async fn execute(&self, raw_id: &str) -> AuthResult<()> {
        let id = SessionId::parse(raw_id).map_err(|_| AuthError::SessionInvalid)?;

        self.sessions.delete(&id).await?;

        tracing::info!(session_id = %id, "User signed out");
        Ok(())
    }
}
