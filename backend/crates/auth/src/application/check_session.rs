//! Check Session Use Case
//!
//! Resolves a raw session id to its session record and owning account.

use std::sync::Arc;

use crate::domain::entity::{account::Account, session::Session};
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::domain::value_object::session_id::SessionId;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    accounts: Arc<A>,
    sessions: Arc<S>,
}

impl<A, S> CheckSessionUseCase<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    pub fn new(accounts: Arc<A>, sessions: Arc<S>) -> Self {
        Self { accounts, sessions }
    }

    /// Resolve a raw id to a live session
    ///
    /// Malformed ids and ids with no stored record both resolve to `None`.
    /// An expired record is deleted and also resolves to `None`.
    pub async fn resolve(&self, raw_id: &str) -> AuthResult<Option<Session>> {
        let Ok(id) = SessionId::parse(raw_id) else {
            return Ok(None);
        };

        let Some(session) = self.sessions.find_by_id(&id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            // A concurrent sign-out may have removed it already
            match self.sessions.delete(&id).await {
                Ok(()) | Err(AuthError::SessionNotFound) => {}
                Err(e) => return Err(e),
            }
            tracing::debug!(session_id = %id, "Expired session removed on resolve");
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Resolve the account a session authenticates
    ///
    /// A session whose account no longer exists is a data-integrity fault,
    /// distinct from "session not found".
    pub async fn resolve_account(&self, session: &Session) -> AuthResult<Account> {
        self.accounts
            .find_by_username(&session.username)
            .await?
            .ok_or(AuthError::OrphanedSession)
    }

    /// Resolve a raw id all the way to (session, account)
    pub async fn current_account(&self, raw_id: &str) -> AuthResult<Option<(Session, Account)>> {
        match self.resolve(raw_id).await? {
            None => Ok(None),
            Some(session) => {
                let account = self.resolve_account(&session).await?;
                Ok(Some((session, account)))
            }
        }
    }

    /// Just check whether a raw id names a live session
    pub async fn is_valid(&self, raw_id: &str) -> bool {
        matches!(self.resolve(raw_id).await, Ok(Some(_)))
    }
}
