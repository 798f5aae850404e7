//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the infrastructure
//! layer. Both stores must be safe under concurrent invocation; the
//! check-then-write sequences (`create` on either store) are atomic with
//! respect to other writers of the same store.

use crate::domain::entity::{account::Account, session::Session};
use crate::domain::value_object::{session_id::SessionId, username::Username};
use crate::error::AuthResult;

/// Account repository trait (the credential store)
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Persist a new account
    ///
    /// Fails with `DuplicateAccount` if the username already exists. The
    /// duplicate check and the write happen under the store's write lock.
    async fn create(&self, account: &Account) -> AuthResult<()>;

    /// Find an account by username (exact, case-sensitive)
    ///
    /// Absence is `Ok(None)`, not an error.
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Account>>;

    /// Check if a username exists
    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool>;

    /// Update an existing account (e.g. password change)
    ///
    /// Fails with `AccountNotFound` if the username is not stored.
    async fn update(&self, account: &Account) -> AuthResult<()>;
}

/// Session repository trait (the session store)
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Persist a new session
    ///
    /// Fails with `SessionIdCollision` if the id already names a stored
    /// record; issuance is not retried at this layer.
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find a session by id
    ///
    /// Absence is `Ok(None)`, not an error. Expiry is not checked here;
    /// the application layer decides what an expired record means.
    async fn find_by_id(&self, id: &SessionId) -> AuthResult<Option<Session>>;

    /// Remove a session
    ///
    /// Fails with `SessionNotFound` if no such record exists.
    async fn delete(&self, id: &SessionId) -> AuthResult<()>;

    /// Remove all expired sessions, returning how many were deleted
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
