//! Session Entity
//!
//! A server-held grant binding a random id to an account's username. The
//! username is carried by value; a session never observes later account
//! changes, and removing the account orphans (rather than dangles) the
//! session.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::domain::value_object::{session_id::SessionId, username::Username};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Random 128-bit id; also the bearer token carried by the cookie
    pub id: SessionId,
    /// The account this session authenticates
    pub username: Username,
    /// Expiration (Unix timestamp ms), enforced server-side on resolution
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Issue a new session for an account
    ///
    /// Generates a fresh random id. TTL is provided by the application
    /// layer (config), not hard-coded here.
    pub fn issue(username: Username, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::generate(),
            username,
            expires_at_ms: now.timestamp_millis() + ttl.as_millis() as i64,
            created_at: now,
        }
    }

    /// Reconstruct a stored session
    pub fn from_parts(
        id: SessionId,
        username: Username,
        expires_at_ms: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            expires_at_ms,
            created_at,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_fresh_session_not_expired() {
        let session = Session::issue(
            Username::new("alice_01").unwrap(),
            Duration::from_secs(86400),
        );
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_issue_generates_distinct_ids() {
        let username = Username::new("alice_01").unwrap();
        let a = Session::issue(username.clone(), Duration::from_secs(60));
        let b = Session::issue(username, Duration::from_secs(60));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_expired_session() {
        let mut session = Session::issue(
            Username::new("alice_01").unwrap(),
            Duration::from_secs(86400),
        );
        session.expires_at_ms = Utc::now().timestamp_millis() - 1000;

        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }
}
