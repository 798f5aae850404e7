//! Account Entity
//!
//! A registered identity: username, password digest, and optional profile
//! fields. The cleartext password never appears here.

use chrono::{DateTime, Utc};
use platform::password::{ClearTextPassword, PasswordDigest};

use crate::domain::value_object::username::Username;

/// Account entity
///
/// The username is the unique key and is immutable after creation. The
/// password digest may only change through [`Account::set_password`].
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique username (immutable)
    pub username: Username,
    /// SHA-256 digest of the password, hex-encoded
    pub password_digest: PasswordDigest,
    /// Optional profile field
    pub first_name: Option<String>,
    /// Optional profile field
    pub last_name: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    pub fn new(
        username: Username,
        password_digest: PasswordDigest,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            username,
            password_digest,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Verify a candidate password against the stored digest
    ///
    /// Recomputes the candidate's digest and compares in constant time.
    /// No side effects.
    pub fn verify_password(&self, candidate: &ClearTextPassword) -> bool {
        self.password_digest.matches(candidate)
    }

    /// Replace the password digest (explicit password change)
    pub fn set_password(&mut self, password_digest: PasswordDigest) {
        self.password_digest = password_digest;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(password: &str) -> Account {
        let digest = ClearTextPassword::new(password.to_string())
            .unwrap()
            .digest();
        Account::new(
            Username::new("alice_01").unwrap(),
            digest,
            Some("Alice".to_string()),
            None,
        )
    }

    #[test]
    fn test_verify_password() {
        let account = account("correcthorse1");

        let right = ClearTextPassword::new("correcthorse1".to_string()).unwrap();
        assert!(account.verify_password(&right));

        let wrong = ClearTextPassword::new("wronghorse12".to_string()).unwrap();
        assert!(!account.verify_password(&wrong));
    }

    #[test]
    fn test_set_password() {
        let mut account = account("correcthorse1");
        let old = ClearTextPassword::new("correcthorse1".to_string()).unwrap();
        let new = ClearTextPassword::new("betterhorse22".to_string()).unwrap();

        account.set_password(new.digest());

        assert!(!account.verify_password(&old));
        assert!(account.verify_password(&new));
    }
}
