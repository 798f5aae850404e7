//! Password Policy and Digesting
//!
//! Password handling for credential storage:
//! - Length policy on the cleartext (counted in Unicode code points)
//! - Deterministic SHA-256 digest, hex-encoded, for storage
//! - Zeroization of the cleartext on drop
//! - Constant-time digest comparison
//!
//! The digest is unsalted on purpose: the store contract requires that an
//! identical input always yields an identical output, so verification is a
//! recompute-and-compare. Comparison goes through [`crate::crypto::constant_time_eq`]
//! so equal-length mismatches cost the same regardless of where they differ.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (in Unicode code points)
pub const PASSWORD_LEN_MIN: usize = 8;

/// Maximum password length (in Unicode code points)
pub const PASSWORD_LEN_MAX: usize = 40;

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Error returned when a stored digest has an invalid shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordDigestError {
    #[error("Password digest must be {expected} hex characters (got {actual})")]
    WrongLength { expected: usize, actual: usize },

    #[error("Password digest must be lowercase hex")]
    InvalidCharacter,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// The only policy is length: between [`PASSWORD_LEN_MIN`] and
    /// [`PASSWORD_LEN_MAX`] Unicode code points. There is no character-set
    /// restriction.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let char_count = raw.chars().count();

        if char_count < PASSWORD_LEN_MIN {
            return Err(PasswordPolicyError::TooShort {
                min: PASSWORD_LEN_MIN,
                actual: char_count,
            });
        }

        if char_count > PASSWORD_LEN_MAX {
            return Err(PasswordPolicyError::TooLong {
                max: PASSWORD_LEN_MAX,
                actual: char_count,
            });
        }

        Ok(Self(raw))
    }

    /// Get the password as bytes for digesting
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Compute the storage digest of this password
    pub fn digest(&self) -> PasswordDigest {
        PasswordDigest(crypto::sha256_hex(self.as_bytes()))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Password Digest (for storage)
// ============================================================================

/// Hex-encoded SHA-256 digest of a password
///
/// Fixed-length (64 lowercase hex characters), safe to persist. The
/// cleartext cannot be recovered from it; it only supports exact-match
/// verification.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Reconstruct from a stored hex string, validating its shape
    pub fn from_hex(hex: impl Into<String>) -> Result<Self, PasswordDigestError> {
        let hex = hex.into();

        if hex.len() != DIGEST_HEX_LEN {
            return Err(PasswordDigestError::WrongLength {
                expected: DIGEST_HEX_LEN,
                actual: hex.len(),
            });
        }

        if !hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(PasswordDigestError::InvalidCharacter);
        }

        Ok(Self(hex))
    }

    /// Get the hex representation for storage
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Verify a candidate password against this digest
    ///
    /// Recomputes the candidate's digest and compares in constant time.
    pub fn matches(&self, candidate: &ClearTextPassword) -> bool {
        let candidate_digest = crypto::sha256_hex(candidate.as_bytes());
        crypto::constant_time_eq(self.0.as_bytes(), candidate_digest.as_bytes())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hex", &"[DIGEST]")
            .finish()
    }
}

impl TryFrom<String> for PasswordDigest {
    type Error = PasswordDigestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(value)
    }
}

impl From<PasswordDigest> for String {
    fn from(digest: PasswordDigest) -> Self {
        digest.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod policy {
        use super::*;

        #[test]
        fn test_minimum_length() {
            assert!(ClearTextPassword::new("a".repeat(PASSWORD_LEN_MIN)).is_ok());
        }

        #[test]
        fn test_too_short() {
            let result = ClearTextPassword::new("a".repeat(PASSWORD_LEN_MIN - 1));
            assert!(matches!(
                result,
                Err(PasswordPolicyError::TooShort { min: 8, actual: 7 })
            ));
        }

        #[test]
        fn test_maximum_length() {
            assert!(ClearTextPassword::new("a".repeat(PASSWORD_LEN_MAX)).is_ok());
        }

        #[test]
        fn test_too_long() {
            let result = ClearTextPassword::new("a".repeat(PASSWORD_LEN_MAX + 1));
            assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
        }

        #[test]
        fn test_empty() {
            assert!(matches!(
                ClearTextPassword::new(String::new()),
                Err(PasswordPolicyError::TooShort { actual: 0, .. })
            ));
        }

        #[test]
        fn test_no_charset_restriction() {
            // Any printable characters are fine, including spaces and symbols
            assert!(ClearTextPassword::new("pass word!@#".to_string()).is_ok());
        }

        #[test]
        fn test_length_counts_code_points() {
            // 8 multibyte characters are 8 code points, not 24 bytes
            assert!(ClearTextPassword::new("ああああああああ".to_string()).is_ok());
        }
    }

    mod digest {
        use super::*;

        #[test]
        fn test_deterministic() {
            let a = ClearTextPassword::new("secret123".to_string()).unwrap();
            let b = ClearTextPassword::new("secret123".to_string()).unwrap();
            assert_eq!(a.digest().as_hex(), b.digest().as_hex());
        }

        #[test]
        fn test_differs_for_different_input() {
            let a = ClearTextPassword::new("secret123".to_string()).unwrap();
            let b = ClearTextPassword::new("secret124".to_string()).unwrap();
            assert_ne!(a.digest().as_hex(), b.digest().as_hex());
        }

        #[test]
        fn test_digest_shape() {
            let digest = ClearTextPassword::new("secret123".to_string())
                .unwrap()
                .digest();
            assert_eq!(digest.as_hex().len(), DIGEST_HEX_LEN);
            assert!(
                digest
                    .as_hex()
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
            );
        }

        #[test]
        fn test_matches() {
            let password = ClearTextPassword::new("correcthorse1".to_string()).unwrap();
            let digest = password.digest();

            assert!(digest.matches(&password));

            let wrong = ClearTextPassword::new("wronghorse12".to_string()).unwrap();
            assert!(!digest.matches(&wrong));
        }

        #[test]
        fn test_from_hex_roundtrip() {
            let digest = ClearTextPassword::new("secret123".to_string())
                .unwrap()
                .digest();
            let restored = PasswordDigest::from_hex(digest.as_hex()).unwrap();
            assert_eq!(restored.as_hex(), digest.as_hex());
        }

        #[test]
        fn test_from_hex_rejects_wrong_length() {
            assert!(matches!(
                PasswordDigest::from_hex("abc123"),
                Err(PasswordDigestError::WrongLength { actual: 6, .. })
            ));
        }

        #[test]
        fn test_from_hex_rejects_non_hex() {
            let bad = "g".repeat(DIGEST_HEX_LEN);
            assert!(matches!(
                PasswordDigest::from_hex(bad),
                Err(PasswordDigestError::InvalidCharacter)
            ));
        }

        #[test]
        fn test_from_hex_rejects_uppercase() {
            let upper = "A".repeat(DIGEST_HEX_LEN);
            assert!(matches!(
                PasswordDigest::from_hex(upper),
                Err(PasswordDigestError::InvalidCharacter)
            ));
        }
    }

    mod redaction {
        use super::*;

        #[test]
        fn test_cleartext_debug_redacted() {
            let password = ClearTextPassword::new("SuperSecret1".to_string()).unwrap();
            let debug = format!("{:?}", password);
            assert!(debug.contains("REDACTED"));
            assert!(!debug.contains("SuperSecret1"));
        }

        #[test]
        fn test_digest_debug_redacted() {
            let digest = ClearTextPassword::new("SuperSecret1".to_string())
                .unwrap()
                .digest();
            let debug = format!("{:?}", digest);
            assert!(debug.contains("DIGEST"));
        }
    }
}
