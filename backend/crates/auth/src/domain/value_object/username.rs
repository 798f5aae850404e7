//! Username Value Object
//!
//! The username is the unique public identifier an account is created,
//! looked up, and signed in with.
//!
//! ## Invariants
//! - Length: 8-40 Unicode code points
//! - Characters: ASCII letters, digits, and `_` only
//! - Case-sensitive; lookups are exact-match and no normalization is applied

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for a username (in code points)
pub const USERNAME_LEN_MIN: usize = 8;

/// Maximum length for a username (in code points)
pub const USERNAME_LEN_MAX: usize = 40;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Username is too short (minimum: USERNAME_LEN_MIN)
    TooShort { length: usize, min: usize },

    /// Username is too long (maximum: USERNAME_LEN_MAX)
    TooLong { length: usize, max: usize },

    /// Username contains a character outside `[A-Za-z0-9_]`
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { length, min } => {
                write!(f, "Username is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only A-Z, a-z, 0-9 and _ are allowed"
                )
            }
        }
    }
}

impl std::error::Error for UsernameError {}

// ============================================================================
// Username Value Object
// ============================================================================

/// Validated username
///
/// # Invariants
/// - Length between USERNAME_LEN_MIN and USERNAME_LEN_MAX code points
/// - Contains only ASCII alphanumeric characters and underscores
///
/// The stored value is exactly what the user typed; uniqueness and lookup
/// are case-sensitive, so `Alice_01` and `alice_01` are different accounts.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw input, validating it
    pub fn new(input: impl Into<String>) -> Result<Self, UsernameError> {
        let input = input.into();
        Self::validate(&input)?;
        Ok(Self(input))
    }

    /// Get the username as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to the owned String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Validate the raw input
    fn validate(input: &str) -> Result<(), UsernameError> {
        let length = input.chars().count();
        if length < USERNAME_LEN_MIN {
            return Err(UsernameError::TooShort {
                length,
                min: USERNAME_LEN_MIN,
            });
        }
        if length > USERNAME_LEN_MAX {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_LEN_MAX,
            });
        }

        for (pos, ch) in input.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(UsernameError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        Ok(())
    }

    /// Check if a character is valid in a username
    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Username").field(&self.0).finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Username {
    type Error = UsernameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod length_validation {
        use super::*;

        #[test]
        fn test_seven_chars_fails() {
            assert!(matches!(
                Username::new("short1"),
                Err(UsernameError::TooShort { length: 6, min: 8 })
            ));
            assert!(matches!(
                Username::new("short12"),
                Err(UsernameError::TooShort { length: 7, min: 8 })
            ));
        }

        #[test]
        fn test_nine_chars_ok() {
            let name = Username::new("validuser").unwrap();
            assert_eq!(name.as_str(), "validuser");
        }

        #[test]
        fn test_minimum_length() {
            assert!(Username::new("a".repeat(USERNAME_LEN_MIN)).is_ok());
        }

        #[test]
        fn test_maximum_length() {
            assert!(Username::new("a".repeat(USERNAME_LEN_MAX)).is_ok());
        }

        #[test]
        fn test_too_long() {
            assert!(matches!(
                Username::new("a".repeat(USERNAME_LEN_MAX + 1)),
                Err(UsernameError::TooLong { length: 41, max: 40 })
            ));
        }

        #[test]
        fn test_empty_fails() {
            assert!(matches!(
                Username::new(""),
                Err(UsernameError::TooShort { length: 0, .. })
            ));
        }
    }

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_alphanumeric() {
            assert!(Username::new("alice1234").is_ok());
        }

        #[test]
        fn test_valid_underscore() {
            assert!(Username::new("alice_bob").is_ok());
        }

        #[test]
        fn test_valid_uppercase() {
            assert!(Username::new("AliceBob1").is_ok());
        }

        #[test]
        fn test_space_and_punctuation_fail() {
            assert!(matches!(
                Username::new("bad user!"),
                Err(UsernameError::InvalidCharacter { char: ' ', .. })
            ));
        }

        #[test]
        fn test_hyphen_fails() {
            assert!(matches!(
                Username::new("alice-bob"),
                Err(UsernameError::InvalidCharacter { char: '-', .. })
            ));
        }

        #[test]
        fn test_at_sign_fails() {
            assert!(matches!(
                Username::new("alice@bob"),
                Err(UsernameError::InvalidCharacter {
                    char: '@',
                    position: 5
                })
            ));
        }

        #[test]
        fn test_non_ascii_fails() {
            assert!(matches!(
                Username::new("日本語のユーザー"),
                Err(UsernameError::InvalidCharacter { .. })
            ));
            assert!(matches!(
                Username::new("aliceé123"),
                Err(UsernameError::InvalidCharacter { char: 'é', .. })
            ));
        }
    }

    mod case_sensitivity {
        use super::*;

        #[test]
        fn test_case_preserved() {
            let name = Username::new("AlIcE_123").unwrap();
            assert_eq!(name.as_str(), "AlIcE_123");
        }

        #[test]
        fn test_differing_case_differs() {
            let lower = Username::new("alice_001").unwrap();
            let upper = Username::new("ALICE_001").unwrap();
            assert_ne!(lower, upper);
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serialize() {
            let name = Username::new("alice_01").unwrap();
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, "\"alice_01\"");
        }

        #[test]
        fn test_deserialize() {
            let name: Username = serde_json::from_str("\"alice_01\"").unwrap();
            assert_eq!(name.as_str(), "alice_01");
        }

        #[test]
        fn test_deserialize_invalid() {
            let result: Result<Username, _> = serde_json::from_str("\"nope\"");
            assert!(result.is_err());
        }
    }

    mod conversions {
        use super::*;

        #[test]
        fn test_try_from_string() {
            let name: Result<Username, _> = "alice_01".to_string().try_into();
            assert!(name.is_ok());
        }

        #[test]
        fn test_into_string() {
            let name = Username::new("alice_01").unwrap();
            let s: String = name.into();
            assert_eq!(s, "alice_01");
        }

        #[test]
        fn test_display() {
            let name = Username::new("alice_01").unwrap();
            assert_eq!(format!("{}", name), "alice_01");
        }
    }
}
