//! Session Id Value Object
//!
//! A session id is a 128-bit value from a cryptographically secure random
//! source, rendered as 32 lowercase hex characters. Unguessability of the id
//! is the sole protection of the bearer-token design, so generation always
//! goes through the OS CSPRNG.
//!
//! Parsing is strict: anything that is not exactly 32 lowercase hex
//! characters is rejected. This keeps untrusted cookie values from ever
//! reaching the storage layer, where ids become file names.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

use platform::crypto;

// ============================================================================
// Constants
// ============================================================================

/// Random bytes drawn per session id (128 bits)
pub const SESSION_ID_BYTE_LEN: usize = 16;

/// Length of the hex rendering
pub const SESSION_ID_HEX_LEN: usize = 2 * SESSION_ID_BYTE_LEN;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when parsing a session id fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIdError {
    /// Wrong length (expected SESSION_ID_HEX_LEN characters)
    WrongLength { length: usize },

    /// Contains a character outside lowercase hex
    InvalidCharacter { char: char },
}

impl fmt::Display for SessionIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { length } => {
                write!(
                    f,
                    "Session id must be {SESSION_ID_HEX_LEN} characters (got {length})"
                )
            }
            Self::InvalidCharacter { char } => {
                write!(f, "Session id contains invalid character '{char}'")
            }
        }
    }
}

impl std::error::Error for SessionIdError {}

// ============================================================================
// SessionId Value Object
// ============================================================================

/// Validated session id (32 lowercase hex characters)
#[derive(Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random id from the OS CSPRNG
    pub fn generate() -> Self {
        Self(crypto::random_hex(SESSION_ID_BYTE_LEN))
    }

    /// Parse an id from untrusted input (e.g. a cookie value)
    pub fn parse(input: impl AsRef<str>) -> Result<Self, SessionIdError> {
        let input = input.as_ref();

        let length = input.chars().count();
        if length != SESSION_ID_HEX_LEN {
            return Err(SessionIdError::WrongLength { length });
        }

        for ch in input.chars() {
            if !(ch.is_ascii_digit() || ('a'..='f').contains(&ch)) {
                return Err(SessionIdError::InvalidCharacter { char: ch });
            }
        }

        Ok(Self(input.to_string()))
    }

    /// Get the id as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionId").field(&self.0).finish()
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = SessionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

// ============================================================================
// Tests
// ============================================================================
