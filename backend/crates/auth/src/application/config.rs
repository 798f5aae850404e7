//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Well-known session cookie name, shared by encode / decode / expire
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Default session lifetime (one day)
pub const SESSION_TTL_SECS: u64 = 86400;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session TTL; also the cookie Max-Age
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: SESSION_COOKIE_NAME.to_string(),
            session_ttl: Duration::from_secs(SESSION_TTL_SECS),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie, for plain-HTTP use)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Get session TTL in whole seconds (cookie Max-Age)
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }
}
