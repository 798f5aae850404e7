//! Session Cookie Protocol
//!
//! Translates a session id into and out of the HTTP cookie that carries it.
//! The cookie name, lifetime, and security attributes are fixed by
//! [`AuthConfig`]; the value is the session id itself, a capability token
//! whose unguessability is its only protection.

use http::HeaderMap;
use platform::cookie::{self, CookieConfig};

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::error::{AuthError, AuthResult};

/// Sentinel value set when instructing the client to drop the cookie
pub const SESSION_COOKIE_DELETED: &str = "deleted";

fn cookie_config(config: &AuthConfig, max_age_secs: i64) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(max_age_secs),
    }
}

/// Encode a session into a Set-Cookie header value
///
/// The cookie carries the session id with the configured Max-Age and is
/// always HttpOnly.
pub fn encode(config: &AuthConfig, session: &Session) -> String {
    cookie_config(config, config.session_ttl_secs()).build_set_cookie(session.id.as_str())
}

/// Decode a (name, value) cookie pair into the raw session id
///
/// Fails with `WrongCookieName` if the name is not the well-known session
/// cookie name. The value's shape is not validated here; a malformed id
/// simply fails to resolve downstream.
pub fn decode(config: &AuthConfig, name: &str, value: &str) -> AuthResult<String> {
    if name != config.session_cookie_name {
        return Err(AuthError::WrongCookieName(name.to_string()));
    }
    Ok(value.to_string())
}

/// Build a Set-Cookie header value instructing the client to discard the
/// session cookie immediately (sentinel value, negative Max-Age)
pub fn expire_directive(config: &AuthConfig) -> String {
    cookie_config(config, -1).build_set_cookie(SESSION_COOKIE_DELETED)
}

/// Extract and decode the session id from request headers, if present
pub fn session_id_from_headers(config: &AuthConfig, headers: &HeaderMap) -> Option<String> {
    let value = cookie::extract_cookie(headers, &config.session_cookie_name)?;
    decode(config, &config.session_cookie_name, &value).ok()
}
