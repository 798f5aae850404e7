//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, config, session cookie protocol
//! - `infra/` - File-backed storage implementation
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Account signup/signin with username + password
//! - Server-side sessions with a cookie-borne bearer id
//! - Session expiry enforced on resolution and swept at startup
//!
//! ## Security Model
//! - Passwords stored as SHA-256 digests, verified in constant time
//! - Session ids are 128-bit CSPRNG values; holding one is holding the
//!   session, so ids never appear in logs beyond issuance/termination
//! - Session cookie is HttpOnly and (outside development) Secure

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::file_store::FileAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::account::Account;
    pub use crate::domain::entity::session::Session;
    pub use crate::domain::value_object::session_id::SessionId;
    pub use crate::domain::value_object::username::Username;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
