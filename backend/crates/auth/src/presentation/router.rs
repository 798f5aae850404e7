//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::infra::file_store::FileAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the file-backed repository
pub fn auth_router(repo: FileAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .route("/signout", post(handlers::sign_out::<R>))
        .route("/session", get(handlers::session_status::<R>))
        .with_state(state)
}
