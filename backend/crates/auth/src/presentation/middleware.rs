//! Auth Middleware
//!
//! Middleware for requiring an authenticated session on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::application::session_cookie;
use crate::domain::repository::{AccountRepository, SessionRepository};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// The account resolved for the current request, stored in extensions
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Middleware that requires a valid session
///
/// On success the resolved [`CurrentAccount`] is inserted into the request
/// extensions for downstream handlers; otherwise the request is answered
/// with 401 and never reaches them.
pub async fn require_session<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let raw_id = session_cookie::session_id_from_headers(&state.config, req.headers());

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.repo.clone());

    let resolved = match raw_id {
        Some(raw_id) => use_case
            .current_account(&raw_id)
            .await
            .map_err(|e| e.into_response())?,
        None => None,
    };

    let Some((_session, account)) = resolved else {
        return Err((StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response());
    };

    req.extensions_mut().insert(CurrentAccount {
        username: account.username.to_string(),
        first_name: account.first_name,
        last_name: account.last_name,
    });

    Ok(next.run(req).await)
}
