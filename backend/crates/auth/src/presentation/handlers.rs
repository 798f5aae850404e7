//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
    session_cookie,
};
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccountResponse, SessionStatusResponse, SignInRequest, SignInResponse, SignUpRequest,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<(StatusCode, Json<AccountResponse>)>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    // Confirmation check belongs to the HTTP surface, not the core
    if let Some(confirm) = &req.password_confirm {
        if *confirm != req.password {
            return Err(AuthError::PasswordMismatch);
        }
    }

    let use_case = SignUpUseCase::new(state.repo.clone());

    let account = use_case
        .execute(SignUpInput {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let session = use_case
        .execute(SignInInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    let cookie = session_cookie::encode(&state.config, &session);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            username: session.username.to_string(),
        }),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    if let Some(raw_id) = session_cookie::session_id_from_headers(&state.config, &headers) {
        let use_case = SignOutUseCase::new(state.repo.clone());
        // A stale or unknown id still clears the cookie
        if let Err(e) = use_case.execute(&raw_id).await {
            tracing::debug!(error = %e, "Sign-out without a live session");
        }
    }

    let cookie = session_cookie::expire_directive(&state.config);

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.repo.clone());

    let session = match session_cookie::session_id_from_headers(&state.config, &headers) {
        Some(raw_id) => use_case.resolve(&raw_id).await?,
        None => None,
    };

    match session {
        Some(session) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            username: Some(session.username.to_string()),
            expires_at_ms: Some(session.expires_at_ms),
        })),
        None => Ok(Json(SessionStatusResponse {
            authenticated: false,
            username: None,
            expires_at_ms: None,
        })),
    }
}
