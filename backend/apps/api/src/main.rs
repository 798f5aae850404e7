//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `auth::AuthError` and the unified `AppError` rendering.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::domain::repository::SessionRepository;
use auth::models::AccountResponse;
use auth::presentation::middleware::{AuthMiddlewareState, CurrentAccount, require_session};
use auth::{AuthConfig, FileAuthRepository, auth_router};
use axum::{
    Extension, Json, Router, http,
    http::{Method, header},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Storage bootstrap: create the data directory, account table, and
    // session directory on first run
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let repo = FileAuthRepository::new(&data_dir);
    repo.bootstrap().await?;

    tracing::info!(data_dir = %data_dir, "Storage ready");

    // Startup cleanup: sweep expired sessions
    // Errors here should not prevent server startup
    match repo.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }

    // Session cookies require HTTPS outside of debug builds
    let config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Protected routes resolve the account up front via middleware
    let mw_state = AuthMiddlewareState {
        repo: Arc::new(repo.clone()),
        config: Arc::new(config.clone()),
    };
    let protected = Router::new()
        .route("/api/me", get(me))
        .layer(axum::middleware::from_fn_with_state(
            mw_state,
            require_session::<FileAuthRepository>,
        ));

    // Build router
    let app = Router::new()
        .route("/", get(index))
        .merge(protected)
        .nest("/api/auth", auth_router(repo, config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index() -> &'static str {
    "api is running"
}

async fn me(Extension(account): Extension<CurrentAccount>) -> Json<AccountResponse> {
    Json(AccountResponse {
        username: account.username,
        first_name: account.first_name,
        last_name: account.last_name,
    })
}
