//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::account::Account;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    /// Optional confirmation; when present it must match `password`
    pub password_confirm: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub username: String,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub username: Option<String>,
    pub expires_at_ms: Option<i64>,
}

// ============================================================================
// Account Info
// ============================================================================

/// Account info response (never carries the password digest)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.to_string(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
        }
    }
}
