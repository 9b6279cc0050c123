//! Handler for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use lifesavers_core::error::CoreError;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, ROLE_ADMIN};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Exchange the admin username and password for a signed access token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    input.validate().map_err(|_| {
        AppError::Core(CoreError::Validation(
            "Username and password are required".into(),
        ))
    })?;

    if !state.config.admin.verify(&input.username, &input.password) {
        tracing::warn!(username = %input.username, "Rejected admin login");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let token = generate_access_token(&input.username, ROLE_ADMIN, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(username = %input.username, "Admin logged in");
    Ok(Json(LoginResponse {
        token,
        message: "Login successful",
    }))
}
