//! JWT-based admin extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use lifesavers_core::error::CoreError;

use crate::auth::jwt::{validate_token, JwtConfig, ROLE_ADMIN};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated admin extracted from the `Authorization: Bearer <jwt>` header.
///
/// ```ignore
/// async fn delete_image(admin: AdminUser) -> AppResult<Json<()>> {
///     tracing::info!(admin = %admin.username, "deleting");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub username: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        verify_bearer(header, &state.config.jwt)
    }
}

/// Verify an `Authorization` header value and return the admin it names.
pub fn verify_bearer(header: Option<&str>, config: &JwtConfig) -> Result<AdminUser, AppError> {
    let header = header.ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()))
    })?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token.trim(), config)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))?;

    if claims.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Admin role required".into(),
        )));
    }

    Ok(AdminUser {
        username: claims.sub,
    })
}
