//! Handlers for the generic `/forms` resource.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use lifesavers_core::submission::FormSubmission;
use lifesavers_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

/// Request body for `POST /api/forms/submit`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitRequest {
    pub form_type: Option<String>,
    pub form_data: Option<Value>,
    pub recaptcha_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    pub submission_id: DbId,
    /// Present only when the submission could not be written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<FormSubmission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// POST /api/forms/submit
///
/// Record a generic form submission. A failed captcha check is only logged.
pub async fn submit(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SubmitRequest>,
) -> AppResult<Json<SubmitResponse>> {
    let form_type = input
        .form_type
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(missing_fields)?;
    let form_data = input.form_data.filter(is_present).ok_or_else(missing_fields)?;

    if let (Some(verifier), Some(token)) = (&state.captcha, input.recaptcha_token.as_deref()) {
        if !token.is_empty() {
            if let Err(e) = verifier.verify(token).await {
                tracing::warn!(error = %e, form_type = %form_type, "Captcha verification failed, accepting anyway");
            }
        }
    }

    let (submission, saved) = state
        .submissions
        .append(form_type, form_data, Utc::now())
        .await?;

    let response = if saved {
        SubmitResponse {
            success: true,
            message: "Form submitted successfully!",
            submission_id: submission.id,
            submission: None,
            note: None,
        }
    } else {
        SubmitResponse {
            success: true,
            message: "Form submitted, but it could not be stored.",
            submission_id: submission.id,
            submission: Some(submission),
            note: Some("The submission is included here and in the server logs."),
        }
    };

    Ok(Json(response))
}

/// GET /api/forms/list
pub async fn list(_admin: AdminUser, State(state): State<AppState>) -> Json<Vec<FormSubmission>> {
    Json(state.submissions.list().await)
}

fn missing_fields() -> AppError {
    AppError::BadRequest("Form type and data are required".into())
}

/// Whether `value` counts as provided form data (not null, `false`, `0` or `""`).
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    }
}
