//! Handlers for the public lead forms (`/lead`, `/volunteer`, `/newsletter`).
//!
//! The body is read raw so that malformed or non-object JSON is treated as an
//! empty form and rejected by validation rather than by the extractor.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use lifesavers_core::lead::fields::parse_raw_form;
use lifesavers_core::lead::{Intake, LeadForm};

use crate::error::AppResult;
use crate::response::OkResponse;
use crate::state::AppState;

/// POST /api/lead
pub async fn contact(State(state): State<AppState>, body: Bytes) -> AppResult<Json<OkResponse>> {
    accept(&state, LeadForm::Contact, &body).await
}

/// POST /api/volunteer
pub async fn volunteer(State(state): State<AppState>, body: Bytes) -> AppResult<Json<OkResponse>> {
    accept(&state, LeadForm::Volunteer, &body).await
}

/// POST /api/newsletter
pub async fn newsletter(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<OkResponse>> {
    accept(&state, LeadForm::Newsletter, &body).await
}

async fn accept(state: &AppState, form: LeadForm, body: &[u8]) -> AppResult<Json<OkResponse>> {
    let raw = parse_raw_form(body);

    match form.intake(&raw)? {
        Intake::Trapped => {
            tracing::info!(form = ?form, "Honeypot filled, dropping submission");
        }
        Intake::Accepted(lead) => {
            tracing::debug!(form = ?form, category = %lead.category, "Lead accepted");
            state.dispatcher.dispatch(&lead).await?;
        }
    }

    Ok(Json(OkResponse::ok()))
}
