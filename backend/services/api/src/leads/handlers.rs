use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use profileera_common::error::ProfileEraError;
use profileera_common::types::{LeadCreatedResponse, LeadSubmission};
use profileera_common::validation::validate;

use crate::error::ApiError;
use crate::notify;
use crate::AppState;

pub async fn create_lead(
    State(state): State<AppState>,
    payload: Result<Json<LeadSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(submission) =
        payload.map_err(|rejection| ProfileEraError::Validation(rejection.body_text()))?;

    let new_lead = validate(&submission).map_err(ProfileEraError::from)?;

    let lead = state.leads.create(new_lead).await?;
    tracing::info!(lead_id = %lead.id, "lead saved");

    let lead_id = lead.id;
    notify::dispatch(state.notifier.clone(), lead);

    Ok((
        StatusCode::CREATED,
        Json(LeadCreatedResponse {
            message: "Lead saved successfully".to_string(),
            lead_id,
        }),
    ))
}

/// Older form builds posted here; send them on with method and body intact.
pub async fn legacy_contact() -> Redirect {
    Redirect::temporary("/api/leads")
}
