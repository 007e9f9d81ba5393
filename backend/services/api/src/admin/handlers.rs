use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use profileera_common::error::ProfileEraError;
use profileera_common::types::{LeadView, LoginRequest, LoginResponse, MessageResponse};
use uuid::Uuid;

use crate::admin::responses::to_lead_view;
use crate::auth::INVALID_CREDENTIALS;
use crate::error::ApiError;
use crate::extractors::AdminAuth;
use crate::AppState;

const LEAD_NOT_FOUND: &str = "Lead not found";

/// Ids that are not UUIDs cannot name a stored lead.
fn parse_lead_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ProfileEraError::NotFound(LEAD_NOT_FOUND.to_string()).into())
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) =
        payload.map_err(|rejection| ProfileEraError::Validation(rejection.body_text()))?;

    let email = body.email.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    if !state.admin.credentials_match(&email, &password) {
        tracing::warn!("admin login failed");
        return Err(ProfileEraError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
    }

    tracing::info!("admin login succeeded");
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        api_key: state.admin.api_key().to_string(),
    }))
}

pub async fn verify(_admin: AdminAuth) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Admin access verified".to_string(),
    })
}

pub async fn list_leads(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<LeadView>>, ApiError> {
    let leads = state
        .leads
        .list()
        .await
        .map_err(|e| ApiError::from(e).or_server_message("Error fetching leads"))?;

    Ok(Json(leads.into_iter().map(to_lead_view).collect()))
}

pub async fn get_lead(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LeadView>, ApiError> {
    let id = parse_lead_id(&id)?;
    let lead = state
        .leads
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from(e).or_server_message("Error fetching lead details"))?
        .ok_or_else(|| ProfileEraError::NotFound(LEAD_NOT_FOUND.to_string()))?;

    Ok(Json(to_lead_view(lead)))
}

pub async fn delete_lead(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_lead_id(&id)?;
    let deleted = state
        .leads
        .delete(id)
        .await
        .map_err(|e| ApiError::from(e).or_server_message("Error deleting lead"))?;

    if !deleted {
        return Err(ProfileEraError::NotFound(LEAD_NOT_FOUND.to_string()).into());
    }

    tracing::info!(lead_id = %id, "lead deleted");
    Ok(Json(MessageResponse {
        message: "Lead deleted successfully".to_string(),
    }))
}
