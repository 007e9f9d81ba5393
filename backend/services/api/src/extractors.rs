use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use profileera_common::error::ProfileEraError;

use crate::auth::INVALID_API_KEY;
use crate::error::ApiError;
use crate::AppState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-api-key";

/// Proof that the request carried the configured admin API key.
///
/// Put it first in a handler's argument list so the key is checked before
/// any path or body extraction.
#[derive(Debug)]
pub struct AdminAuth;

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(ADMIN_KEY_HEADER) else {
            return Err(ProfileEraError::Unauthorized(INVALID_API_KEY.to_string()).into());
        };

        if state.admin.key_matches(header.as_bytes()) {
            Ok(AdminAuth)
        } else {
            tracing::warn!(path = %parts.uri.path(), "rejected admin request with invalid api key");
            Err(ProfileEraError::Unauthorized(INVALID_API_KEY.to_string()).into())
        }
    }
}
