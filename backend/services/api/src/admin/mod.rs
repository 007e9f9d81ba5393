pub mod handlers;
pub mod responses;

use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(handlers::login))
        .route("/api/admin/verify", get(handlers::verify))
        .route("/api/admin/leads", get(handlers::list_leads))
        .route(
            "/api/admin/leads/{id}",
            get(handlers::get_lead).delete(handlers::delete_lead),
        )
}
