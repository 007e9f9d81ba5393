pub mod handlers;

use axum::routing::post;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/leads", post(handlers::create_lead))
        .route("/api/contact", post(handlers::legacy_contact))
}
