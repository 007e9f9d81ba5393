mod admin;
mod auth;
mod error;
mod extractors;
mod leads;
mod notify;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use profileera_common::error::ProfileEraResult;
use profileera_common::types::ServiceInfo;
use profileera_config::{init_tracing, AppConfig};
use profileera_db::lead::pg_repository::PgLeadRepository;
use profileera_db::lead::repositories::LeadRepository;
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AdminSecrets;
use crate::extractors::ADMIN_KEY_HEADER;
use crate::notify::{LeadNotifier, SmtpNotifier};

#[derive(Clone)]
pub struct AppState {
    pub leads: Arc<dyn LeadRepository>,
    pub notifier: Arc<dyn LeadNotifier>,
    pub admin: Arc<AdminSecrets>,
}

async fn root() -> &'static str {
    "ProfileEra Backend is Running"
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("profileera-api"))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ADMIN_KEY_HEADER),
        ])
        .allow_credentials(true)
}

fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/info", get(info))
        .merge(leads::router())
        .merge(admin::router())
        .layer(cors_layer(allowed_origins))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

const MIGRATION_RETRY_FIRST: Duration = Duration::from_secs(1);
const MIGRATION_RETRY_MAX: Duration = Duration::from_secs(30);

/// Production refuses to start without the store. Development keeps going on
/// a lazy pool so the service comes up while the database is still starting;
/// migrations are applied in the background once it answers.
async fn connect_store(config: &AppConfig) -> ProfileEraResult<PgPool> {
    match profileera_db::create_pool(&config.database_url).await {
        Ok(pool) => {
            profileera_db::run_migrations(&pool).await?;
            tracing::info!("database connected");
            Ok(pool)
        }
        Err(e) if !config.is_production() => {
            tracing::error!(error = %e, "database unavailable, continuing with lazy pool");
            let pool = profileera_db::create_lazy_pool(&config.database_url)?;
            let migrator = pool.clone();
            tokio::spawn(async move {
                let attempts = profileera_db::migrate_until_ready(
                    &migrator,
                    MIGRATION_RETRY_FIRST,
                    MIGRATION_RETRY_MAX,
                )
                .await;
                tracing::info!(attempts, "database reachable, schema ready");
            });
            Ok(pool)
        }
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            tracing::error!(error = %e, "refusing to start");
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_level);
    tracing::info!(service = "profileera-api", env = ?config.app_env, "starting");

    let allowed_origins = config.allowed_origins();
    if allowed_origins.is_empty() && config.is_production() {
        tracing::warn!("no ALLOWED_ORIGINS defined in production");
    }

    let pool = connect_store(&config)
        .await
        .expect("failed to connect to database");
    let notifier = SmtpNotifier::from_config(&config).expect("invalid mail configuration");

    let state = AppState {
        leads: Arc::new(PgLeadRepository::new(pool)),
        notifier: Arc::new(notifier),
        admin: Arc::new(AdminSecrets::from_config(&config)),
    };

    let app = build_router(state, &allowed_origins);
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
