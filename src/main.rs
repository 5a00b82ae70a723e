use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

mod config;
mod dto;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod storage;

use config::Config;
use services::gemini::GeminiClient;
use services::InsightProvider;
use storage::{UploadStore, UPLOADS_PREFIX};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub uploads: UploadStore,
    pub insights: Arc<dyn InsightProvider>,
}

impl AppState {
    pub fn new(config: Arc<Config>, insights: Arc<dyn InsightProvider>) -> Self {
        Self {
            uploads: UploadStore::new(config.upload_dir.clone()),
            config,
            insights,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wellness_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    if config.gemini_api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; daily logs will carry the fallback insight");
    }

    let gemini = GeminiClient::new(&config).expect("Failed to build Gemini HTTP client");
    let state = AppState::new(config.clone(), Arc::new(gemini));

    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let api_routes = Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route(
            "/api/daily-log",
            post(handlers::daily_logs::submit_daily_log)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        // Stubs
        .route("/api/dashboard", get(handlers::stubs::dashboard))
        .route("/api/mood-tracker", post(handlers::stubs::record_mood))
        .route("/api/voice-assistant", post(handlers::stubs::voice_command))
        .route("/api/history", get(handlers::stubs::history))
        .route("/api/risk-alerts", get(handlers::stubs::risk_alerts));

    let allowed_origins: Vec<axum::http::HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<axum::http::HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable allowed origin");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    Router::new()
        .merge(api_routes)
        .nest_service(UPLOADS_PREFIX, ServeDir::new(state.uploads.dir()))
        .layer(cors)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::origin::enforce_allowed_origin,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
