use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod analytics;
mod auth;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod services;

use config::Config;
use db::PgStore;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn store(&self) -> PgStore {
        PgStore::new(self.db.clone())
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitarc_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();
    let config = Arc::new(config);

    // Database
    let db = db::create_pool(&config.database_url, config.db_max_connections).await;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState {
        db,
        config: config.clone(),
    };

    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}

fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let protected_routes = Router::new()
        // Daily logs
        .route(
            "/api/daily-logs",
            post(handlers::daily_logs::upsert_daily_log).get(handlers::daily_logs::list_daily_logs),
        )
        .route(
            "/api/daily-logs/date/:date",
            get(handlers::daily_logs::get_daily_log),
        )
        .route(
            "/api/daily-logs/recent",
            get(handlers::daily_logs::recent_daily_logs),
        )
        // Analytics
        .route("/api/daily-logs/streak", get(handlers::daily_logs::get_streak))
        .route("/api/daily-logs/stats", get(handlers::daily_logs::get_daily_stats))
        .route(
            "/api/daily-logs/adherence/:weeks_back",
            get(handlers::daily_logs::get_weekly_adherence),
        )
        .route("/api/daily-logs/progress", get(handlers::daily_logs::get_progress))
        .route("/api/daily-logs/risk", get(handlers::daily_logs::get_dropoff_risk))
        // Habit scores
        .route("/api/habit-scores", get(handlers::habit_scores::list_habit_scores))
        .route(
            "/api/habit-scores/latest",
            get(handlers::habit_scores::latest_habit_score),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let allowed_origins: Vec<axum::http::HeaderValue> = std::iter::once(&state.config.frontend_url)
        .chain(state.config.cors_extra_origins.iter())
        .filter_map(|o| match o.parse::<axum::http::HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
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
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/fitarc_test".into(),
        db_max_connections: 1,
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        cors_extra_origins: Vec::new(),
        jwt_secret: "test-secret".into(),
        streak_log_limit: 90,
        risk_history_logs: 90,
        recent_logs_default_days: 30,
    }
}
