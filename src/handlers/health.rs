use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fitarc-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ready once the database answers and the daily log table exists.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let store_ok = match sqlx::query_scalar::<_, bool>(
        "SELECT to_regclass('public.daily_logs') IS NOT NULL",
    )
    .fetch_one(&state.db)
    .await
    {
        Ok(exists) => exists,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            false
        }
    };

    let pool = json!({
        "size": state.db.size(),
        "idle": state.db.num_idle(),
    });

    if store_ok {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "daily_log_store": "ok" },
                "pool": pool,
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": { "daily_log_store": "failed" },
                "pool": pool,
            })),
        )
    }
}
