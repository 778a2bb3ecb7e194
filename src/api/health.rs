use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::app_state::AppState;
use crate::error::AppResult;

/// `GET /health` - liveness, never touches the database.
pub fn health_routes<S>(service: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/health",
        get(move || async move {
            Json(json!({
                "status": "ok",
                "service": service,
                "timestamp": Utc::now().to_rfc3339(),
            }))
        }),
    )
}

/// `GET /health/ready` - readiness, pings the database.
pub async fn readiness_handler(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state.directory.ping().await?;
    Ok(Json(json!({
        "status": "ready",
        "service": state.config.service.kind.name(),
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
