// HTTP API - JSON routes over the services, mounted under /api/v1

pub mod catalog;
pub mod extract;
pub mod ledger;

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::infrastructure::middleware::viewer_context_middleware;

pub const API_PREFIX: &str = "/api/v1";

pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state.db.health_check().await?;
    Ok(Json(json!({
        "status": "ok",
        "delete_policy": state.config.events.delete_policy,
    })))
}

/// Every route under `/api/v1`, without the outer layers
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(catalog::create_catalog_router())
        .merge(ledger::create_ledger_router())
        .with_state(state)
}

/// The complete application: API routes, viewer resolution, tracing and CORS
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .nest(API_PREFIX, create_api_router(state.clone()))
        .layer(middleware::from_fn_with_state(
            state,
            viewer_context_middleware::<AppState>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn deleted(id: i64) -> Json<Value> {
    Json(json!({"id": id, "deleted": true}))
}
