pub mod health;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::prospects::handlers;
use crate::state::AppState;

async fn endpoint_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "endpoint not found" })),
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Prospect intake (public, no gate) and staff listing
        .route(
            "/api/prospects",
            get(handlers::handle_list_prospects).post(handlers::handle_create_prospect),
        )
        .route(
            "/api/prospects/form",
            post(handlers::handle_create_prospect_form),
        )
        // Staff-only CRUD
        .route(
            "/api/prospects/:id",
            get(handlers::handle_get_prospect)
                .put(handlers::handle_update_prospect)
                .delete(handlers::handle_delete_prospect),
        )
        .fallback(endpoint_not_found)
        .with_state(state)
}
