use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers;
use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(controllers::greeting))
        .route("/index", get(controllers::index))
        .route("/health", get(controllers::health))
        .route("/data", get(controllers::list_messages).post(controllers::create_message))
        .route("/data/:id", get(controllers::message_by_id))
        .route(
            "/db/data",
            get(controllers::list_stored_messages).post(controllers::save_stored_message),
        )
        .route("/db/data/:id", get(controllers::stored_message_by_id))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
