use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use missive_core::{Message, StoredMessage};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ServerError;
use crate::{health_with_pool, AppState};

#[derive(Debug, Deserialize)]
pub struct GreetingParams {
    pub name: String,
}

/// Handler per GET /?name=...
/// Senza `name` l'estrattore Query rifiuta la richiesta con 400.
pub async fn greeting(Query(params): Query<GreetingParams>) -> String {
    format!("Hello, {}!", params.name)
}

/// Handler per GET /index: lista fissa, nessun accesso al database.
pub async fn index() -> Json<Vec<Message>> {
    Json(vec![
        Message::new("1", "Hello!"),
        Message::new("2", "Bonjour!"),
        Message::new("3", "Privet!"),
    ])
}

/// Handler per GET /health
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> StatusCode {
    health_with_pool(&state.pool).await
}

// ---- percorso SQL diretto ----

/// Handler per GET /data
pub async fn list_messages(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Message>>, ServerError> {
    Ok(Json(state.messages.find_all().await?))
}

/// Handler per GET /data/:id
pub async fn message_by_id(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, ServerError> {
    Ok(Json(state.messages.find_by_id(&id).await?))
}

/// Handler per POST /data
pub async fn create_message(
    Extension(state): Extension<Arc<AppState>>,
    Json(message): Json<Message>,
) -> Result<StatusCode, ServerError> {
    state.messages.save(message).await?;
    Ok(StatusCode::OK)
}

// ---- percorso repository ----

/// Handler per GET /db/data
pub async fn list_stored_messages(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<StoredMessage>>, ServerError> {
    Ok(Json(state.stored_messages.find_all().await?))
}

/// Handler per GET /db/data/:id
pub async fn stored_message_by_id(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<StoredMessage>>, ServerError> {
    Ok(Json(state.stored_messages.find_by_id(&id).await?))
}

/// Handler per POST /db/data
pub async fn save_stored_message(
    Extension(state): Extension<Arc<AppState>>,
    Json(message): Json<StoredMessage>,
) -> Result<StatusCode, ServerError> {
    state.stored_messages.save(message).await?;
    Ok(StatusCode::OK)
}
