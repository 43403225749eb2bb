//! Errore unico degli handler.
//!
//! Gli handler restituiscono `Result<T, ServerError>`; la conversione in risposta HTTP
//! produce il corpo JSON condiviso [`missive_core::Error`]. Gli errori interni vengono
//! loggati per intero ma al client arriva solo un messaggio generico.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Errore del database non altrimenti classificato.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Violazione di chiave primaria (inserimento di un id già presente).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<sqlx::Error> for ServerError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ServerError::Conflict(db.message().to_owned())
            }
            _ => ServerError::Database(e),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::Conflict(m) => (
                StatusCode::CONFLICT,
                missive_core::Error::new("conflict", m.clone()),
            ),
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    missive_core::Error::new("internal_error", "internal server error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
