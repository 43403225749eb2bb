use anyhow::Context;
use axum::http::StatusCode;
use missive_core::StoredMessage;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::repository::SqliteRepository;
use crate::services::{MessageDbService, MessageService};

pub mod config;
pub mod controllers;
pub mod error;
pub mod repository;
pub mod routes;
pub mod services;
pub mod shutdown;

pub const MEMORY_URL: &str = "sqlite::memory:";

/// Stato condiviso da tutti gli handler, sempre dietro `Arc`.
pub struct AppState {
    pub pool: SqlitePool,
    /// Percorso SQL diretto sulla tabella `messages`.
    pub messages: MessageService,
    /// Percorso repository sulla tabella `MESSAGESDB`.
    pub stored_messages: MessageDbService,
}

impl AppState {
    /// Costruisce i due servizi passando esplicitamente lo stesso pool.
    pub fn new(pool: SqlitePool) -> Self {
        let messages = MessageService::new(pool.clone());
        let repo = SqliteRepository::<StoredMessage>::new(pool.clone());
        let stored_messages = MessageDbService::new(Arc::new(repo));
        Self { pool, messages, stored_messages }
    }
}

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    Ok(format!("sqlite://{}", s))
}

/// Vero per le forme di database in memoria accettate da sqlx, con o senza parametri.
pub fn is_memory_url(url: &str) -> bool {
    let (base, _) = split_params(url);
    matches!(base, MEMORY_URL | "sqlite://:memory:" | ":memory:")
}

// separa "percorso?parametri"
fn split_params(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('?') {
        Some((base, params)) => (base, Some(params)),
        None => (raw, None),
    }
}

/// Trasforma il valore grezzo di DATABASE_URL in un URL SQLite.
/// Le forme in memoria diventano "sqlite::memory:"; il resto è un percorso di file,
/// i parametri dopo `?` non fanno parte del nome del file e vengono riattaccati all'URL.
pub fn build_sqlite_url(raw: &str) -> anyhow::Result<String> {
    let (base, params) = split_params(raw);
    let url = if is_memory_url(base) {
        MEMORY_URL.to_string()
    } else {
        // Rimuovi il prefisso "sqlite://" se presente, per ottenere il percorso del file.
        let path_part = base
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");
        sqlite_url_for_path(&PathBuf::from(path_part))?
    };
    Ok(match params {
        Some(p) if !p.is_empty() => format!("{}?{}", url, p),
        _ => url,
    })
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("parse sqlite url {}", db_url))?
        .create_if_missing(true);

    // Un database in memoria esiste solo finché vive la sua connessione:
    // una sola connessione, mai chiusa per inattività.
    let pool_options = if is_memory_url(db_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Crea le tabelle se non esistono. Rieseguibile senza effetti.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id   TEXT PRIMARY KEY NOT NULL,
            text TEXT NOT NULL
        );"#,
        r#"
        CREATE TABLE IF NOT EXISTS MESSAGESDB (
            id   TEXT PRIMARY KEY NOT NULL,
            text TEXT NOT NULL
        );"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", s.trim().lines().next().unwrap_or_default()))?;
    }
    tracing::debug!(count = stmts.len(), "migrations applied");
    Ok(())
}

/// Controlla lo stato di salute del database tentando di acquisire una connessione dal pool.
pub async fn health_with_pool(pool: &SqlitePool) -> StatusCode {
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
