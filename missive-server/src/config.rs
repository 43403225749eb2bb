//! Configurazione del server, letta dalle variabili d'ambiente all'avvio.

/// Configurazione runtime di missive-server.
///
/// Ogni campo ha un default, quindi il server parte anche senza variabili impostate.
#[derive(Debug, Clone)]
pub struct Config {
    /// Indirizzo TCP di ascolto (`BIND_ADDR`, default `127.0.0.1:3000`).
    pub bind_address: String,

    /// Percorso del file SQLite oppure `sqlite::memory:` (`DATABASE_URL`, default `missive.db`).
    pub database_url: String,

    /// Dimensione massima del pool (`MISSIVE_DB_MAX_CONNECTIONS`, default 5).
    pub max_connections: u32,

    /// Filtro `tracing`, es. `"info"` o `"debug,sqlx=warn"` (`MISSIVE_LOG`).
    /// `RUST_LOG`, se presente, ha la precedenza.
    pub log_level: String,

    /// Log in formato JSON, una riga per evento (`MISSIVE_LOG_JSON`).
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("BIND_ADDR", "127.0.0.1:3000"),
            database_url: env_or("DATABASE_URL", "missive.db"),
            max_connections: parse_env("MISSIVE_DB_MAX_CONNECTIONS", 5),
            log_level: env_or("MISSIVE_LOG", "info"),
            log_json: std::env::var("MISSIVE_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
