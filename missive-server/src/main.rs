use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use missive_server::config::Config;
use missive_server::shutdown;
use missive_server::{build_sqlite_url, connect_pool, routes, run_migrations, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    init_tracing(&cfg);

    // Costruisci l'URL del database SQLite
    let db_url = build_sqlite_url(&cfg.database_url).context("build sqlite DATABASE_URL")?;
    info!(database_url = %db_url, "using database");
    // Connetti al database
    let pool = connect_pool(&db_url, cfg.max_connections)
        .await
        .context("connect to sqlite")?;
    // Crea le tabelle se mancano
    run_migrations(&pool).await.context("run migrations")?;

    // Stato condiviso: pool e servizi costruiti esplicitamente
    let state = Arc::new(AppState::new(pool));
    let app = routes::router(state);

    let addr: SocketAddr = cfg.bind_address.parse().context("parse BIND_ADDR")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind tcp listener")?;
    info!(%addr, "listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            let signal = shutdown::wait_for_signal().await;
            info!(%signal, %addr, "shutdown requested, draining in-flight requests");
        })
        .await
        .context("server shutdown")?;

    info!("missive-server stopped");
    Ok(())
}

// RUST_LOG ha la precedenza; altrimenti MISSIVE_LOG, e se non è valido "info".
fn init_tracing(cfg: &Config) {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: MISSIVE_LOG='{}' is not a valid tracing filter ({}); falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
