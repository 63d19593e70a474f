//! Bookshelf server binary

use std::net::SocketAddr;

use anyhow::Context;

use bookshelf::app::{AppState, build_app};
use bookshelf::config::Config;
use bookshelf::db::Database;
use bookshelf::graphql;
use bookshelf::services::{AuthService, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    init_tracing(config.log_format);
    tracing::info!("Starting Bookshelf");

    let db = Database::connect_with_retry(
        &config.database_url,
        config.database_max_connections,
        config.database_connect_timeout,
    )
    .await?;
    db.sync_schema().await.context("failed to prepare database schema")?;

    let auth = AuthService::new(db.clone(), config.bcrypt_cost);
    let schema = graphql::build_schema(db.clone(), auth);
    tracing::info!("GraphQL schema built");

    let state = AppState {
        db: db.clone(),
        schema,
    };
    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let host = config.host.as_deref().unwrap_or("localhost");
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://{}:{}/graphql", host, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
