mod auth;
mod config;
mod db;
mod errors;
mod mailer;
mod prospects;
mod routes;
mod seed;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::mailer::ResendMailer;
use crate::routes::build_router;
use crate::seed::seed_admin;
use crate::state::AppState;
use crate::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting prospects API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and apply the schema
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let store = Arc::new(PgStore::new(pool));

    // Ensure the back-office admin account exists
    seed_admin(store.as_ref(), &config).await?;

    // Initialize the outbound mailer
    let mailer = ResendMailer::new(
        config.resend_api_key.clone(),
        config.notify_from.clone(),
        config.notify_to.clone(),
    );
    info!("Mailer initialized (to: {})", config.notify_to);

    // Build app state
    let state = AppState {
        store,
        notifier: Arc::new(mailer),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
