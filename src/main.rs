use std::time::Duration;

use notes_web::{
    config::Config,
    migration::{Migrator, MigratorTrait},
    router, AppState,
};
use sea_orm::{ConnectOptions, Database};
use tower_http::timeout::TimeoutLayer;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    // Missing secrets or database URL stop the process here, before any request.
    let config = Config::from_env()?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(10 * 60))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    info!("Connected to database");

    Migrator::up(&db, None).await?;
    info!("Migrations applied");

    let state = AppState::new(db, &config.session, config.bcrypt_cost);
    let app = router(state, &config.static_dir).layer(TimeoutLayer::new(config.request_timeout));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Server starting on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
