use anyhow::Result;
use tracing::{info, warn};

use wedding_api::{app, config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics()?;

    info!("Starting wedding API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&(&config.database).into()).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    match services::bootstrap_admin(&pool, &config.admin).await {
        Ok(outcome) => info!(?outcome, "Admin bootstrap finished"),
        Err(e) => warn!(error = %e, "Admin bootstrap skipped"),
    }

    match persistence::repositories::RevokedTokenRepository::new(pool.clone())
        .purge_expired()
        .await
    {
        Ok(purged) => info!(purged, "Purged expired revoked tokens"),
        Err(e) => warn!(error = %e, "Failed to purge revoked tokens"),
    }

    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool)?;

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
