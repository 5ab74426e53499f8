use std::net::SocketAddr;
use std::sync::Arc;

use interview_scheduler::{
    config::Config,
    database::{bootstrap, pool::create_pool},
    middleware::cors::cors_layer,
    services::{email::EmailProvider, notification_service::NotificationService},
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let outcome = bootstrap::run(&config.database_url).await?;
    info!(?outcome, "Database bootstrap finished");

    let pool = create_pool(&config).await?;

    let provider = EmailProvider::from_config(&config.email).await;
    info!(provider = ?provider.kind(), "Email provider ready");
    let (notification_service, _worker) = NotificationService::spawn(Arc::new(provider));

    let state = AppState::new(pool, notification_service);
    let app = interview_scheduler::app(state, cors_layer(config.cors_origin.as_deref())?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
