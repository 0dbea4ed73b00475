use std::sync::Arc;

use media_gateway::config::Settings;
use media_gateway::storage::StoreHandle;
use media_gateway::{create_app, AppState};
use tracing_subscriber::EnvFilter;
use validator::Validate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;
    settings.validate()?;
    let addr = settings.socket_addr()?;

    let state = AppState {
        store: Arc::new(StoreHandle::new(settings.clone())),
        settings,
    };
    let app = create_app(state);

    tracing::info!("listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
