// Event Hub Server

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use event_hub::{api::create_app, app_state::AppState, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("event_hub=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize application state
    let app_state = AppState::new(config.clone()).await?;

    let app = create_app(app_state);

    // Start server
    let addr = config.server_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        address = %listener.local_addr()?,
        database = %config.database.url,
        delete_policy = %config.events.delete_policy,
        "Event Hub server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
