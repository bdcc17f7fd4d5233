use campaigniq_api::Server;
use campaigniq_core::{CampaignError, Settings};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> campaigniq_core::Result<()> {
    let settings = Arc::new(Settings::load()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .map_err(|e| CampaignError::Config(format!("invalid bind address: {}", e)))?;

    Server::new(addr, settings).run().await
}
