use crate::{create_router, AppState};
use campaigniq_core::{CampaignError, Result, Settings};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

pub struct Server {
    state: AppState,
    addr: SocketAddr,
}

impl Server {
    pub fn new(addr: SocketAddr, settings: Arc<Settings>) -> Self {
        Self {
            state: AppState::new(settings),
            addr,
        }
    }

    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);

        info!("Starting CampaignIQ server on {}", self.addr);

        // Bind with tuned socket options: SSE responses ride long-lived
        // connections, so enable OS-level TCP keepalive.
        let listener = {
            let socket = if self.addr.is_ipv6() {
                tokio::net::TcpSocket::new_v6()
            } else {
                tokio::net::TcpSocket::new_v4()
            }?;

            let _ = socket.set_reuseaddr(true);
            let _ = socket.set_keepalive(true);

            socket.bind(self.addr)?;
            socket.listen(1024)?
        };

        info!("Server listening on http://{}", self.addr);
        info!("  GET  /          - Chat UI");
        info!("  GET  /health    - Liveness check");
        info!("  POST /api/chat  - Campaign recommendation stream (SSE)");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CampaignError::Io(e.into()))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
