use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, info};

use crate::config::{Config, Limits};
use crate::handlers::FileStore;
use crate::http::connection::Connection;
use crate::routing::Router;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    match &cfg.directory {
        Some(dir) => info!("Serving files from {}", dir.display()),
        None => info!("No served directory, file routes disabled"),
    }

    let router = Arc::new(Router::new(FileStore::from_option(cfg.directory.clone())));
    serve(listener, router, cfg.limits).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, router: Arc<Router>, limits: Limits) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                // Back off so a persistent error such as EMFILE cannot spin.
                tracing::warn!(error = %e, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = router.clone();
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, router, limits);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            }
            .instrument(tracing::info_span!("conn", %peer)),
        );
    }
}
