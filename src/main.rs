use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use presale_event_projector::config::Config;
use presale_event_projector::server::{WebhookState, routes};
use presale_event_projector::store::MemoryStore;
use presale_event_projector::telemetry::setup_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_telemetry(config.log_format);

    let ctx = config
        .pipeline_context()
        .context("invalid presale program configuration")?;
    info!(
        program = ctx.trusted_program_str(),
        event_authority = ctx.event_authority_str(),
        "pipeline context ready"
    );

    let state = WebhookState::new(
        Arc::new(ctx),
        Arc::new(MemoryStore::new()),
        config.webhook_auth.clone(),
    );

    let addr = config.bind_addr();
    if config.allow_public_bind {
        warn!("webhook server binding to {addr}; the endpoint is publicly reachable");
    }

    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("webhook server received shutdown signal");
        })
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("webhook server listening on {bound}");
    server.await;
    info!("webhook server shut down gracefully");
    Ok(())
}
