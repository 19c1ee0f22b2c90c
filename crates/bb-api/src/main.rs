//! Blackboard server: shared working memory over HTTP RPC.

use bb_api::config::Config;
use bb_api::pidfile::write_pidfile;
use bb_api::server::{self, AppState};
use bb_store::InMemoryBlackboard;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let access = config.access_resolver()?;
    tracing::info!(
        default_namespace = %access.default_namespace(),
        auth_url = config.auth_url.as_deref().unwrap_or("none"),
        "namespace resolution configured"
    );
    let state = Arc::new(AppState {
        store: Arc::new(InMemoryBlackboard::new()),
        access,
    });

    if !config.no_pidfile {
        write_pidfile(&config.pidfile).await;
    }

    let app = server::router(state);
    tracing::info!("blackboard listening on {}", config.listen);
    axum::serve(
        tokio::net::TcpListener::bind(config.listen).await?,
        app.into_make_service(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutting down");
    })
    .await?;
    Ok(())
}
