//! Scripted small-business assistant server
//!
//! (c) Softlandia 2025

use shop_assistant_api::api;
use shop_assistant_api::config::AppConfig;

use anyhow::anyhow;
use axum::http::{HeaderValue, Method};
use di_axum::RouterServiceProviderExtensions;
use log::{info, warn};
use tokio::runtime::{Builder, Runtime};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(web_server_task())
}

async fn web_server_task() -> anyhow::Result<()> {
    let provider = shop_assistant_api::services()
        .build_provider()
        .map_err(|e| anyhow!("invalid service registrations: {e:?}"))?;

    let config = provider.get_required::<AppConfig>();

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    let app = api::router()
        .layer(
            CorsLayer::new()
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_origin(AllowOrigin::list(origins)),
        )
        .with_provider(provider);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    info!("Shutting down...");

    Ok(())
}
