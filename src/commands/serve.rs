use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    app::App, cli::ServeArgs, config::Config, environment::Environment, router::router,
    upstream::UpstreamError,
};

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Upstream client setup failed: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub async fn handle_serve_command(
    environment: Environment,
    config: Config,
    args: ServeArgs,
) -> Result<(), ServeError> {
    let config = apply_overrides(config, args);
    let app = App::new(config.clone(), environment)?;

    info!("🔗 Forwarding jobs to {}", app.upstream.jobs_url());

    start_server(router(app), &config.server.host, config.server.port).await
}

fn apply_overrides(mut config: Config, args: ServeArgs) -> Config {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(upstream) = args.upstream {
        config.upstream.base_url = upstream;
    }
    config
}

async fn start_server(router: Router, host: &str, port: u16) -> Result<(), ServeError> {
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|source| ServeError::Bind {
            address: format!("{host}:{port}"),
            source,
        })?;

    let addr = listener.local_addr().map_err(ServeError::Serve)?;
    info!("🌐 Server starting on http://{}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(ServeError::Serve)
}
