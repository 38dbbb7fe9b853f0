use std::net::{IpAddr, SocketAddr};

use anyhow::Result;
use axum::Router;
use coursecal_core::RewriteConfig;
use tower_http::trace::TraceLayer;

use crate::routes::{self, AppState};

pub async fn run(config: RewriteConfig, host: IpAddr, port: u16) -> Result<()> {
    let state = AppState::new(config)?;

    let app = Router::new()
        .merge(routes::feed::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(host, port);
    tracing::info!("coursecal listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
