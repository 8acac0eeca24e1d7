//! REST server startup and configuration

use anyhow::Result;
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::routing::create_router;
use crate::state::AppState;

/// Start the REST server with production wiring
pub async fn start_server(addr: SocketAddr) -> Result<()> {
  let state = AppState::from_env();

  let app = create_router(state).layer(
    ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()),
  );

  let listener = TcpListener::bind(addr).await?;
  tracing::info!("ream server listening on {addr}");

  serve(listener, app).await?;
  Ok(())
}
