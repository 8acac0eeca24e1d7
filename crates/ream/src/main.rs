//! Ream REST Server
//!
//! HTTP entry point for the report mapping and retrieval engine.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use ream::startup::start_server;

#[derive(Parser)]
#[command(name = "ream_server")]
#[command(about = "Report mapping and retrieval REST server")]
#[command(version)]
struct Args {
  /// Server bind address
  #[arg(long, default_value = "127.0.0.1:3400")]
  bind: SocketAddr,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("debug,hyper=info,tower_http=debug")
  } else {
    EnvFilter::new("ream=info,mapping=info,reports=info,warn")
  };

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  tracing::info!("starting ream server v{}", env!("CARGO_PKG_VERSION"));
  start_server(args.bind).await?;

  Ok(())
}
