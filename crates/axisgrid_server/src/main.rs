use std::net::TcpListener;
use std::sync::Arc;

use anyhow::{Context, Result};
use axisgrid_server::{RequestHandler, ServerConfig, serve};
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();
    let c_addr = config.bind_address();
    let listener =
        TcpListener::bind(&c_addr).with_context(|| format!("Failed to bind {c_addr}"))?;

    log::info!("axisgrid v{}", env!("CARGO_PKG_VERSION"));
    log::info!("  read workers:     {}", config.read_workers);
    log::info!("  chunk count rule: {:?}", config.chunk_count_rule);
    log::info!("Listening on http://{}", listener.local_addr()?);

    let handler = Arc::new(RequestHandler::new(config.process_options()));
    serve(listener, handler);
    Ok(())
}
