//! Enquete MCP server binary.
//!
//! Exposes survey authoring tools to MCP clients over stdio. Surveys live in
//! memory for the lifetime of the process.
//!
//! Usage:
//!   cargo run -p enquete-mcp
//!   cargo run -p enquete-mcp -- --config ./enquete.ron --log-level debug
//!
//! Test with MCP inspector:
//!   npx @modelcontextprotocol/inspector cargo run -p enquete-mcp

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{EnvFilter, fmt};

use enquete_kernel::EnqueteConfig;
use enquete_mcp::EnqueteMcp;

/// MCP server for drafting surveys.
#[derive(Parser, Debug)]
#[command(name = "enquete-mcp")]
#[command(about = "MCP server for survey authoring")]
struct Args {
    /// Config file (RON). Defaults to $XDG_CONFIG_HOME/enquete/config.ron if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the protocol, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid --log-level")?;
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = EnqueteConfig::discover(args.config.as_deref())?;
    tracing::info!(
        name = %config.server.name,
        page_title = %config.defaults.page_title,
        block_title = %config.defaults.block_title,
        "Starting with in-memory store"
    );

    let mcp = EnqueteMcp::from_config(&config);

    let service = mcp
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("MCP server error: {:?}", e);
        })?;

    tracing::info!("enquete-mcp server ready");

    service.waiting().await?;

    tracing::info!("enquete-mcp server shutting down");
    Ok(())
}
