//! Tic-tac-toe - Unified CLI
//!
//! One binary with two modes: an interactive console game and a REST
//! API server sharing a single game instance across clients.

use anyhow::Result;
use clap::Parser;
use tictactoe::cli::{Cli, Command};
use tictactoe::{console, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Console => run_console(),
        Command::Serve { port, host } => run_server(&host, port).await,
    }
}

/// Run the interactive console game.
///
/// Logs go to stderr and stay off unless `RUST_LOG` asks for them; the
/// board rendering owns stdout.
fn run_console() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    console::run()
}

/// Run the REST API server.
async fn run_server(host: &str, port: u16) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    server::serve(host, port).await
}
