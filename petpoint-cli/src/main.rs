//! CLI entry point for petpoint

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use petpoint_core::config::{Config, ConfigLoader};
use petpoint_core::logging::init_logging;
use petpoint_core::nlp::NlpEngine;
use petpoint_core::session::{SessionStore, SessionSweeper};
use petpoint_server::{run_server, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "petpoint")]
#[command(about = "Chat service with intent, entity and response lookup")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind, overrides server.host
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides server.port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };
    let config = config_loader.load().with_context(|| {
        format!(
            "Failed to load configuration from {}",
            config_loader.config_dir().display()
        )
    })?;

    match cli.command {
        Commands::Serve { host, port } => {
            let _log_guard = init_logging(&config.logging);
            info!("Starting service");
            run_serve(config, host, port).await?;
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn bind_addr(config: &Config, host: Option<String>, port: Option<u16>) -> Result<SocketAddr> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))
}

async fn run_serve(config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    let addr = bind_addr(&config, host, port)?;

    let sessions = Arc::new(SessionStore::from_config(&config.session));
    let engine = Arc::new(NlpEngine::from_config(&config.nlp));
    if !engine.is_loaded() {
        error!("NLP collaborators are not loaded; /chat/ will answer with 500");
    }

    let sweeper = SessionSweeper::new(Arc::clone(&sessions), config.session.sweep_interval());
    sweeper.start().await;

    println!("{}", style("Starting petpoint...").bold().cyan());
    println!("Session timeout: {}s", config.session.timeout_secs);
    println!("Sweep interval: {}s", config.session.sweep_interval_secs);
    println!("Dataset: {}", config.nlp.dataset_path);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let state = AppState::new(sessions, engine);
    let mut server_handle = tokio::spawn(run_server(state, addr, shutdown_rx));

    println!(
        "\n{}",
        style(format!("Listening on http://{}. Press Ctrl+C to stop.", addr)).green()
    );

    // The server may also exit on its own, e.g. when the bind fails
    let finished = tokio::select! {
        result = &mut server_handle => Some(result),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            println!("\n{}", style("Shutting down...").yellow());
            let _ = shutdown_tx.send(());
            None
        }
    };

    sweeper.stop().await;

    let result = match finished {
        Some(result) => result,
        None => server_handle.await,
    };
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Server error: {}", e),
        Err(e) => error!("Server task failed: {}", e),
    }

    println!("{}", style("petpoint stopped.").green());
    Ok(())
}
