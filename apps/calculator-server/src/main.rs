use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calculator::CalculatorModule;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

mod config;
mod logging;
mod signals;

use config::AppConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Calculator REST server
#[derive(Parser)]
#[command(name = "calculator-server")]
#[command(about = "Arithmetic calculation REST service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP listener
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port);

    logging::init_logging(&config.logging, cli.verbose);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        "calculator-server starting"
    );

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_pretty_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    config.validate()?;
    println!("Configuration is valid");
    println!("  listen: {}", config.server.bind_addr);
    println!("  routes: {}/*", config.calculator.route_prefix());
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    let module = CalculatorModule::new(config.calculator.clone())?;

    let cancel = CancellationToken::new();
    let maintenance = module.spawn_maintenance(cancel.child_token());

    let listener = TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        prefix = %module.config().route_prefix(),
        "calculator-server listening"
    );

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        match signals::wait_for_shutdown().await {
            Ok(()) => signal_cancel.cancel(),
            Err(e) => tracing::error!(error = %e, "signal handling unavailable"),
        }
    });

    let graceful = cancel.clone();
    let server = axum::serve(
        listener,
        module
            .router()
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { graceful.cancelled().await })
    .into_future();

    let drain_timeout = config.server.shutdown_timeout;
    let drain_deadline = async {
        cancel.cancelled().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => result.context("HTTP server failed")?,
        () = drain_deadline => {
            tracing::warn!(timeout = ?drain_timeout, "in-flight requests did not drain in time");
        }
    }

    cancel.cancel();
    if let Some(handle) = maintenance
        && let Err(e) = handle.await
    {
        tracing::warn!(error = %e, "rate limit maintenance task failed");
    }

    tracing::info!("calculator-server stopped");
    Ok(())
}
