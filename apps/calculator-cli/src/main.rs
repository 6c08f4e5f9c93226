use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use calculator::{CalculatorConfig, CalculatorModule};
use calculator_input::session::expiry;
use calculator_input::{CalculatorSession, CalculatorState, Key};
use calculator_sdk::{CalculatorClientV1, HttpCalculatorClient, HttpClientConfig};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const DISPLAY_WIDTH: usize = 24;

/// Keypad for the calculator service. Type keys and press Enter; an empty line means `=`.
#[derive(Parser)]
#[command(name = "calc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(after_help = KEY_HELP)]
struct Cli {
    /// Base URL of the calculator API
    #[arg(long, default_value = "http://localhost:8080/api/v1")]
    server: String,

    /// Evaluate in-process instead of calling a server
    #[arg(long)]
    local: bool,

    /// Per-request timeout, e.g. `5s` or `500ms`
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    timeout: Duration,

    /// Log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const KEY_HELP: &str = "\
Keys:
  0-9 .          digits and decimal point
  + - * x / ^    operators
  %  r           percentage, square root
  = or Enter     equals
  n              toggle sign
  <  c           backspace, clear
  quit           exit (or Ctrl-D)";

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_client(cli: &Cli) -> Result<Arc<dyn CalculatorClientV1>> {
    if cli.local {
        let module = CalculatorModule::new(CalculatorConfig::default())?;
        return Ok(Arc::new(module.local_client()));
    }
    Ok(Arc::new(HttpCalculatorClient::new(&HttpClientConfig {
        base_url: cli.server.clone(),
        timeout: cli.timeout,
    })))
}

fn render(state: &CalculatorState) {
    let secondary = state.secondary_display().unwrap_or_default();
    println!("{secondary:>DISPLAY_WIDTH$}");
    let busy = if state.is_loading { " ..." } else { "" };
    println!("{:>DISPLAY_WIDTH$}{busy}", state.display);
    if let Some(error) = &state.error {
        println!("! {error}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let client = build_client(&cli)?;
    if !cli.local {
        match client.health().await {
            Ok(health) => tracing::info!(version = %health.version, "connected to {}", cli.server),
            Err(e) => eprintln!("warning: {} is not reachable yet ({e})", cli.server),
        }
    }

    let mut session = CalculatorSession::new(client);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render(session.state());

    loop {
        let deadline = session.error_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if matches!(line, "quit" | "exit") {
                    break;
                }
                match Key::parse_line(line) {
                    Ok(keys) => {
                        for key in keys {
                            session.handle_key(key).await;
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
                render(session.state());
            }
            () = expiry(deadline) => {
                if session.clear_expired_error() {
                    render(session.state());
                }
            }
        }
    }

    Ok(())
}
