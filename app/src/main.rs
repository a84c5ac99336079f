//! todo CLI
//!
//! Talks to a todo API server (the mock server by default).

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use todo_app::{execute, Commands, Output, OutputFormat, Session, UreqTransport};
use todo_core::{PageOptions, TodoClient};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Manage a todo list over its REST API")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the todo API
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000", global = true)]
    api_url: String,

    /// Per-request timeout in seconds, 0 disables it
    #[arg(long, env = "TODO_TIMEOUT_SECS", default_value_t = 10, global = true)]
    timeout_secs: u64,

    /// Heading of the rendered page
    #[arg(long, default_value = "TODO List", global = true)]
    heading: String,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode, ids only
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Logs go to stderr so stdout stays clean for --json and render.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    let timeout = (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs));
    let session = Session {
        client: TodoClient::new(&cli.api_url),
        transport: UreqTransport::new(timeout),
        options: PageOptions {
            heading: cli.heading,
        },
        output: Output::new(OutputFormat::from_flags(cli.json, cli.quiet)),
    };

    let printed = execute(cli.command, session)?;
    if !printed.is_empty() {
        println!("{printed}");
    }
    Ok(())
}
