use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "mock-server")]
#[command(about = "In-memory todo API for local runs and end-to-end tests")]
#[command(version)]
struct Cli {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Todos per list page
    #[arg(long, env = "PAGE_SIZE", default_value_t = mock_server::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, page_size = cli.page_size, "listening");
    mock_server::run_with_page_size(listener, cli.page_size).await
}
