use clap::Parser;
use synth_dns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "synth-dns")]
#[command(version = "0.3.2")]
#[command(about = "synth-dns - Authoritative DNS synthesizing records for IPv6 prefixes")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen port shared by UDP and TCP
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        port: cli.port,
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting synth-dns v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config)?;

    server::start_listeners(&config, services.server).await?;

    info!("Server shutdown complete");
    Ok(())
}
