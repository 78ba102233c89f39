use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use forge::config::Config;
use forge::server;

#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "Minimal HTTP/1.1 server over raw TCP", long_about = None)]
struct Cli {
    /// Directory served by the /files routes
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:4221
    #[arg(short, long)]
    listen: Option<String>,

    /// YAML configuration file
    #[arg(short, long, env = "FORGE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load(),
    };
    if let Some(dir) = cli.directory {
        cfg.directory = Some(dir);
    }
    if let Some(addr) = cli.listen {
        cfg.listen_addr = addr;
    }
    cfg.validate()?;

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
