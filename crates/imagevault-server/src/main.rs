use clap::Parser;
use imagevault_server::config::Args;
use imagevault_server::{Server, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ServerConfig::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.monitoring.log_level.clone())),
        )
        .init();

    info!(
        bucket = %config.storage.bucket,
        region = %config.storage.region,
        "Starting imagevault server"
    );

    Server::new(config).start().await?;
    Ok(())
}
