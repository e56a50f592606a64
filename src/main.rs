use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vavoo_proxy::{config::Config, web::WebServer};

#[derive(Parser)]
#[command(name = "vavoo-proxy")]
#[command(version)]
#[command(about = "Vavoo.to live TV addon with HLS playlist and segment proxy")]
#[command(long_about = None)]
struct Cli {
    /// Path to the TOML configuration file, created with defaults if missing
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Address to bind, overrides web.host
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Port to bind, overrides web.port
    #[arg(short, long, value_name = "PORT", env = "PORT")]
    port: Option<u16>,

    /// Public base URL used in generated links
    #[arg(short = 'b', long, value_name = "URL")]
    base_url: Option<String>,

    /// Log level for this crate when RUST_LOG is unset
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("vavoo_proxy={},tower_http=trace", cli.log_level)
    } else {
        format!("vavoo_proxy={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vavoo proxy v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(base_url) = cli.base_url {
        config.web.base_url = Some(base_url);
    }

    info!(
        "Origin: {} (country {}), channel cache TTL {}",
        config.upstream.channels_url,
        config.upstream.country,
        humantime::format_duration(config.cache.channel_ttl)
    );

    let web_server = WebServer::new(config)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
