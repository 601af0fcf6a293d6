mod config;
mod gemini;
mod gemini_client;
mod logging;
mod models;
mod proxy;
mod request_id;

use clap::Parser;
use config::Config;
use gemini_client::GeminiClient;
use proxy::{AppState, build_router};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{Level, info, warn};

#[derive(Parser, Debug)]
#[command(name = "gemini-proxy")]
#[command(about = "An HTTP proxy for the Gemini generateContent API")]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    ip: String,

    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append logs to this file in addition to stdout
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = Level::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using INFO level.", args.log_level);
        Level::INFO
    });
    logging::init_logging(log_level, args.log_file.as_deref())?;

    let config = Config::load(args.config.as_deref())?;
    if config.api_key.is_none() {
        warn!(
            "{} is not set; POST requests will fail until it is provided",
            config::GEMINI_API_KEY_ENV
        );
    }
    info!("Proxying to model: {}", config.model);

    let http_client = Arc::new(reqwest::Client::new());
    let gemini_client = Arc::new(GeminiClient::new(http_client));

    let app_state = AppState {
        config: Arc::new(config),
        gemini_client,
    };
    let app = build_router(app_state);

    let bind_address = format!("{}:{}", args.ip, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server started on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
