mod classifier;
mod client;
mod config;
mod model;
mod orchestrator;
mod prompt;
mod render;
mod utils;
#[cfg(test)]
mod test_support;

use clap::Parser;
use client::{AnalysisClient, HttpAnalysisClient};
use config::{load_config, AppConfig};
use model::TimeFrame;
use orchestrator::SearchOrchestrator;
use prompt::listener::{listen_for_commands, spawn_renderer};
use prompt::Session;
use render::render_state;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stock-lens", version, about = "Terminal front-end for the stock analysis service")]
struct Args {
    /// Path to the JSON config file
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Analysis service base URL (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Initial timeframe: 1m, 3m, 5m, 10m, 15m, 30m, 60m, 120m, 240m, daily, weekly, monthly
    #[arg(short, long)]
    timeframe: Option<TimeFrame>,

    /// Analyze this ticker once and exit instead of opening the prompt
    ticker: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries rendered output only
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let args = Args::parse();

    let mut config: AppConfig = match load_config(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    if let Some(tf) = args.timeframe {
        config.default_timeframe = tf;
    }
    info!(
        "Using analysis service at {} (default timeframe {})",
        config.api_base_url, config.default_timeframe
    );

    let client: Arc<dyn AnalysisClient> = match HttpAnalysisClient::from_config(&config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let orchestrator = SearchOrchestrator::new(client.clone(), config.default_timeframe);

    if let Some(ticker) = args.ticker {
        let outcome = orchestrator.submit(&ticker).await;
        println!("{}", render_state(&orchestrator.snapshot(), config.chart_width));
        return match outcome {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    let renderer = spawn_renderer(orchestrator.subscribe(), config.chart_width);
    let session = Session::new(client, orchestrator);

    println!("📈 stock-lens — type a ticker (e.g. 005930 or AAPL), or :help");
    listen_for_commands(&session).await;

    drop(session);
    if let Err(e) = renderer.await {
        error!("Renderer task failed: {:?}", e);
    }
    info!("Bye.");
    ExitCode::SUCCESS
}

