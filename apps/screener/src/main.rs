mod batch;
mod cli;
mod config;
mod document;
mod errors;
mod llm_client;
mod pacing;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::batch::{run_batch, BatchOptions};
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Fails fast when GEMINI_API_KEY is missing
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())?
        .with_retry(config.llm_max_attempts, config.llm_retry_base);
    info!(
        "LLM client initialized (model: {}, max attempts: {})",
        llm.model(),
        config.llm_max_attempts
    );

    match cli.command {
        Command::Screen {
            jd_dir,
            resume_dir,
            output_dir,
        } => {
            let options = BatchOptions {
                jd_dir: jd_dir.unwrap_or_else(|| config.jd_dir.clone()),
                resume_dir: resume_dir.unwrap_or_else(|| config.resume_dir.clone()),
                output_dir: output_dir.unwrap_or_else(|| config.output_dir.clone()),
                call_spacing: config.pace_between_calls,
                evaluation_pause: config.pace_between_evaluations,
            };
            let summary = run_batch(&llm, &options).await?;
            info!("Summary: {}", serde_json::to_string(&summary)?);
        }
        Command::Serve { port } => {
            let state = AppState { llm: Arc::new(llm) };

            let app = build_router(state).layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            );

            let addr: SocketAddr = format!("0.0.0.0:{}", port.unwrap_or(config.port)).parse()?;
            info!("Listening on {addr}");

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
