mod artifacts;
mod cli;
mod config;
mod errors;
mod llm_client;
mod routes;
mod sourcing;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::artifacts::ArtifactStore;
use crate::cli::{Cli, Command, RunArgs, ServeArgs};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::sourcing::enrich::RapidApiEnricher;
use crate::sourcing::jd::load_jd;
use crate::sourcing::pipeline::{RunSummary, SourcingPipeline};
use crate::sourcing::search::TavilySearcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sourcer v{}", env!("CARGO_PKG_VERSION"));

    let pipeline = build_pipeline(&config)?;

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_once(pipeline, args).await,
        Command::Serve(args) => serve(pipeline, &config, args).await,
    }
}

/// Wires the concrete stage backends into the orchestrator.
fn build_pipeline(config: &Config) -> Result<SourcingPipeline> {
    let llm = Arc::new(LlmClient::new(config.anthropic_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let searcher = Arc::new(TavilySearcher::new(config.tavily_api_key.clone())?);
    let enricher = Arc::new(RapidApiEnricher::new(
        config.rapidapi_key.clone(),
        config.rapidapi_host.clone(),
    ));

    Ok(SourcingPipeline::new(llm, searcher, enricher))
}

/// One-shot pipeline run: reads the JD and rubric from disk, writes every
/// stage artifact under the output directory, prints a summary.
async fn run_once(pipeline: SourcingPipeline, args: RunArgs) -> Result<()> {
    let pipeline = pipeline.with_enrichment_limit(args.limit);

    let jd_text = load_jd(&args.jd)?;
    let rubric = std::fs::read_to_string(&args.rubric)
        .with_context(|| format!("Failed to read rubric '{}'", args.rubric.display()))?;
    let store = ArtifactStore::new(&args.out)?;

    let summary = pipeline.run(&jd_text, &rubric, Some(&store)).await?;
    print_summary(&summary, &store);

    Ok(())
}

fn print_summary(summary: &RunSummary, store: &ArtifactStore) {
    let counts = &summary.counts;
    println!();
    println!("Sourcing run complete for '{}'", summary.job.title);
    println!("  JD chunks:          {}", counts.chunks);
    println!("  title variants:     {}", counts.titles);
    println!("  profile URLs:       {}", counts.urls);
    println!("  enriched profiles:  {}", counts.enriched);
    println!("  valid candidates:   {}", counts.candidates);
    if summary.halted {
        println!();
        println!("No valid profiles after normalization; scoring and messaging were skipped.");
    } else {
        println!("  scored candidates:  {}", counts.scored);
        println!("  outreach messages:  {}", counts.messages);
    }
    println!();
    println!("Artifacts written to {}", store.dir().display());
}

async fn serve(pipeline: SourcingPipeline, config: &Config, args: ServeArgs) -> Result<()> {
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
