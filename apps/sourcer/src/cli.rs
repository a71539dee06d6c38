//! Command-line interface for the sourcing pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::sourcing::enrich::DEFAULT_ENRICHMENT_LIMIT;

#[derive(Parser, Debug)]
#[command(
    name = "sourcer",
    about = "Candidate sourcing pipeline: job description in, message-ready candidates out",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the pipeline once and write per-stage artifacts to disk
    Run(RunArgs),
    /// Start the HTTP service
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the job description text file
    #[arg(long)]
    pub jd: PathBuf,
    /// Path to the scoring rubric text file
    #[arg(long)]
    pub rubric: PathBuf,
    /// Directory the per-stage JSON artifacts are written to
    #[arg(long, default_value = "out")]
    pub out: PathBuf,
    /// Maximum number of profiles to enrich
    #[arg(long, default_value_t = DEFAULT_ENRICHMENT_LIMIT)]
    pub limit: usize,
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub port: Option<u16>,
}
