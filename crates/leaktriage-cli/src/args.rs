use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "leaktriage",
    version,
    about = "Triage refcount leak summaries from instrumented shell runs"
)]
pub struct Args {
    /// Log path prefix; the file read is `<LOG_PREFIX>-out`
    pub log_prefix: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Optional git commit hash for tool metadata
    #[arg(long)]
    pub commit: Option<String>,

    /// Log classification progress to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
