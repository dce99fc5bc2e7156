use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use leaktriage_core::inspect;
use leaktriage_core::report::{model::ToolInfo, render};

mod args;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = args::Args::parse();
    init_tracing(args.verbose);

    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: args.commit.clone(),
    };

    let report = inspect(&args.log_prefix, tool)
        .with_context(|| format!("failed to classify {}", args.log_prefix.display()))?;

    let output = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Text => render::render_text(&report),
    };

    match args.out {
        Some(path) => std::fs::write(&path, &output)
            .with_context(|| format!("failed to write report: {}", path.display()))?,
        None => print!("{output}"),
    }

    tracing::debug!(exit_code = report.classification.exit_code, "done");
    std::process::exit(report.classification.exit_code);
}
