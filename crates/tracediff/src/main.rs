//! tracediff - A visual diff viewer for EVM execution traces
//!
//! Renders the differences between two clients' pre-computed traces of the
//! same block: opcode-level step logs, transaction receipts, and
//! post-execution account state.

use clap::{Parser, Subcommand, ValueEnum};
use eyre::{Result, WrapErr};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracediff_common::{logging, TracePayload};
use tracediff_engine::{has_divergence, summarize, DiffContext};

/// Command-line interface for tracediff
#[derive(Debug, Parser)]
#[command(name = "tracediff")]
#[command(about = "A visual diff viewer for EVM execution traces")]
#[command(version)]
pub struct Cli {
    /// Column label for the reference implementation
    #[arg(long, env = "TRACEDIFF_LABEL_A", default_value = "reference")]
    pub label_a: String,

    /// Column label for the implementation under comparison
    #[arg(long, env = "TRACEDIFF_LABEL_B", default_value = "comparison")]
    pub label_b: String,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available UI modes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UiMode {
    /// Terminal User Interface
    Tui,
    /// Web User Interface
    Web,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse a trace payload interactively
    View {
        /// Path to the JSON payload holding both trace bundles
        payload: PathBuf,

        /// User interface to use
        #[arg(long, value_enum, default_value = "tui")]
        ui: UiMode,

        /// Port for the web UI
        #[arg(long, default_value = "3000")]
        port: u16,
    },
    /// Print a per-transaction divergence digest and exit non-zero when
    /// the traces diverge
    Summary {
        /// Path to the JSON payload holding both trace bundles
        payload: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::View { payload, ui, port } => {
            // The TUI owns the screen; keep its console free of log lines.
            let console = matches!(ui, UiMode::Web);
            logging::init_logging("tracediff", console, true)?;
            let ctx = load_context(payload, &cli)?;

            match ui {
                UiMode::Tui => {
                    tracing::info!("Launching Terminal UI");
                    tracediff_tui::run(ctx)?;
                }
                UiMode::Web => {
                    tracing::info!("Launching Web UI on port {}", port);
                    let config = tracediff_webui::WebUiConfig { port: *port };
                    tracediff_webui::api::start_webui(config, ctx).await?;
                }
            }

            Ok(ExitCode::SUCCESS)
        }
        Commands::Summary { payload } => {
            // keep stdout clean for the digest; logs go to the file only
            logging::init_logging("tracediff", false, true).ok();
            let ctx = load_context(payload, &cli)?;
            run_summary(&ctx)
        }
    }
}

/// Read and parse the payload, then build the immutable diff context.
fn load_context(path: &Path, cli: &Cli) -> Result<DiffContext> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read payload from {}", path.display()))?;
    let payload = TracePayload::from_json(&text)
        .wrap_err_with(|| format!("payload at {} is not a valid trace dump", path.display()))?;

    tracing::info!(path = %path.display(), "Loaded trace payload");

    Ok(DiffContext::new(payload, cli.label_a.clone(), cli.label_b.clone()))
}

/// Print the divergence digest; exit code 1 signals any divergence.
fn run_summary(ctx: &DiffContext) -> Result<ExitCode> {
    let summaries = summarize(ctx).map_err(|e| eyre::eyre!("unable to render summary: {e}"))?;

    if summaries.is_empty() {
        println!("no transactions in payload");
        return Ok(ExitCode::SUCCESS);
    }

    for summary in &summaries {
        if summary.has_divergence() {
            println!(
                "tx #{}: {}/{} steps diverged, {} receipt field(s) differ",
                summary.index + 1,
                summary.diverged_steps,
                summary.total_steps,
                summary.receipt_divergences
            );
        } else {
            println!("tx #{}: no divergence ({} steps)", summary.index + 1, summary.total_steps);
        }
    }

    if has_divergence(&summaries) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
