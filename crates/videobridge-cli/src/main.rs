//! Videobridge CLI
//!
//! Headless harness for the page-side relay. Feeds message events from
//! stdin through the relay against an in-memory address bar and prints
//! the messages that would reach the parent frame.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod bridge;

/// Videobridge - relay player-ended events to URL state and a parent frame
///
/// Pipe message events as JSON lines into stdin to watch the page URL
/// and the rerun signals the relay produces.
#[derive(Parser, Debug)]
#[command(name = "videobridge")]
#[command(version, about, long_about = None)]
struct Args {
    /// Initial page address
    #[arg(short, long)]
    url: String,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Target origin for messages posted to the parent frame
    #[arg(short, long, default_value = "*")]
    origin: String,

    /// Consume the video_ended parameter after the input ends
    #[arg(long)]
    consume: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let json_output = matches!(args.format, OutputFormat::Json);

    match bridge::run_stdin_bridge(&args.url, &args.origin, json_output, args.consume).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
