//! # Headline Deck
//!
//! Terminal front end for browsing top headlines by category.
//!
//! ## Usage
//!
//! ```sh
//! headline_deck --api-key YOUR_KEY --category technology
//! headline_deck -i            # then type e.g. `sports`, `health`, `q`
//! ```
//!
//! Cards go to stdout; logs go to stderr and are filtered with `RUST_LOG`.

use clap::Parser;
use headline_deck::api::NewsClient;
use headline_deck::config::load_settings;
use headline_deck::controller::{CategoryController, Surface};
use headline_deck::models::Category;
use headline_deck::outputs::terminal::TerminalSurface;
use headline_deck::session::Session;
use std::error::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("headline_deck starting up");

    let args = Cli::parse();
    debug!(?args.config, category = %args.category, format = ?args.format, "Parsed CLI arguments");

    let settings = args.apply_overrides(load_settings(args.config.as_deref()).await?);
    debug!(?settings, "Resolved settings");

    let client = NewsClient::new()?;
    let surface = TerminalSurface::stdout(args.format);
    let controller = CategoryController::new(settings, args.category, surface);
    let mut session = Session::new(controller, client);

    let started = session.start();
    if args.interactive && started {
        run_interactive(&mut session).await?;
    } else {
        session.settle().await;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        category = %session.controller().current_category(),
        "Session complete"
    );
    Ok(())
}

/// Read category names from stdin until EOF or `q`, applying outcomes as
/// they arrive.
#[instrument(level = "info", skip_all)]
async fn run_interactive<S: Surface>(session: &mut Session<S>) -> Result<(), Box<dyn Error>> {
    eprintln!(
        "Type a category ({}) or `q` to quit.",
        Category::ALL.map(|c| c.as_str()).join(", ")
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if matches!(input, "q" | "quit" | "exit") {
                    break;
                }
                if !input.is_empty() && !session.select(input) {
                    debug!(input, "Selection ignored");
                }
            }
            Some(applied) = session.next_outcome(), if session.in_flight() > 0 => {
                debug!(applied, "Outcome received");
            }
        }
    }

    if session.in_flight() > 0 {
        debug!(in_flight = session.in_flight(), "Abandoning pending fetches");
    }
    Ok(())
}
