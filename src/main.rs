//! padmap - gamepad action-mapping tester.
//!
//! Polls one controller, translates raw state to named logical actions,
//! shows them in a small window and echoes transitions to the console.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use padmap::config::AppConfig;
use padmap::diagnostics;
use padmap::input::GilrsPad;
use padmap::session::{
    run_loop, ConsoleDisplay, FixedRateClock, NeverQuit, PollSession, FRAME_RATE,
};
use padmap::translator::Translator;
use padmap::visualizer;

/// Gamepad action-mapping tester
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "padmap.yaml")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Dump detected gamepads and their button/axis indices, then exit
    #[arg(long)]
    diagnostics: bool,

    /// Run without the display window (console echo only)
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level)?;

    if args.diagnostics {
        diagnostics::print_pad_diagnostics();
        return Ok(());
    }

    let config = AppConfig::load_or_default(&args.config)?;
    info!(
        "Configuration loaded ({} mapped buttons, {} d-pad)",
        config.mapping.button_map.len(),
        if config.mapping.dpad.use_hat {
            "hat"
        } else {
            "axis"
        }
    );

    // The one fatal error: no controller to map. Everything past this point
    // degrades silently instead of failing.
    let mut pad = GilrsPad::acquire().context("cannot start the mapping tester")?;

    let mut session = PollSession::new(Translator::new(config.mapping.clone()));

    if args.headless {
        info!("Running headless at ~{FRAME_RATE} fps; press start to exit");
        let frames = run_loop(
            &mut session,
            &mut pad,
            &mut NeverQuit,
            &mut ConsoleDisplay,
            &mut FixedRateClock::new(FRAME_RATE),
        );
        info!("Session ended after {frames} frames");
        return Ok(());
    }

    visualizer::run_window(config.window, pad, session)
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}
