//! herodeck - Headless hero-screen driver
//!
//! Mounts the hero screen with headless media, audio, and orientation, then
//! looks up heroes on OpenDota and prints their stats.
//!
//! # Usage
//!
//! ```bash
//! # Look up heroes named on the command line
//! herodeck Anti-Mage Axe
//!
//! # One hero per stdin line
//! printf 'Lina\nInvoker\n' | herodeck
//!
//! # Skip a missing intro after two seconds
//! herodeck --intro-timeout-secs 2 Axe
//!
//! # Verbose logging
//! RUST_LOG=debug herodeck Axe
//! ```

mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use herodeck_core::{
    capabilities::{HeadlessAudio, HeadlessMedia, HeadlessOrientation, OpenDotaRoster},
    load_config, Capabilities, ConfigOverrides, ConfigSource, HeroScreen, IntroStatus,
    ScreenEvent, StaleResponsePolicy,
};

/// Headless driver for the herodeck hero-information screen
#[derive(Parser, Debug)]
#[command(name = "herodeck")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Heroes to look up; reads one per stdin line when empty
    heroes: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "HERODECK_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Roster API base URL
    #[arg(long, value_name = "URL")]
    roster_url: Option<String>,

    /// Intro video path or URL
    #[arg(long, value_name = "ASSET")]
    intro: Option<String>,

    /// Click sound path or URL
    #[arg(long, value_name = "ASSET")]
    sound: Option<String>,

    /// Give up on the intro after this many seconds (0 waits forever)
    #[arg(long, value_name = "SECS")]
    intro_timeout_secs: Option<u64>,

    /// Which of several overlapping lookups is shown: arrival or latest
    #[arg(long, value_name = "POLICY")]
    stale_responses: Option<StaleResponsePolicy>,

    /// Headless intro playback length in milliseconds
    #[arg(long, default_value_t = 500, value_name = "MS")]
    intro_playback_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "HERODECK_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            intro_source: self.intro.clone(),
            click_sound: self.sound.clone(),
            roster_base_url: self.roster_url.clone(),
            intro_timeout_secs: self.intro_timeout_secs,
            stale_responses: self.stale_responses,
        }
    }
}

/// Initialize logging with the specified level
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("herodeck={level},herodeck_core={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("herodeck {}", env!("CARGO_PKG_VERSION"));

    let (config, source) = load_config(args.config.as_deref(), &args.overrides())
        .context("Failed to load configuration")?;
    match &source {
        ConfigSource::File(path) => info!(path = %path.display(), "Loaded config file"),
        ConfigSource::Defaults => debug!("No config file, using defaults"),
    }

    let roster = OpenDotaRoster::new(&config.roster_base_url, config.request_timeout)
        .context("Failed to build roster client")?;
    let caps = Capabilities::new(
        HeadlessMedia::new(Duration::from_millis(args.intro_playback_ms)),
        HeadlessAudio::new(),
        HeadlessOrientation::new(),
        roster,
    );

    // Rendering happens from screen state; the surface channel only feeds the log
    let (tx, mut rx) = mpsc::channel(config.message_buffer);
    let surface = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            debug!(?msg, "Screen message");
        }
    });

    let intro_can_time_out = config.intro_timeout.is_some();
    let mut screen = HeroScreen::new(caps, config, tx);
    screen.mount().await?;

    while !screen.phase().is_interactive() {
        if let IntroStatus::Stalled(e) = screen.intro_status() {
            if !intro_can_time_out {
                let reason = e.to_string();
                screen.unmount().await;
                anyhow::bail!(
                    "Intro failed ({reason}); pass --intro-timeout-secs to continue without it"
                );
            }
        }
        if !screen.next_completion().await {
            anyhow::bail!("Screen stopped before the intro finished");
        }
    }

    if args.heroes.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => match line.context("Failed to read stdin")? {
                    Some(line) => {
                        let name = line.trim();
                        if !name.is_empty() {
                            look_up(&mut screen, name).await?;
                        }
                    }
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    break;
                }
            }
        }
    } else {
        for name in &args.heroes {
            look_up(&mut screen, name).await?;
        }
    }

    screen.handle_event(ScreenEvent::Unmount).await?;
    drop(screen);
    if let Err(e) = surface.await {
        warn!(error = %e, "Surface task failed");
    }
    Ok(())
}

/// Submit one lookup, wait for it to settle, and print the result
async fn look_up(screen: &mut HeroScreen, name: &str) -> Result<()> {
    screen.handle_event(ScreenEvent::submit(name)).await?;

    while screen.is_busy() {
        if !screen.next_completion().await {
            anyhow::bail!("Screen stopped during lookup for {name}");
        }
    }

    for line in render::lookup_lines(name, screen.query(), screen.pending_alert()) {
        println!("{line}");
    }
    println!();

    if screen.pending_alert().is_some() {
        screen.handle_event(ScreenEvent::AlertAcknowledged).await?;
    }
    Ok(())
}
