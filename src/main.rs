//! Blockfall runner (default binary).
//!
//! With no arguments, runs a JSON line session on stdin/stdout against a board
//! initialized from the environment configuration. `blockfall demo <ms>`
//! instead plays the game under the clock for that many simulated
//! milliseconds and prints the final snapshot.

use std::io::{self, Write};

use anyhow::{anyhow, bail, Context, Result};
use tracing_subscriber::EnvFilter;

use blockfall::core::GameState;
use blockfall::host::{drive, run_session, Clock, HostConfig};
use blockfall::types::Command;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = HostConfig::from_env().context("loading configuration")?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let state = GameState::new(config.seed).apply(&config.initial_command());

    match args.first().map(String::as_str) {
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_session(state, stdin.lock(), stdout.lock())?;
            Ok(())
        }
        Some("demo") => {
            let raw = args
                .get(1)
                .ok_or_else(|| anyhow!("demo: missing duration in milliseconds"))?;
            let total_ms: u32 = raw
                .parse()
                .map_err(|_| anyhow!("demo: invalid duration: {}", raw))?;
            run_demo(state, &config, total_ms)
        }
        Some(other) => bail!("unknown argument: {}", other),
    }
}

fn run_demo(state: GameState, config: &HostConfig, total_ms: u32) -> Result<()> {
    let mut clock = Clock::from_config(config);
    let state = drive(state.apply(&Command::Play), &mut clock, total_ms);
    tracing::info!(
        seconds = state.seconds_elapsed(),
        settled = state.dead_pieces().len(),
        lost = state.game_lost(),
        "demo finished"
    );

    let mut out = io::stdout().lock();
    serde_json::to_writer(&mut out, &state.snapshot()).context("writing snapshot")?;
    writeln!(out)?;
    Ok(())
}
