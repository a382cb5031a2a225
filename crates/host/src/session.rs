//! Line-delimited JSON session
//!
//! Reads one command per line and answers each with one snapshot line. A line
//! is either a JSON command object (`{"type":"DESCEND"}`) or a shorthand word
//! (`down`, `left`, `toggle`, ...). Undecodable lines are answered with an
//! `{"error": ...}` line and the session carries on.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::core::GameState;
use crate::error::{LineError, SessionError};
use crate::types::{Command, GameSpec};

/// One decoded session line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    Command(Command),
    /// Play when paused, pause otherwise
    Toggle,
}

impl SessionInput {
    /// Resolve against the current state into an engine command
    pub fn resolve(self, state: &GameState) -> Command {
        match self {
            SessionInput::Command(command) => command,
            SessionInput::Toggle if state.is_paused() => Command::Play,
            SessionInput::Toggle => Command::Pause,
        }
    }
}

#[derive(Serialize)]
struct ErrorLine {
    error: String,
}

/// Decode one line; blank lines yield `None`
pub fn parse_line(line: &str) -> Result<Option<SessionInput>, LineError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.starts_with('{') {
        let command = checked_command(serde_json::from_str(line)?)?;
        return Ok(Some(SessionInput::Command(command)));
    }
    if line.eq_ignore_ascii_case("toggle") {
        return Ok(Some(SessionInput::Toggle));
    }
    Command::from_str(line)
        .map(|command| Some(SessionInput::Command(command)))
        .ok_or_else(|| LineError::UnknownWord(line.to_string()))
}

/// Reject a `SetInitialState` whose board the engine cannot represent
fn checked_command(command: Command) -> Result<Command, LineError> {
    if let Command::SetInitialState {
        width,
        height,
        block_size,
    } = command
    {
        if GameSpec::checked(width, height, block_size).is_none() {
            return Err(LineError::InvalidSpec {
                width,
                height,
                block_size,
            });
        }
    }
    Ok(command)
}

/// Run the session until `reader` is exhausted and return the final state
pub fn run_session<R: BufRead, W: Write>(
    mut state: GameState,
    reader: R,
    mut writer: W,
) -> Result<GameState, SessionError> {
    info!(initialized = state.is_initialized(), "session started");
    let mut applied = 0u64;

    for line in reader.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(input)) => {
                let command = input.resolve(&state);
                state = state.apply(&command);
                applied += 1;
                serde_json::to_writer(&mut writer, &state.snapshot())?;
            }
            Err(err) => {
                warn!(%err, "rejected line");
                serde_json::to_writer(
                    &mut writer,
                    &ErrorLine {
                        error: err.to_string(),
                    },
                )?;
            }
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    info!(applied, lost = state.game_lost(), "session ended");
    Ok(state)
}
