//! Host collaborators for the rules engine.
//!
//! The engine only accepts commands and returns states. This crate supplies
//! the pieces around it that a runnable program needs, none of which the
//! engine depends on:
//!
//! - [`config`]: board and clock settings from environment variables
//! - [`clock`]: elapsed time to `IncrementTime`/`Descend` commands
//! - [`session`]: line-delimited JSON commands in, snapshots out

pub mod clock;
pub mod config;
pub mod error;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use clock::{drive, Clock, FRAME_MS};
pub use config::HostConfig;
pub use error::{ConfigError, LineError, SessionError};
pub use session::{parse_line, run_session, SessionInput};
