//! Host configuration from environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_WIDTH` | 10 | Board width in cells |
//! | `BLOCKFALL_HEIGHT` | 20 | Board height in cells |
//! | `BLOCKFALL_BLOCK_SIZE` | 20 | Pixel size of a cell |
//! | `BLOCKFALL_SEED` | 1 | Piece bag seed |
//! | `BLOCKFALL_DESCEND_MS` | 500 | Clock interval between `Descend` commands |
//! | `BLOCKFALL_TICK_MS` | 1000 | Clock interval between `IncrementTime` commands |

use std::str::FromStr;

use crate::error::ConfigError;
use crate::types::{Command, GameSpec, DEFAULT_BLOCK_SIZE, DEFAULT_HEIGHT, DEFAULT_WIDTH};

pub const DEFAULT_SEED: u32 = 1;
pub const DEFAULT_DESCEND_MS: u32 = 500;
pub const DEFAULT_TICK_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub width: i32,
    pub height: i32,
    pub block_size: i32,
    pub seed: u32,
    pub descend_interval_ms: u32,
    pub tick_interval_ms: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            block_size: DEFAULT_BLOCK_SIZE,
            seed: DEFAULT_SEED,
            descend_interval_ms: DEFAULT_DESCEND_MS,
            tick_interval_ms: DEFAULT_TICK_MS,
        }
    }
}

impl HostConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (unset keys fall back to defaults)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            width: read(&lookup, "BLOCKFALL_WIDTH", defaults.width)?,
            height: read(&lookup, "BLOCKFALL_HEIGHT", defaults.height)?,
            block_size: read(&lookup, "BLOCKFALL_BLOCK_SIZE", defaults.block_size)?,
            seed: read(&lookup, "BLOCKFALL_SEED", defaults.seed)?,
            descend_interval_ms: read(&lookup, "BLOCKFALL_DESCEND_MS", defaults.descend_interval_ms)?,
            tick_interval_ms: read(&lookup, "BLOCKFALL_TICK_MS", defaults.tick_interval_ms)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject zero or negative dimensions and intervals, and boards too large
    /// for pixel coordinates
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("BLOCKFALL_WIDTH", self.width.into())?;
        positive("BLOCKFALL_HEIGHT", self.height.into())?;
        positive("BLOCKFALL_BLOCK_SIZE", self.block_size.into())?;
        positive("BLOCKFALL_DESCEND_MS", self.descend_interval_ms.into())?;
        positive("BLOCKFALL_TICK_MS", self.tick_interval_ms.into())?;
        if GameSpec::checked(self.width, self.height, self.block_size).is_none() {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
                block_size: self.block_size,
            });
        }
        Ok(())
    }

    pub fn spec(&self) -> GameSpec {
        GameSpec::new(self.width, self.height, self.block_size)
    }

    /// The `SetInitialState` command for this configuration
    pub fn initial_command(&self) -> Command {
        Command::SetInitialState {
            width: self.width,
            height: self.height,
            block_size: self.block_size,
        }
    }
}

fn read<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key).map(|v| v.trim().to_string()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn positive(key: &'static str, value: i64) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { key, value })
    }
}
