use thiserror::Error;

/// Invalid host configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: cannot parse {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be positive, got {value}")]
    NotPositive { key: &'static str, value: i64 },
    #[error("board of {width}x{height} cells at {block_size}px overflows pixel coordinates")]
    TooLarge {
        width: i32,
        height: i32,
        block_size: i32,
    },
}

/// A line that could not be turned into a command
#[derive(Debug, Error)]
pub enum LineError {
    #[error("invalid command json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown command: {0}")]
    UnknownWord(String),
    #[error("invalid board {width}x{height} with block size {block_size}")]
    InvalidSpec {
        width: i32,
        height: i32,
        block_size: i32,
    },
}

/// Failure that ends a JSON line session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
