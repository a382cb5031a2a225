//! Core types module - shared data structures and constants
//!
//! This module defines the value types exchanged between the rules engine and
//! its host collaborators. All types are plain immutable data: moving a block
//! produces a new block, never an in-place edit.
//!
//! # Coordinates
//!
//! Block coordinates are stored in **pixel units**: every coordinate is an
//! integer multiple of [`GameSpec::block_size`]. `x` grows to the right and
//! `y` grows downward, with `(0, 0)` in the top-left corner of the board.
//!
//! # Default Board
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 10 | Board width in cells |
//! | `DEFAULT_HEIGHT` | 20 | Board height in cells |
//! | `DEFAULT_BLOCK_SIZE` | 20 | Pixel size of one cell |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, GameSpec, PieceKind, Shift};
//!
//! let spec = GameSpec::new(10, 20, 20);
//! assert_eq!(spec.pixel_width(), 200);
//! assert!(spec.contains(180, 380));
//! assert!(!spec.contains(200, 0));
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Shift::Left.delta(), -1);
//!
//! let cmd = Command::from_str("left").unwrap();
//! assert_eq!(cmd, Command::MoveHorizontal { shift: Shift::Left });
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board width in cells used when the host supplies no override
pub const DEFAULT_WIDTH: i32 = 10;

/// Board height in cells used when the host supplies no override
pub const DEFAULT_HEIGHT: i32 = 20;

/// Pixel size of a single cell used when the host supplies no override
pub const DEFAULT_BLOCK_SIZE: i32 = 20;

/// Number of blocks in every tetromino
pub const PIECE_BLOCKS: usize = 4;

/// A unit cell in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub x: i32,
    pub y: i32,
    pub is_pivot: bool,
}

impl Block {
    /// Create a non-pivot block
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            is_pivot: false,
        }
    }

    /// Create a pivot block
    pub const fn pivot(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            is_pivot: true,
        }
    }

    /// Return a copy moved by `(dx, dy)` pixels
    pub const fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            is_pivot: self.is_pivot,
        }
    }

    /// Same position, ignoring the pivot flag
    pub fn same_cell(&self, other: &Block) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// The seven tetromino piece kinds
///
/// - **I**: straight bar
/// - **O**: 2x2 square, the only kind without a rotation pivot
/// - **T**, **S**, **Z**, **J**, **L**: the remaining tetrominoes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in bag order before shuffling
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Horizontal movement direction.
///
/// Encoded on the wire as the integer `-1` (left) or `1` (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Shift {
    Left,
    Right,
}

impl Shift {
    /// Column delta in cell units
    pub const fn delta(self) -> i32 {
        match self {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }
}

/// Rejected shift value (anything other than -1 or 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidShift(pub i8);

impl fmt::Display for InvalidShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shift must be -1 or 1, got {}", self.0)
    }
}

impl std::error::Error for InvalidShift {}

impl TryFrom<i8> for Shift {
    type Error = InvalidShift;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Shift::Left),
            1 => Ok(Shift::Right),
            other => Err(InvalidShift(other)),
        }
    }
}

impl From<Shift> for i8 {
    fn from(value: Shift) -> Self {
        match value {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }
}

/// Immutable board configuration, fixed at `SET_INITIAL_STATE`.
///
/// Field names mirror the snapshot contract: `widthRatio`/`heightRatio` are
/// the board dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSpec {
    pub width_ratio: i32,
    pub height_ratio: i32,
    pub block_size: i32,
}

impl GameSpec {
    pub fn new(width: i32, height: i32, block_size: i32) -> Self {
        debug_assert!(width > 0, "board width must be positive");
        debug_assert!(height > 0, "board height must be positive");
        debug_assert!(block_size > 0, "block size must be positive");
        Self {
            width_ratio: width,
            height_ratio: height,
            block_size,
        }
    }

    /// Build a spec only if all values are positive and the pixel extent fits `i32`
    pub fn checked(width: i32, height: i32, block_size: i32) -> Option<Self> {
        if width <= 0 || height <= 0 || block_size <= 0 {
            return None;
        }
        width.checked_mul(block_size)?;
        height.checked_mul(block_size)?;
        Some(Self::new(width, height, block_size))
    }

    /// Board width in pixels
    pub fn pixel_width(&self) -> i32 {
        self.width_ratio * self.block_size
    }

    /// Board height in pixels
    pub fn pixel_height(&self) -> i32 {
        self.height_ratio * self.block_size
    }

    /// Check if a pixel position lies inside `[0, width) x [0, height)`
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.pixel_width() && y >= 0 && y < self.pixel_height()
    }

    /// Column (in cells) that holds the pivot of a freshly spawned piece
    pub fn spawn_column(&self) -> i32 {
        (self.width_ratio / 2 - 1).max(0)
    }

    /// Row index (in cells) of a pixel `y` coordinate
    pub fn row_of(&self, y: i32) -> i32 {
        y.div_euclid(self.block_size)
    }
}

impl Default for GameSpec {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_BLOCK_SIZE)
    }
}

/// Pause/loss flags and the elapsed-time counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub is_paused: bool,
    pub game_lost: bool,
    pub seconds_elapsed: u32,
}

impl GameStatus {
    /// Status established by `SET_INITIAL_STATE`: paused, not lost, zero time
    pub const fn initial() -> Self {
        Self {
            is_paused: true,
            game_lost: false,
            seconds_elapsed: 0,
        }
    }

    /// Gameplay commands (descend, move, rotate) are accepted
    pub const fn playable(&self) -> bool {
        !self.is_paused && !self.game_lost
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::initial()
    }
}

/// Commands accepted by the rules engine
///
/// Serialized as JSON objects tagged by `type`, using the action names the
/// engine has always used (`SET_INITIAL_STATE`, `MOVE_HORIZONTAL`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Establish the board and reset all pieces and status
    SetInitialState {
        width: i32,
        height: i32,
        #[serde(rename = "blockSize")]
        block_size: i32,
    },
    /// Resume play, spawning the first piece if none is live
    Play,
    /// Suspend gameplay commands
    Pause,
    /// Gravity step: fall one row or lock
    Descend,
    /// Shift the live piece one column
    MoveHorizontal { shift: Shift },
    /// Rotate the live piece 90° about its pivot
    Rotate,
    /// Advance the elapsed-seconds counter
    IncrementTime,
}

impl Command {
    /// Parse a shorthand command word (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Command, Shift};
    ///
    /// assert_eq!(Command::from_str("down"), Some(Command::Descend));
    /// assert_eq!(Command::from_str("Right"), Some(Command::MoveHorizontal { shift: Shift::Right }));
    /// assert_eq!(Command::from_str("tick"), Some(Command::IncrementTime));
    /// assert_eq!(Command::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "play" => Some(Command::Play),
            "pause" => Some(Command::Pause),
            "down" | "descend" => Some(Command::Descend),
            "left" => Some(Command::MoveHorizontal { shift: Shift::Left }),
            "right" => Some(Command::MoveHorizontal {
                shift: Shift::Right,
            }),
            "rotate" => Some(Command::Rotate),
            "tick" => Some(Command::IncrementTime),
            _ => None,
        }
    }

    /// Action name as used in the `type` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::SetInitialState { .. } => "SET_INITIAL_STATE",
            Command::Play => "PLAY",
            Command::Pause => "PAUSE",
            Command::Descend => "DESCEND",
            Command::MoveHorizontal { .. } => "MOVE_HORIZONTAL",
            Command::Rotate => "ROTATE",
            Command::IncrementTime => "INCREMENT_TIME",
        }
    }

    /// Commands guarded by `!isPaused && !gameLost`
    pub fn is_gameplay(&self) -> bool {
        matches!(
            self,
            Command::Descend | Command::MoveHorizontal { .. } | Command::Rotate
        )
    }
}
