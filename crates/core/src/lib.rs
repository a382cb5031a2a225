//! Core game logic - the falling-block rules engine
//!
//! This crate contains the board, the pieces, the collision rules and the
//! transition engine. It has **no dependencies** on rendering, input devices,
//! timers or I/O:
//!
//! - **Pure**: [`GameState::reduce`] maps `(state, command)` to a new state and
//!   never mutates the prior one
//! - **Deterministic**: the piece bag is part of the state, so the same seed and
//!   commands produce the same game
//! - **Synchronous**: every command completes before the next is accepted
//!
//! # Module Structure
//!
//! - [`piece`]: tetromino spawn shapes, translation and pivot rotation
//! - [`board`]: settled blocks, per-row counts and row collapse
//! - [`collision`]: overlap/bounds predicates
//! - [`rng`]: 7-bag piece generation
//! - [`game_state`]: the command reducer with the lock/collapse/loss protocol
//! - [`snapshot`]: the serializable view read by renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{Command, Shift};
//!
//! let state = GameState::new(7)
//!     .apply(&Command::SetInitialState { width: 10, height: 20, block_size: 20 })
//!     .apply(&Command::Play);
//! assert!(!state.is_paused());
//! assert_eq!(state.live_piece().len(), 4);
//!
//! let moved = state.reduce(&Command::MoveHorizontal { shift: Shift::Left });
//! assert_eq!(moved.live_piece().blocks()[0].x + 20, state.live_piece().blocks()[0].x);
//! ```

pub mod board;
pub mod collision;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use collision::{collision_detector, has_hit_bottom, has_hit_side, would_overlap};
pub use game_state::GameState;
pub use piece::Piece;
pub use rng::{PieceBag, SimpleRng};
pub use snapshot::GameSnapshot;
