//! Collision oracle - pure predicates over game state
//!
//! One code path answers every question of the form "would this piece,
//! offset or transformed, leave the board or land on a settled block?".
//! Floor, walls and the settled stack are all handled by the same test.

use crate::board::Board;
use crate::game_state::GameState;
use crate::piece::Piece;
use crate::types::{GameSpec, Shift};

/// `[dx, dy]` offset in cell units
pub type CellOffset = (i32, i32);

/// No offset
pub const STILL: CellOffset = (0, 0);
/// One row down
pub const BOTTOM: CellOffset = (0, 1);
/// One column left
pub const LEFT: CellOffset = (-1, 0);
/// One column right
pub const RIGHT: CellOffset = (1, 0);

/// Offset used to probe a horizontal move
pub fn side_offset(shift: Shift) -> CellOffset {
    match shift {
        Shift::Left => LEFT,
        Shift::Right => RIGHT,
    }
}

/// Check if `piece` shifted by `piece_offset` leaves the board or coincides
/// with a block of `board` shifted by `board_offset`
pub fn overlaps_shifted(
    spec: &GameSpec,
    board: &Board,
    piece: &Piece,
    piece_offset: CellOffset,
    board_offset: CellOffset,
) -> bool {
    let size = spec.block_size;
    let (pdx, pdy) = (piece_offset.0 * size, piece_offset.1 * size);
    let (bdx, bdy) = (board_offset.0 * size, board_offset.1 * size);

    piece.blocks().iter().any(|block| {
        let cell = block.shifted(pdx, pdy);
        !spec.contains(cell.x, cell.y)
            || board
                .blocks()
                .iter()
                .any(|dead| dead.x + bdx == cell.x && dead.y + bdy == cell.y)
    })
}

/// Check if `candidate` overlaps the settled blocks or lies out of bounds
///
/// An uninitialized state has no board, so every candidate collides.
pub fn would_overlap(state: &GameState, candidate: &Piece) -> bool {
    match state.spec() {
        Some(spec) => overlaps_shifted(spec, state.dead_pieces(), candidate, STILL, STILL),
        None => true,
    }
}

/// Build a predicate testing the live piece moved by `live_offset` against
/// the settled blocks moved by `dead_offset`
pub fn collision_detector(
    state: &GameState,
    live_offset: CellOffset,
    dead_offset: CellOffset,
) -> impl Fn() -> bool + '_ {
    move || match state.spec() {
        Some(spec) => overlaps_shifted(
            spec,
            state.dead_pieces(),
            state.live_piece(),
            live_offset,
            dead_offset,
        ),
        None => true,
    }
}

/// The live piece cannot fall another row
pub fn has_hit_bottom(state: &GameState) -> bool {
    collision_detector(state, BOTTOM, STILL)()
}

/// The live piece cannot move one column in `shift` direction
pub fn has_hit_side(state: &GameState, shift: Shift) -> bool {
    collision_detector(state, side_offset(shift), STILL)()
}
