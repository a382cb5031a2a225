//! Game state module - the transition engine
//!
//! [`GameState`] owns the board, the live and queued pieces, the status flags
//! and the piece generator. [`GameState::reduce`] is a pure function from
//! `(state, command)` to the next state: it clones the prior state, applies
//! the command to the copy and returns it, leaving the caller's value intact.
//!
//! Commands whose preconditions do not hold are absorbed as no-ops.

use tracing::debug;

use crate::board::Board;
use crate::collision::{collision_detector, side_offset, would_overlap, BOTTOM, STILL};
use crate::piece::Piece;
use crate::rng::PieceBag;
use crate::snapshot::GameSnapshot;
use crate::types::{Command, GameSpec, GameStatus, Shift};

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    /// Seed the piece bag restarts from on every `SetInitialState`
    seed: u32,
    /// `None` until `SetInitialState`
    spec: Option<GameSpec>,
    status: GameStatus,
    live: Piece,
    queued: Piece,
    dead: Board,
    bag: PieceBag,
}

impl GameState {
    /// Create an uninitialized state whose piece bag uses `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            spec: None,
            status: GameStatus::initial(),
            live: Piece::empty(),
            queued: Piece::empty(),
            dead: Board::new(),
            bag: PieceBag::new(seed),
        }
    }

    /// Shorthand for `new(seed)` followed by `SetInitialState` for `spec`
    pub fn initialized(seed: u32, spec: GameSpec) -> Self {
        Self::new(seed).reduce(&Command::SetInitialState {
            width: spec.width_ratio,
            height: spec.height_ratio,
            block_size: spec.block_size,
        })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn spec(&self) -> Option<&GameSpec> {
        self.spec.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_initialized(&self) -> bool {
        self.spec.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.status.is_paused
    }

    pub fn game_lost(&self) -> bool {
        self.status.game_lost
    }

    pub fn seconds_elapsed(&self) -> u32 {
        self.status.seconds_elapsed
    }

    pub fn live_piece(&self) -> &Piece {
        &self.live
    }

    pub fn queued_piece(&self) -> &Piece {
        &self.queued
    }

    pub fn dead_pieces(&self) -> &Board {
        &self.dead
    }

    /// Copy of this state with the settled blocks replaced
    pub fn with_dead_pieces(&self, dead: Board) -> Self {
        Self {
            dead,
            ..self.clone()
        }
    }

    /// Copy of this state with the live piece replaced
    pub fn with_live_piece(&self, live: Piece) -> Self {
        Self {
            live,
            ..self.clone()
        }
    }

    /// Copy of this state with the queued piece replaced
    pub fn with_queued_piece(&self, queued: Piece) -> Self {
        Self {
            queued,
            ..self.clone()
        }
    }

    /// Produce the state that follows `command`
    pub fn reduce(&self, command: &Command) -> Self {
        match (*command, self.spec) {
            (
                Command::SetInitialState {
                    width,
                    height,
                    block_size,
                },
                _,
            ) => self.set_initial_state(GameSpec::new(width, height, block_size)),
            // Nothing to act on before a board exists.
            (_, None) => self.clone(),
            (Command::Play, Some(spec)) => self.play(&spec),
            (Command::Pause, Some(_)) => self.pause(),
            (Command::Descend, Some(spec)) => self.descend(&spec),
            (Command::MoveHorizontal { shift }, Some(spec)) => self.move_horizontal(&spec, shift),
            (Command::Rotate, Some(_)) => self.rotate(),
            (Command::IncrementTime, Some(_)) => self.increment_time(),
        }
    }

    /// By-value form of [`reduce`](Self::reduce) for drivers that own the state
    pub fn apply(self, command: &Command) -> Self {
        self.reduce(command)
    }

    /// Snapshot for the rendering collaborator, `None` before initialization
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out).then_some(out)
    }

    /// Fill `out` in place, reusing its allocations
    ///
    /// Returns false (leaving `out` untouched) before initialization.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) -> bool {
        let Some(spec) = self.spec else {
            return false;
        };

        out.game_spec = spec;
        out.is_paused = self.status.is_paused;
        out.game_lost = self.status.game_lost;
        out.seconds_elapsed = self.status.seconds_elapsed;
        out.live_piece.clear();
        out.live_piece.extend_from_slice(self.live.blocks());
        out.dead_pieces.clear();
        out.dead_pieces.extend_from_slice(self.dead.blocks());
        out.queued_piece.clear();
        out.queued_piece.extend_from_slice(self.queued.blocks());
        out.live_kind = self.live.kind();
        out.queued_kind = self.queued.kind();
        true
    }

    fn set_initial_state(&self, spec: GameSpec) -> Self {
        debug!(
            width = spec.width_ratio,
            height = spec.height_ratio,
            block_size = spec.block_size,
            "initial state"
        );
        Self {
            spec: Some(spec),
            ..Self::new(self.seed)
        }
    }

    fn play(&self, spec: &GameSpec) -> Self {
        if self.status.game_lost {
            return self.clone();
        }

        let mut next = self.clone();
        if next.live.is_empty() {
            next.live = Piece::spawn(next.bag.draw(), spec);
            next.queued = Piece::spawn(next.bag.draw(), spec);
            if would_overlap(&next, &next.live) {
                debug!("spawn blocked on first play");
                next.status.game_lost = true;
            }
        }
        next.status.is_paused = false;
        next
    }

    fn pause(&self) -> Self {
        let mut next = self.clone();
        next.status.is_paused = true;
        next
    }

    fn descend(&self, spec: &GameSpec) -> Self {
        if !self.status.playable() {
            return self.clone();
        }

        let is_hitting_bottom = collision_detector(self, BOTTOM, STILL);
        let mut next = self.clone();

        if !is_hitting_bottom() {
            next.live = self.live.translate(BOTTOM.0, BOTTOM.1, spec.block_size);
        } else {
            next.dead = self.dead.locked_with(&self.live);
            next.live = self.queued.clone();
            next.queued = Piece::spawn(next.bag.draw(), spec);
            debug!(
                kind = ?self.live.kind(),
                settled = next.dead.len(),
                "piece locked"
            );

            if would_overlap(&next, &next.live) {
                debug!(kind = ?next.live.kind(), "spawn blocked, game lost");
                next.status.game_lost = true;
            }
        }

        let (dead, cleared) = next.dead.collapsed(spec);
        if cleared > 0 {
            debug!(rows = cleared, "rows collapsed");
            next.dead = dead;
            // Blocks dropped by the collapse can land inside the live piece.
            if !next.status.game_lost && would_overlap(&next, &next.live) {
                debug!("collapse buried the live piece, game lost");
                next.status.game_lost = true;
            }
        }
        next
    }

    fn move_horizontal(&self, spec: &GameSpec, shift: Shift) -> Self {
        if !self.status.playable() {
            return self.clone();
        }

        let is_hitting_side = collision_detector(self, side_offset(shift), STILL);
        if is_hitting_side() {
            return self.clone();
        }

        self.with_live_piece(self.live.translate(shift.delta(), 0, spec.block_size))
    }

    fn rotate(&self) -> Self {
        if !self.status.playable() {
            return self.clone();
        }

        let rotated = self.live.rotate();
        if would_overlap(self, &rotated) {
            return self.clone();
        }
        self.with_live_piece(rotated)
    }

    fn increment_time(&self) -> Self {
        let mut next = self.clone();
        next.status.seconds_elapsed = next.status.seconds_elapsed.saturating_add(1);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Block, PieceKind};

    fn spec() -> GameSpec {
        GameSpec::new(10, 20, 20)
    }

    fn playing(seed: u32) -> GameState {
        GameState::initialized(seed, spec()).apply(&Command::Play)
    }

    #[test]
    fn test_new_is_uninitialized() {
        let state = GameState::new(1);
        assert!(!state.is_initialized());
        assert!(state.snapshot().is_none());
        assert_eq!(state.reduce(&Command::Play), state);
        assert_eq!(state.reduce(&Command::IncrementTime), state);
    }

    #[test]
    fn test_set_initial_state_resets_everything() {
        let state = playing(3).apply(&Command::IncrementTime);
        let reset = state.reduce(&Command::SetInitialState {
            width: 8,
            height: 16,
            block_size: 10,
        });

        assert_eq!(reset.spec(), Some(&GameSpec::new(8, 16, 10)));
        assert_eq!(reset.status(), GameStatus::initial());
        assert!(reset.live_piece().is_empty());
        assert!(reset.queued_piece().is_empty());
        assert!(reset.dead_pieces().is_empty());
    }

    #[test]
    fn test_set_initial_state_restarts_piece_sequence() {
        let first = playing(5);
        let again = first
            .reduce(&Command::SetInitialState {
                width: 10,
                height: 20,
                block_size: 20,
            })
            .apply(&Command::Play);
        assert_eq!(first, again);
    }

    #[test]
    fn test_play_spawns_live_and_queued() {
        let state = playing(1);
        assert!(!state.is_paused());
        assert_eq!(state.live_piece().len(), 4);
        assert_eq!(state.queued_piece().len(), 4);
    }

    #[test]
    fn test_second_play_keeps_pieces() {
        let state = playing(1).apply(&Command::Pause);
        let resumed = state.reduce(&Command::Play);
        assert!(!resumed.is_paused());
        assert_eq!(resumed.live_piece(), state.live_piece());
        assert_eq!(resumed.queued_piece(), state.queued_piece());
    }

    #[test]
    fn test_descend_moves_one_row() {
        let state = playing(1);
        let next = state.reduce(&Command::Descend);
        for (a, b) in state.live_piece().blocks().iter().zip(next.live_piece().blocks()) {
            assert_eq!(b.y, a.y + 20);
            assert_eq!(b.x, a.x);
        }
    }

    #[test]
    fn test_reduce_leaves_prior_state_untouched() {
        let state = playing(1);
        let copy = state.clone();
        let _ = state.reduce(&Command::Descend);
        let _ = state.reduce(&Command::MoveHorizontal { shift: Shift::Right });
        assert_eq!(state, copy);
    }

    #[test]
    fn test_paused_ignores_gameplay() {
        let state = playing(1).apply(&Command::Pause);
        assert_eq!(state.reduce(&Command::Descend), state);
        assert_eq!(state.reduce(&Command::Rotate), state);
        assert_eq!(
            state.reduce(&Command::MoveHorizontal { shift: Shift::Left }),
            state
        );
    }

    #[test]
    fn test_increment_time_any_state() {
        let state = GameState::initialized(1, spec());
        assert_eq!(state.reduce(&Command::IncrementTime).seconds_elapsed(), 1);
        let paused = playing(1).apply(&Command::Pause).apply(&Command::IncrementTime);
        assert_eq!(paused.seconds_elapsed(), 1);
    }

    #[test]
    fn test_increment_time_saturates() {
        let mut state = playing(1);
        state.status.seconds_elapsed = u32::MAX;
        let next = state.reduce(&Command::IncrementTime);
        assert_eq!(next.seconds_elapsed(), u32::MAX);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let spec = spec();
        let piece = Piece::spawn(PieceKind::I, &spec).translate(-3, 5, spec.block_size);
        let state = playing(1).with_live_piece(piece.clone());
        let next = state.reduce(&Command::MoveHorizontal { shift: Shift::Left });
        assert_eq!(next.live_piece(), &piece);
        let right = state.reduce(&Command::MoveHorizontal { shift: Shift::Right });
        assert_eq!(right.live_piece().blocks()[0].x, 20);
    }

    #[test]
    fn test_move_blocked_by_dead_block() {
        let spec = spec();
        let piece = Piece::spawn(PieceKind::T, &spec).translate(0, 5, spec.block_size);
        let state = playing(1)
            .with_live_piece(piece.clone())
            .with_dead_pieces(Board::from_blocks([Block::new(120, 100)]));
        let next = state.reduce(&Command::MoveHorizontal { shift: Shift::Right });
        assert_eq!(next.live_piece(), &piece);
    }

    #[test]
    fn test_rotation_rejected_at_top_edge() {
        let spec = spec();
        // I at spawn rotates upward out of the board
        let piece = Piece::spawn(PieceKind::I, &spec);
        let state = playing(1).with_live_piece(piece.clone());
        assert_eq!(state.reduce(&Command::Rotate).live_piece(), &piece);

        let lowered = state.with_live_piece(piece.translate(0, 2, spec.block_size));
        let rotated = lowered.reduce(&Command::Rotate);
        assert_ne!(rotated.live_piece(), lowered.live_piece());
        assert!(rotated.live_piece().blocks().iter().all(|b| b.x == 80));
    }

    #[test]
    fn test_lock_promotes_queue() {
        let spec = spec();
        let live = Piece::spawn(PieceKind::O, &spec).translate(0, 18, spec.block_size);
        let state = playing(1).with_live_piece(live.clone());
        let queued = state.queued_piece().clone();

        let next = state.reduce(&Command::Descend);
        assert_eq!(next.dead_pieces().len(), 4);
        assert_eq!(next.live_piece(), &queued);
        assert_eq!(next.queued_piece().len(), 4);
        assert!(!next.game_lost());
    }

    #[test]
    fn test_descend_clears_completed_row() {
        let spec = spec();
        // Bottom row full except columns 4 and 5, an O drops into the gap.
        let dead = Board::from_blocks((0..10).filter(|c| *c != 4 && *c != 5).map(|c| Block::new(c * 20, 380)));
        let live = Piece::spawn(PieceKind::O, &spec).translate(0, 18, spec.block_size);
        let state = playing(1).with_dead_pieces(dead).with_live_piece(live);

        let next = state.reduce(&Command::Descend);
        // Row 19 removed; the O's upper half dropped into it.
        assert_eq!(next.dead_pieces().len(), 2);
        assert!(next.dead_pieces().is_occupied(80, 380));
        assert!(next.dead_pieces().is_occupied(100, 380));
    }

    #[test]
    fn test_lost_game_rejects_play() {
        let spec = spec();
        let blocked = Board::from_blocks([Block::new(80, 0)]);
        let state = GameState::initialized(1, spec).with_dead_pieces(blocked).apply(&Command::Play);
        assert!(state.game_lost());
        assert_eq!(state.reduce(&Command::Play), state);
        assert_eq!(state.reduce(&Command::Descend), state);
        assert!(state.reduce(&Command::Pause).is_paused());
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let state = playing(1);
        let snap = state.snapshot().unwrap();
        assert_eq!(snap.game_spec, spec());
        assert_eq!(snap.live_piece, state.live_piece().blocks());
        assert_eq!(snap.queued_piece, state.queued_piece().blocks());
        assert_eq!(snap.live_kind, state.live_piece().kind());
        assert!(snap.playable());
    }
}
