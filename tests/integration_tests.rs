//! Integration tests for the command reducer

use blockfall::core::{has_hit_bottom, Board, GameState, Piece};
use blockfall::types::{Block, Command, GameSpec, PieceKind, Shift};

fn spec() -> GameSpec {
    GameSpec::new(10, 20, 20)
}

fn started(seed: u32) -> GameState {
    GameState::new(seed)
        .apply(&Command::SetInitialState {
            width: 10,
            height: 20,
            block_size: 20,
        })
        .apply(&Command::Play)
}

#[test]
fn test_game_lifecycle() {
    let state = GameState::new(12345).apply(&Command::SetInitialState {
        width: 10,
        height: 20,
        block_size: 20,
    });
    assert!(state.is_paused());
    assert!(!state.game_lost());
    assert_eq!(state.seconds_elapsed(), 0);
    assert!(state.live_piece().is_empty());

    let state = state.apply(&Command::Play);
    assert!(!state.is_paused());
    assert_eq!(state.live_piece().len(), 4);
    assert_eq!(state.queued_piece().len(), 4);
}

#[test]
fn test_lock_and_respawn() {
    let mut state = started(12345);
    if let Some(pivot) = state.live_piece().pivot() {
        assert_eq!(pivot, &Block::pivot(80, 0));
    }

    let mut descents = 0;
    while !has_hit_bottom(&state) {
        state = state.apply(&Command::Descend);
        descents += 1;
        assert!(descents < 20, "piece never reached the floor");
        assert!(state.dead_pieces().is_empty());
    }

    let locked = state.live_piece().clone();
    let queued = state.queued_piece().clone();
    let next = state.reduce(&Command::Descend);

    assert_eq!(next.dead_pieces().len(), 4);
    for b in locked.blocks() {
        assert!(next.dead_pieces().is_occupied(b.x, b.y));
    }
    assert_eq!(next.live_piece(), &queued);
    assert_eq!(next.queued_piece().len(), 4);
    assert!(!next.game_lost());
}

#[test]
fn test_loss_when_spawn_region_occupied() {
    let spec = spec();
    let live = Piece::spawn(PieceKind::T, &spec);
    // Rows 2..20 filled except the last column, so nothing collapses.
    let dead = Board::from_blocks(
        (2..20).flat_map(|r| (0..9).map(move |c| Block::new(c * 20, r * 20))),
    );
    let state = started(7).with_live_piece(live).with_dead_pieces(dead);
    assert!(has_hit_bottom(&state));

    let lost = state.reduce(&Command::Descend);
    assert!(lost.game_lost());
    assert_eq!(lost.dead_pieces().len(), 18 * 9 + 4);

    assert_eq!(lost.reduce(&Command::Descend), lost);
    assert_eq!(lost.reduce(&Command::Rotate), lost);
    assert_eq!(
        lost.reduce(&Command::MoveHorizontal { shift: Shift::Left }),
        lost
    );
    // Still accepted, but nothing moves afterwards
    let paused = lost.reduce(&Command::Pause);
    assert!(paused.is_paused());
    let ticked = lost.reduce(&Command::IncrementTime);
    assert_eq!(ticked.seconds_elapsed(), lost.seconds_elapsed() + 1);
    assert_eq!(ticked.live_piece(), lost.live_piece());
}

#[test]
fn test_collapse_into_promoted_piece_loses() {
    let spec = spec();
    // Row 19 has a four-cell gap at columns 3..=6 that the I piece fills.
    let mut blocks: Vec<Block> = (0..10)
        .filter(|c| !(3..=6).contains(c))
        .map(|c| Block::new(c * 20, 19 * 20))
        .collect();
    blocks.push(Block::new(60, 0));
    let live = Piece::spawn(PieceKind::I, &spec).translate(0, 19, spec.block_size);
    let queued = Piece::spawn(PieceKind::S, &spec);
    let state = started(5)
        .with_dead_pieces(Board::from_blocks(blocks))
        .with_live_piece(live)
        .with_queued_piece(queued.clone());

    let next = state.reduce(&Command::Descend);
    // The block at (60, 0) drops into the S piece's lower-left cell.
    assert!(next.game_lost());
    assert_eq!(next.live_piece(), &queued);
    assert_eq!(next.dead_pieces().blocks(), &[Block::new(60, 20)]);
}

#[test]
fn test_move_while_paused_is_noop() {
    let state = started(1).apply(&Command::Pause);
    for shift in [Shift::Left, Shift::Right] {
        assert_eq!(state.reduce(&Command::MoveHorizontal { shift }), state);
    }
    assert_eq!(
        state.snapshot(),
        state
            .reduce(&Command::MoveHorizontal { shift: Shift::Left })
            .snapshot()
    );
}

#[test]
fn test_move_to_wall_and_stop() {
    let mut state = started(1);
    for _ in 0..12 {
        state = state.apply(&Command::MoveHorizontal { shift: Shift::Left });
    }
    let min_x = state.live_piece().blocks().iter().map(|b| b.x).min().unwrap();
    assert_eq!(min_x, 0);

    for _ in 0..12 {
        state = state.apply(&Command::MoveHorizontal { shift: Shift::Right });
    }
    let max_x = state.live_piece().blocks().iter().map(|b| b.x).max().unwrap();
    assert_eq!(max_x, 180);
}

#[test]
fn test_line_clear_after_lock() {
    let spec = spec();
    // Bottom row missing columns 3..=6, an I fills it.
    let dead = Board::from_blocks(
        (0..10)
            .filter(|c| !(3..=6).contains(c))
            .map(|c| Block::new(c * 20, 380)),
    );
    let live = Piece::spawn(PieceKind::I, &spec).translate(0, 19, spec.block_size);
    let state = started(1).with_dead_pieces(dead).with_live_piece(live);

    let next = state.reduce(&Command::Descend);
    assert!(next.dead_pieces().is_empty());
    assert!(!next.game_lost());
}

#[test]
fn test_play_until_loss_terminates() {
    let mut state = started(99);
    let mut steps = 0;
    while !state.game_lost() {
        state = state.apply(&Command::Descend);
        steps += 1;
        assert!(steps < 10_000, "stack never reached the top");
    }
    // Locked pieces pile up in the spawn columns
    assert!(state.dead_pieces().len() >= 4);
    assert_eq!(state.reduce(&Command::Descend), state);
}

#[test]
fn test_same_seed_same_game() {
    let commands = [
        Command::Descend,
        Command::MoveHorizontal { shift: Shift::Left },
        Command::Rotate,
        Command::Descend,
        Command::IncrementTime,
    ];
    let run = |seed| {
        let mut state = started(seed);
        for _ in 0..40 {
            for c in &commands {
                state = state.apply(c);
            }
        }
        state
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn test_increment_time_counts() {
    let mut state = started(1);
    for _ in 0..90 {
        state = state.apply(&Command::IncrementTime);
    }
    assert_eq!(state.seconds_elapsed(), 90);
}
