//! Pieces module - tetromino geometry and pure transforms
//!
//! A [`Piece`] is up to four [`Block`]s in pixel coordinates plus an explicit
//! pivot index resolved once at construction. Transforms never edit a piece
//! in place; they return a new one.

use arrayvec::ArrayVec;

use crate::types::{Block, GameSpec, PieceKind, PIECE_BLOCKS};

/// Block storage for a single piece
pub type PieceBlocks = ArrayVec<Block, PIECE_BLOCKS>;

/// Cell offset of one block relative to the spawn pivot cell, plus pivot flag
pub type SpawnCell = (i32, i32, bool);

/// Fixed 90° rotation matrix applied to offsets from the pivot
const ROTATION: [[i32; 2]; 2] = [[0, 1], [-1, 0]];

/// Spawn shape for a piece kind, relative to `(spawn_column, 0)`
///
/// Every shape occupies rows 0 and 1 only and includes the cell `(0, 0)`,
/// so a freshly spawned piece always overlaps an earlier piece that locked
/// in place at spawn.
pub fn spawn_cells(kind: PieceKind) -> [SpawnCell; 4] {
    match kind {
        PieceKind::I => [(-1, 0, false), (0, 0, true), (1, 0, false), (2, 0, false)],
        // No rotation centre: the square is rotation-invariant.
        PieceKind::O => [(0, 0, false), (1, 0, false), (0, 1, false), (1, 1, false)],
        PieceKind::T => [(-1, 0, false), (0, 0, true), (1, 0, false), (0, 1, false)],
        PieceKind::S => [(0, 0, true), (1, 0, false), (-1, 1, false), (0, 1, false)],
        PieceKind::Z => [(-1, 0, false), (0, 0, true), (0, 1, false), (1, 1, false)],
        PieceKind::J => [(-1, 0, false), (0, 0, true), (1, 0, false), (1, 1, false)],
        PieceKind::L => [(-1, 0, false), (0, 0, true), (1, 0, false), (-1, 1, false)],
    }
}

/// An ordered group of blocks moved and rotated together
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Piece {
    kind: Option<PieceKind>,
    blocks: PieceBlocks,
    /// Index into `blocks` of the rotation pivot
    pivot: Option<usize>,
}

impl Piece {
    /// The empty piece (no live piece before the first spawn)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a piece from blocks, resolving the pivot index once
    ///
    /// Panics if more than four blocks are supplied.
    pub fn from_blocks(kind: Option<PieceKind>, blocks: impl IntoIterator<Item = Block>) -> Self {
        let blocks: PieceBlocks = blocks.into_iter().collect();
        debug_assert!(
            blocks.is_empty() || blocks.len() == PIECE_BLOCKS,
            "a piece has exactly {} blocks, got {}",
            PIECE_BLOCKS,
            blocks.len()
        );
        debug_assert!(
            blocks.iter().filter(|b| b.is_pivot).count() <= 1,
            "a piece has at most one pivot"
        );
        let pivot = blocks.iter().position(|b| b.is_pivot);
        Self {
            kind,
            blocks,
            pivot,
        }
    }

    /// Create a piece of `kind` at the spawn position for `spec`
    pub fn spawn(kind: PieceKind, spec: &GameSpec) -> Self {
        let size = spec.block_size;
        let column = spec.spawn_column();
        let blocks = spawn_cells(kind).into_iter().map(|(dx, dy, is_pivot)| Block {
            x: (column + dx) * size,
            y: dy * size,
            is_pivot,
        });
        Self::from_blocks(Some(kind), blocks)
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.kind
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The pivot block, if this piece has a rotation centre
    pub fn pivot(&self) -> Option<&Block> {
        self.pivot.map(|idx| &self.blocks[idx])
    }

    /// Return a copy shifted by `(dx, dy)` cells
    pub fn translate(&self, dx: i32, dy: i32, block_size: i32) -> Self {
        Self {
            kind: self.kind,
            blocks: self
                .blocks
                .iter()
                .map(|b| b.shifted(dx * block_size, dy * block_size))
                .collect(),
            pivot: self.pivot,
        }
    }

    /// Return a copy rotated 90° about the pivot
    ///
    /// Pieces without a pivot are returned unchanged.
    pub fn rotate(&self) -> Self {
        let Some(pivot) = self.pivot().copied() else {
            return self.clone();
        };

        let blocks = self
            .blocks
            .iter()
            .map(|b| {
                if b.is_pivot {
                    return *b;
                }
                let dx = b.x - pivot.x;
                let dy = b.y - pivot.y;
                Block {
                    x: pivot.x + ROTATION[0][0] * dx + ROTATION[0][1] * dy,
                    y: pivot.y + ROTATION[1][0] * dx + ROTATION[1][1] * dy,
                    is_pivot: false,
                }
            })
            .collect();

        Self {
            kind: self.kind,
            blocks,
            pivot: self.pivot,
        }
    }
}
