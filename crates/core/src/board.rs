//! Board module - settled blocks and row collapse
//!
//! The board is a flat, unordered collection of settled blocks ("dead
//! pieces"). It grows when a live piece locks and shrinks when completed rows
//! collapse. Coordinates are pixels; rows are `y / block_size`, counted from
//! the top.

use std::collections::BTreeMap;

use crate::piece::Piece;
use crate::types::{Block, GameSpec};

/// Settled blocks, not grouped by the piece they came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    blocks: Vec<Block>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a list of settled blocks
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            blocks: blocks.into_iter().collect(),
        }
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

    /// Check if some settled block sits at pixel position `(x, y)`
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.blocks.iter().any(|b| b.x == x && b.y == y)
    }

    /// Return a board with every block of `piece` added
    ///
    /// The pivot flag only has meaning inside a piece, so locked blocks drop it.
    pub fn locked_with(&self, piece: &Piece) -> Self {
        let mut blocks = Vec::with_capacity(self.blocks.len() + piece.len());
        blocks.extend_from_slice(&self.blocks);
        blocks.extend(piece.blocks().iter().map(|b| Block::new(b.x, b.y)));
        Self { blocks }
    }

    /// Count settled blocks per row index
    pub fn flatten_to_grid_rows(&self, block_size: i32) -> BTreeMap<i32, usize> {
        let mut rows = BTreeMap::new();
        for block in &self.blocks {
            *rows.entry(block.y.div_euclid(block_size)).or_insert(0) += 1;
        }
        rows
    }

    /// Row indices where every column of the board is occupied, top to bottom
    pub fn full_rows(&self, spec: &GameSpec) -> Vec<i32> {
        self.flatten_to_grid_rows(spec.block_size)
            .into_iter()
            .filter(|&(_, count)| count >= spec.width_ratio as usize)
            .map(|(row, _)| row)
            .collect()
    }

    /// Remove completed rows and drop everything above them
    ///
    /// Each surviving block falls one row per removed row beneath it, which is
    /// the same as collapsing full rows one by one from the bottom up.
    /// Returns the new board and the number of rows removed.
    pub fn collapsed(&self, spec: &GameSpec) -> (Self, usize) {
        let full = self.full_rows(spec);
        if full.is_empty() {
            return (self.clone(), 0);
        }

        let size = spec.block_size;
        let blocks = self
            .blocks
            .iter()
            .filter_map(|b| {
                let row = spec.row_of(b.y);
                if full.binary_search(&row).is_ok() {
                    return None;
                }
                let below = full.iter().filter(|&&r| r > row).count() as i32;
                Some(b.shifted(0, below * size))
            })
            .collect();

        (Self { blocks }, full.len())
    }
}
