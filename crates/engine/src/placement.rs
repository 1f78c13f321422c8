//! Anchor enumeration. Valid anchors for a cell set are collected into a
//! `u64` mask with the board's bit layout and walked lowest bit first, which
//! is row-major order.

use blast_core::{Board, Cell};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Placement {
    pub x: i8,
    pub y: i8,
}

impl Placement {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    fn from_bit(bit: u32) -> Self {
        let size = Board::SIZE as u32;
        Self::new((bit % size) as i8, (bit / size) as i8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("piece at ({x}, {y}) leaves the board")]
    OutOfBounds { x: i8, y: i8 },
    #[error("piece at ({x}, {y}) overlaps an occupied cell")]
    Overlap { x: i8, y: i8 },
}

/// Bit `y * 8 + x` is set when `cells` fits with its anchor at `(x, y)`.
pub fn anchor_mask(board: &Board, cells: &[Cell]) -> u64 {
    let size = Board::SIZE as i8;
    let mut mask = 0u64;
    for y in 0..size {
        for x in 0..size {
            if board.can_place(cells, x, y) {
                mask |= 1u64 << (y as usize * Board::SIZE + x as usize);
            }
        }
    }
    mask
}

/// Remaining anchors of an anchor mask, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchors(u64);

impl Anchors {
    pub fn mask(self) -> u64 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Iterator for Anchors {
    type Item = Placement;

    #[inline]
    fn next(&mut self) -> Option<Placement> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0 - 1;
        Some(Placement::from_bit(bit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Anchors {}

/// Every anchor where `cells` fits, row-major (y outer, x inner).
pub fn placements(board: &Board, cells: &[Cell]) -> Anchors {
    Anchors(anchor_mask(board, cells))
}

/// First anchor in row-major order where `cells` fits.
pub fn first_fit(board: &Board, cells: &[Cell]) -> Option<Placement> {
    let size = Board::SIZE as i8;
    (0..size)
        .flat_map(|y| (0..size).map(move |x| Placement::new(x, y)))
        .find(|p| board.can_place(cells, p.x, p.y))
}

/// Checks a placement and reports why it is refused.
pub fn validate_placement(
    board: &Board,
    cells: &[Cell],
    x: i8,
    y: i8,
) -> Result<(), PlacementError> {
    match Board::footprint(cells, x, y) {
        None => Err(PlacementError::OutOfBounds { x, y }),
        Some(mask) if board.bits() & mask != 0 => Err(PlacementError::Overlap { x, y }),
        Some(_) => Ok(()),
    }
}
