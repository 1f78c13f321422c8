//! Island detection: empty cells with no empty orthogonal neighbour.
//!
//! Advisory by default. The generator only rejects on it when
//! `GeneratorConfig::island_gate` is set.

use blast_core::Board;
use blast_engine::{apply_placement_mut, first_fit};

use crate::feasibility::SetCells;

const COL_0: u64 = 0x0101_0101_0101_0101;
const COL_7: u64 = COL_0 << 7;

/// Mask of empty cells whose in-bounds neighbours are all occupied.
/// Off-board neighbours count as occupied.
pub fn isolated_cells(board: &Board) -> u64 {
    let empty = !board.bits();
    let neighbour_empty = ((empty & !COL_7) << 1)
        | ((empty & !COL_0) >> 1)
        | (empty << Board::SIZE)
        | (empty >> Board::SIZE);
    empty & !neighbour_empty
}

/// Places the set in tray order, each block at its first fit with clears in
/// between, and reports whether the result holds an isolated empty cell.
/// Blocks that fit nowhere are skipped.
pub fn would_create_island(board: &Board, cells: &SetCells) -> bool {
    let mut sim = *board;
    for &block in cells {
        if let Some(at) = first_fit(&sim, block) {
            apply_placement_mut(&mut sim, block, at);
        }
    }
    isolated_cells(&sim) != 0
}
