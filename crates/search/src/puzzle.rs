//! Puzzle phase: does a triple wipe a near-empty board?
//!
//! Each block goes where it removes the most cells right away; ties keep the
//! earliest anchor in row-major order. Greedy, so a triple that only clears
//! through a patient first move is missed.

use blast_core::{Board, Cell, BLOCKS_PER_SET};
use blast_engine::{apply_placement_mut, cells_cleared_by, placements, Placement};

use crate::feasibility::SetCells;
use crate::PERMUTATIONS;

/// Anchor with the largest immediate clear, or `None` when the block fits nowhere.
pub fn greedy_anchor(board: &Board, cells: &[Cell]) -> Option<Placement> {
    let mut best = None;
    let mut best_removed = -1i64;
    for at in placements(board, cells) {
        let removed = i64::from(cells_cleared_by(board, cells, at));
        if removed > best_removed {
            best_removed = removed;
            best = Some(at);
        }
    }
    best
}

/// Plays `order` greedily on a copy and reports whether the board ends empty.
pub fn simulate_clear(board: &Board, cells: &SetCells, order: &[usize; BLOCKS_PER_SET]) -> bool {
    let mut sim = *board;
    for &idx in order {
        let Some(at) = greedy_anchor(&sim, cells[idx]) else {
            return false;
        };
        apply_placement_mut(&mut sim, cells[idx], at);
    }
    sim.is_empty()
}

/// First permutation whose greedy play empties the board.
pub fn clearing_order(board: &Board, cells: &SetCells) -> Option<[usize; BLOCKS_PER_SET]> {
    PERMUTATIONS
        .iter()
        .copied()
        .find(|order| simulate_clear(board, cells, order))
}

pub fn can_clear_board_with_blocks(board: &Board, cells: &SetCells) -> bool {
    clearing_order(board, cells).is_some()
}
