use blast_core::{Board, Cell, LineClear};

use crate::placement::Placement;

/// Place and clear on a copy; returns the resulting board and what cleared.
pub fn apply_placement(board: &Board, cells: &[Cell], at: Placement) -> (Board, LineClear) {
    let mut next = *board;
    let lines = apply_placement_mut(&mut next, cells, at);
    (next, lines)
}

/// Place and clear in place. The caller has checked `can_place`.
#[inline]
pub fn apply_placement_mut(board: &mut Board, cells: &[Cell], at: Placement) -> LineClear {
    board.place(cells, at.x, at.y);
    board.clear_lines()
}

/// Cells removed by line clears if `cells` were placed at `at`.
pub fn cells_cleared_by(board: &Board, cells: &[Cell], at: Placement) -> u32 {
    let mut next = *board;
    next.place(cells, at.x, at.y);
    let before = next.count_occupied();
    next.clear_lines();
    before - next.count_occupied()
}
