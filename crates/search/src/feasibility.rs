//! No-dead-end check - can a dealt set be placed in some order?
//!
//! First-fit mode commits to the first row-major fit at each step, so a set
//! that only works through a later anchor is rejected. Exhaustive mode
//! backtracks over every anchor and every order, caching dead states.

use blast_core::{Board, Cell, BLOCKS_PER_SET};
use blast_engine::{
    apply_placement, apply_placement_mut, first_fit, placements, Placement, SearchMode,
};
use rustc_hash::FxHashSet;

use crate::PERMUTATIONS;

/// Cell sets of one dealt triple, indexed like the tray.
pub type SetCells = [&'static [Cell]; BLOCKS_PER_SET];

/// Tray index and anchor for each step, in placement order.
pub type Plan = [(usize, Placement); BLOCKS_PER_SET];

pub fn can_place_all_in_some_order(board: &Board, cells: &SetCells, mode: SearchMode) -> bool {
    find_order(board, cells, mode).is_some()
}

/// A placement sequence that uses all three blocks, if the search finds one.
pub fn find_order(board: &Board, cells: &SetCells, mode: SearchMode) -> Option<Plan> {
    match mode {
        SearchMode::FirstFit => PERMUTATIONS
            .iter()
            .find_map(|order| first_fit_order(board, cells, order)),
        SearchMode::Exhaustive => {
            let mut plan = [(0, Placement::default()); BLOCKS_PER_SET];
            let mut dead = FxHashSet::default();
            let all = (1u8 << BLOCKS_PER_SET) - 1;
            exhaustive(board, cells, all, 0, &mut plan, &mut dead).then_some(plan)
        }
    }
}

/// Places blocks in `order`, each at its first fit, clearing lines between steps.
pub fn first_fit_order(
    board: &Board,
    cells: &SetCells,
    order: &[usize; BLOCKS_PER_SET],
) -> Option<Plan> {
    let mut sim = *board;
    let mut plan = [(0, Placement::default()); BLOCKS_PER_SET];
    for (step, &idx) in order.iter().enumerate() {
        let at = first_fit(&sim, cells[idx])?;
        apply_placement_mut(&mut sim, cells[idx], at);
        plan[step] = (idx, at);
    }
    Some(plan)
}

fn exhaustive(
    board: &Board,
    cells: &SetCells,
    remaining: u8,
    step: usize,
    plan: &mut Plan,
    dead: &mut FxHashSet<(u64, u8)>,
) -> bool {
    if remaining == 0 {
        return true;
    }
    if dead.contains(&(board.bits(), remaining)) {
        return false;
    }

    for idx in 0..BLOCKS_PER_SET {
        if remaining & (1 << idx) == 0 {
            continue;
        }
        for at in placements(board, cells[idx]) {
            let (next, _) = apply_placement(board, cells[idx], at);
            plan[step] = (idx, at);
            if exhaustive(&next, cells, remaining & !(1 << idx), step + 1, plan, dead) {
                return true;
            }
        }
    }

    dead.insert((board.bits(), remaining));
    false
}
