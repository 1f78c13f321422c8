//! blast-search - block-set generation with a no-dead-end guarantee.
//!
//! Every search here works on copies of the caller's board; nothing in this
//! crate mutates a live board.

pub mod difficulty;
pub mod feasibility;
pub mod generator;
pub mod island;
pub mod puzzle;

pub use difficulty::{adaptive_mix, adaptive_pool, base_level, pool_mix, wave, Level, PoolMix, Wave};
pub use feasibility::{can_place_all_in_some_order, find_order, first_fit_order, Plan, SetCells};
pub use generator::{BlockGenerator, Deal, DealKind, GenerateError};
pub use island::{isolated_cells, would_create_island};
pub use puzzle::{can_clear_board_with_blocks, clearing_order, simulate_clear};

use blast_core::{BlockSet, BLOCKS_PER_SET};

/// Every ordering of three tray slots.
pub const PERMUTATIONS: [[usize; BLOCKS_PER_SET]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Cell offsets of each block in a dealt set.
pub fn set_cells(set: &BlockSet) -> SetCells {
    set.shapes().map(|shape| shape.cells())
}
