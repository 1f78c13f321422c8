//! Blast core crate - board bitboard, shape catalog and dealt blocks.

mod block;
mod board;
mod shape;

pub use block::{Block, BlockColor, BlockSet, BLOCKS_PER_SET};
pub use board::{Board, Cell, LineClear};
pub use shape::{bounds, shape_cells, Bounds, Pool, Shape};
