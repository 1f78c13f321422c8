//! Dealt pieces and the three-piece tray.

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::shape::{Bounds, Shape};

pub const BLOCKS_PER_SET: usize = 3;

/// Index into the block palette.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct BlockColor(pub u8);

impl BlockColor {
    pub const PALETTE: [&'static str; 8] = [
        "#ff6b6b", "#4ecdc4", "#ffe66d", "#a29bfe", "#fd79a8", "#74b9ff", "#55efc4", "#fab1a0",
    ];

    pub fn hex(self) -> &'static str {
        Self::PALETTE[self.0 as usize % Self::PALETTE.len()]
    }
}

/// One dealt piece. `used` flips once, when the session places it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Block {
    pub shape: Shape,
    pub color: BlockColor,
    pub bounds: Bounds,
    pub used: bool,
}

impl Block {
    /// A degenerate shape request is dealt as `H2`.
    pub fn new(shape: Shape, color: BlockColor) -> Self {
        let shape = shape.playable();
        Self {
            shape,
            color,
            bounds: shape.bounds(),
            used: false,
        }
    }

    #[inline]
    pub fn cells(&self) -> &'static [Cell] {
        self.shape.cells()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.shape.name()
    }
}

/// Exactly three blocks dealt together.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BlockSet {
    blocks: [Block; BLOCKS_PER_SET],
}

impl BlockSet {
    pub fn new(blocks: [Block; BLOCKS_PER_SET]) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block; BLOCKS_PER_SET] {
        &self.blocks
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    pub fn shapes(&self) -> [Shape; BLOCKS_PER_SET] {
        self.blocks.map(|b| b.shape)
    }

    pub fn all_used(&self) -> bool {
        self.blocks.iter().all(|b| b.used)
    }

    /// Unused blocks with their tray index.
    pub fn remaining(&self) -> impl Iterator<Item = (usize, &Block)> {
        self.blocks.iter().enumerate().filter(|(_, b)| !b.used)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl std::ops::Index<usize> for BlockSet {
    type Output = Block;

    fn index(&self, index: usize) -> &Self::Output {
        &self.blocks[index]
    }
}

impl<'a> IntoIterator for &'a BlockSet {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
