//! Block generator - deals three-block sets that can always be placed.
//!
//! A deal first tries the puzzle phase on a nearly empty board, then falls
//! back to adaptive random sets, each checked for a full placement order.

use blast_core::{Block, BlockColor, BlockSet, Board, Shape, BLOCKS_PER_SET};
use blast_engine::GeneratorConfig;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use crate::difficulty::adaptive_pool;
use crate::feasibility::can_place_all_in_some_order;
use crate::island::would_create_island;
use crate::puzzle::can_clear_board_with_blocks;
use crate::set_cells;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("no placeable block set after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Which path produced a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DealKind {
    /// A triple that wipes the board when played greedily.
    Puzzle,
    /// Adaptive random set, accepted on attempt `attempts`.
    Adaptive { attempts: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deal {
    pub set: BlockSet,
    pub kind: DealKind,
}

/// Deals block sets for one game.
///
/// Reads board snapshots only. Score and the generation counter are pushed
/// in by the session.
pub struct BlockGenerator<R: Rng = StdRng> {
    rng: R,
    config: GeneratorConfig,
    score: u64,
    generation_count: u32,
}

impl BlockGenerator<StdRng> {
    /// Seeded from the operating system.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_rng(StdRng::from_os_rng(), config)
    }

    pub fn seeded(seed: u64, config: GeneratorConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> BlockGenerator<R> {
    pub fn with_rng(rng: R, config: GeneratorConfig) -> Self {
        Self {
            rng,
            config,
            score: 0,
            generation_count: 0,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn update_score(&mut self, score: u64) {
        self.score = score;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn generation_count(&self) -> u32 {
        self.generation_count
    }

    /// Back to the start-of-game counters. The random stream continues.
    pub fn reset(&mut self) {
        self.score = 0;
        self.generation_count = 0;
    }

    /// Uniform draw from the adaptive pool for `board`.
    pub fn pick_random_shape(&mut self, board: &Board) -> Shape {
        let pool = adaptive_pool(
            board,
            self.score,
            self.generation_count,
            &self.config,
            &mut self.rng,
        );
        let shapes = pool.shapes();
        shapes[self.rng.random_range(0..shapes.len())]
    }

    /// Fresh unused block with a random palette colour.
    pub fn create_block(&mut self, shape: Shape) -> Block {
        if shape.is_degenerate() {
            warn!("{} requested, dealing {} instead", shape.name(), shape.playable().name());
        }
        let color = BlockColor(self.rng.random_range(0..BlockColor::PALETTE.len()) as u8);
        Block::new(shape, color)
    }

    fn create_set(&mut self, shapes: [Shape; BLOCKS_PER_SET]) -> BlockSet {
        BlockSet::new(shapes.map(|shape| self.create_block(shape)))
    }

    fn random_set(&mut self, board: &Board) -> BlockSet {
        let shapes = [(); BLOCKS_PER_SET].map(|_| self.pick_random_shape(board));
        self.create_set(shapes)
    }

    fn random_playable(&mut self) -> Shape {
        Shape::PLAYABLE[self.rng.random_range(0..Shape::PLAYABLE.len())]
    }

    /// Samples triples from the whole playable catalog and returns the first
    /// that wipes `board`. `None` when the board is over the threshold or no
    /// sample works.
    pub fn try_generate_puzzle_set(&mut self, board: &Board) -> Option<BlockSet> {
        if board.count_occupied() > self.config.perfect_threshold {
            return None;
        }
        for _ in 0..self.config.puzzle_samples {
            let shapes = [(); BLOCKS_PER_SET].map(|_| self.random_playable());
            if can_clear_board_with_blocks(board, &shapes.map(Shape::cells)) {
                return Some(self.create_set(shapes));
            }
        }
        None
    }

    /// Puzzle search over caller-chosen candidates instead of random samples.
    pub fn puzzle_set_from<I>(&mut self, board: &Board, candidates: I) -> Option<BlockSet>
    where
        I: IntoIterator<Item = [Shape; BLOCKS_PER_SET]>,
    {
        let shapes = candidates
            .into_iter()
            .map(|shapes| shapes.map(Shape::playable))
            .find(|shapes| can_clear_board_with_blocks(board, &shapes.map(Shape::cells)))?;
        Some(self.create_set(shapes))
    }

    /// Deals the next set for `board`, or reports that none could be found
    /// within the attempt budget.
    pub fn generate(&mut self, board: &Board) -> Result<Deal, GenerateError> {
        self.generation_count = self.generation_count.wrapping_add(1);

        let occupied = board.count_occupied();
        if occupied > 0 && occupied <= self.config.perfect_threshold {
            if let Some(set) = self.try_generate_puzzle_set(board) {
                info!("puzzle set dealt: {:?}", set.shapes().map(Shape::name));
                return Ok(Deal {
                    set,
                    kind: DealKind::Puzzle,
                });
            }
        }

        for attempt in 1..=self.config.max_attempts {
            let set = self.random_set(board);
            let cells = set_cells(&set);
            if !can_place_all_in_some_order(board, &cells, self.config.search_mode) {
                continue;
            }
            if self.config.island_gate && would_create_island(board, &cells) {
                continue;
            }
            debug!("set accepted after {attempt} attempt(s)");
            return Ok(Deal {
                set,
                kind: DealKind::Adaptive { attempts: attempt },
            });
        }

        warn!(
            "no placeable set after {} attempts ({} cells occupied)",
            self.config.max_attempts, occupied
        );
        Err(GenerateError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    pub fn generate_block_set(&mut self, board: &Board) -> Result<BlockSet, GenerateError> {
        self.generate(board).map(|deal| deal.set)
    }
}
