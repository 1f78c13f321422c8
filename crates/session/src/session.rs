//! One game: the live board, the tray, score and combo.
//!
//! `Playing` moves to `GameOver` when a refill fails or no tray block fits
//! anywhere. Only `restart` leaves `GameOver`.

use blast_core::{BlockSet, Board, LineClear, BLOCKS_PER_SET};
use blast_engine::{
    score_placement, validate_placement, ComboTracker, GeneratorConfig, ScoreBreakdown, ScoreConfig,
};
use blast_search::{BlockGenerator, DealKind};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use crate::error::SessionError;
use crate::high_score::{HighScoreStore, MemoryHighScore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Everything one placement changed, for renderers to animate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaceOutcome {
    pub points: ScoreBreakdown,
    pub cleared: LineClear,
    /// Combo after this placement.
    pub combo: u32,
    pub perfect_clear: bool,
    /// Set when the tray was refilled, with the path that dealt it.
    pub dealt: Option<DealKind>,
    pub game_over: bool,
}

/// Read-only view for renderers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub board: Board,
    pub blocks: BlockSet,
    pub score: u64,
    pub high_score: u64,
    pub combo: u32,
    pub generation: u32,
    pub status: GameStatus,
}

pub struct Session<R: Rng = StdRng> {
    board: Board,
    blocks: BlockSet,
    generator: BlockGenerator<R>,
    score_config: ScoreConfig,
    score: u64,
    high_score: u64,
    combo: ComboTracker,
    status: GameStatus,
    store: Box<dyn HighScoreStore>,
}

impl Session<StdRng> {
    /// Default tuning, in-memory high score.
    pub fn seeded(seed: u64) -> Result<Self, SessionError> {
        Self::new(
            BlockGenerator::seeded(seed, GeneratorConfig::default()),
            ScoreConfig::default(),
            Box::new(MemoryHighScore::default()),
        )
    }
}

impl<R: Rng> Session<R> {
    /// Starts a game on an empty board and deals the first set.
    pub fn new(
        mut generator: BlockGenerator<R>,
        score_config: ScoreConfig,
        store: Box<dyn HighScoreStore>,
    ) -> Result<Self, SessionError> {
        let board = Board::new();
        generator.reset();
        let blocks = generator.generate_block_set(&board)?;
        let high_score = load_high_score(store.as_ref());
        Ok(Self {
            board,
            blocks,
            generator,
            score_config,
            score: 0,
            high_score,
            combo: ComboTracker::new(),
            status: GameStatus::Playing,
            store,
        })
    }

    /// Resumes a saved board and tray with score and combo at zero.
    /// Ends immediately if nothing in the tray fits.
    pub fn from_state(
        board: Board,
        blocks: BlockSet,
        generator: BlockGenerator<R>,
        score_config: ScoreConfig,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let high_score = load_high_score(store.as_ref());
        let mut session = Self {
            board,
            blocks,
            generator,
            score_config,
            score: 0,
            high_score,
            combo: ComboTracker::new(),
            status: GameStatus::Playing,
            store,
        };
        if !session.any_block_fits() {
            session.end_game();
        }
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn blocks(&self) -> &BlockSet {
        &self.blocks
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn combo(&self) -> u32 {
        self.combo.count
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn generation_count(&self) -> u32 {
        self.generator.generation_count()
    }

    pub fn score_config(&self) -> &ScoreConfig {
        &self.score_config
    }

    /// Per tray slot: unused and fits somewhere on the board.
    pub fn playable_blocks(&self) -> [bool; BLOCKS_PER_SET] {
        let mut out = [false; BLOCKS_PER_SET];
        for (i, block) in self.blocks.iter().enumerate() {
            out[i] = !block.used && self.board.can_place_anywhere(block.cells());
        }
        out
    }

    /// Lines that placing block `index` at `(x, y)` would clear, or `None`
    /// when the placement would be refused.
    pub fn preview(&self, index: usize, x: i8, y: i8) -> Option<LineClear> {
        if self.is_game_over() {
            return None;
        }
        let block = self.blocks.get(index).filter(|b| !b.used)?;
        self.board
            .can_place(block.cells(), x, y)
            .then(|| self.board.clearing_lines(block.cells(), x, y))
    }

    /// Places tray block `index` with its anchor at `(x, y)`.
    ///
    /// The placement is validated; a refused request leaves the session
    /// untouched. Afterwards the tray is refilled when empty and the game
    /// ends if nothing left in the tray fits.
    pub fn place_block(
        &mut self,
        index: usize,
        x: i8,
        y: i8,
    ) -> Result<PlaceOutcome, SessionError> {
        if self.is_game_over() {
            return Err(SessionError::GameOver);
        }
        let block = *self
            .blocks
            .get(index)
            .ok_or(SessionError::BlockIndex { index })?;
        if block.used {
            return Err(SessionError::BlockUsed { index });
        }
        validate_placement(&self.board, block.cells(), x, y)?;

        self.board.place(block.cells(), x, y);
        if let Some(slot) = self.blocks.get_mut(index) {
            slot.used = true;
        }

        let cleared = self.board.clear_lines();
        let combo = self.combo.register(cleared.total());
        let perfect_clear = self.board.is_empty();
        let points = score_placement(
            block.cells().len(),
            cleared.total(),
            combo,
            perfect_clear,
            &self.score_config,
        );
        self.score += points.total();
        self.record_high_score();

        let mut outcome = PlaceOutcome {
            points,
            cleared,
            combo,
            perfect_clear,
            dealt: None,
            game_over: false,
        };

        if self.blocks.all_used() {
            self.generator.update_score(self.score);
            match self.generator.generate(&self.board) {
                Ok(deal) => {
                    self.blocks = deal.set;
                    outcome.dealt = Some(deal.kind);
                }
                Err(_) => {
                    self.end_game();
                    outcome.game_over = true;
                    return Ok(outcome);
                }
            }
        }

        if !self.any_block_fits() {
            self.end_game();
            outcome.game_over = true;
        }
        Ok(outcome)
    }

    /// Fresh board, score and counters, and a new first set.
    ///
    /// The first set is dealt before anything else is reset. If that fails
    /// the old board and score stay and the game is over.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.generator.reset();
        let blocks = match self.generator.generate_block_set(&Board::new()) {
            Ok(blocks) => blocks,
            Err(e) => {
                self.end_game();
                return Err(e.into());
            }
        };
        self.board.reset();
        self.blocks = blocks;
        self.score = 0;
        self.combo.reset();
        self.high_score = load_high_score(self.store.as_ref()).max(self.high_score);
        self.status = GameStatus::Playing;
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board,
            blocks: self.blocks,
            score: self.score,
            high_score: self.high_score,
            combo: self.combo.count,
            generation: self.generator.generation_count(),
            status: self.status,
        }
    }

    fn any_block_fits(&self) -> bool {
        self.blocks
            .remaining()
            .any(|(_, block)| self.board.can_place_anywhere(block.cells()))
    }

    fn record_high_score(&mut self) {
        if self.score <= self.high_score {
            return;
        }
        self.high_score = self.score;
        if let Err(e) = self.store.save(self.high_score) {
            warn!("failed to save high score {}: {e}", self.high_score);
        }
    }

    fn end_game(&mut self) {
        self.status = GameStatus::GameOver;
        info!(
            "game over: score {} after {} sets",
            self.score,
            self.generator.generation_count()
        );
    }
}

fn load_high_score(store: &dyn HighScoreStore) -> u64 {
    store.load().unwrap_or_else(|e| {
        warn!("failed to load high score: {e}");
        0
    })
}
