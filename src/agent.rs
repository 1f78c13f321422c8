//! Greedy autoplay: take the placement that clears the most cells.

use blast_engine::{cells_cleared_by, placements, GeneratorConfig, Placement, ScoreConfig};
use blast_search::{BlockGenerator, DealKind};
use blast_session::{MemoryHighScore, Session, SessionError};
use log::debug;
use rand::Rng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub index: usize,
    pub at: Placement,
}

/// Best move for the current tray, or `None` when nothing fits.
/// Ties keep tray order, then row-major order, so a board with no clears
/// available gets the first fit of the first playable block.
pub fn choose_move<R: Rng>(session: &Session<R>) -> Option<Move> {
    let board = session.board();
    let mut best: Option<(u32, Move)> = None;
    for (index, block) in session.blocks().remaining() {
        for at in placements(board, block.cells()) {
            let cleared = cells_cleared_by(board, block.cells(), at);
            let better = match best {
                Some((top, _)) => cleared > top,
                None => true,
            };
            if better {
                best = Some((cleared, Move { index, at }));
            }
        }
    }
    best.map(|(_, mv)| mv)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub seed: u64,
    pub score: u64,
    pub placements: u32,
    pub lines: u32,
    pub sets_dealt: u32,
    pub puzzle_sets: u32,
    pub perfect_clears: u32,
    /// False when the move cap stopped the game first.
    pub finished: bool,
}

/// Plays one seeded game until it ends or `max_moves` placements are made.
pub fn play_game(
    seed: u64,
    config: &GeneratorConfig,
    max_moves: u32,
) -> Result<GameReport, SessionError> {
    let mut session = Session::new(
        BlockGenerator::seeded(seed, config.clone()),
        ScoreConfig::default(),
        Box::new(MemoryHighScore::default()),
    )?;
    let mut report = GameReport {
        seed,
        sets_dealt: 1,
        ..GameReport::default()
    };

    while report.placements < max_moves && !session.is_game_over() {
        let Some(mv) = choose_move(&session) else {
            break;
        };
        let outcome = session.place_block(mv.index, mv.at.x, mv.at.y)?;
        report.placements += 1;
        report.lines += outcome.cleared.total() as u32;
        if outcome.perfect_clear {
            report.perfect_clears += 1;
        }
        match outcome.dealt {
            Some(DealKind::Puzzle) => {
                report.sets_dealt += 1;
                report.puzzle_sets += 1;
            }
            Some(DealKind::Adaptive { .. }) => report.sets_dealt += 1,
            None => {}
        }
    }

    report.score = session.score();
    report.finished = session.is_game_over();
    debug!(
        "seed {seed}: score {} in {} moves, {} sets",
        report.score, report.placements, report.sets_dealt
    );
    Ok(report)
}

/// Aggregate over many games.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub mean_score: f64,
    pub max_score: u64,
    pub mean_placements: f64,
    pub puzzle_sets: u64,
    pub perfect_clears: u64,
}

impl Summary {
    pub fn from_reports(reports: &[GameReport]) -> Self {
        if reports.is_empty() {
            return Self::default();
        }
        let games = reports.len();
        let total_score: u64 = reports.iter().map(|r| r.score).sum();
        let total_moves: u64 = reports.iter().map(|r| u64::from(r.placements)).sum();
        Self {
            games,
            mean_score: total_score as f64 / games as f64,
            max_score: reports.iter().map(|r| r.score).max().unwrap_or(0),
            mean_placements: total_moves as f64 / games as f64,
            puzzle_sets: reports.iter().map(|r| u64::from(r.puzzle_sets)).sum(),
            perfect_clears: reports.iter().map(|r| u64::from(r.perfect_clears)).sum(),
        }
    }
}
