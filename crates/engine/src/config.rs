use serde::{Deserialize, Serialize};

/// Point values for placements, line clears and perfect clears.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Points per placed cell.
    pub base_points: u64,
    /// Points per cleared line.
    pub line_base: u64,
    /// Extra points per line when more than one line clears at once.
    pub multi_line_bonus: u64,
    /// Line score is scaled by `1 + combo * combo_multiplier`.
    pub combo_multiplier: f64,
    /// Added whenever a placement leaves the board empty.
    pub perfect_bonus: u64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            base_points: 1,
            line_base: 10,
            multi_line_bonus: 30,
            combo_multiplier: 0.5,
            perfect_bonus: 300,
        }
    }
}

/// How the feasibility search explores placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchMode {
    /// Commit to the first fit in row-major order at every step.
    #[default]
    FirstFit,
    /// Backtrack over every fit at every step.
    Exhaustive,
}

/// Block generator tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Puzzle phase runs when `0 < occupied <= perfect_threshold`.
    pub perfect_threshold: u32,
    /// Random sets tried before giving up.
    pub max_attempts: u32,
    /// Random triples sampled by the puzzle phase.
    pub puzzle_samples: u32,
    /// Fill ratio above which the board counts as a pinch.
    pub adaptive_threshold: f64,
    /// Generations per difficulty wave.
    pub wave_cycle: u32,
    /// Score at which the base level becomes medium.
    pub medium_score: u64,
    /// Score at which the base level becomes hard.
    pub hard_score: u64,
    pub search_mode: SearchMode,
    /// Also reject sets that would leave an isolated empty cell.
    pub island_gate: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            perfect_threshold: 10,
            max_attempts: 100,
            puzzle_samples: 50,
            adaptive_threshold: 0.7,
            wave_cycle: 10,
            medium_score: 500,
            hard_score: 2000,
            search_mode: SearchMode::FirstFit,
            island_gate: false,
        }
    }
}

impl GeneratorConfig {
    /// Exhaustive backtracking with island gating.
    pub fn strict() -> Self {
        Self {
            search_mode: SearchMode::Exhaustive,
            island_gate: true,
            ..Self::default()
        }
    }
}
