use serde::{Deserialize, Serialize};

use crate::combo::apply_combo_multiplier;
use crate::config::ScoreConfig;

/// Points earned by a single placement, split by source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub placement: u64,
    pub lines: u64,
    pub perfect: u64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u64 {
        self.placement + self.lines + self.perfect
    }
}

pub fn placement_points(cells: usize, config: &ScoreConfig) -> u64 {
    cells as u64 * config.base_points
}

/// Line score with the multi-line bonus, scaled by the combo already
/// incremented for this clear.
pub fn line_clear_points(lines: usize, combo: u32, config: &ScoreConfig) -> u64 {
    if lines == 0 {
        return 0;
    }
    let lines = lines as u64;
    let mut base = lines * config.line_base;
    if lines > 1 {
        base += lines * config.multi_line_bonus;
    }
    apply_combo_multiplier(base, combo, config.combo_multiplier)
}

pub fn score_placement(
    cells: usize,
    lines: usize,
    combo: u32,
    is_perfect_clear: bool,
    config: &ScoreConfig,
) -> ScoreBreakdown {
    ScoreBreakdown {
        placement: placement_points(cells, config),
        lines: line_clear_points(lines, combo, config),
        perfect: if is_perfect_clear {
            config.perfect_bonus
        } else {
            0
        },
    }
}
