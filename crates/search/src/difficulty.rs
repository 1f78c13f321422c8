//! Adaptive difficulty - picks a shape pool from fill ratio, score and wave.

use blast_core::{Board, Pool};
use blast_engine::GeneratorConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Score-driven base difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

/// Phase inside the periodic difficulty wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wave {
    Easy,
    Hard,
}

/// `primary` with probability `p_primary`, otherwise `secondary`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoolMix {
    pub primary: Pool,
    pub secondary: Pool,
    pub p_primary: f64,
}

impl PoolMix {
    const fn new(primary: Pool, secondary: Pool, p_primary: f64) -> Self {
        Self {
            primary,
            secondary,
            p_primary,
        }
    }

    pub fn pick<R: Rng>(&self, rng: &mut R) -> Pool {
        if rng.random::<f64>() < self.p_primary {
            self.primary
        } else {
            self.secondary
        }
    }
}

/// Relief mix once the board passes the pinch threshold.
pub const PINCH_MIX: PoolMix = PoolMix::new(Pool::Easy, Pool::Medium, 0.8);

/// `[level][wave]`, wave index 0 = easy wave, 1 = hard wave.
const MIX_TABLE: [[PoolMix; 2]; 3] = [
    [
        PoolMix::new(Pool::Easy, Pool::Medium, 0.9),
        PoolMix::new(Pool::Easy, Pool::Medium, 0.9),
    ],
    [
        PoolMix::new(Pool::Easy, Pool::Medium, 0.6),
        PoolMix::new(Pool::Medium, Pool::Hard, 0.7),
    ],
    [
        PoolMix::new(Pool::Medium, Pool::Easy, 0.7),
        PoolMix::new(Pool::Hard, Pool::Medium, 0.8),
    ],
];

pub fn base_level(score: u64, config: &GeneratorConfig) -> Level {
    if score >= config.hard_score {
        Level::Hard
    } else if score >= config.medium_score {
        Level::Medium
    } else {
        Level::Easy
    }
}

/// Hard wave when the cycle position is past the middle of the cycle.
pub fn wave(generation: u32, config: &GeneratorConfig) -> Wave {
    let cycle = config.wave_cycle.max(1);
    let pos = generation % cycle;
    if pos * 2 > cycle {
        Wave::Hard
    } else {
        Wave::Easy
    }
}

pub fn pool_mix(level: Level, wave: Wave) -> PoolMix {
    let row = match level {
        Level::Easy => 0,
        Level::Medium => 1,
        Level::Hard => 2,
    };
    let col = match wave {
        Wave::Easy => 0,
        Wave::Hard => 1,
    };
    MIX_TABLE[row][col]
}

/// Mix for the current game state; the pinch check wins over score and wave.
pub fn adaptive_mix(
    board: &Board,
    score: u64,
    generation: u32,
    config: &GeneratorConfig,
) -> PoolMix {
    if board.fill_ratio() > config.adaptive_threshold {
        return PINCH_MIX;
    }
    pool_mix(base_level(score, config), wave(generation, config))
}

pub fn adaptive_pool<R: Rng>(
    board: &Board,
    score: u64,
    generation: u32,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Pool {
    adaptive_mix(board, score, generation, config).pick(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_base_level_thresholds() {
        let c = GeneratorConfig::default();
        assert_eq!(base_level(0, &c), Level::Easy);
        assert_eq!(base_level(499, &c), Level::Easy);
        assert_eq!(base_level(500, &c), Level::Medium);
        assert_eq!(base_level(1999, &c), Level::Medium);
        assert_eq!(base_level(2000, &c), Level::Hard);
    }

    #[test]
    fn test_wave_second_half() {
        let c = GeneratorConfig::default();
        let hard: Vec<u32> = (0..20).filter(|&g| wave(g, &c) == Wave::Hard).collect();
        assert_eq!(hard, vec![6, 7, 8, 9, 16, 17, 18, 19]);
    }

    #[test]
    fn test_pinch_overrides_score() {
        let c = GeneratorConfig::default();
        // 46 of 64 cells is just over 0.7
        let board = Board::from_bits((1u64 << 46) - 1);
        assert_eq!(adaptive_mix(&board, 10_000, 7, &c), PINCH_MIX);
        let board = Board::from_bits((1u64 << 44) - 1);
        assert_eq!(
            adaptive_mix(&board, 10_000, 7, &c),
            pool_mix(Level::Hard, Wave::Hard)
        );
    }

    #[test]
    fn test_mix_table() {
        let m = pool_mix(Level::Medium, Wave::Hard);
        assert_eq!((m.primary, m.secondary), (Pool::Medium, Pool::Hard));
        assert!((m.p_primary - 0.7).abs() < 1e-9);
        let m = pool_mix(Level::Hard, Wave::Easy);
        assert_eq!((m.primary, m.secondary), (Pool::Medium, Pool::Easy));
        assert_eq!(pool_mix(Level::Easy, Wave::Hard), pool_mix(Level::Easy, Wave::Easy));
    }

    #[test]
    fn test_pick_follows_probability() {
        let mut rng = StdRng::seed_from_u64(7);
        let mix = pool_mix(Level::Hard, Wave::Hard);
        let hard = (0..2000)
            .filter(|_| mix.pick(&mut rng) == Pool::Hard)
            .count();
        assert!((1450..1750).contains(&hard), "hard picks: {hard}");
    }
}
