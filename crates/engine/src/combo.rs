/// Consecutive clearing placements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComboTracker {
    pub count: u32,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Any clear extends the chain, a placement without clears breaks it.
    pub fn register(&mut self, lines: usize) -> u32 {
        if lines > 0 {
            self.count = self.count.saturating_add(1);
        } else {
            self.count = 0;
        }
        self.count
    }
}

/// `floor(base * (1 + combo * multiplier))`
pub fn apply_combo_multiplier(base: u64, combo: u32, multiplier: f64) -> u64 {
    if combo == 0 {
        return base;
    }
    (base as f64 * (1.0 + combo as f64 * multiplier)).floor() as u64
}
