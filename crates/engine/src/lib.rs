//! blast-engine - placement application, scoring and tuning.

pub mod apply;
pub mod combo;
pub mod config;
pub mod placement;
pub mod score;

pub use apply::{apply_placement, apply_placement_mut, cells_cleared_by};
pub use combo::{apply_combo_multiplier, ComboTracker};
pub use config::{GeneratorConfig, ScoreConfig, SearchMode};
pub use placement::{
    anchor_mask, first_fit, placements, validate_placement, Anchors, Placement, PlacementError,
};
pub use score::{line_clear_points, placement_points, score_placement, ScoreBreakdown};
