//! blast-session - a playable game on top of the generator.

pub mod error;
pub mod high_score;
pub mod leaderboard;
pub mod session;

pub use error::{SessionError, StoreError};
pub use high_score::{HighScoreStore, JsonFileHighScore, MemoryHighScore, HIGH_SCORE_KEY};
pub use leaderboard::{
    validate_submission, InMemoryLeaderboard, Leaderboard, LeaderboardEntry, LeaderboardError,
};
pub use session::{GameStatus, PlaceOutcome, Session, SessionSnapshot};
