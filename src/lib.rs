//! block-blast - an 8x8 block placement game with a no-dead-end dealer.
//!
//! Re-exports the workspace crates and adds a greedy agent for headless play.

pub mod agent;

pub use blast_core;
pub use blast_engine;
pub use blast_search;
pub use blast_session;

pub use blast_core::{Block, BlockColor, BlockSet, Board, LineClear, Pool, Shape};
pub use blast_engine::{GeneratorConfig, Placement, ScoreConfig, SearchMode};
pub use blast_search::{BlockGenerator, DealKind, GenerateError};
pub use blast_session::{GameStatus, PlaceOutcome, Session, SessionError};
