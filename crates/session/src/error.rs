use blast_engine::PlacementError;
use blast_search::GenerateError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("the game is over")]
    GameOver,
    #[error("no block in tray slot {index}")]
    BlockIndex { index: usize },
    #[error("block {index} was already placed")]
    BlockUsed { index: usize },
    #[error(transparent)]
    InvalidPlacement(#[from] PlacementError),
    #[error("could not deal a block set: {0}")]
    Deal(#[from] GenerateError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score json: {0}")]
    Json(#[from] serde_json::Error),
}
