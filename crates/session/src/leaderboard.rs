//! Ranked scores shared across devices.
//!
//! The real board lives behind a network service; `InMemoryLeaderboard` has
//! the same upsert and ranking rules for tests and offline play.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub device_id: String,
    pub name: String,
    pub score: u64,
    /// Seconds since the UNIX epoch, from the submitting client.
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error("player name is empty")]
    EmptyName,
    #[error("device id is empty")]
    EmptyDeviceId,
    #[error("a score of 0 is not ranked")]
    ZeroScore,
    #[error("leaderboard unavailable: {0}")]
    Unavailable(String),
}

pub trait Leaderboard {
    /// Upserts the device's entry. A lower score than the stored one keeps
    /// the stored score but takes the new name.
    fn submit(
        &mut self,
        device_id: &str,
        name: &str,
        score: u64,
        timestamp: u64,
    ) -> Result<(), LeaderboardError>;

    /// Best `n` entries, highest score first.
    fn top(&self, n: usize) -> Vec<LeaderboardEntry>;
}

/// Trims the name and rejects submissions that would never be ranked.
pub fn validate_submission<'a>(
    device_id: &str,
    name: &'a str,
    score: u64,
) -> Result<&'a str, LeaderboardError> {
    let name = name.trim();
    if device_id.is_empty() {
        return Err(LeaderboardError::EmptyDeviceId);
    }
    if name.is_empty() {
        return Err(LeaderboardError::EmptyName);
    }
    if score == 0 {
        return Err(LeaderboardError::ZeroScore);
    }
    Ok(name)
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryLeaderboard {
    entries: FxHashMap<String, LeaderboardEntry>,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Leaderboard for InMemoryLeaderboard {
    fn submit(
        &mut self,
        device_id: &str,
        name: &str,
        score: u64,
        timestamp: u64,
    ) -> Result<(), LeaderboardError> {
        let name = validate_submission(device_id, name, score)?;
        let entry = self
            .entries
            .entry(device_id.to_string())
            .or_insert_with(|| LeaderboardEntry {
                device_id: device_id.to_string(),
                name: name.to_string(),
                score: 0,
                timestamp,
            });
        entry.name = name.to_string();
        if score > entry.score {
            entry.score = score;
            entry.timestamp = timestamp;
        }
        Ok(())
    }

    fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<LeaderboardEntry> = self.entries.values().cloned().collect();
        // Equal scores: earlier submission first, then device id for a stable order.
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.timestamp.cmp(&b.timestamp))
                .then_with(|| a.device_id.cmp(&b.device_id))
        });
        ranked.truncate(n);
        ranked
    }
}
