//! External puzzle and profile stores
//!
//! The engine never talks to a datastore directly. These traits are the
//! whole contract: look up a day's puzzle and a player's prior attempt,
//! write the finished attempt, bump reward counters on a win. Backends are
//! interchangeable; `RestStore` talks to the hosted store over HTTP and
//! `MemoryStore` backs offline play and tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::types::{PlayerId, PuzzleId};
use crate::core::Result;
use crate::engine::state::GameStatus;
use crate::engine::word::Word;
use crate::engine::wordlist;

pub mod memory;
pub mod rest;

pub use memory::{MemoryStore, Rewards};
pub use rest::RestStore;

/// One day's puzzle as served by the puzzle store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPuzzle {
    pub id: PuzzleId,
    pub date: NaiveDate,
    pub solution: Word,
}

impl DailyPuzzle {
    /// Offline stand-in used when no puzzle can be fetched for a date.
    ///
    /// The id is derived from the date, so an attempt recorded against the
    /// fallback still lands on a stable (player, puzzle) key.
    pub fn fallback(date: NaiveDate) -> Self {
        Self {
            id: PuzzleId::fallback_for(date),
            date,
            solution: wordlist::default_solution(),
        }
    }
}

/// Durable outcome of one finished game; at most one per (player, puzzle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub player: PlayerId,
    pub puzzle: PuzzleId,
    pub attempts_used: u32,
    pub status: GameStatus,
    pub last_guess: String,
}

/// Read side: puzzle lookup and replay detection
#[async_trait]
pub trait PuzzleStore: Send + Sync {
    /// Puzzle scheduled for a calendar date, if one exists
    async fn puzzle_for_date(&self, date: NaiveDate) -> Result<Option<DailyPuzzle>>;

    /// A player's finished attempt at a puzzle, if any
    async fn prior_attempt(
        &self,
        player: PlayerId,
        puzzle: PuzzleId,
    ) -> Result<Option<AttemptRecord>>;
}

/// Write side: attempt records and reward counters
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or replace the attempt keyed by (player, puzzle)
    async fn upsert_attempt(&self, record: &AttemptRecord) -> Result<()>;

    /// Add to the player's reward counters
    async fn increment_rewards(
        &self,
        player: PlayerId,
        xp_delta: u32,
        coin_delta: u32,
    ) -> Result<()>;
}
