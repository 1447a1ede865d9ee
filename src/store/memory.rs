//! In-memory store backend for offline play and tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::error::{Result, SkloopError};
use crate::core::types::{PlayerId, PuzzleId};

use super::{AttemptRecord, DailyPuzzle, ProfileStore, PuzzleStore};

/// Accumulated reward counters for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rewards {
    pub xp: u32,
    pub coins: u32,
}

/// HashMap-backed store implementing both store traits.
///
/// Reads and writes can be switched off independently (`set_fail_reads`,
/// `set_fail_writes`) to exercise the fallback and best-effort paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    puzzles: Mutex<HashMap<NaiveDate, DailyPuzzle>>,
    attempts: Mutex<HashMap<(PlayerId, PuzzleId), AttemptRecord>>,
    rewards: Mutex<HashMap<PlayerId, Rewards>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a puzzle for a date, replacing any existing one.
    pub fn insert_puzzle(&self, puzzle: DailyPuzzle) {
        if let Ok(mut table) = self.puzzles.lock() {
            table.insert(puzzle.date, puzzle);
        }
    }

    /// Make every subsequent read fail with a store error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with a store error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn attempt(&self, player: PlayerId, puzzle: PuzzleId) -> Option<AttemptRecord> {
        self.attempts
            .lock()
            .ok()
            .and_then(|table| table.get(&(player, puzzle)).cloned())
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().map(|table| table.len()).unwrap_or(0)
    }

    pub fn rewards(&self, player: PlayerId) -> Rewards {
        self.rewards
            .lock()
            .map(|table| table.get(&player).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    fn check_readable(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SkloopError::Store("reads disabled".into()));
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SkloopError::Store("writes disabled".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PuzzleStore for MemoryStore {
    async fn puzzle_for_date(&self, date: NaiveDate) -> Result<Option<DailyPuzzle>> {
        self.check_readable()?;
        let table = self
            .puzzles
            .lock()
            .map_err(|_| SkloopError::Store("puzzle lock poisoned".into()))?;
        Ok(table.get(&date).cloned())
    }

    async fn prior_attempt(
        &self,
        player: PlayerId,
        puzzle: PuzzleId,
    ) -> Result<Option<AttemptRecord>> {
        self.check_readable()?;
        let table = self
            .attempts
            .lock()
            .map_err(|_| SkloopError::Store("attempt lock poisoned".into()))?;
        Ok(table.get(&(player, puzzle)).cloned())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn upsert_attempt(&self, record: &AttemptRecord) -> Result<()> {
        self.check_writable()?;
        let mut table = self
            .attempts
            .lock()
            .map_err(|_| SkloopError::Store("attempt lock poisoned".into()))?;
        table.insert((record.player, record.puzzle), record.clone());
        Ok(())
    }

    async fn increment_rewards(
        &self,
        player: PlayerId,
        xp_delta: u32,
        coin_delta: u32,
    ) -> Result<()> {
        self.check_writable()?;
        let mut table = self
            .rewards
            .lock()
            .map_err(|_| SkloopError::Store("rewards lock poisoned".into()))?;
        let entry = table.entry(player).or_default();
        entry.xp += xp_delta;
        entry.coins += coin_delta;
        Ok(())
    }
}
