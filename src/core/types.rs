//! Core identifier types used throughout the codebase

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players
///
/// Opaque handle into the hosted profile store; never inspected locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for daily puzzles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleId(pub Uuid);

impl PuzzleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id for a date the store had no puzzle row for.
    ///
    /// Derived from the calendar date so that every client falling back on
    /// the same day writes attempts under the same key.
    pub fn fallback_for(date: NaiveDate) -> Self {
        let key = date.format("%Y-%m-%d").to_string();
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()))
    }
}
