//! HTTP store backend
//!
//! Talks to the hosted profile/puzzle store over its PostgREST-style API.
//! Each table read filters with `column=eq.value` query parameters; the
//! attempt upsert relies on the store's merge-duplicates preference and a
//! unique (player_id, puzzle_id) key on the attempts table.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::{Result, SkloopError};
use crate::core::types::{PlayerId, PuzzleId};
use crate::engine::state::GameStatus;
use crate::engine::word::Word;

use super::{AttemptRecord, DailyPuzzle, ProfileStore, PuzzleStore};

/// Async client for the hosted puzzle/profile store
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// Create a store client with explicit configuration
    ///
    /// `base_url` is the REST root, e.g. `https://example.org/rest/v1`.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    /// Create a store client from environment variables
    ///
    /// Required: SKLOOP_STORE_URL
    /// Required: SKLOOP_STORE_KEY
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SKLOOP_STORE_URL")
            .map_err(|_| SkloopError::Store("SKLOOP_STORE_URL not set".into()))?;
        let api_key = std::env::var("SKLOOP_STORE_KEY")
            .map_err(|_| SkloopError::Store("SKLOOP_STORE_KEY not set".into()))?;

        Ok(Self::new(base_url, api_key))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_rows<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<Vec<T>> {
        let response = self
            .client
            .get(self.endpoint(path))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| SkloopError::Store(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SkloopError::Store(format!("API error: {}", error_text)));
        }

        response
            .json()
            .await
            .map_err(|e| SkloopError::Store(e.to_string()))
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T, prefer: Option<&str>) -> Result<()> {
        let mut request = self
            .client
            .post(self.endpoint(path))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json");
        if let Some(prefer) = prefer {
            request = request.header("Prefer", prefer);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| SkloopError::Store(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SkloopError::Store(format!("API error: {}", error_text)));
        }

        Ok(())
    }
}

#[async_trait]
impl PuzzleStore for RestStore {
    async fn puzzle_for_date(&self, date: NaiveDate) -> Result<Option<DailyPuzzle>> {
        let path = format!(
            "daily_puzzles?select=id,puzzle_date,solution&puzzle_date=eq.{}&limit=1",
            date
        );
        let rows: Vec<PuzzleRow> = self.get_rows(&path).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_puzzle()?)),
            None => Ok(None),
        }
    }

    async fn prior_attempt(
        &self,
        player: PlayerId,
        puzzle: PuzzleId,
    ) -> Result<Option<AttemptRecord>> {
        let path = format!(
            "attempts?select=player_id,puzzle_id,attempts_used,status,last_guess\
             &player_id=eq.{}&puzzle_id=eq.{}&limit=1",
            player.0, puzzle.0
        );
        let rows: Vec<AttemptRow> = self.get_rows(&path).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_record()?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ProfileStore for RestStore {
    async fn upsert_attempt(&self, record: &AttemptRecord) -> Result<()> {
        let row = AttemptRow::from_record(record);
        self.post_json("attempts", &row, Some("resolution=merge-duplicates"))
            .await
    }

    async fn increment_rewards(
        &self,
        player: PlayerId,
        xp_delta: u32,
        coin_delta: u32,
    ) -> Result<()> {
        let body = RewardsDelta {
            player_id: player.0,
            xp_delta,
            coin_delta,
        };
        self.post_json("rpc/increment_rewards", &body, None).await
    }
}

// Store row formats

#[derive(Deserialize)]
struct PuzzleRow {
    id: Uuid,
    puzzle_date: NaiveDate,
    solution: String,
}

impl PuzzleRow {
    fn into_puzzle(self) -> Result<DailyPuzzle> {
        let solution = Word::parse(&self.solution)?;
        Ok(DailyPuzzle {
            id: PuzzleId(self.id),
            date: self.puzzle_date,
            solution,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct AttemptRow {
    player_id: Uuid,
    puzzle_id: Uuid,
    attempts_used: u32,
    status: String,
    last_guess: String,
}

impl AttemptRow {
    fn from_record(record: &AttemptRecord) -> Self {
        Self {
            player_id: record.player.0,
            puzzle_id: record.puzzle.0,
            attempts_used: record.attempts_used,
            status: record.status.as_str().into(),
            last_guess: record.last_guess.clone(),
        }
    }

    fn into_record(self) -> Result<AttemptRecord> {
        let status = GameStatus::parse(&self.status)
            .ok_or_else(|| SkloopError::Store(format!("unknown status: {}", self.status)))?;
        Ok(AttemptRecord {
            player: PlayerId(self.player_id),
            puzzle: PuzzleId(self.puzzle_id),
            attempts_used: self.attempts_used,
            status,
            last_guess: self.last_guess,
        })
    }
}

#[derive(Serialize)]
struct RewardsDelta {
    player_id: Uuid,
    xp_delta: u32,
    coin_delta: u32,
}
