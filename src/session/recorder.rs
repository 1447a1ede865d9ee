//! Best-effort outcome persistence
//!
//! Terminal outcomes are written on a spawned task so the win/loss screen
//! never waits on the network. Write results are observed only to log a
//! warning; a failed write leaves the finished game untouched.

use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::core::config::GameConfig;
use crate::engine::state::GameStatus;
use crate::store::{AttemptRecord, ProfileStore};

/// Bridges terminal game outcomes to the profile store
pub struct OutcomeRecorder {
    handle: Handle,
    profiles: Arc<dyn ProfileStore>,
    config: GameConfig,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl OutcomeRecorder {
    pub fn new(handle: Handle, profiles: Arc<dyn ProfileStore>, config: GameConfig) -> Self {
        Self {
            handle,
            profiles,
            config,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Fire off the attempt upsert and, on a win, the reward increment.
    ///
    /// Returns immediately; both writes happen on a spawned task and are
    /// attempted independently so one failure cannot suppress the other.
    pub fn record(&self, record: AttemptRecord) {
        let profiles = Arc::clone(&self.profiles);
        let config = self.config.clone();
        tracing::debug!(
            "Recording {} outcome for player {}",
            record.status,
            record.player.0
        );

        let task = self.handle.spawn(async move {
            if let Err(e) = profiles.upsert_attempt(&record).await {
                tracing::warn!("Failed to persist attempt: {}", e);
            }
            if record.status == GameStatus::Won {
                if let Err(e) = profiles
                    .increment_rewards(record.player, config.win_xp, config.win_coins)
                    .await
                {
                    tracing::warn!("Failed to increment rewards: {}", e);
                }
            }
        });

        if let Ok(mut pending) = self.pending.lock() {
            pending.push(task);
        }
    }

    /// Wait for every spawned write to settle.
    ///
    /// Called before process exit so a just-recorded outcome is not lost
    /// to teardown. Within a running session nothing awaits these tasks.
    pub async fn flush(&self) {
        let tasks: Vec<JoinHandle<()>> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return,
        };
        for task in tasks {
            if let Err(e) = task.await {
                tracing::warn!("Persistence task failed: {}", e);
            }
        }
    }
}
