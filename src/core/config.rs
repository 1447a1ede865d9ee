//! Game configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose.

use std::time::Duration;

/// Configuration for a game client
///
/// Reward amounts must match what the backend's leaderboard math expects;
/// changing them only changes what this client *requests*, the store is the
/// authority on what a player actually holds.
#[derive(Debug, Clone)]
pub struct GameConfig {
    // === REWARDS ===
    /// XP granted for finishing the daily puzzle on any winning row.
    ///
    /// Flat rather than scaled by attempts: the daily puzzle is a
    /// show-up-and-play habit loop, not a skill ladder.
    pub win_xp: u32,

    /// Soft-currency (coins) granted alongside the XP on a win.
    pub win_coins: u32,

    // === STORE ACCESS ===
    /// Per-request budget for hosted-store calls.
    ///
    /// Gameplay never blocks on the store, so this only bounds how long the
    /// startup fetch and the terminal write may linger before being logged
    /// as failures.
    pub store_timeout: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_xp: 50,
            win_coins: 25,
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.win_xp == 0 && self.win_coins == 0 {
            return Err("at least one of win_xp/win_coins must be non-zero".into());
        }

        if self.store_timeout.is_zero() {
            return Err("store_timeout must be non-zero".into());
        }

        Ok(())
    }
}
