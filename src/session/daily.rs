//! Daily puzzle session
//!
//! Glues one player, one calendar date and one board together. Startup
//! fetches the day's puzzle (falling back to a built-in solution when the
//! store is unreachable) and checks for a prior finished attempt, which
//! turns the session into a read-only replay of that result. Terminal
//! transitions hand the outcome to the recorder and nothing else.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::core::config::GameConfig;
use crate::core::types::{PlayerId, PuzzleId};
use crate::engine::state::{
    GameState, GameStatus, GuessError, SubmitOutcome, MAX_GUESSES,
};
use crate::store::{AttemptRecord, DailyPuzzle, PuzzleStore};

use super::recorder::OutcomeRecorder;

/// What the player is looking at for today's puzzle
pub enum DailyPlay {
    /// A board accepting input
    Live(GameState),
    /// A finished attempt rehydrated from the store; input is ignored
    Finished(AttemptRecord),
}

/// One play-through of one day's puzzle
pub struct GameSession {
    player: PlayerId,
    puzzle: DailyPuzzle,
    play: DailyPlay,
    recorder: Arc<OutcomeRecorder>,
}

impl GameSession {
    /// Open today's session: fetch the puzzle, then check for a prior
    /// finished attempt.
    ///
    /// Never fails; every store problem degrades to the fallback puzzle or
    /// to a fresh board.
    pub async fn start(
        player: PlayerId,
        date: NaiveDate,
        puzzles: &dyn PuzzleStore,
        recorder: Arc<OutcomeRecorder>,
        config: &GameConfig,
    ) -> Self {
        let puzzle = fetch_puzzle(puzzles, date, config.store_timeout).await;
        let play = match lookup_prior(puzzles, player, puzzle.id, config.store_timeout).await {
            Some(record) if record.status.is_terminal() => {
                tracing::info!("Puzzle for {} already finished: {}", date, record.status);
                DailyPlay::Finished(record)
            }
            _ => DailyPlay::Live(GameState::new(puzzle.solution)),
        };

        Self {
            player,
            puzzle,
            play,
            recorder,
        }
    }

    pub fn puzzle(&self) -> &DailyPuzzle {
        &self.puzzle
    }

    pub fn play(&self) -> &DailyPlay {
        &self.play
    }

    /// The live board, if this session is not a rehydrated replay
    pub fn state(&self) -> Option<&GameState> {
        match &self.play {
            DailyPlay::Live(state) => Some(state),
            DailyPlay::Finished(_) => None,
        }
    }

    pub fn is_replay(&self) -> bool {
        matches!(self.play, DailyPlay::Finished(_))
    }

    pub fn status(&self) -> GameStatus {
        match &self.play {
            DailyPlay::Live(state) => state.status(),
            DailyPlay::Finished(record) => record.status,
        }
    }

    pub fn append_letter(&mut self, letter: char) {
        if let DailyPlay::Live(state) = &mut self.play {
            state.append_letter(letter);
        }
    }

    pub fn delete_letter(&mut self) {
        if let DailyPlay::Live(state) = &mut self.play {
            state.delete_letter();
        }
    }

    /// Submit the pending row; on a terminal outcome, hand the finished
    /// attempt to the recorder.
    pub fn submit_guess(&mut self) -> Result<SubmitOutcome, GuessError> {
        let outcome = match &mut self.play {
            DailyPlay::Live(state) => state.submit_guess()?,
            DailyPlay::Finished(_) => return Err(GuessError::GameOver),
        };

        match outcome {
            SubmitOutcome::InProgress => {}
            SubmitOutcome::Won { attempts_used } => {
                let record = self.build_record(GameStatus::Won, attempts_used);
                self.recorder.record(record);
            }
            SubmitOutcome::Lost => {
                let record = self.build_record(GameStatus::Lost, MAX_GUESSES);
                self.recorder.record(record);
            }
        }

        Ok(outcome)
    }

    /// Shareable result text, once the board is finished.
    pub fn share_text(&self) -> Option<String> {
        let state = self.state()?;
        let tally = match state.status() {
            GameStatus::Won => state.rows().len().to_string(),
            GameStatus::Lost => "X".to_string(),
            GameStatus::Playing => return None,
        };
        Some(format!(
            "Skloop {} {}/{}\n{}",
            self.puzzle.date,
            tally,
            MAX_GUESSES,
            state.share_grid()
        ))
    }

    fn build_record(&self, status: GameStatus, attempts_used: usize) -> AttemptRecord {
        let last_guess = self
            .state()
            .and_then(|state| state.rows().last())
            .map(|row| row.word().to_string())
            .unwrap_or_default();
        AttemptRecord {
            player: self.player,
            puzzle: self.puzzle.id,
            attempts_used: attempts_used as u32,
            status,
            last_guess,
        }
    }
}

async fn fetch_puzzle(
    puzzles: &dyn PuzzleStore,
    date: NaiveDate,
    timeout: Duration,
) -> DailyPuzzle {
    match tokio::time::timeout(timeout, puzzles.puzzle_for_date(date)).await {
        Ok(Ok(Some(puzzle))) => puzzle,
        Ok(Ok(None)) => {
            tracing::info!("No puzzle scheduled for {}, using fallback", date);
            DailyPuzzle::fallback(date)
        }
        Ok(Err(e)) => {
            tracing::warn!("Puzzle fetch failed: {}, using fallback", e);
            DailyPuzzle::fallback(date)
        }
        Err(_) => {
            tracing::warn!("Puzzle fetch timed out, using fallback");
            DailyPuzzle::fallback(date)
        }
    }
}

async fn lookup_prior(
    puzzles: &dyn PuzzleStore,
    player: PlayerId,
    puzzle: PuzzleId,
    timeout: Duration,
) -> Option<AttemptRecord> {
    match tokio::time::timeout(timeout, puzzles.prior_attempt(player, puzzle)).await {
        Ok(Ok(prior)) => prior,
        Ok(Err(e)) => {
            tracing::warn!("Prior attempt lookup failed: {}", e);
            None
        }
        Err(_) => {
            tracing::warn!("Prior attempt lookup timed out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::word::Word;
    use crate::store::{MemoryStore, ProfileStore};
    use tokio::runtime::Handle;

    fn recorder(store: &Arc<MemoryStore>) -> Arc<OutcomeRecorder> {
        Arc::new(OutcomeRecorder::new(
            Handle::current(),
            store.clone(),
            GameConfig::default(),
        ))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn seed_puzzle(store: &MemoryStore, solution: &str) -> DailyPuzzle {
        let puzzle = DailyPuzzle {
            id: PuzzleId::new(),
            date: date(),
            solution: Word::parse(solution).unwrap(),
        };
        store.insert_puzzle(puzzle.clone());
        puzzle
    }

    async fn start(store: &Arc<MemoryStore>, player: PlayerId) -> GameSession {
        GameSession::start(
            player,
            date(),
            store.as_ref(),
            recorder(store),
            &GameConfig::default(),
        )
        .await
    }

    fn play_word(session: &mut GameSession, word: &str) -> SubmitOutcome {
        for c in word.chars() {
            session.append_letter(c);
        }
        session.submit_guess().unwrap()
    }

    #[tokio::test]
    async fn test_missing_puzzle_falls_back() {
        let store = Arc::new(MemoryStore::new());
        let session = start(&store, PlayerId::new()).await;

        assert_eq!(session.puzzle().solution.as_str(), "REACT");
        assert_eq!(session.puzzle().id, PuzzleId::fallback_for(date()));
        assert!(!session.is_replay());
    }

    #[tokio::test]
    async fn test_read_errors_fall_back() {
        let store = Arc::new(MemoryStore::new());
        seed_puzzle(&store, "CRANE");
        store.set_fail_reads(true);
        let session = start(&store, PlayerId::new()).await;

        // The scheduled puzzle is unreadable, so the fallback is used and
        // the failed prior lookup reads as "no prior".
        assert_eq!(session.puzzle().solution.as_str(), "REACT");
        assert_eq!(session.puzzle().id, PuzzleId::fallback_for(date()));
        assert!(!session.is_replay());
    }

    #[tokio::test]
    async fn test_scheduled_puzzle_is_used() {
        let store = Arc::new(MemoryStore::new());
        let puzzle = seed_puzzle(&store, "CRANE");
        let session = start(&store, PlayerId::new()).await;

        assert_eq!(session.puzzle(), &puzzle);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[tokio::test]
    async fn test_win_is_recorded_once() {
        let store = Arc::new(MemoryStore::new());
        let puzzle = seed_puzzle(&store, "CRANE");
        let player = PlayerId::new();
        let rec = recorder(&store);
        let mut session = GameSession::start(
            player,
            date(),
            store.as_ref(),
            rec.clone(),
            &GameConfig::default(),
        )
        .await;

        assert_eq!(play_word(&mut session, "STALE"), SubmitOutcome::InProgress);
        assert_eq!(
            play_word(&mut session, "CRANE"),
            SubmitOutcome::Won { attempts_used: 2 }
        );
        rec.flush().await;

        let record = store.attempt(player, puzzle.id).unwrap();
        assert_eq!(record.status, GameStatus::Won);
        assert_eq!(record.attempts_used, 2);
        assert_eq!(record.last_guess, "CRANE");
        assert_eq!(store.rewards(player).xp, GameConfig::default().win_xp);
        assert_eq!(store.attempt_count(), 1);
    }

    #[tokio::test]
    async fn test_loss_is_recorded_without_rewards() {
        let store = Arc::new(MemoryStore::new());
        let puzzle = seed_puzzle(&store, "CRANE");
        let player = PlayerId::new();
        let rec = recorder(&store);
        let mut session = GameSession::start(
            player,
            date(),
            store.as_ref(),
            rec.clone(),
            &GameConfig::default(),
        )
        .await;

        for word in ["STALE", "PIANO", "PLANT", "HOUSE", "WORLD"] {
            assert_eq!(play_word(&mut session, word), SubmitOutcome::InProgress);
        }
        assert_eq!(play_word(&mut session, "BUILD"), SubmitOutcome::Lost);
        rec.flush().await;

        let record = store.attempt(player, puzzle.id).unwrap();
        assert_eq!(record.status, GameStatus::Lost);
        assert_eq!(record.attempts_used, 6);
        assert_eq!(record.last_guess, "BUILD");
        assert_eq!(store.rewards(player), Default::default());
    }

    #[tokio::test]
    async fn test_prior_attempt_suppresses_replay() {
        let store = Arc::new(MemoryStore::new());
        let puzzle = seed_puzzle(&store, "CRANE");
        let player = PlayerId::new();
        let prior = AttemptRecord {
            player,
            puzzle: puzzle.id,
            attempts_used: 4,
            status: GameStatus::Won,
            last_guess: "CRANE".into(),
        };
        store.upsert_attempt(&prior).await.unwrap();

        let mut session = start(&store, player).await;
        assert!(session.is_replay());
        assert_eq!(session.status(), GameStatus::Won);

        session.append_letter('C');
        assert_eq!(session.submit_guess(), Err(GuessError::GameOver));
        // No second write happened.
        assert_eq!(store.attempt(player, puzzle.id), Some(prior));
        assert_eq!(store.attempt_count(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_still_shows_result() {
        let store = Arc::new(MemoryStore::new());
        seed_puzzle(&store, "CRANE");
        let player = PlayerId::new();
        let rec = recorder(&store);
        let mut session = GameSession::start(
            player,
            date(),
            store.as_ref(),
            rec.clone(),
            &GameConfig::default(),
        )
        .await;

        store.set_fail_writes(true);
        assert_eq!(
            play_word(&mut session, "CRANE"),
            SubmitOutcome::Won { attempts_used: 1 }
        );
        rec.flush().await;

        // The board shows the win even though nothing was persisted.
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(store.attempt_count(), 0);
    }

    #[tokio::test]
    async fn test_share_text_formats_result() {
        let store = Arc::new(MemoryStore::new());
        seed_puzzle(&store, "CRANE");
        let mut session = start(&store, PlayerId::new()).await;

        assert_eq!(session.share_text(), None);
        play_word(&mut session, "CRANE");
        let text = session.share_text().unwrap();
        assert!(text.starts_with("Skloop 2024-03-09 1/6"));
        assert!(text.ends_with("🟩🟩🟩🟩🟩"));
    }
}
