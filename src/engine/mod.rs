//! Word-guess engine
//!
//! Pure game logic with no I/O: parsing guesses, scoring them against a
//! solution with duplicate-letter capping, aggregating keyboard colours,
//! and driving the six-row board through its lifecycle.
//!
//! Everything here is synchronous and deterministic; persistence and
//! puzzle fetching live in the session layer.

pub mod keyboard;
pub mod score;
pub mod state;
pub mod word;
pub mod wordlist;

pub use keyboard::{KeyStatus, KeyboardState};
pub use score::{score_guess, LetterScore};
pub use state::{GameState, GameStatus, GuessError, ScoredRow, SubmitOutcome, MAX_GUESSES};
pub use word::{Word, WordError, WORD_LENGTH};
