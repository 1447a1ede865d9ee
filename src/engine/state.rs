//! Board state machine
//!
//! A game is a fixed grid of guess rows plus a pending input buffer. Status
//! and keyboard colouring are never stored; both are derived from the
//! submitted rows, so the board cannot drift out of sync with itself.

use thiserror::Error;

use super::keyboard::KeyboardState;
use super::score::{score_guess, LetterScore};
use super::word::{Word, WORD_LENGTH};
use super::wordlist;

/// Maximum number of guesses per puzzle
pub const MAX_GUESSES: usize = 6;

/// Lifecycle phase of a board, derived from its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Returns true once no further input can change the board
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "playing" => Some(GameStatus::Playing),
            "won" => Some(GameStatus::Won),
            "lost" => Some(GameStatus::Lost),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One submitted guess with its per-letter scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredRow {
    word: Word,
    scores: [LetterScore; WORD_LENGTH],
}

impl ScoredRow {
    /// Score a guess against the solution and freeze the result
    pub fn score(word: Word, solution: &Word) -> Self {
        let scores = score_guess(&word, solution);
        Self { word, scores }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn scores(&self) -> &[LetterScore; WORD_LENGTH] {
        &self.scores
    }

    /// Every cell scored `Correct`
    pub fn is_winning(&self) -> bool {
        self.scores.iter().all(|s| *s == LetterScore::Correct)
    }
}

/// Why a submission was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("Game is already over")]
    GameOver,
    #[error("Row has {have} of {WORD_LENGTH} letters")]
    RowIncomplete { have: usize },
    #[error("Not in word list: {0}")]
    NotInWordList(String),
}

/// What a successful submission did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    InProgress,
    Won { attempts_used: usize },
    Lost,
}

/// A single puzzle board: solution, submitted rows, pending input
#[derive(Debug, Clone)]
pub struct GameState {
    solution: Word,
    rows: Vec<ScoredRow>,
    buffer: String,
}

impl GameState {
    pub fn new(solution: Word) -> Self {
        Self {
            solution,
            rows: Vec::with_capacity(MAX_GUESSES),
            buffer: String::with_capacity(WORD_LENGTH),
        }
    }

    /// Discard all progress and start over against a new solution.
    pub fn reset(&mut self, solution: Word) {
        self.solution = solution;
        self.rows.clear();
        self.buffer.clear();
    }

    pub fn solution(&self) -> &Word {
        &self.solution
    }

    pub fn rows(&self) -> &[ScoredRow] {
        &self.rows
    }

    /// Letters typed into the pending row so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn status(&self) -> GameStatus {
        if self.rows.iter().any(|row| row.is_winning()) {
            GameStatus::Won
        } else if self.rows.len() >= MAX_GUESSES {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        }
    }

    /// Keyboard colouring derived from the submitted rows
    pub fn keyboard(&self) -> KeyboardState {
        KeyboardState::from_rows(&self.rows)
    }

    /// Append one letter to the pending row.
    ///
    /// Ignored when the game is over, the row is already full, or the
    /// character is not an ASCII letter.
    pub fn append_letter(&mut self, letter: char) {
        if self.status().is_terminal() {
            return;
        }
        if self.buffer.len() >= WORD_LENGTH || !letter.is_ascii_alphabetic() {
            return;
        }
        self.buffer.push(letter.to_ascii_uppercase());
    }

    /// Remove the last letter of the pending row, if any.
    pub fn delete_letter(&mut self) {
        if self.status().is_terminal() {
            return;
        }
        self.buffer.pop();
    }

    /// Submit the pending row as a guess.
    ///
    /// On success the row is scored and frozen and the buffer cleared. On
    /// refusal the buffer is left untouched so the player can revise it.
    pub fn submit_guess(&mut self) -> Result<SubmitOutcome, GuessError> {
        if self.status().is_terminal() {
            return Err(GuessError::GameOver);
        }
        let letters: [u8; WORD_LENGTH] = self
            .buffer
            .as_bytes()
            .try_into()
            .map_err(|_| GuessError::RowIncomplete {
                have: self.buffer.len(),
            })?;
        let word = Word::from_letters(letters);
        if !wordlist::is_accepted(&word) {
            return Err(GuessError::NotInWordList(word.to_string()));
        }

        self.rows.push(ScoredRow::score(word, &self.solution));
        self.buffer.clear();

        Ok(match self.status() {
            GameStatus::Won => SubmitOutcome::Won {
                attempts_used: self.rows.len(),
            },
            GameStatus::Lost => SubmitOutcome::Lost,
            GameStatus::Playing => SubmitOutcome::InProgress,
        })
    }

    /// Emoji rendering of the submitted rows, one line per row.
    pub fn share_grid(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.scores()
                    .iter()
                    .map(|score| match score {
                        LetterScore::Absent => "⬛",
                        LetterScore::Present => "🟨",
                        LetterScore::Correct => "🟩",
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
