//! Fixed-length word values
//!
//! Every guess and every solution is exactly [`WORD_LENGTH`] uppercase
//! ASCII letters. `Word` enforces that at construction so the scoring and
//! keyboard code never re-validates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of letters in every guess and solution.
pub const WORD_LENGTH: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("expected {WORD_LENGTH} letters, got {0}")]
    WrongLength(usize),

    #[error("'{0}' is not a letter")]
    NotALetter(char),
}

/// A validated uppercase 5-letter word
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Parse and normalize a word, uppercasing ASCII letters.
    pub fn parse(s: &str) -> Result<Self, WordError> {
        let trimmed = s.trim();
        if trimmed.chars().count() != WORD_LENGTH {
            return Err(WordError::WrongLength(trimmed.chars().count()));
        }

        let mut letters = [0u8; WORD_LENGTH];
        for (slot, ch) in letters.iter_mut().zip(trimmed.chars()) {
            if !ch.is_ascii_alphabetic() {
                return Err(WordError::NotALetter(ch));
            }
            *slot = ch.to_ascii_uppercase() as u8;
        }

        Ok(Self(letters))
    }

    /// Build from letters already validated as uppercase ASCII.
    pub(crate) fn from_letters(letters: [u8; WORD_LENGTH]) -> Self {
        Self(letters)
    }

    /// The letters as uppercase ASCII bytes.
    pub fn letters(&self) -> [u8; WORD_LENGTH] {
        self.0
    }

    /// Letter at position `i` (panics past `WORD_LENGTH`, like slice indexing).
    pub fn letter(&self, i: usize) -> u8 {
        self.0[i]
    }

    pub fn as_str(&self) -> &str {
        // Constructors only admit uppercase ASCII, which is valid UTF-8.
        std::str::from_utf8(&self.0).unwrap_or("")
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.as_str())
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
