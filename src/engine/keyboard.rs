//! On-screen keyboard status aggregation
//!
//! Each letter A-Z carries the best classification it has earned across all
//! submitted rows. "Best" is a one-way ladder: once a letter has proven
//! itself `Correct` somewhere, a later `Absent` mark for a duplicate
//! occurrence must not drag it back down.

use super::score::LetterScore;
use super::state::ScoredRow;

/// Aggregated status of one keyboard letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyStatus {
    /// Letter has not appeared in any submitted row.
    Unknown = 0,
    Absent = 1,
    Present = 2,
    Correct = 3,
}

impl KeyStatus {
    /// Returns true if this status outranks the other on the upgrade ladder
    pub fn outranks(&self, other: &KeyStatus) -> bool {
        (*self as u8) > (*other as u8)
    }
}

impl From<LetterScore> for KeyStatus {
    fn from(score: LetterScore) -> Self {
        match score {
            LetterScore::Absent => KeyStatus::Absent,
            LetterScore::Present => KeyStatus::Present,
            LetterScore::Correct => KeyStatus::Correct,
        }
    }
}

/// Best-known status for every letter A-Z
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    keys: [KeyStatus; 26],
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self {
            keys: [KeyStatus::Unknown; 26],
        }
    }
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the aggregate from scratch over submitted rows.
    ///
    /// Because `observe` only ever upgrades, the result is independent of
    /// the order cells are visited in.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ScoredRow>) -> Self {
        let mut keyboard = Self::new();
        for row in rows {
            keyboard.apply_row(row);
        }
        keyboard
    }

    /// Fold one scored row into the aggregate.
    pub fn apply_row(&mut self, row: &ScoredRow) {
        for (letter, score) in row.word().letters().iter().zip(row.scores().iter()) {
            self.observe(*letter, *score);
        }
    }

    /// Record one scored cell, upgrading the letter's status if it outranks
    /// what is already known. Bytes outside A-Z are ignored.
    pub fn observe(&mut self, letter: u8, score: LetterScore) {
        if !letter.is_ascii_alphabetic() {
            return;
        }
        let slot = &mut self.keys[usize::from(letter.to_ascii_uppercase() - b'A')];
        let candidate = KeyStatus::from(score);
        if candidate.outranks(slot) {
            *slot = candidate;
        }
    }

    /// Status of a letter; `Unknown` for anything outside A-Z.
    pub fn status(&self, letter: char) -> KeyStatus {
        if !letter.is_ascii_alphabetic() {
            return KeyStatus::Unknown;
        }
        self.keys[usize::from(letter.to_ascii_uppercase() as u8 - b'A')]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::ScoredRow;
    use crate::engine::word::Word;

    fn row(guess: &str, solution: &str) -> ScoredRow {
        ScoredRow::score(
            Word::parse(guess).unwrap(),
            &Word::parse(solution).unwrap(),
        )
    }

    #[test]
    fn test_outranks_ladder() {
        assert!(KeyStatus::Correct.outranks(&KeyStatus::Present));
        assert!(KeyStatus::Present.outranks(&KeyStatus::Absent));
        assert!(KeyStatus::Absent.outranks(&KeyStatus::Unknown));

        assert!(!KeyStatus::Absent.outranks(&KeyStatus::Correct));
        assert!(!KeyStatus::Correct.outranks(&KeyStatus::Correct));
    }

    #[test]
    fn test_letters_start_unknown() {
        let keyboard = KeyboardState::new();
        assert_eq!(keyboard.status('A'), KeyStatus::Unknown);
        assert_eq!(keyboard.status('z'), KeyStatus::Unknown);
    }

    #[test]
    fn test_row_marks_letters() {
        let keyboard = KeyboardState::from_rows([&row("STACK", "REACT")]);
        assert_eq!(keyboard.status('S'), KeyStatus::Absent);
        assert_eq!(keyboard.status('T'), KeyStatus::Present);
        assert_eq!(keyboard.status('A'), KeyStatus::Correct);
        assert_eq!(keyboard.status('C'), KeyStatus::Correct);
        assert_eq!(keyboard.status('K'), KeyStatus::Absent);
        assert_eq!(keyboard.status('R'), KeyStatus::Unknown);
    }

    #[test]
    fn test_status_upgrades_across_rows() {
        let first = row("TRACE", "REACT");
        let second = row("REACT", "REACT");
        let keyboard = KeyboardState::from_rows([&first, &second]);
        assert_eq!(keyboard.status('R'), KeyStatus::Correct);
        assert_eq!(keyboard.status('T'), KeyStatus::Correct);
    }

    #[test]
    fn test_status_never_downgrades() {
        // ARENA scores its first A correct; AAAAA then scores three A's
        // absent, which must not demote the key.
        let solved_a = row("ARENA", "ARENA");
        let spam_a = row("AAAAA", "ARENA");
        let keyboard = KeyboardState::from_rows([&solved_a, &spam_a]);
        assert_eq!(keyboard.status('A'), KeyStatus::Correct);
    }

    #[test]
    fn test_duplicate_within_one_row_keeps_best_mark() {
        // AAAAA vs ARENA scores [C, A, A, A, C]; the aggregate must read
        // the row as "A is correct", not as "A is absent".
        let keyboard = KeyboardState::from_rows([&row("AAAAA", "ARENA")]);
        assert_eq!(keyboard.status('A'), KeyStatus::Correct);
    }

    #[test]
    fn test_non_letter_queries_are_unknown() {
        let keyboard = KeyboardState::from_rows([&row("REACT", "REACT")]);
        assert_eq!(keyboard.status('3'), KeyStatus::Unknown);
        assert_eq!(keyboard.status(' '), KeyStatus::Unknown);
    }

    #[test]
    fn test_observe_ignores_non_letter_bytes() {
        let mut keyboard = KeyboardState::new();
        keyboard.observe(b'!', LetterScore::Correct);
        keyboard.observe(b'7', LetterScore::Present);
        assert_eq!(keyboard, KeyboardState::new());
    }
}
