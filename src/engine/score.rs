//! Letter-by-letter guess scoring
//!
//! Standard two-pass scheme: exact matches first, then present-but-misplaced
//! letters drawn from a pool of the solution's unmatched letters. The pool is
//! what keeps repeated letters honest: a guess can never collect more
//! `Correct`/`Present` marks for a letter than the solution has occurrences
//! left after pass one.

use super::word::{Word, WORD_LENGTH};

/// Classification of one guessed letter against the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterScore {
    /// Letter does not appear in the solution (or every occurrence is
    /// already accounted for by this row's other marks).
    Absent,
    /// Letter appears in the solution at a different position.
    Present,
    /// Letter matches the solution at this position.
    Correct,
}

/// Score a guess against the solution.
///
/// Pass 1 marks `Correct` positions and counts every *unmatched* solution
/// letter into a pool. Pass 2 walks the remaining positions in order and
/// spends the pool on `Present` marks, one occurrence per mark.
pub fn score_guess(guess: &Word, solution: &Word) -> [LetterScore; WORD_LENGTH] {
    let mut scores = [LetterScore::Absent; WORD_LENGTH];
    let mut pool = [0u8; 26];

    for (i, (g, s)) in guess.letters().iter().zip(solution.letters().iter()).enumerate() {
        if g == s {
            scores[i] = LetterScore::Correct;
        } else {
            pool[usize::from(s - b'A')] += 1;
        }
    }

    for (i, g) in guess.letters().iter().enumerate() {
        if scores[i] == LetterScore::Correct {
            continue;
        }
        let slot = &mut pool[usize::from(g - b'A')];
        if *slot > 0 {
            *slot -= 1;
            scores[i] = LetterScore::Present;
        }
    }

    scores
}
