//! Accepted-guess word list, embedded at compile time

use std::collections::HashSet;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::Rng;

use super::word::Word;

const RAW_WORDS: &str = include_str!("accepted_words.txt");

static WORDS: OnceLock<Vec<Word>> = OnceLock::new();
static INDEX: OnceLock<HashSet<Word>> = OnceLock::new();

/// Get the accepted words in file order (parses the embedded list on first use)
fn words() -> &'static [Word] {
    WORDS.get_or_init(|| {
        RAW_WORDS
            .lines()
            .filter_map(|line| Word::parse(line).ok())
            .collect()
    })
}

fn index() -> &'static HashSet<Word> {
    INDEX.get_or_init(|| words().iter().copied().collect())
}

/// Returns true if the word may be submitted as a guess
pub fn is_accepted(word: &Word) -> bool {
    index().contains(word)
}

pub fn word_count() -> usize {
    words().len()
}

/// Solution used when no puzzle can be fetched
pub fn default_solution() -> Word {
    Word::from_letters(*b"REACT")
}

/// Pick a practice solution from the accepted list
pub fn random_word<R: Rng + ?Sized>(rng: &mut R) -> Word {
    words().choose(rng).copied().unwrap_or_else(default_solution)
}
