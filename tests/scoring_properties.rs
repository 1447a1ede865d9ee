//! Property tests for scoring and keyboard aggregation

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use skloop_wordgame::engine::keyboard::{KeyStatus, KeyboardState};
use skloop_wordgame::engine::score::{score_guess, LetterScore};
use skloop_wordgame::engine::state::ScoredRow;
use skloop_wordgame::engine::word::{Word, WORD_LENGTH};

fn arb_word() -> impl Strategy<Value = Word> {
    "[A-Z]{5}".prop_map(|s| Word::parse(&s).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        // Keep `.proptest-regressions` files out of the repo.
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_correct_iff_positions_match(guess in arb_word(), solution in arb_word()) {
        let scores = score_guess(&guess, &solution);
        for i in 0..WORD_LENGTH {
            prop_assert_eq!(
                scores[i] == LetterScore::Correct,
                guess.letters()[i] == solution.letters()[i]
            );
        }
    }

    #[test]
    fn prop_marks_match_letter_counts(guess in arb_word(), solution in arb_word()) {
        // For each letter, the number of non-absent marks equals the smaller
        // of its counts in the guess and in the solution.
        let scores = score_guess(&guess, &solution);
        for letter in b'A'..=b'Z' {
            let in_guess = guess.letters().iter().filter(|&&g| g == letter).count();
            let in_solution = solution.letters().iter().filter(|&&s| s == letter).count();
            let marked = guess
                .letters()
                .iter()
                .zip(scores.iter())
                .filter(|(&g, &s)| g == letter && s != LetterScore::Absent)
                .count();
            prop_assert_eq!(marked, in_guess.min(in_solution));
        }
    }

    #[test]
    fn prop_solution_scores_itself_all_correct(solution in arb_word()) {
        let scores = score_guess(&solution, &solution);
        prop_assert!(scores.iter().all(|&s| s == LetterScore::Correct));
    }

    #[test]
    fn prop_all_correct_only_for_the_solution(guess in arb_word(), solution in arb_word()) {
        let scores = score_guess(&guess, &solution);
        let all_correct = scores.iter().all(|&s| s == LetterScore::Correct);
        prop_assert_eq!(all_correct, guess == solution);
    }

    #[test]
    fn prop_keyboard_status_never_regresses(
        solution in arb_word(),
        guesses in prop::collection::vec(arb_word(), 1..=6),
    ) {
        let mut keyboard = KeyboardState::new();
        for guess in &guesses {
            let before: Vec<KeyStatus> = ('A'..='Z').map(|c| keyboard.status(c)).collect();
            keyboard.apply_row(&ScoredRow::score(*guess, &solution));
            for (i, c) in ('A'..='Z').enumerate() {
                prop_assert!(!before[i].outranks(&keyboard.status(c)));
            }
        }
    }

    #[test]
    fn prop_keyboard_aggregate_ignores_row_order(
        solution in arb_word(),
        guesses in prop::collection::vec(arb_word(), 1..=6),
    ) {
        let rows: Vec<ScoredRow> = guesses
            .iter()
            .map(|g| ScoredRow::score(*g, &solution))
            .collect();
        let forward = KeyboardState::from_rows(rows.iter());
        let reversed = KeyboardState::from_rows(rows.iter().rev());
        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn prop_keyboard_is_lattice_max_over_cells(
        solution in arb_word(),
        guesses in prop::collection::vec(arb_word(), 1..=6),
    ) {
        let rows: Vec<ScoredRow> = guesses
            .iter()
            .map(|g| ScoredRow::score(*g, &solution))
            .collect();
        let keyboard = KeyboardState::from_rows(rows.iter());
        for (i, c) in ('A'..='Z').enumerate() {
            let letter = b'A' + i as u8;
            let mut expected = KeyStatus::Unknown;
            for row in &rows {
                for (g, s) in row.word().letters().iter().zip(row.scores().iter()) {
                    if *g == letter {
                        let candidate = KeyStatus::from(*s);
                        if candidate.outranks(&expected) {
                            expected = candidate;
                        }
                    }
                }
            }
            prop_assert_eq!(keyboard.status(c), expected);
        }
    }
}
