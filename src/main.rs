//! Skloop - Entry Point
//!
//! Terminal front end for the daily word-guess game. It sets up the async
//! runtime, picks a store backend, opens today's session and runs a line
//! based input loop: type a five-letter word to guess, or a command.

use skloop_wordgame::core::config::GameConfig;
use skloop_wordgame::core::error::{Result, SkloopError};
use skloop_wordgame::core::types::PlayerId;
use skloop_wordgame::engine::keyboard::{KeyStatus, KeyboardState};
use skloop_wordgame::engine::score::LetterScore;
use skloop_wordgame::engine::state::{GameState, GameStatus, SubmitOutcome, MAX_GUESSES};
use skloop_wordgame::engine::word::WORD_LENGTH;
use skloop_wordgame::engine::wordlist;
use skloop_wordgame::session::daily::{DailyPlay, GameSession};
use skloop_wordgame::session::recorder::OutcomeRecorder;
use skloop_wordgame::store::{MemoryStore, ProfileStore, PuzzleStore, RestStore};

use chrono::NaiveDate;
use clap::Parser;
use crossterm::style::Stylize;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Daily word-guess game
#[derive(Parser, Debug)]
#[command(name = "skloop")]
#[command(about = "Guess the five-letter word of the day")]
struct Args {
    /// Puzzle date in YYYY-MM-DD form (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Player id as a UUID (defaults to a fresh anonymous id)
    #[arg(long)]
    player: Option<Uuid>,

    /// Play unscored practice rounds against random words
    #[arg(long)]
    practice: bool,

    /// Skip the hosted store entirely; results are not saved
    #[arg(long)]
    offline: bool,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("skloop_wordgame=info")
        .init();

    let args = Args::parse();

    tracing::info!("Skloop starting...");

    let config = GameConfig::default();
    config.validate().map_err(SkloopError::Config)?;

    if args.practice {
        return run_practice();
    }

    // Create the async runtime for store calls
    let rt = Runtime::new()?;
    run_daily(&rt, &args, &config)
}

fn run_daily(rt: &Runtime, args: &Args, config: &GameConfig) -> Result<()> {
    // Pick a store backend (optional - fetch and writes degrade gracefully)
    let (puzzles, profiles) = if args.offline {
        tracing::info!("Offline mode - results will not be saved");
        split_store(Arc::new(MemoryStore::new()))
    } else {
        match RestStore::from_env() {
            Ok(store) => split_store(Arc::new(store)),
            Err(e) => {
                tracing::warn!("{} - playing offline, results will not be saved", e);
                split_store(Arc::new(MemoryStore::new()))
            }
        }
    };

    let player = PlayerId(args.player.unwrap_or_else(Uuid::new_v4));
    let date = args.date.unwrap_or_else(|| chrono::Local::now().date_naive());

    let recorder = Arc::new(OutcomeRecorder::new(
        rt.handle().clone(),
        profiles,
        config.clone(),
    ));
    let mut session = rt.block_on(GameSession::start(
        player,
        date,
        puzzles.as_ref(),
        recorder.clone(),
        config,
    ));

    if let DailyPlay::Finished(record) = session.play() {
        println!("\n=== SKLOOP {} ===", date);
        println!(
            "You already finished this puzzle: {} in {}/{}.",
            record.status, record.attempts_used, MAX_GUESSES
        );
        println!("Come back tomorrow, or try --practice.");
        return Ok(());
    }

    // Display welcome message
    println!("\n=== SKLOOP {} ===", date);
    println!("Guess the five-letter word in {} tries", MAX_GUESSES);
    println!();
    println!("Commands:");
    println!("  <word>      - Submit a five-letter guess");
    println!("  board / b   - Redraw the board");
    println!("  share       - Copy-ready result grid (after finishing)");
    println!("  quit / q    - Exit");
    println!();

    if let Some(state) = session.state() {
        render_board(state);
        render_keyboard(&state.keyboard());
    }

    // Main input loop
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "board" || input == "b" {
            if let Some(state) = session.state() {
                render_board(state);
                render_keyboard(&state.keyboard());
            }
            continue;
        }

        if input == "share" {
            match session.share_text() {
                Some(text) => println!("\n{}\n", text),
                None => println!("Finish the puzzle first."),
            }
            continue;
        }

        if !input.chars().all(|c| c.is_ascii_alphabetic()) {
            println!("Unknown command. Available: <word>, board, share, quit");
            continue;
        }
        if input.chars().count() > WORD_LENGTH {
            println!("Words are five letters.");
            continue;
        }

        // Retype the pending row from scratch, then submit
        while session.state().map_or(false, |s| !s.buffer().is_empty()) {
            session.delete_letter();
        }
        for c in input.chars() {
            session.append_letter(c);
        }

        match session.submit_guess() {
            Ok(outcome) => {
                if let Some(state) = session.state() {
                    render_board(state);
                    render_keyboard(&state.keyboard());
                }
                match outcome {
                    SubmitOutcome::InProgress => {}
                    SubmitOutcome::Won { attempts_used } => {
                        println!(
                            "{}",
                            format!("You got it in {}/{}!", attempts_used, MAX_GUESSES)
                                .green()
                                .bold()
                        );
                        println!("Rewards: +{} XP, +{} coins", config.win_xp, config.win_coins);
                        println!("Type 'share' for a copy-ready grid.");
                    }
                    SubmitOutcome::Lost => {
                        let solution = session
                            .state()
                            .map(|s| s.solution().to_string())
                            .unwrap_or_default();
                        println!(
                            "{}",
                            format!("Out of guesses. The word was {}.", solution).red()
                        );
                    }
                }
            }
            Err(e) => println!("{}", e.to_string().yellow()),
        }
    }

    // Let in-flight writes settle before the runtime is dropped
    rt.block_on(recorder.flush());

    println!("\nGoodbye!");
    Ok(())
}

fn run_practice() -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut state = GameState::new(wordlist::random_word(&mut rng));

    println!("\n=== SKLOOP PRACTICE ===");
    println!(
        "Random words, unscored - nothing is saved. {} words in the list.",
        wordlist::word_count()
    );
    println!();
    println!("Commands:");
    println!("  <word>      - Submit a five-letter guess");
    println!("  board / b   - Redraw the board");
    println!("  new / n     - Start a fresh round");
    println!("  quit / q    - Exit");
    println!();

    render_board(&state);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "new" || input == "n" {
            state.reset(wordlist::random_word(&mut rng));
            println!("New round.");
            render_board(&state);
            continue;
        }

        if input == "board" || input == "b" {
            render_board(&state);
            render_keyboard(&state.keyboard());
            continue;
        }

        if !input.chars().all(|c| c.is_ascii_alphabetic()) {
            println!("Unknown command. Available: <word>, board, new, quit");
            continue;
        }
        if input.chars().count() > WORD_LENGTH {
            println!("Words are five letters.");
            continue;
        }

        while !state.buffer().is_empty() {
            state.delete_letter();
        }
        for c in input.chars() {
            state.append_letter(c);
        }

        match state.submit_guess() {
            Ok(outcome) => {
                render_board(&state);
                render_keyboard(&state.keyboard());
                match outcome {
                    SubmitOutcome::InProgress => {}
                    SubmitOutcome::Won { attempts_used } => {
                        println!(
                            "{}",
                            format!("You got it in {}/{}!", attempts_used, MAX_GUESSES)
                                .green()
                                .bold()
                        );
                        println!("Type 'new' for another round.");
                    }
                    SubmitOutcome::Lost => {
                        println!(
                            "{}",
                            format!("Out of guesses. The word was {}.", state.solution()).red()
                        );
                        println!("Type 'new' for another round.");
                    }
                }
            }
            Err(e) => println!("{}", e.to_string().yellow()),
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

/// Hand one store object to both trait-object slots
fn split_store<S>(store: Arc<S>) -> (Arc<dyn PuzzleStore>, Arc<dyn ProfileStore>)
where
    S: PuzzleStore + ProfileStore + 'static,
{
    (
        store.clone() as Arc<dyn PuzzleStore>,
        store as Arc<dyn ProfileStore>,
    )
}

/// Print the board: submitted rows coloured, pending row, empty rows
fn render_board(state: &GameState) {
    println!();
    for row in state.rows() {
        let mut line = String::new();
        for (letter, score) in row.word().letters().iter().zip(row.scores().iter()) {
            line.push_str(&tile(*letter as char, *score));
        }
        println!("  {}", line);
    }

    let drawn = state.rows().len();
    if state.status() == GameStatus::Playing && drawn < MAX_GUESSES {
        let mut line = String::new();
        for c in state.buffer().chars() {
            line.push_str(&format!(" {} ", c));
        }
        for _ in state.buffer().chars().count()..WORD_LENGTH {
            line.push_str(" _ ");
        }
        println!("  {}", line);
        for _ in drawn + 1..MAX_GUESSES {
            println!("   .  .  .  .  . ");
        }
    }
    println!();
}

fn tile(letter: char, score: LetterScore) -> String {
    let cell = format!(" {} ", letter);
    match score {
        LetterScore::Correct => cell.black().on_green().to_string(),
        LetterScore::Present => cell.black().on_yellow().to_string(),
        LetterScore::Absent => cell.white().on_dark_grey().to_string(),
    }
}

const KEY_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Print the on-screen keyboard with each letter's best-known status
fn render_keyboard(keyboard: &KeyboardState) {
    for (i, keys) in KEY_ROWS.iter().enumerate() {
        let mut line = String::new();
        for c in keys.chars() {
            let cap = format!("{} ", c);
            let styled = match keyboard.status(c) {
                KeyStatus::Correct => cap.black().on_green().to_string(),
                KeyStatus::Present => cap.black().on_yellow().to_string(),
                KeyStatus::Absent => cap.dark_grey().to_string(),
                KeyStatus::Unknown => cap,
            };
            line.push_str(&styled);
        }
        println!("{}{}", "  ".repeat(i + 1), line);
    }
    println!();
}
