//! Session layer: daily puzzle orchestration and outcome persistence

pub mod daily;
pub mod recorder;

pub use daily::{DailyPlay, GameSession};
pub use recorder::OutcomeRecorder;
