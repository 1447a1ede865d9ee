//! Skloop - Daily Word-Guess Game Engine

pub mod core;
pub mod engine;
pub mod session;
pub mod store;
