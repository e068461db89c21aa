//! Core game logic for Pinni
//!
//! Everything here is free of terminal I/O. The engine is a plain state
//! machine that takes the current time as an argument; the controller pairs it
//! with a tokio-driven clock.

pub mod action;
pub mod clock;
pub mod config;
pub mod controller;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use clock::{ClockEvent, GameClock};
pub use config::GameConfig;
pub use controller::GameController;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use state::{Board, Character, GameState, HungerClock, Position};
