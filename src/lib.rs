//! Pinni - keep a hungry cat fed on a wrapping grid
//!
//! This library provides:
//! - Core game logic: grid math, the state machine, and its clock (game module)
//! - Key mapping and state-gated dispatch (input module)
//! - TUI rendering (render module)
//! - In-memory session stats (metrics module)
//! - The interactive terminal front end (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
