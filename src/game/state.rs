use std::time::Duration;
use tokio::time::Instant;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction (unwrapped)
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Idle,
    Playing,
    GameOver,
}

impl GameState {
    /// Whether a confirm input may (re)start the game
    pub fn can_start(&self) -> bool {
        matches!(self, GameState::Idle | GameState::GameOver)
    }
}

/// The cat
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub position: Position,
    /// Direction used by the last move
    pub direction: Direction,
    /// Accepted turn waiting for the next tick
    pub pending_direction: Option<Direction>,
}

impl Character {
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
            pending_direction: None,
        }
    }

    /// The direction the next tick will move in
    pub fn heading(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }
}

/// Time since the last meal, expressed as a draining percentage
#[derive(Debug, Clone, PartialEq)]
pub struct HungerClock {
    last_fed: Instant,
    duration: Duration,
    percentage: f64,
}

impl HungerClock {
    /// A clock for a cat that has just eaten
    pub fn new(duration: Duration, now: Instant) -> Self {
        Self {
            last_fed: now,
            duration,
            percentage: 100.0,
        }
    }

    pub fn feed(&mut self, now: Instant) {
        self.last_fed = now;
        self.percentage = 100.0;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_fed)
    }

    /// Recompute the percentage at `now` and return it
    pub fn update(&mut self, now: Instant) -> f64 {
        let elapsed = self.elapsed(now);
        let remaining = self.duration.saturating_sub(elapsed);
        self.percentage =
            (remaining.as_secs_f64() / self.duration.as_secs_f64() * 100.0).clamp(0.0, 100.0);
        self.percentage
    }

    pub fn is_starved(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.duration
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn last_fed(&self) -> Instant {
        self.last_fed
    }
}

/// Everything the front end needs to draw a frame
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub state: GameState,
    pub character: Character,
    pub food: Position,
    pub hunger: HungerClock,
    /// Transient "Meow!" feedback, never read by the simulation
    pub fed: bool,
    pub message: String,
    /// Bumped on every start so late timers can recognise a retired session
    pub session: u64,
    pub grid_size: i32,
}

impl Board {
    pub fn new(character: Character, food: Position, hunger: HungerClock, grid_size: i32) -> Self {
        Self {
            state: GameState::Idle,
            character,
            food,
            hunger,
            fed: false,
            message: String::new(),
            session: 0,
            grid_size,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }
}
