use anyhow::Result;
use rand::{SeedableRng, rngs::StdRng};
use tokio::time::Instant;
use tracing::{debug, info, trace};

use super::{
    action::Direction,
    config::GameConfig,
    grid,
    state::{Board, Character, GameState, HungerClock, Position},
};

/// Shown before the first game
pub const IDLE_MESSAGE: &str = "Feed Pinni 🐱 with 🍟 or she will die!";
/// Shown once the hunger clock runs out
pub const STARVED_MESSAGE: &str = "Pinni 🐱 died of hunger!";

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the cat landed on the food this step
    pub ate_food: bool,
    /// Hunger percentage after the step
    pub hunger: f64,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// False when the call was ignored because no game was running
    pub advanced: bool,
    /// Whether this step (or an earlier one) ended the game
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game state machine: Idle -> Playing -> GameOver -> Playing ...
///
/// Time is always passed in by the caller so the engine stays deterministic;
/// driving it on a real timer is [`GameController`](super::GameController)'s job.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    board: Board,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self> {
        // Food placement resamples forever on a board without a free cell
        config.validate()?;

        let (cx, cy) = config.center();
        let center = Position::new(cx, cy);
        let food = grid::random_position(&mut rng, config.grid_size, Some(center));
        let mut board = Board::new(
            Character::new(center, Direction::Right),
            food,
            HungerClock::new(config.hunger_duration, Instant::now()),
            config.grid_size,
        );
        board.message = IDLE_MESSAGE.to_string();

        Ok(Self { config, rng, board })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.board.state
    }

    pub fn session(&self) -> u64 {
        self.board.session
    }

    /// Begin a fresh session. Ignored while a game is already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if !self.board.state.can_start() {
            return false;
        }

        let (cx, cy) = self.config.center();
        let center = Position::new(cx, cy);

        self.board.character = Character::new(center, Direction::Right);
        self.board.food = grid::random_position(&mut self.rng, self.config.grid_size, Some(center));
        self.board.hunger = HungerClock::new(self.config.hunger_duration, now);
        self.board.fed = false;
        self.board.message.clear();
        self.board.session += 1;
        self.board.state = GameState::Playing;

        info!(
            session = self.board.session,
            food_x = self.board.food.x,
            food_y = self.board.food.y,
            "session started"
        );
        true
    }

    /// Queue a turn for the next tick. Reversals and calls outside a running
    /// game are dropped.
    pub fn request_direction_change(&mut self, direction: Direction) -> bool {
        if !self.board.is_playing() {
            return false;
        }

        // Neither the queued turn nor the last move may be reversed
        let cat = &mut self.board.character;
        if cat.heading().is_opposite(direction) || cat.direction.is_opposite(direction) {
            trace!(current = ?cat.direction, requested = ?direction, "reversal rejected");
            return false;
        }

        cat.pending_direction = Some(direction);
        true
    }

    /// Execute one tick of the game
    pub fn advance(&mut self, now: Instant) -> StepResult {
        if !self.board.is_playing() {
            return StepResult {
                advanced: false,
                terminated: self.board.state == GameState::GameOver,
                info: StepInfo {
                    ate_food: false,
                    hunger: self.board.hunger.percentage(),
                },
            };
        }

        let size = self.config.grid_size;

        // Move one cell, wrapping at the edges
        let cat = &mut self.board.character;
        if let Some(direction) = cat.pending_direction.take() {
            cat.direction = direction;
        }
        let next = grid::wrap_position(cat.position.moved_in_direction(cat.direction), size);
        cat.position = next;

        let ate_food = next == self.board.food;
        if ate_food {
            self.board.hunger.feed(now);
            self.board.fed = true;
            self.board.food = grid::random_position(&mut self.rng, size, Some(next));
            debug!(
                session = self.board.session,
                food_x = self.board.food.x,
                food_y = self.board.food.y,
                "fed, food relocated"
            );
        }

        let hunger = self.board.hunger.update(now);
        let terminated = self.board.hunger.is_starved(now);

        if terminated {
            self.board.state = GameState::GameOver;
            self.board.message = STARVED_MESSAGE.to_string();
            info!(session = self.board.session, "starved, game over");
        } else {
            trace!(x = next.x, y = next.y, hunger, "tick");
        }

        StepResult {
            advanced: true,
            terminated,
            info: StepInfo { ate_food, hunger },
        }
    }

    /// Drop the fed indicator raised during `session`. A stale session is
    /// ignored so a late timer cannot touch a newer game.
    pub fn clear_fed_indicator(&mut self, session: u64) -> bool {
        if session != self.board.session || !self.board.fed {
            return false;
        }
        self.board.fed = false;
        true
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
