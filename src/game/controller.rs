use anyhow::Result;
use tokio::time::Instant;
use tracing::info;

use super::{
    action::Direction,
    clock::{ClockEvent, GameClock},
    config::GameConfig,
    engine::{GameEngine, StepResult},
    state::{Board, GameState},
};

/// Couples the state machine to its clock.
///
/// The clock runs exactly while the engine is `Playing`: starting a session
/// starts it, the step that ends the game stops it.
pub struct GameController {
    engine: GameEngine,
    clock: GameClock,
}

impl GameController {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self::from_engine(GameEngine::new(config)?))
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Ok(Self::from_engine(GameEngine::with_seed(config, seed)?))
    }

    fn from_engine(engine: GameEngine) -> Self {
        let clock = GameClock::new(engine.config().tick_period);
        Self { engine, clock }
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn state(&self) -> GameState {
        self.engine.state()
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Start or restart a session. Ignored while one is running.
    pub fn start(&mut self) -> bool {
        if !self.engine.start(Instant::now()) {
            return false;
        }
        // Whatever the previous session left scheduled belongs to it
        self.clock.cancel_fed_expiry();
        if self.clock.start() {
            info!(
                session = self.engine.session(),
                period = ?self.clock.period(),
                "clock started"
            );
        }
        true
    }

    pub fn request_direction_change(&mut self, direction: Direction) -> bool {
        self.engine.request_direction_change(direction)
    }

    /// Wait for the next clock event
    pub async fn next_event(&mut self) -> ClockEvent {
        self.clock.next_event().await
    }

    /// Apply a clock event. Returns the step result for ticks.
    pub fn handle_clock_event(&mut self, event: ClockEvent) -> Option<StepResult> {
        match event {
            ClockEvent::Tick => Some(self.tick()),
            ClockEvent::FedIndicatorExpired { session } => {
                self.engine.clear_fed_indicator(session);
                None
            }
        }
    }

    fn tick(&mut self) -> StepResult {
        let now = Instant::now();
        let result = self.engine.advance(now);

        if result.info.ate_food {
            let until = now + self.engine.config().fed_indicator_duration;
            self.clock.schedule_fed_expiry(self.engine.session(), until);
        }

        if result.terminated && self.clock.stop() {
            info!(session = self.engine.session(), "clock stopped at game over");
        }

        result
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }
}
