use tracing::trace;

use super::handler::KeyAction;
use crate::game::{GameController, GameState};

/// What happened to a routed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The input reached the game and changed something
    Applied,
    /// Not valid in the current state, or a rejected reversal
    Ignored,
    /// The shell should exit
    Quit,
}

/// Gates key actions on the current game state and forwards them.
///
/// Holds no game state of its own.
pub struct InputRouter;

impl InputRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn dispatch(&self, action: KeyAction, game: &mut GameController) -> Dispatch {
        let state = game.state();
        let applied = match action {
            KeyAction::Quit => return Dispatch::Quit,
            KeyAction::Move(direction) if state == GameState::Playing => {
                game.request_direction_change(direction)
            }
            KeyAction::Confirm if state.can_start() => game.start(),
            KeyAction::Move(_) | KeyAction::Confirm | KeyAction::None => false,
        };

        if applied {
            Dispatch::Applied
        } else {
            trace!(?action, ?state, "input ignored");
            Dispatch::Ignored
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig};

    fn game() -> GameController {
        GameController::with_seed(GameConfig::default(), 7).unwrap()
    }

    #[tokio::test]
    async fn test_moves_ignored_until_playing() {
        let router = InputRouter::new();
        let mut game = game();

        assert_eq!(
            router.dispatch(KeyAction::Move(Direction::Up), &mut game),
            Dispatch::Ignored
        );
        assert_eq!(game.board().character.pending_direction, None);
    }

    #[tokio::test]
    async fn test_confirm_starts_from_idle() {
        let router = InputRouter::new();
        let mut game = game();

        assert_eq!(router.dispatch(KeyAction::Confirm, &mut game), Dispatch::Applied);
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.is_clock_running());

        // Confirm is not a mid-game restart
        let session = game.board().session;
        assert_eq!(router.dispatch(KeyAction::Confirm, &mut game), Dispatch::Ignored);
        assert_eq!(game.board().session, session);
    }

    #[tokio::test]
    async fn test_turns_while_playing() {
        let router = InputRouter::new();
        let mut game = game();
        router.dispatch(KeyAction::Confirm, &mut game);

        assert_eq!(
            router.dispatch(KeyAction::Move(Direction::Down), &mut game),
            Dispatch::Applied
        );
        assert_eq!(game.board().character.heading(), Direction::Down);

        assert_eq!(
            router.dispatch(KeyAction::Move(Direction::Left), &mut game),
            Dispatch::Ignored
        );
        assert_eq!(game.board().character.heading(), Direction::Down);
    }

    #[tokio::test]
    async fn test_quit_and_noise() {
        let router = InputRouter::new();
        let mut game = game();

        assert_eq!(router.dispatch(KeyAction::None, &mut game), Dispatch::Ignored);
        assert_eq!(router.dispatch(KeyAction::Quit, &mut game), Dispatch::Quit);
        assert_eq!(game.state(), GameState::Idle);
    }
}
