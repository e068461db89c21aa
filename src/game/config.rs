use anyhow::{Result, ensure};
use std::time::Duration;

/// Cells per side of the square board
pub const GRID_SIZE: i32 = 16;
/// Side length of one cell when drawn by a pixel-based front end
pub const CELL_SIZE_PX: u32 = 24;
/// Interval between simulation ticks
pub const TICK_PERIOD: Duration = Duration::from_millis(180);
/// How long Pinni survives without food
pub const HUNGER_DURATION: Duration = Duration::from_millis(5000);
/// How long the "Meow!" feedback stays up after a meal
pub const FED_INDICATOR_DURATION: Duration = Duration::from_millis(800);

/// Configuration for the game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Cells per side of the (square) grid
    pub grid_size: i32,
    /// Pixel size of one cell
    pub cell_size_px: u32,
    /// Fixed simulation tick period
    pub tick_period: Duration,
    /// Time from the last meal until starvation
    pub hunger_duration: Duration,
    /// Lifetime of the transient fed indicator
    pub fed_indicator_duration: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            cell_size_px: CELL_SIZE_PX,
            tick_period: TICK_PERIOD,
            hunger_duration: HUNGER_DURATION,
            fed_indicator_duration: FED_INDICATOR_DURATION,
        }
    }
}

impl GameConfig {
    /// Board dimension in pixels
    pub fn board_dimension_px(&self) -> u32 {
        self.grid_size as u32 * self.cell_size_px
    }

    /// The cell the cat starts every session on
    pub fn center(&self) -> (i32, i32) {
        (self.grid_size / 2, self.grid_size / 2)
    }

    /// Check the invariants the simulation relies on.
    ///
    /// Food placement resamples until it misses the cat, so the board needs
    /// at least two cells per side.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_size >= 2,
            "grid size must be at least 2, got {}",
            self.grid_size
        );
        ensure!(!self.tick_period.is_zero(), "tick period must be non-zero");
        ensure!(
            !self.hunger_duration.is_zero(),
            "hunger duration must be non-zero"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 16);
        assert_eq!(config.tick_period, Duration::from_millis(180));
        assert_eq!(config.hunger_duration, Duration::from_millis(5000));
        assert_eq!(config.board_dimension_px(), 384);
        assert_eq!(config.center(), (8, 8));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        let config = GameConfig {
            grid_size: 1,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("grid size"));
    }

    #[test]
    fn test_rejects_zero_durations() {
        let config = GameConfig {
            tick_period: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            hunger_duration: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
