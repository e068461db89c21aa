use std::time::{Duration, Instant};

/// In-memory stats for the current run of the program
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub meals: u32,
    pub best_meals: u32,
    pub games_played: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            meals: 0,
            best_meals: 0,
            games_played: 0,
            running: false,
        }
    }

    /// Refresh the survival timer; frozen between games
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.meals = 0;
        self.running = true;
    }

    pub fn on_meal(&mut self) {
        self.meals += 1;
    }

    pub fn on_game_over(&mut self) {
        self.update();
        self.running = false;
        self.games_played += 1;
        if self.meals > self.best_meals {
            self.best_meals = self.meals;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
