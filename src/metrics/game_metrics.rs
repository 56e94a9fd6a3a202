use std::time::{Duration, Instant};

/// Session counters shown in the header. Nothing here outlives the process.
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub best_length: usize,
    pub food_eaten: u32,
    pub crashes: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 1,
            food_eaten: 0,
            crashes: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.round_start.elapsed();
    }

    pub fn on_food_eaten(&mut self, length: usize) {
        self.food_eaten += 1;
        self.best_length = self.best_length.max(length);
    }

    /// A crash ends the round; the clock starts over with the fresh snake
    pub fn on_crash(&mut self) {
        self.crashes += 1;
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
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
