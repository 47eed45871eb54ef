use std::time::Duration;

// ============================================================================
// Board
// ============================================================================

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

/// Side length of the square next-piece preview panel.
pub const PREVIEW_SIZE: usize = 4;

// Scoring
pub const LINE_CLEAR_BONUS: u32 = 100;

// Timing (in milliseconds)
const GRAVITY_INTERVAL_MS: u64 = 200;
const FRAME_INTERVAL_MS: u64 = 10;
const INPUT_POLL_MS: u64 = 10;
const COMMAND_QUEUE_CAPACITY: usize = 32;

// ============================================================================
// Runtime timings
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Time between two gravity steps.
    pub gravity_interval: Duration,
    /// Pause at the end of every loop iteration.
    pub frame_interval: Duration,
    /// How long the input reader waits for a key before rechecking the game-over flag.
    pub input_poll_interval: Duration,
    /// Commands beyond this many pending ones are dropped.
    pub command_queue_capacity: usize,
}

impl GameConfig {
    pub fn with_gravity_interval(mut self, interval: Duration) -> Self {
        self.gravity_interval = interval;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity_interval: Duration::from_millis(GRAVITY_INTERVAL_MS),
            frame_interval: Duration::from_millis(FRAME_INTERVAL_MS),
            input_poll_interval: Duration::from_millis(INPUT_POLL_MS),
            command_queue_capacity: COMMAND_QUEUE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gravity_is_200ms() {
        let config = GameConfig::default();
        assert_eq!(config.gravity_interval, Duration::from_millis(200));
        assert!(config.command_queue_capacity > 0);
    }

    #[test]
    fn builders_override_timings() {
        let config = GameConfig::default()
            .with_gravity_interval(Duration::from_millis(1))
            .with_frame_interval(Duration::ZERO);
        assert_eq!(config.gravity_interval, Duration::from_millis(1));
        assert_eq!(config.frame_interval, Duration::ZERO);
        assert_eq!(config.input_poll_interval, Duration::from_millis(10));
    }
}
