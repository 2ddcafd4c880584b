use std::time::{Duration, Instant};

/// Per-session play statistics; nothing here outlives the process
pub struct GameMetrics {
    /// Play time banked from earlier running spans of the current game
    banked: Duration,
    /// Start of the current running span, if the clock is running
    running_since: Option<Instant>,
    pub high_score: u32,
    pub games_played: u32,
    /// Whether the last finished game beat every earlier one
    pub new_best: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            banked: Duration::ZERO,
            running_since: Some(Instant::now()),
            high_score: 0,
            games_played: 0,
            new_best: false,
        }
    }

    /// Play time of the current game, excluding paused spans
    pub fn elapsed(&self) -> Duration {
        self.banked + self.running_since.map_or(Duration::ZERO, |start| start.elapsed())
    }

    pub fn on_game_start(&mut self) {
        self.new_best = false;
        self.banked = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    /// Stop the clock; a no-op when already stopped
    pub fn on_pause(&mut self) {
        if let Some(start) = self.running_since.take() {
            self.banked += start.elapsed();
        }
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.on_pause();
        self.games_played += 1;
        self.new_best = final_score > self.high_score;
        if self.new_best {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_duration(Duration::from_secs(125)), "02:05");
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00");
        assert_eq!(format_duration(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);
        assert!(metrics.new_best);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);
        assert!(!metrics.new_best);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15); // Should update
        assert_eq!(metrics.games_played, 3);
        assert!(metrics.new_best);

        metrics.on_game_start();
        assert!(!metrics.new_best);
    }

    #[test]
    fn test_tying_the_best_is_not_a_new_best() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(8);
        metrics.on_game_start();

        metrics.on_game_over(8);
        assert_eq!(metrics.high_score, 8);
        assert!(!metrics.new_best);

        metrics.on_game_over(0);
        assert!(!metrics.new_best);
    }

    #[test]
    fn test_clock_stops_while_paused() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(30));
        metrics.on_pause();
        let frozen = metrics.elapsed();
        assert!(frozen.as_millis() >= 30);

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(metrics.elapsed(), frozen);

        // Pausing twice must not bank anything extra
        metrics.on_pause();
        assert_eq!(metrics.elapsed(), frozen);

        metrics.on_resume();
        assert!(metrics.elapsed() >= frozen);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        assert!(metrics.elapsed().as_millis() >= 50);

        metrics.on_game_start();
        assert!(metrics.elapsed().as_millis() < 50);
    }
}
