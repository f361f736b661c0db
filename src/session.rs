//! Session bookkeeping
//!
//! The scoreboard and countdown that sit on top of the simulation. The
//! simulation only reports baskets; totals and the game-over moment live here.

use serde::{Deserialize, Serialize};

use crate::driver::ScoreListener;

/// Running totals for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub shots_made: u32,
    pub shots_taken: u32,
    /// Combo as shown on the HUD
    pub combo: u32,
    pub max_combo: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Made shots over thrown shots (0 before the first throw)
    pub fn accuracy(&self) -> f32 {
        if self.shots_taken == 0 {
            return 0.0;
        }
        self.shots_made as f32 / self.shots_taken as f32
    }
}

impl ScoreListener for ScoreBoard {
    fn on_score_update(&mut self, points: u32, is_combo_shot: bool) {
        self.score += u64::from(points);
        self.shots_made += 1;
        if is_combo_shot {
            self.combo += 1;
        } else {
            self.combo = 1;
        }
        self.max_combo = self.max_combo.max(self.combo);
    }

    fn on_throw(&mut self) {
        self.shots_taken += 1;
    }
}

/// Whole-second countdown for a session
#[derive(Debug, Clone, PartialEq)]
pub struct GameClock {
    duration_secs: u32,
    remaining_secs: u32,
    /// Milliseconds accumulated toward the next whole second
    carry_ms: f64,
    running: bool,
}

impl GameClock {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            carry_ms: 0.0,
            running: false,
        }
    }

    /// Reset to full duration and start counting
    pub fn start(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.carry_ms = 0.0;
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resume counting (no-op once expired)
    pub fn resume(&mut self) {
        if self.remaining_secs > 0 {
            self.running = true;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Seconds left, as fed to the simulation each frame
    pub fn time_remaining(&self) -> f32 {
        self.remaining_secs as f32
    }

    /// Advance by `elapsed_ms` of wall time.
    ///
    /// Returns `true` exactly once, on the call where the clock runs out.
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        if !self.running {
            return false;
        }
        self.carry_ms += elapsed_ms;
        while self.carry_ms >= 1000.0 && self.remaining_secs > 0 {
            self.carry_ms -= 1000.0;
            self.remaining_secs -= 1;
        }
        if self.remaining_secs == 0 {
            self.running = false;
            log::info!("Time up");
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoreboard_tracks_combo_like_hud() {
        let mut board = ScoreBoard::new();
        board.on_throw();
        board.on_score_update(2, false);
        board.on_throw();
        board.on_score_update(3, true);
        board.on_throw();
        board.on_score_update(4, true);
        board.on_throw();
        board.on_score_update(2, false);

        assert_eq!(board.score, 11);
        assert_eq!(board.shots_made, 4);
        assert_eq!(board.combo, 1);
        assert_eq!(board.max_combo, 3);
        assert_eq!(board.accuracy(), 1.0);

        board.on_throw();
        assert!((board.accuracy() - 0.8).abs() < 1e-6);

        board.reset();
        assert_eq!(board, ScoreBoard::default());
        assert_eq!(board.accuracy(), 0.0);
    }

    #[test]
    fn test_clock_counts_whole_seconds() {
        let mut clock = GameClock::new(3);
        assert!(!clock.advance(5000.0)); // not started
        assert_eq!(clock.time_remaining(), 3.0);

        clock.start();
        assert!(!clock.advance(999.0));
        assert_eq!(clock.time_remaining(), 3.0);
        assert!(!clock.advance(1.0));
        assert_eq!(clock.time_remaining(), 2.0);
    }

    #[test]
    fn test_clock_pause_and_expiry() {
        let mut clock = GameClock::new(2);
        clock.start();
        clock.pause();
        assert!(!clock.advance(10_000.0));
        assert_eq!(clock.time_remaining(), 2.0);

        clock.resume();
        assert!(clock.advance(2500.0));
        assert!(clock.is_expired());
        assert!(!clock.is_running());
        // Reported once
        assert!(!clock.advance(1000.0));

        clock.resume();
        assert!(!clock.is_running());
    }
}
