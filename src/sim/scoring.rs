//! Scoring and combo evaluation
//!
//! A ball scores once per throw, while falling through a shallow band just
//! below the rim line and clear of both rim endpoints.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Hoop};
use crate::settings::Tuning;

/// Consecutive-score streak
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboTracker {
    pub streak: u32,
    /// Time of the previous successful score (ms)
    pub last_score_ms: Option<f64>,
}

impl ComboTracker {
    /// Register a score at `now_ms` and return the new streak
    pub fn register(&mut self, now_ms: f64, window_ms: f64) -> u32 {
        let within_window = self
            .last_score_ms
            .is_some_and(|last| now_ms - last < window_ms);
        self.streak = if within_window { self.streak + 1 } else { 1 };
        self.last_score_ms = Some(now_ms);
        self.streak
    }
}

/// Point breakdown for one basket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotValue {
    pub points: u32,
    pub swish: bool,
}

/// Whether the ball is inside the scoring window this tick
pub fn in_scoring_window(ball: &Ball, hoop: &Hoop, tuning: &Tuning) -> bool {
    if ball.scored || ball.vel.y <= 0.0 {
        return false;
    }
    let in_band = ball.pos.y > hoop.y && ball.pos.y < hoop.y + tuning.score_band_depth;
    let between_rims = ball.pos.x > hoop.x + tuning.score_rim_inset
        && ball.pos.x < hoop.x + hoop.width - tuning.score_rim_inset;
    in_band && between_rims
}

/// Points for a basket at `x` given the current streak.
///
/// The combo bonus has no ceiling: streak 10 is worth 9 extra points.
pub fn shot_value(x: f32, hoop: &Hoop, streak: u32, tuning: &Tuning) -> ShotValue {
    let swish = (x - hoop.center_x()).abs() < tuning.swish_radius;
    let mut points = tuning.base_points;
    if swish {
        points += tuning.swish_bonus;
    }
    points += streak.saturating_sub(1);
    ShotValue { points, swish }
}

/// Result of a successful scoring test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basket {
    pub points: u32,
    pub streak: u32,
    pub swish: bool,
    pub pos: Vec2,
}

impl Basket {
    pub fn combo_shot(&self) -> bool {
        self.streak > 1
    }
}

/// Test one ball for a basket, latching `scored` and advancing the combo on success
pub fn evaluate(
    ball: &mut Ball,
    hoop: &Hoop,
    combo: &mut ComboTracker,
    now_ms: f64,
    tuning: &Tuning,
) -> Option<Basket> {
    if !in_scoring_window(ball, hoop, tuning) {
        return None;
    }
    ball.scored = true;

    let streak = combo.register(now_ms, tuning.combo_window_ms);
    let value = shot_value(ball.pos.x, hoop, streak, tuning);

    Some(Basket {
        points: value.points,
        streak,
        swish: value.swish,
        pos: ball.pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hoop() -> Hoop {
        let mut hoop = Hoop::new(&Tuning::default());
        hoop.x = 100.0; // rims at 100 and 200, center 150
        hoop
    }

    fn falling_ball(x: f32, y: f32) -> Ball {
        let mut ball = Ball::new(1, Vec2::new(x, y), 18.0);
        ball.active = true;
        ball.vel = Vec2::new(0.0, 3.0);
        ball
    }

    #[test]
    fn test_combo_sequence() {
        let mut combo = ComboTracker::default();
        let window = Tuning::default().combo_window_ms;
        let streaks: Vec<u32> = [0.0, 1000.0, 3600.0]
            .iter()
            .map(|&t| combo.register(t, window))
            .collect();
        assert_eq!(streaks, vec![1, 2, 1]);
    }

    #[test]
    fn test_combo_window_is_between_consecutive_scores() {
        let mut combo = ComboTracker::default();
        let window = Tuning::default().combo_window_ms;
        assert_eq!(combo.register(0.0, window), 1);
        assert_eq!(combo.register(1000.0, window), 2);
        // 2000ms after the previous score keeps the streak alive
        assert_eq!(combo.register(3000.0, window), 3);
        // Exactly the window resets
        assert_eq!(combo.register(5500.0, window), 1);
    }

    #[test]
    fn test_plain_shot_is_two_points() {
        let tuning = Tuning::default();
        let value = shot_value(120.0, &hoop(), 1, &tuning);
        assert_eq!(value, ShotValue { points: 2, swish: false });
    }

    #[test]
    fn test_swish_at_combo_five() {
        let tuning = Tuning::default();
        let value = shot_value(155.0, &hoop(), 5, &tuning);
        assert_eq!(value, ShotValue { points: 7, swish: true });
    }

    #[test]
    fn test_combo_bonus_uncapped() {
        let tuning = Tuning::default();
        let value = shot_value(120.0, &hoop(), 40, &tuning);
        assert_eq!(value.points, 2 + 39);
    }

    #[test]
    fn test_evaluate_latches() {
        let tuning = Tuning::default();
        let hoop = hoop();
        let mut combo = ComboTracker::default();
        let mut ball = falling_ball(150.0, 160.0);

        let basket = evaluate(&mut ball, &hoop, &mut combo, 0.0, &tuning).unwrap();
        assert_eq!(basket.points, 3);
        assert!(!basket.combo_shot());
        assert!(ball.scored);

        // Same ball, still in the window: no second basket
        assert!(evaluate(&mut ball, &hoop, &mut combo, 16.0, &tuning).is_none());
        assert_eq!(combo.streak, 1);
    }

    #[test]
    fn test_window_edges() {
        let tuning = Tuning::default();
        let hoop = hoop();

        // Moving up
        let mut ball = falling_ball(150.0, 160.0);
        ball.vel.y = -3.0;
        assert!(!in_scoring_window(&ball, &hoop, &tuning));

        // Above the rim line
        assert!(!in_scoring_window(&falling_ball(150.0, 149.0), &hoop, &tuning));
        // Below the band
        assert!(!in_scoring_window(&falling_ball(150.0, 171.0), &hoop, &tuning));
        // Inside the rim inset
        assert!(!in_scoring_window(&falling_ball(109.0, 160.0), &hoop, &tuning));
        assert!(!in_scoring_window(&falling_ball(191.0, 160.0), &hoop, &tuning));
        assert!(in_scoring_window(&falling_ball(111.0, 160.0), &hoop, &tuning));
    }
}
