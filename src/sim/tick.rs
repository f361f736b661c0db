//! Per-frame simulation tick
//!
//! One tick is one displayed frame. Order matters: the scoring test runs on
//! the post-collision position so a rim bounce and a basket are never both
//! taken from the same pass.

use super::collision::resolve_collisions;
use super::hoop::update_hoop;
use super::particles;
use super::scoring::{self, Basket};
use super::state::{GameEvent, SimState};

/// Inputs for a single tick, supplied by the session layer
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Whether the game is running (physics advances only when true)
    pub active: bool,
    /// Seconds left in the session (drives the hoop difficulty ramp)
    pub time_remaining: f32,
    /// Wall-clock time in milliseconds
    pub now_ms: f64,
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimState, input: &TickInput) {
    let Some(viewport) = state.viewport else {
        return;
    };

    update_hoop(
        &mut state.hoop,
        input.active,
        input.time_remaining,
        viewport.width,
        &state.tuning,
    );

    // Frozen while inactive
    if !input.active {
        return;
    }
    state.time_ticks += 1;

    // Drop expired or lost balls before moving anything
    let ttl = state.tuning.ball_ttl_ms;
    let fall_limit = viewport.height + state.tuning.fall_off_margin;
    let before = state.balls.len();
    state
        .balls
        .retain(|b| b.age_ms(input.now_ms) < ttl && b.pos.y <= fall_limit);
    if state.balls.len() != before {
        log::trace!("Pruned {} balls", before - state.balls.len());
    }

    let mut baskets: Vec<(u32, Basket)> = Vec::new();
    for ball in state.balls.iter_mut() {
        let tuning = &state.tuning;

        // Forces
        ball.vel.y += tuning.gravity;
        ball.vel *= tuning.friction;

        // Integrate
        ball.pos += ball.vel;

        let floor_y = viewport.height - ball.radius - tuning.floor_height_offset;
        resolve_collisions(ball, &state.hoop, viewport.width, floor_y, tuning);

        if let Some(basket) =
            scoring::evaluate(ball, &state.hoop, &mut state.combo, input.now_ms, tuning)
        {
            baskets.push((ball.id, basket));
        }
    }

    for (ball_id, basket) in baskets {
        log::debug!(
            "Ball {} scored {} (streak {}, swish {})",
            ball_id,
            basket.points,
            basket.streak,
            basket.swish
        );
        state.push_event(GameEvent::Score {
            ball_id,
            points: basket.points,
            combo_shot: basket.combo_shot(),
            streak: basket.streak,
            swish: basket.swish,
            pos: basket.pos,
        });
        state.burst_particles(basket.pos);
    }

    particles::update(&mut state.particles, state.tuning.particle_decay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::gesture;
    use crate::sim::state::Ball;
    use glam::Vec2;
    use proptest::prelude::*;

    const W: f32 = 400.0;
    const H: f32 = 800.0;

    fn state() -> SimState {
        let mut state = SimState::new(11, Tuning::default());
        state.resize(W, H);
        state
    }

    fn input(now_ms: f64) -> TickInput {
        TickInput {
            active: true,
            time_remaining: 170.0,
            now_ms,
        }
    }

    fn add_ball(state: &mut SimState, pos: Vec2, vel: Vec2, now_ms: f64) -> u32 {
        let id = state.next_entity_id();
        let mut ball = Ball::new(id, pos, 18.0);
        ball.launch(vel, now_ms);
        state.balls.push(ball);
        id
    }

    fn score_events(state: &mut SimState) -> Vec<(u32, bool)> {
        state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Score {
                    points, combo_shot, ..
                } => Some((points, combo_shot)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_gravity_then_damping() {
        let mut state = state();
        add_ball(&mut state, Vec2::new(200.0, 400.0), Vec2::new(3.0, -4.0), 0.0);
        tick(&mut state, &input(16.0));

        let ball = &state.balls[0];
        assert!((ball.vel.y - (-4.0 + 0.5) * 0.99).abs() < 1e-5);
        assert!((ball.vel.x - 3.0 * 0.99).abs() < 1e-5);
        assert!((ball.pos - Vec2::new(200.0 + 2.97, 400.0 - 3.465)).length() < 1e-4);
    }

    #[test]
    fn test_inactive_tick_freezes_everything() {
        let mut state = state();
        add_ball(&mut state, Vec2::new(200.0, 400.0), Vec2::new(3.0, -4.0), 0.0);
        state.burst_particles(Vec2::new(10.0, 10.0));
        state.hoop.x = 77.0;

        let frozen = TickInput {
            active: false,
            time_remaining: 10.0,
            now_ms: 100_000.0,
        };
        tick(&mut state, &frozen);

        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(200.0, 400.0));
        assert_eq!(state.particles.len(), 15);
        assert_eq!(state.hoop.x, 77.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_ball_expires_after_ttl_on_screen() {
        let mut state = state();
        add_ball(&mut state, Vec2::new(200.0, 400.0), Vec2::ZERO, 1000.0);
        tick(&mut state, &input(4999.0));
        assert_eq!(state.balls.len(), 1);
        tick(&mut state, &input(5000.0));
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_ball_dropped_when_far_below() {
        let mut state = state();
        add_ball(&mut state, Vec2::new(200.0, H + 201.0), Vec2::ZERO, 0.0);
        tick(&mut state, &input(10.0));
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_basket_scores_once() {
        let mut state = state();
        let center = state.hoop.center_x();
        // Just above the rim line, falling straight through the middle
        add_ball(&mut state, Vec2::new(center, 146.0), Vec2::new(0.0, 6.0), 0.0);

        tick(&mut state, &input(16.0));
        assert_eq!(score_events(&mut state), vec![(3, false)]);
        assert!(state.balls[0].scored);
        assert_eq!(state.particles.len(), 15);

        // Still inside the band next tick, but latched
        tick(&mut state, &input(32.0));
        assert!(score_events(&mut state).is_empty());
        assert_eq!(state.combo.streak, 1);
    }

    #[test]
    fn test_consecutive_baskets_build_combo() {
        let mut state = state();
        let center = state.hoop.center_x();

        add_ball(&mut state, Vec2::new(center, 146.0), Vec2::new(0.0, 6.0), 0.0);
        tick(&mut state, &input(16.0));
        add_ball(&mut state, Vec2::new(center + 20.0, 146.0), Vec2::new(0.0, 6.0), 900.0);
        tick(&mut state, &input(1000.0));

        // Second basket: no swish (20px off center), streak 2 -> 2 + 1
        assert_eq!(score_events(&mut state), vec![(3, false), (3, true)]);
        assert_eq!(state.combo.streak, 2);
    }

    #[test]
    fn test_rim_bounce_does_not_score() {
        let mut state = state();
        let left = state.hoop.left_rim();
        add_ball(&mut state, left + Vec2::new(4.0, -10.0), Vec2::new(0.0, 4.0), 0.0);
        tick(&mut state, &input(16.0));

        let ball = &state.balls[0];
        assert!(ball.vel.y < 0.0);
        assert!(!ball.scored);
        assert!(score_events(&mut state).is_empty());
    }

    #[test]
    fn test_throw_then_fly() {
        let mut state = state();
        let spawn = Vec2::new(W / 2.0, H - 150.0);
        assert!(gesture::pointer_down(&mut state, spawn));
        gesture::pointer_move(&mut state, spawn + Vec2::new(0.0, 120.0));
        gesture::pointer_up(&mut state, 0.0);

        let start_y = state.balls[0].pos.y;
        tick(&mut state, &input(16.0));
        assert!(state.balls[0].pos.y < start_y);
        assert!(!state.staged.as_ref().unwrap().active);
    }

    #[test]
    fn test_hoop_starts_moving_late() {
        let mut state = state();
        let centered = state.hoop.x;
        let mut late = input(0.0);
        late.time_remaining = 119.0;
        tick(&mut state, &late);
        assert!((state.hoop.x - (centered + 2.5)).abs() < 1e-4);
    }

    #[test]
    fn test_hoop_stays_reachable_after_shrink() {
        let mut state = SimState::new(11, Tuning::default());
        state.resize(800.0, 800.0);
        let mut late = input(0.0);
        late.time_remaining = 100.0;
        for _ in 0..170 {
            tick(&mut state, &late);
        }
        assert!(state.hoop.x > 280.0);

        state.resize(W, H);
        let step = state.tuning.hoop_speed;
        for _ in 0..600 {
            tick(&mut state, &late);
            assert!(state.hoop.x >= 20.0 - step - 1e-3);
            assert!(state.hoop.x <= 280.0 + step + 1e-3);
        }
    }

    proptest! {
        #[test]
        fn gravity_accelerates_free_balls(
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
        ) {
            let mut state = state();
            // Open air, well clear of hoop, walls and floor
            add_ball(&mut state, Vec2::new(200.0, 450.0), Vec2::new(vx, vy), 0.0);
            tick(&mut state, &input(16.0));
            let ball = &state.balls[0];
            prop_assert!((ball.vel.y - (vy + 0.5) * 0.99).abs() < 1e-4);
        }
    }
}
