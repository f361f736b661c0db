//! Collision detection and response
//!
//! Floor and walls are axis-aligned clamps with a lossy bounce. The rim is
//! modelled as two point obstacles (its endpoints); a touching ball has its
//! velocity reversed and is pushed out along the endpoint-to-ball line so
//! it cannot stick to or tunnel through the rim.

use glam::Vec2;

use super::state::{Ball, Hoop};
use crate::push_out;
use crate::settings::Tuning;

/// Extra reach of a rim endpoint beyond the ball radius
pub const RIM_CONTACT_SLOP: f32 = 5.0;
/// Distance beyond the ball radius a touching ball is pushed out to
pub const RIM_PUSHOUT_SLOP: f32 = 6.0;

/// Result of a rim endpoint check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point (the rim endpoint)
    pub point: Vec2,
    /// Distance from the endpoint to the ball center
    pub distance: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            distance: 0.0,
        }
    }
}

/// Check a ball against a single rim endpoint
pub fn ball_rim_collision(ball_pos: Vec2, ball_radius: f32, rim: Vec2) -> CollisionResult {
    let distance = ball_pos.distance(rim);
    if distance < ball_radius + RIM_CONTACT_SLOP {
        return CollisionResult {
            hit: true,
            point: rim,
            distance,
        };
    }
    CollisionResult::miss()
}

/// Clamp a ball to the floor line, bouncing it back up
pub fn resolve_floor(ball: &mut Ball, floor_y: f32, bounce: f32) -> bool {
    if ball.pos.y > floor_y {
        ball.pos.y = floor_y;
        ball.vel.y *= -bounce;
        return true;
    }
    false
}

/// Clamp a ball inside the side walls
pub fn resolve_walls(ball: &mut Ball, viewport_width: f32, bounce: f32) -> bool {
    if ball.pos.x < ball.radius {
        ball.pos.x = ball.radius;
        ball.vel.x *= -bounce;
        return true;
    }
    if ball.pos.x > viewport_width - ball.radius {
        ball.pos.x = viewport_width - ball.radius;
        ball.vel.x *= -bounce;
        return true;
    }
    false
}

/// Bounce a ball off both rim endpoints (left first, then right).
/// Returns how many endpoints it hit.
pub fn resolve_rim(ball: &mut Ball, hoop: &Hoop, tuning: &Tuning) -> usize {
    let mut hits = 0;
    for rim in [hoop.left_rim(), hoop.right_rim()] {
        let result = ball_rim_collision(ball.pos, ball.radius, rim);
        if result.hit {
            ball.vel *= -tuning.rim_restitution;
            ball.pos = push_out(result.point, ball.pos, ball.radius + RIM_PUSHOUT_SLOP);
            hits += 1;
        }
    }
    hits
}

/// Resolve every collision for one ball, in floor, wall, rim order
pub fn resolve_collisions(
    ball: &mut Ball,
    hoop: &Hoop,
    viewport_width: f32,
    floor_y: f32,
    tuning: &Tuning,
) {
    resolve_floor(ball, floor_y, tuning.bounce_factor);
    resolve_walls(ball, viewport_width, tuning.bounce_factor);
    if resolve_rim(ball, hoop, tuning) > 0 {
        log::trace!("Ball {} hit the rim at ({:.1}, {:.1})", ball.id, ball.pos.x, ball.pos.y);
    }
}
