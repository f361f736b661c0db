//! Drag-to-throw gesture mapping
//!
//! The player grabs the staged ball, pulls back and releases like a
//! slingshot: the launch direction is opposite to the drag.

use glam::Vec2;

use super::state::{GameEvent, SimState};
use crate::settings::Tuning;

/// What a pointer release did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrowOutcome {
    /// No staged ball or no armed drag
    NoGesture,
    /// Drag too short; the ball stays staged
    Cancelled,
    /// Ball launched and a new one staged
    Thrown { ball_id: u32, vel: Vec2 },
}

/// Map a slingshot pull to a launch velocity.
///
/// Returns `None` when the (clamped) pull is at or below the minimum
/// gesture length. The power clamp keeps the pull direction.
pub fn launch_velocity(pull: Vec2, tuning: &Tuning) -> Option<Vec2> {
    let raw = pull.length();
    let magnitude = raw.min(tuning.max_drag_distance);
    if raw <= 0.0 || magnitude <= tuning.min_drag_distance {
        return None;
    }
    let scale = magnitude / raw;
    Some(Vec2::new(
        pull.x * scale * tuning.drag_power_scale * tuning.drag_power_x,
        pull.y * scale * tuning.drag_power_scale * tuning.drag_power_y,
    ))
}

/// Pointer pressed at surface position `p`. Returns whether a drag was armed.
pub fn pointer_down(state: &mut SimState, p: Vec2) -> bool {
    let capture_factor = state.tuning.capture_radius_factor;
    let Some(ball) = state.staged.as_mut() else {
        return false;
    };
    if ball.pos.distance(p) < ball.radius * capture_factor {
        ball.drag.arm(p);
        return true;
    }
    false
}

/// Pointer moved to surface position `p`
pub fn pointer_move(state: &mut SimState, p: Vec2) {
    if let Some(ball) = state.staged.as_mut() {
        if ball.drag.is_dragging {
            ball.drag.current = Some(p);
        }
    }
}

/// Pointer released: throw the staged ball or cancel the gesture
pub fn pointer_up(state: &mut SimState, now_ms: f64) -> ThrowOutcome {
    let Some(ball) = state.staged.as_mut() else {
        return ThrowOutcome::NoGesture;
    };
    let Some(pull) = ball.drag.pull() else {
        ball.drag.clear();
        return ThrowOutcome::NoGesture;
    };

    let Some(vel) = launch_velocity(pull, &state.tuning) else {
        ball.drag.clear();
        return ThrowOutcome::Cancelled;
    };

    let Some(mut ball) = state.staged.take() else {
        return ThrowOutcome::NoGesture;
    };
    ball.launch(vel, now_ms);
    let ball_id = ball.id;
    log::debug!("Ball {} thrown with velocity ({:.2}, {:.2})", ball_id, vel.x, vel.y);

    state.balls.push(ball);
    state.spawn_staged_ball();
    state.push_event(GameEvent::Thrown { ball_id, vel });

    ThrowOutcome::Thrown { ball_id, vel }
}
