//! Hoop patrol controller
//!
//! The hoop holds still at the center for the first third of a session, then
//! patrols left and right for the rest ("calm start, frantic finish").

use super::state::Hoop;
use crate::settings::Tuning;

/// Horizontal range the hoop's left edge may occupy
#[inline]
pub fn patrol_bounds(hoop: &Hoop, viewport_width: f32, tuning: &Tuning) -> (f32, f32) {
    (
        tuning.hoop_edge_margin,
        viewport_width - hoop.width - tuning.hoop_edge_margin,
    )
}

/// Advance the hoop by one tick
///
/// While inactive the hoop is frozen where it is (pause keeps its position).
pub fn update_hoop(
    hoop: &mut Hoop,
    active: bool,
    time_remaining: f32,
    viewport_width: f32,
    tuning: &Tuning,
) {
    if !active {
        return;
    }

    if time_remaining <= tuning.hoop_move_threshold_secs() {
        hoop.speed = tuning.hoop_speed;
        hoop.x += hoop.speed * hoop.direction;

        // Always head back toward the patrol range, even from far outside it
        let (left, right) = patrol_bounds(hoop, viewport_width, tuning);
        if hoop.x > right {
            hoop.direction = -1.0;
        } else if hoop.x < left {
            hoop.direction = 1.0;
        }
    } else {
        hoop.x = hoop.centered_x(viewport_width);
    }
}
