//! Simulation state and core entity types
//!
//! Everything the tick mutates lives in `SimState`, which the loop driver
//! owns and threads through each subsystem.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hoop::patrol_bounds;
use super::particles;
use super::scoring::ComboTracker;
use crate::settings::Tuning;
use crate::spawn_point;

/// Drag bookkeeping for the staged ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub is_dragging: bool,
    pub start: Option<Vec2>,
    pub current: Option<Vec2>,
}

impl DragState {
    /// Arm a drag at `p`
    pub fn arm(&mut self, p: Vec2) {
        self.is_dragging = true;
        self.start = Some(p);
        self.current = Some(p);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Slingshot vector (start - current), if a drag is armed
    pub fn pull(&self) -> Option<Vec2> {
        if !self.is_dragging {
            return None;
        }
        match (self.start, self.current) {
            (Some(start), Some(current)) => Some(start - current),
            _ => None,
        }
    }
}

/// A ball entity, either staged (waiting to be thrown) or active (in flight)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub drag: DragState,
    /// Thrown and being simulated
    pub active: bool,
    /// Already counted for this throw
    pub scored: bool,
    /// Throw time (ms), used for time-to-live cleanup
    pub created_at_ms: f64,
}

impl Ball {
    /// Create a staged ball at `pos`
    pub fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            drag: DragState::default(),
            active: false,
            scored: false,
            created_at_ms: 0.0,
        }
    }

    /// Milliseconds since the ball was thrown
    #[inline]
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.created_at_ms
    }

    /// Launch from staged with the given velocity
    pub fn launch(&mut self, vel: Vec2, now_ms: f64) {
        self.vel = vel;
        self.active = true;
        self.scored = false;
        self.drag.clear();
        self.created_at_ms = now_ms;
    }
}

/// The patrolling hoop. `x` is the left rim endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hoop {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub speed: f32,
}

impl Hoop {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: 0.0,
            y: tuning.hoop_y,
            width: tuning.hoop_width,
            direction: 1.0,
            speed: 0.0,
        }
    }

    #[inline]
    pub fn left_rim(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn right_rim(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Left edge position that centers the hoop in a viewport
    #[inline]
    pub fn centered_x(&self, viewport_width: f32) -> f32 {
        (viewport_width - self.width) / 2.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32, // packed 0xRRGGBB
    pub life: f32,  // 0-1, decreases over time
    pub size: f32,
}

/// Surface dimensions in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Events emitted by the simulation for the outer layers
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A staged ball was thrown
    Thrown { ball_id: u32, vel: Vec2 },
    /// A ball passed through the hoop
    Score {
        ball_id: u32,
        points: u32,
        /// Streak was already running (streak > 1)
        combo_shot: bool,
        streak: u32,
        swish: bool,
        pos: Vec2,
    },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub tuning: Tuning,
    /// `None` until the first resize
    pub viewport: Option<Viewport>,
    /// The ball waiting to be thrown
    pub staged: Option<Ball>,
    /// Balls in flight, oldest first
    pub balls: Vec<Ball>,
    pub hoop: Hoop,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Live particle cap (0 disables bursts)
    pub max_particles: usize,
    pub combo: ComboTracker,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl SimState {
    /// Create a new simulation with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            hoop: Hoop::new(&tuning),
            tuning,
            viewport: None,
            staged: None,
            balls: Vec::new(),
            particles: Vec::new(),
            max_particles: crate::settings::Settings::default().max_particles(),
            combo: ComboTracker::default(),
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply a new surface size.
    ///
    /// The first call spawns the staged ball and centers the hoop. Later
    /// calls update bounds and pull the hoop back inside its patrol range;
    /// balls are never respawned or moved.
    pub fn resize(&mut self, width: f32, height: f32) {
        let first = self.viewport.is_none();
        self.viewport = Some(Viewport { width, height });
        if first {
            self.hoop.x = self.hoop.centered_x(width);
        } else {
            let (left, right) = patrol_bounds(&self.hoop, width, &self.tuning);
            // right < left on a very narrow surface; left wins
            self.hoop.x = self.hoop.x.min(right).max(left);
        }
        if self.staged.is_none() {
            self.spawn_staged_ball();
        }
    }

    /// Spawn a fresh staged ball at the spawn point (no-op without a viewport)
    pub fn spawn_staged_ball(&mut self) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let id = self.next_entity_id();
        let pos = spawn_point(viewport.width, viewport.height);
        self.staged = Some(Ball::new(id, pos, self.tuning.ball_radius));
        log::debug!("Staged ball {} at ({:.0}, {:.0})", id, pos.x, pos.y);
    }

    /// Floor line for a ball of `radius`
    #[inline]
    pub fn floor_y(&self, radius: f32) -> f32 {
        let height = self.viewport.map_or(0.0, |v| v.height);
        height - radius - self.tuning.floor_height_offset
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Spawn a score burst at `pos`, honouring the particle cap
    pub fn burst_particles(&mut self, pos: Vec2) {
        particles::burst(
            &mut self.particles,
            &mut self.rng,
            pos,
            self.max_particles,
            &self.tuning,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_resize_spawns_staged_ball() {
        let mut state = SimState::new(1, Tuning::default());
        assert!(state.staged.is_none());

        state.resize(400.0, 800.0);
        let staged = state.staged.as_ref().unwrap();
        assert_eq!(staged.pos, Vec2::new(200.0, 650.0));
        assert!(!staged.active);
        assert!(!staged.scored);
        assert!((state.hoop.x - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_later_resize_keeps_balls() {
        let mut state = SimState::new(1, Tuning::default());
        state.resize(400.0, 800.0);
        let id = state.staged.as_ref().unwrap().id;
        state.hoop.x = 42.0;

        state.resize(1000.0, 700.0);
        let staged = state.staged.as_ref().unwrap();
        assert_eq!(staged.id, id);
        assert_eq!(staged.pos, Vec2::new(200.0, 650.0));
        assert_eq!(state.hoop.x, 42.0);
        assert_eq!(state.viewport, Some(Viewport { width: 1000.0, height: 700.0 }));
    }

    #[test]
    fn test_shrinking_resize_pulls_hoop_inside() {
        let mut state = SimState::new(1, Tuning::default());
        state.resize(800.0, 800.0);
        state.hoop.x = 590.0;

        state.resize(400.0, 800.0);
        assert_eq!(state.hoop.x, 280.0);

        state.hoop.x = 5.0;
        state.resize(400.0, 800.0);
        assert_eq!(state.hoop.x, 20.0);
    }

    #[test]
    fn test_ids_increase() {
        let mut state = SimState::new(1, Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_drag_pull_requires_arm() {
        let mut drag = DragState::default();
        assert_eq!(drag.pull(), None);
        drag.arm(Vec2::new(10.0, 10.0));
        drag.current = Some(Vec2::new(10.0, 40.0));
        assert_eq!(drag.pull(), Some(Vec2::new(0.0, -30.0)));
        drag.clear();
        assert_eq!(drag, DragState::default());
    }
}
