//! Neon Hoops - simulation core for a timed arcade ball-tossing game
//!
//! Core modules:
//! - `sim`: Simulation (throw physics, hoop motion, scoring, particles)
//! - `input`: Mouse/touch pointer sessions feeding the gesture mapper
//! - `driver`: Cancellable tick scheduling and per-frame orchestration
//! - `session`: Score/combo bookkeeping and the game clock
//! - `settings`: Tuning constants and player preferences
//! - `highscores`: Local top-10 leaderboard

pub mod driver;
pub mod highscores;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use driver::{LoopDriver, Renderer, ScoreListener, TickHandle, TickScheduler};
pub use highscores::HighScores;
pub use session::{GameClock, ScoreBoard};
pub use settings::{QualityPreset, Settings, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Length of one session in seconds (3 minutes)
    pub const GAME_DURATION_SECS: f32 = 180.0;
    /// Hoop starts patrolling once this fraction of the session remains
    pub const HOOP_MOVE_FRACTION: f32 = 2.0 / 3.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;
    /// Uniform air resistance applied per tick
    pub const FRICTION: f32 = 0.99;
    /// Velocity kept after a floor/wall bounce
    pub const BOUNCE_FACTOR: f32 = 0.6;
    /// Velocity kept (and reversed) after touching a rim endpoint
    pub const RIM_RESTITUTION: f32 = 0.8;
    /// Floor sits this far above the bottom of the viewport
    pub const FLOOR_HEIGHT_OFFSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 18.0;
    /// Staged ball sits this far above the bottom of the viewport
    pub const SPAWN_OFFSET_Y: f32 = 150.0;
    /// Thrown balls are dropped after this long (ms)
    pub const BALL_TTL_MS: f64 = 4000.0;
    /// Thrown balls are dropped once this far below the viewport
    pub const FALL_OFF_MARGIN: f32 = 200.0;

    /// Drag/throw mapping
    pub const DRAG_POWER_SCALE: f32 = 0.13;
    pub const DRAG_POWER_X: f32 = 1.5;
    pub const DRAG_POWER_Y: f32 = 1.8;
    pub const MAX_DRAG_DISTANCE: f32 = 150.0;
    pub const MIN_DRAG_DISTANCE: f32 = 20.0;
    /// Pointer must land within this many ball radii to grab the ball
    pub const CAPTURE_RADIUS_FACTOR: f32 = 3.0;

    /// Hoop defaults
    pub const HOOP_Y: f32 = 150.0;
    pub const HOOP_WIDTH: f32 = 100.0;
    pub const HOOP_SPEED: f32 = 2.5;
    pub const HOOP_EDGE_MARGIN: f32 = 20.0;

    /// Scoring
    pub const BASE_POINTS: u32 = 2;
    pub const SWISH_BONUS: u32 = 1;
    pub const SWISH_RADIUS: f32 = 15.0;
    pub const SCORE_BAND_DEPTH: f32 = 20.0;
    pub const SCORE_RIM_INSET: f32 = 10.0;
    pub const COMBO_WINDOW_MS: f64 = 2500.0;

    /// Particle bursts
    pub const BURST_COUNT: usize = 15;
    pub const PARTICLE_SPREAD: f32 = 10.0;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_SIZE_RANGE: f32 = 4.0;
    /// Amber
    pub const SCORE_PARTICLE_COLOR: u32 = 0xfb_bf_24;
}

/// Point on the staged-ball spawn line for a viewport
#[inline]
pub fn spawn_point(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, height - consts::SPAWN_OFFSET_Y)
}

/// Move `pos` so it sits `distance` away from `anchor` along the anchor-to-pos angle
#[inline]
pub fn push_out(anchor: Vec2, pos: Vec2, distance: f32) -> Vec2 {
    let d = pos - anchor;
    let angle = d.y.atan2(d.x);
    anchor + Vec2::new(angle.cos(), angle.sin()) * distance
}
