//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per displayed frame, time passed in explicitly
//! - State threaded through `SimState`, no globals
//! - No rendering or platform dependencies

pub mod collision;
pub mod gesture;
pub mod hoop;
pub mod particles;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_rim_collision};
pub use gesture::{ThrowOutcome, launch_velocity, pointer_down, pointer_move, pointer_up};
pub use hoop::update_hoop;
pub use scoring::{Basket, ComboTracker, ShotValue, shot_value};
pub use state::{Ball, DragState, GameEvent, Hoop, Particle, SimState, Viewport};
pub use tick::{TickInput, tick};
