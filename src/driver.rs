//! Frame loop driver
//!
//! The host calls `run_frame` once per display refresh with the handle it
//! was last given. Handles are single-use: a frame that arrives with a
//! cancelled or already-consumed handle does nothing, so a callback left
//! over from a previous session can never advance the simulation.

use crate::input::PointerEvent;
use crate::sim::{GameEvent, SimState, ThrowOutcome, TickInput, gesture, tick};

/// Ticket for one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Cancellable repeating frame schedule
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    last_issued: u64,
    pending: Option<TickHandle>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the next frame, replacing any pending one
    pub fn schedule(&mut self) -> TickHandle {
        self.last_issued += 1;
        let handle = TickHandle(self.last_issued);
        self.pending = Some(handle);
        handle
    }

    /// Cancel `handle` if it is still pending. Safe to call repeatedly.
    pub fn cancel(&mut self, handle: TickHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            return true;
        }
        false
    }

    /// Consume `handle` if it is the pending one
    pub fn fire(&mut self, handle: TickHandle) -> bool {
        self.cancel(handle)
    }

    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

/// Draws the current simulation state
pub trait Renderer {
    fn render(&mut self, state: &SimState);
}

/// Receives gameplay results from the simulation
pub trait ScoreListener {
    /// Called once per basket, from inside the frame that detected it
    fn on_score_update(&mut self, points: u32, is_combo_shot: bool);

    /// Called once per throw
    fn on_throw(&mut self) {}
}

/// Owns the simulation and runs it one frame at a time
#[derive(Debug)]
pub struct LoopDriver {
    state: SimState,
    scheduler: TickScheduler,
    active: bool,
}

impl LoopDriver {
    pub fn new(state: SimState) -> Self {
        Self {
            state,
            scheduler: TickScheduler::new(),
            active: false,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Apply a new surface size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Switch between running and frozen.
    ///
    /// Becoming active arms the first frame and returns its handle.
    /// Becoming inactive cancels the pending frame and draws the frozen state once.
    pub fn set_active(&mut self, active: bool, renderer: &mut dyn Renderer) -> Option<TickHandle> {
        if active == self.active {
            return None;
        }
        self.active = active;

        if active {
            log::info!("Simulation active");
            Some(self.scheduler.schedule())
        } else {
            if let Some(handle) = self.scheduler.pending() {
                self.scheduler.cancel(handle);
            }
            log::info!("Simulation frozen");
            renderer.render(&self.state);
            None
        }
    }

    /// Run one scheduled frame.
    ///
    /// Advances the simulation, reports baskets and throws to `listener`,
    /// renders, and returns the handle for the next frame while active.
    pub fn run_frame(
        &mut self,
        handle: TickHandle,
        time_remaining: f32,
        now_ms: f64,
        renderer: &mut dyn Renderer,
        listener: &mut dyn ScoreListener,
    ) -> Option<TickHandle> {
        if !self.scheduler.fire(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return None;
        }

        if self.active {
            let input = TickInput {
                active: true,
                time_remaining,
                now_ms,
            };
            tick(&mut self.state, &input);
            self.dispatch_events(listener);
        }

        renderer.render(&self.state);

        if self.active {
            Some(self.scheduler.schedule())
        } else {
            None
        }
    }

    /// Draw the current state without advancing it
    pub fn redraw(&self, renderer: &mut dyn Renderer) {
        renderer.render(&self.state);
    }

    /// Feed a normalized pointer event to the gesture mapper.
    ///
    /// New drags can only start while active; moves and releases always
    /// reach the mapper so a drag can be finished or cancelled.
    pub fn pointer(&mut self, event: PointerEvent, now_ms: f64) -> Option<ThrowOutcome> {
        match event {
            PointerEvent::Down(p) => {
                if self.active {
                    gesture::pointer_down(&mut self.state, p);
                }
                None
            }
            PointerEvent::Move(p) => {
                gesture::pointer_move(&mut self.state, p);
                None
            }
            PointerEvent::Up => Some(gesture::pointer_up(&mut self.state, now_ms)),
        }
    }

    fn dispatch_events(&mut self, listener: &mut dyn ScoreListener) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Score {
                    points, combo_shot, ..
                } => listener.on_score_update(points, combo_shot),
                GameEvent::Thrown { .. } => listener.on_throw(),
            }
        }
    }
}
