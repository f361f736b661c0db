//! Pointer sessions
//!
//! Mouse and touch sources are normalized into one `PointerEvent` stream in
//! surface-local coordinates before they reach the gesture mapper. Only the
//! primary pointer is tracked; extra touches are ignored.

use glam::Vec2;

/// Normalized pointer event in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// Top-left corner of the drawing surface in client coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceOrigin {
    pub left: f32,
    pub top: f32,
}

impl SurfaceOrigin {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    /// Convert client coordinates to surface-local coordinates
    #[inline]
    pub fn to_local(&self, client_x: f32, client_y: f32) -> Vec2 {
        Vec2::new(client_x - self.left, client_y - self.top)
    }
}

/// An input source that produces normalized pointer events
pub trait PointerSession {
    /// Raw event type delivered by the platform
    type Raw;

    /// Translate a raw event, or `None` if it is not relevant to the primary pointer
    fn normalize(&mut self, raw: &Self::Raw) -> Option<PointerEvent>;

    /// Update the surface position (after layout or resize)
    fn set_origin(&mut self, origin: SurfaceOrigin);
}

/// Raw mouse event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseInput {
    /// Primary button pressed
    Down { client_x: f32, client_y: f32 },
    Move { client_x: f32, client_y: f32 },
    /// Primary button released (anywhere in the window)
    Up,
}

/// Mouse pointer session
#[derive(Debug, Clone, Default)]
pub struct MouseSession {
    origin: SurfaceOrigin,
}

impl MouseSession {
    pub fn new(origin: SurfaceOrigin) -> Self {
        Self { origin }
    }
}

impl PointerSession for MouseSession {
    type Raw = MouseInput;

    fn normalize(&mut self, raw: &MouseInput) -> Option<PointerEvent> {
        Some(match *raw {
            MouseInput::Down { client_x, client_y } => {
                PointerEvent::Down(self.origin.to_local(client_x, client_y))
            }
            MouseInput::Move { client_x, client_y } => {
                PointerEvent::Move(self.origin.to_local(client_x, client_y))
            }
            MouseInput::Up => PointerEvent::Up,
        })
    }

    fn set_origin(&mut self, origin: SurfaceOrigin) {
        self.origin = origin;
    }
}

/// Phase of a raw touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A single touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub client_x: f32,
    pub client_y: f32,
}

/// Raw touch event: the phase plus the touch points it concerns
#[derive(Debug, Clone, PartialEq)]
pub struct TouchInput {
    pub phase: TouchPhase,
    pub touches: Vec<TouchPoint>,
}

/// Touch pointer session, following the first finger down
#[derive(Debug, Clone, Default)]
pub struct TouchSession {
    origin: SurfaceOrigin,
    primary: Option<u64>,
}

impl TouchSession {
    pub fn new(origin: SurfaceOrigin) -> Self {
        Self {
            origin,
            primary: None,
        }
    }

    /// ID of the touch currently driving the gesture
    pub fn primary(&self) -> Option<u64> {
        self.primary
    }

    fn find_primary<'a>(&self, touches: &'a [TouchPoint]) -> Option<&'a TouchPoint> {
        let id = self.primary?;
        touches.iter().find(|t| t.id == id)
    }
}

impl PointerSession for TouchSession {
    type Raw = TouchInput;

    fn normalize(&mut self, raw: &TouchInput) -> Option<PointerEvent> {
        match raw.phase {
            TouchPhase::Start => {
                if self.primary.is_some() {
                    return None;
                }
                let first = raw.touches.first()?;
                self.primary = Some(first.id);
                Some(PointerEvent::Down(
                    self.origin.to_local(first.client_x, first.client_y),
                ))
            }
            TouchPhase::Move => {
                let touch = self.find_primary(&raw.touches)?;
                Some(PointerEvent::Move(
                    self.origin.to_local(touch.client_x, touch.client_y),
                ))
            }
            TouchPhase::End | TouchPhase::Cancel => {
                self.find_primary(&raw.touches)?;
                self.primary = None;
                Some(PointerEvent::Up)
            }
        }
    }

    fn set_origin(&mut self, origin: SurfaceOrigin) {
        self.origin = origin;
    }
}
