//! Pointer input sampled once per tick
//!
//! The host samples its pointer device once per rendered frame and hands the
//! result to [`crate::Runtime::tick`] as a [`FrameInput`]. Nothing in the
//! runtime reads input at any other time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Status of the primary pointer button for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    /// Not pressed this tick and not held
    #[default]
    Idle,
    /// Went down this tick
    Pressed,
    /// Still down since an earlier tick
    Held,
    /// Went up this tick
    Released,
}

impl ButtonState {
    /// True while the button is physically down (pressed this tick or held)
    #[inline]
    pub fn is_down(self) -> bool {
        matches!(self, ButtonState::Pressed | ButtonState::Held)
    }

    /// Derive this tick's state from the previous one and the raw button level.
    ///
    /// Hosts that only expose "is the button down" can feed that through here
    /// to get the tri-state the runtime expects.
    pub fn from_level(previous: ButtonState, down: bool) -> ButtonState {
        match (previous.is_down(), down) {
            (false, true) => ButtonState::Pressed,
            (true, true) => ButtonState::Held,
            (true, false) => ButtonState::Released,
            (false, false) => ButtonState::Idle,
        }
    }
}

/// Pointer position (screen pixels) and primary button status
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub position: Vec2,
    pub button: ButtonState,
}

impl PointerState {
    pub fn new(position: Vec2, button: ButtonState) -> Self {
        Self { position, button }
    }

    pub fn idle(position: Vec2) -> Self {
        Self::new(position, ButtonState::Idle)
    }

    pub fn pressed(position: Vec2) -> Self {
        Self::new(position, ButtonState::Pressed)
    }

    pub fn held(position: Vec2) -> Self {
        Self::new(position, ButtonState::Held)
    }

    pub fn released(position: Vec2) -> Self {
        Self::new(position, ButtonState::Released)
    }
}

/// Everything the host supplies for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Host clock at this frame, measured from any fixed origin
    pub time: Duration,
    pub pointer: PointerState,
}

impl FrameInput {
    pub fn new(time: Duration, pointer: PointerState) -> Self {
        Self { time, pointer }
    }
}

/// Per-tick claims on the pointer, shared by every UI root.
///
/// Reset by the runtime at the start of each tick; at most one root claims
/// focus and at most one dragger claims the pointer per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputArbitration {
    /// A panel (in any root) already took focus from this tick's press
    pub focus_handled: bool,
    /// A dragger (in any root) already handled this tick's pointer state
    pub drag_handled: bool,
}

impl InputArbitration {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
