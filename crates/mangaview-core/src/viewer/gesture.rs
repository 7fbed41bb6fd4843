//! Vertical swipe recognition.
//!
//! A gesture is `Idle` until a touch starts, `Dragging` while the finger is
//! down, and always back to `Idle` once it lifts. Distances are in pixels,
//! positive when the finger moved up.

/// Minimum travel before a swipe changes slides instead of snapping back.
pub const COMMIT_THRESHOLD_PX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging { start_y: f64 },
}

/// What a finished drag asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    Next,
    Previous,
    SnapBack,
}

/// Reported back to the surface after each touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Event arrived while idle (move/end without a start).
    Ignored,
    Started,
    /// Live drag preview at the given offset percentage.
    Preview(f64),
    Advanced,
    Retreated,
    SnappedBack,
}

impl GestureState {
    /// `start_y - y` for an active drag.
    pub fn travel(&self, y: f64) -> Option<f64> {
        match *self {
            GestureState::Dragging { start_y } => Some(start_y - y),
            GestureState::Idle => None,
        }
    }
}

/// Offset percentage previewed while dragging: the slides follow the finger.
pub fn drag_offset(diff: f64, viewport_height: f64) -> f64 {
    if viewport_height <= 0.0 {
        return 0.0;
    }
    -diff / viewport_height * 100.0
}

pub fn classify(diff: f64) -> SwipeDecision {
    if diff.abs() <= COMMIT_THRESHOLD_PX {
        SwipeDecision::SnapBack
    } else if diff > 0.0 {
        SwipeDecision::Next
    } else {
        SwipeDecision::Previous
    }
}
