use crate::foundation::core::SWIPE_COMMIT_PX;

/// Horizontal drag tracked between touch-down and release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    /// A pointer is currently down.
    pub active: bool,
    /// X position where the drag started, in logical pixels.
    pub start_x: f32,
    /// Signed travel since `start_x`; negative means dragging left.
    pub offset: f32,
}

impl GestureState {
    pub fn begin(&mut self, x: f32) {
        self.active = true;
        self.start_x = x;
        self.offset = 0.0;
    }

    pub fn update(&mut self, x: f32) {
        if self.active {
            self.offset = x - self.start_x;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of releasing a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeVerdict {
    /// Swiped left past the threshold; go to the next scene.
    Advance,
    /// Swiped right past the threshold; go to the previous scene.
    Retreat,
    /// Short swipe; stay on the current scene.
    Stay,
}

/// Classify a release by the distance between start and end positions.
///
/// Travel of exactly [`SWIPE_COMMIT_PX`] stays put; only strictly longer
/// swipes commit.
pub fn classify_release(start_x: f32, end_x: f32) -> SwipeVerdict {
    let distance = start_x - end_x;
    if distance > SWIPE_COMMIT_PX {
        SwipeVerdict::Advance
    } else if distance < -SWIPE_COMMIT_PX {
        SwipeVerdict::Retreat
    } else {
        SwipeVerdict::Stay
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/gesture.rs"]
mod tests;
