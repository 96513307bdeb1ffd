/// Viewport width (logical pixels) at or below which the mobile layout engages.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

/// Horizontal drag distance (logical pixels) beyond which a released gesture
/// commits to navigation.
pub const SWIPE_COMMIT_PX: f32 = 100.0;

/// Rendering branch selected from the viewport width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Wide viewport: edge navigation arrows, no swipe hint.
    #[default]
    Desktop,
    /// Narrow viewport: swipe-first controls, scene menu available.
    Mobile,
}

impl LayoutMode {
    /// Classify a viewport width against [`MOBILE_BREAKPOINT_PX`].
    ///
    /// The breakpoint itself counts as mobile.
    pub fn classify(width: f32) -> Self {
        if width <= MOBILE_BREAKPOINT_PX {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// True for the mobile branch.
    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

/// Direction a navigation moved, carried by scene transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    Forward,
    Backward,
}

impl NavDirection {
    /// Horizontal sign used by direction-aware drawing; forward motion
    /// carries content leftward.
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => -1.0,
            Self::Backward => 1.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
