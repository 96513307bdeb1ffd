use std::time::{Duration, Instant};

use crate::{
    animation::ease::Ease,
    deck::model::TransitionSpec,
    foundation::core::NavDirection,
    foundation::error::{VignetteError, VignetteResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Zoom,
    Crossfade,
    Slide,
}

pub fn parse_transition(kind: &str) -> VignetteResult<TransitionKind> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(VignetteError::validation("transition kind must be non-empty"));
    }

    match kind.as_str() {
        "zoom" | "scale" => Ok(TransitionKind::Zoom),
        "crossfade" | "fade" => Ok(TransitionKind::Crossfade),
        "slide" | "slide_horizontal" => Ok(TransitionKind::Slide),
        _ => Err(VignetteError::validation(format!(
            "unknown transition kind '{kind}'"
        ))),
    }
}

/// Deck transition spec resolved into runtime values.
#[derive(Clone, Copy, Debug)]
pub struct TransitionStyle {
    pub kind: TransitionKind,
    pub ease: Ease,
    pub duration: Duration,
}

impl TransitionStyle {
    /// Resolve a deck-level [`TransitionSpec`] once, up front.
    pub fn resolve(spec: &TransitionSpec) -> VignetteResult<Self> {
        let kind = parse_transition(&spec.kind)?;
        if spec.duration_ms == 0 {
            return Err(VignetteError::validation(
                "transition duration_ms must be > 0",
            ));
        }
        Ok(Self {
            kind,
            ease: spec.ease,
            duration: Duration::from_millis(spec.duration_ms),
        })
    }
}

/// A scene change currently animating on screen.
#[derive(Clone, Copy, Debug)]
pub struct ActiveTransition {
    pub from: usize,
    pub to: usize,
    pub direction: NavDirection,
    pub kind: TransitionKind,
    pub ease: Ease,
    pub started: Instant,
    pub duration: Duration,
}

impl ActiveTransition {
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        self.ease
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now >= self.ends_at()
    }

    pub fn ends_at(&self) -> Instant {
        self.started + self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transition.rs"]
mod tests;
