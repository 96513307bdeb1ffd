use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::ease::Ease,
    animation::transition::parse_transition,
    foundation::error::{VignetteError, VignetteResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete greeting deck.
///
/// A deck is a pure data model that can be:
/// - built programmatically (see [`crate::DeckBuilder`])
/// - serialized/deserialized via Serde (JSON)
///
/// Driving a deck through time is performed by [`crate::Player`]; turning the
/// resulting state into drawable values is performed by
/// [`crate::compose_frame`].
pub struct Deck {
    /// Deck title shown in window chrome and the scene menu.
    pub title: String,
    /// Ordered scenes; `Scene::id` must equal the scene position.
    pub scenes: Vec<Scene>,
    /// Autoplay dwell per scene in milliseconds.
    #[serde(default = "default_autoplay_interval_ms")]
    pub autoplay_interval_ms: u64,
    /// Transition played between scenes.
    #[serde(default)]
    pub transition: TransitionSpec,
    /// Swipe-hint lifetime in milliseconds; `null` keeps the hint up until
    /// the first touch.
    #[serde(default = "default_hint_timeout_ms")]
    pub hint_timeout_ms: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One scene of a deck.
pub struct Scene {
    /// Stable scene index; must equal the scene position in [`Deck::scenes`].
    pub id: usize,
    /// Large headline text.
    pub title: String,
    /// Smaller line under the title; may be empty.
    #[serde(default)]
    pub subtitle: String,
    /// Background token resolved by the front-end theme.
    #[serde(default = "default_background")]
    pub background: String,
    /// Body text for the scene.
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Transition specification applied between scenes.
pub struct TransitionSpec {
    /// Transition kind identifier.
    #[serde(default = "default_transition_kind")]
    pub kind: String,
    /// Transition duration in milliseconds.
    #[serde(default = "default_transition_duration_ms")]
    pub duration_ms: u64,
    /// Easing applied to transition progress.
    #[serde(default = "default_transition_ease")]
    pub ease: Ease,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            kind: default_transition_kind(),
            duration_ms: default_transition_duration_ms(),
            ease: default_transition_ease(),
        }
    }
}

fn default_autoplay_interval_ms() -> u64 {
    5000
}

fn default_hint_timeout_ms() -> Option<u64> {
    Some(12_000)
}

fn default_background() -> String {
    "neutral".to_string()
}

fn default_transition_kind() -> String {
    "zoom".to_string()
}

fn default_transition_duration_ms() -> u64 {
    800
}

fn default_transition_ease() -> Ease {
    Ease::InOutCubic
}

impl Deck {
    /// Parse a deck from a JSON string and validate it.
    pub fn from_json(json: &str) -> VignetteResult<Self> {
        let deck: Deck = serde_json::from_str(json)
            .map_err(|e| VignetteError::serde(format!("parse deck JSON: {e}")))?;
        deck.validate()?;
        Ok(deck)
    }

    /// Parse a deck from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> VignetteResult<Self> {
        let deck: Deck = serde_json::from_reader(r)
            .map_err(|e| VignetteError::serde(format!("parse deck JSON: {e}")))?;
        deck.validate()?;
        Ok(deck)
    }

    /// Parse a deck from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> VignetteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VignetteError::validation(format!("open deck JSON '{}': {e}", path.display()))
        })?;
        let deck = Self::from_reader(BufReader::new(f))?;
        tracing::debug!(path = %path.display(), scenes = deck.scene_count(), "loaded deck");
        Ok(deck)
    }

    /// Validate deck invariants and scene ordering.
    pub fn validate(&self) -> VignetteResult<()> {
        if self.title.trim().is_empty() {
            return Err(VignetteError::validation("deck title must be non-empty"));
        }
        if self.scenes.is_empty() {
            return Err(VignetteError::validation(
                "deck must contain at least one scene",
            ));
        }

        for (index, scene) in self.scenes.iter().enumerate() {
            if scene.id != index {
                return Err(VignetteError::validation(format!(
                    "scene at position {index} declares id {}",
                    scene.id
                )));
            }
            if scene.title.trim().is_empty() {
                return Err(VignetteError::validation(format!(
                    "scene {index} title must be non-empty"
                )));
            }
            if scene.content.trim().is_empty() {
                return Err(VignetteError::validation(format!(
                    "scene {index} content must be non-empty"
                )));
            }
        }

        if self.autoplay_interval_ms == 0 {
            return Err(VignetteError::validation("autoplay_interval_ms must be > 0"));
        }
        self.transition.validate()?;
        if self.hint_timeout_ms == Some(0) {
            return Err(VignetteError::validation(
                "hint_timeout_ms must be > 0 when set",
            ));
        }

        Ok(())
    }

    /// Number of scenes in the deck.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }
}

impl TransitionSpec {
    /// Validate transition payload invariants.
    pub fn validate(&self) -> VignetteResult<()> {
        parse_transition(&self.kind)?;
        if self.duration_ms == 0 {
            return Err(VignetteError::validation("transition duration_ms must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/model.rs"]
mod tests;
