use crate::{
    deck::model::{Deck, Scene, TransitionSpec},
    foundation::error::VignetteResult,
};

/// Builder for [`Deck`](crate::Deck).
pub struct DeckBuilder {
    title: String,
    autoplay_interval_ms: u64,
    transition: TransitionSpec,
    hint_timeout_ms: Option<u64>,
    scenes: Vec<Scene>,
}

impl DeckBuilder {
    /// Create a builder for a new deck.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            autoplay_interval_ms: 5000,
            transition: TransitionSpec::default(),
            hint_timeout_ms: Some(12_000),
            scenes: Vec::new(),
        }
    }

    /// Set autoplay dwell per scene in milliseconds.
    pub fn autoplay_interval_ms(mut self, ms: u64) -> Self {
        self.autoplay_interval_ms = ms;
        self
    }

    /// Set the transition played between scenes.
    pub fn transition(mut self, spec: TransitionSpec) -> Self {
        self.transition = spec;
        self
    }

    /// Set the swipe-hint lifetime; `None` keeps the hint until first touch.
    pub fn hint_timeout_ms(mut self, ms: Option<u64>) -> Self {
        self.hint_timeout_ms = ms;
        self
    }

    /// Append a scene; ids are assigned in append order.
    pub fn scene(mut self, scene: SceneBuilder) -> Self {
        let id = self.scenes.len();
        self.scenes.push(scene.build(id));
        self
    }

    /// Finish and validate the deck.
    pub fn build(self) -> VignetteResult<Deck> {
        let deck = Deck {
            title: self.title,
            scenes: self.scenes,
            autoplay_interval_ms: self.autoplay_interval_ms,
            transition: self.transition,
            hint_timeout_ms: self.hint_timeout_ms,
        };
        deck.validate()?;
        Ok(deck)
    }
}

/// Builder for [`Scene`](crate::Scene).
pub struct SceneBuilder {
    title: String,
    subtitle: String,
    background: String,
    content: String,
}

impl SceneBuilder {
    /// Create a builder for a new scene.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            background: "neutral".to_string(),
            content: String::new(),
        }
    }

    /// Set the line shown under the title.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the background token resolved by the front-end theme.
    pub fn background(mut self, token: impl Into<String>) -> Self {
        self.background = token.into();
        self
    }

    /// Set the body text.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    fn build(self, id: usize) -> Scene {
        Scene {
            id,
            title: self.title,
            subtitle: self.subtitle,
            background: self.background,
            content: self.content,
        }
    }
}

/// Built-in five-scene greeting used by the demo binary and tests.
pub fn sample_deck() -> Deck {
    Deck {
        title: "A Little Hello".to_string(),
        scenes: vec![
            Scene {
                id: 0,
                title: "Hello".to_string(),
                subtitle: "a small surprise".to_string(),
                background: "dawn".to_string(),
                content: "Someone put together a few words just for you. \
                          Swipe on, there is more."
                    .to_string(),
            },
            Scene {
                id: 1,
                title: "Thank You".to_string(),
                subtitle: "for being you".to_string(),
                background: "meadow".to_string(),
                content: "For the rides, the laughs and the patience. \
                          None of it went unnoticed."
                    .to_string(),
            },
            Scene {
                id: 2,
                title: "Remember".to_string(),
                subtitle: String::new(),
                background: "sea".to_string(),
                content: "That evening by the water when the plan fell apart \
                          and the day got better instead."
                    .to_string(),
            },
            Scene {
                id: 3,
                title: "Onward".to_string(),
                subtitle: "good things ahead".to_string(),
                background: "dusk".to_string(),
                content: "New places, new coffee spots, the same good company. \
                          Here is to the next stretch."
                    .to_string(),
            },
            Scene {
                id: 4,
                title: "The End".to_string(),
                subtitle: "(for now)".to_string(),
                background: "bloom".to_string(),
                content: "That is all. Replay it any time, or pass it along \
                          to someone who needs a lift."
                    .to_string(),
            },
        ],
        autoplay_interval_ms: 5000,
        transition: TransitionSpec::default(),
        hint_timeout_ms: Some(12_000),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/dsl.rs"]
mod tests;
