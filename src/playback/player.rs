use std::time::{Duration, Instant};

use crate::{
    animation::transition::{ActiveTransition, TransitionStyle},
    deck::model::{Deck, Scene},
    foundation::core::{LayoutMode, NavDirection},
    foundation::error::VignetteResult,
    playback::autoplay::AutoplayTimer,
    playback::gesture::{GestureState, SwipeVerdict, classify_release},
};

/// Mutable presentation state advanced by [`Player`] operations.
#[derive(Clone, Debug)]
pub struct PlayerState {
    /// Index of the scene currently shown.
    pub current_index: usize,
    /// Autoplay is running.
    pub playing: bool,
    /// Active layout classification.
    pub layout: LayoutMode,
    /// In-flight drag, if any.
    pub gesture: GestureState,
    /// The swipe hint has not been dismissed yet.
    pub hint_visible: bool,
    /// The scene menu overlay is open.
    pub menu_open: bool,
}

impl PlayerState {
    fn initial() -> Self {
        Self {
            current_index: 0,
            playing: false,
            layout: LayoutMode::Desktop,
            gesture: GestureState::default(),
            hint_visible: true,
            menu_open: false,
        }
    }
}

/// What a call to [`Player::tick`] changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    /// Autoplay moved to the next scene during this tick.
    pub advanced: bool,
    /// Anything visible changed; the front-end should repaint.
    pub changed: bool,
}

/// Drives a validated [`Deck`] through time.
///
/// The player owns all presentation state and is fully deterministic: every
/// operation that depends on time takes an explicit `now`, so a scripted
/// sequence of calls always produces the same state regardless of wall-clock
/// scheduling.
pub struct Player {
    deck: Deck,
    state: PlayerState,
    style: TransitionStyle,
    autoplay: AutoplayTimer,
    transition: Option<ActiveTransition>,
    hint_deadline: Option<Instant>,
}

impl Player {
    /// Validate the deck and start a player on its first scene.
    ///
    /// Players start paused; [`Player::toggle_play`] arms the first
    /// autoplay deadline. `now` anchors the optional hint timeout.
    pub fn new(deck: Deck, now: Instant) -> VignetteResult<Self> {
        deck.validate()?;
        let style = TransitionStyle::resolve(&deck.transition)?;
        let autoplay = AutoplayTimer::new(Duration::from_millis(deck.autoplay_interval_ms));
        let hint_deadline = deck
            .hint_timeout_ms
            .map(|ms| now + Duration::from_millis(ms));

        Ok(Self {
            deck,
            state: PlayerState::initial(),
            style,
            autoplay,
            transition: None,
            hint_deadline,
        })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn transition(&self) -> Option<&ActiveTransition> {
        self.transition.as_ref()
    }

    pub fn scene_count(&self) -> usize {
        self.deck.scenes.len()
    }

    /// Scene currently shown (the target scene while a transition runs).
    pub fn current_scene(&self) -> &Scene {
        &self.deck.scenes[self.state.current_index]
    }

    /// Completed fraction of the deck, counting the current scene.
    pub fn progress_fraction(&self) -> f64 {
        (self.state.current_index + 1) as f64 / self.scene_count() as f64
    }

    /// Move to the next scene, wrapping at the end.
    pub fn advance(&mut self, now: Instant) {
        let next = (self.state.current_index + 1) % self.scene_count();
        self.navigate(next, NavDirection::Forward, now);
    }

    /// Move to the previous scene, wrapping at the start.
    pub fn retreat(&mut self, now: Instant) {
        let n = self.scene_count();
        let prev = (self.state.current_index + n - 1) % n;
        self.navigate(prev, NavDirection::Backward, now);
    }

    /// Jump directly to `index`, clamping past-the-end requests onto the
    /// last scene. Direction follows the relative position.
    pub fn jump_to(&mut self, index: usize, now: Instant) {
        let clamped = index.min(self.scene_count() - 1);
        let direction = if clamped >= self.state.current_index {
            NavDirection::Forward
        } else {
            NavDirection::Backward
        };
        self.navigate(clamped, direction, now);
    }

    /// Toggle autoplay. Pausing releases the armed deadline; resuming arms a
    /// fresh full interval from `now`.
    pub fn toggle_play(&mut self, now: Instant) {
        self.state.playing = !self.state.playing;
        if self.state.playing {
            self.autoplay.arm(now);
        } else {
            self.autoplay.release();
        }
    }

    /// Classify the layout from the viewport width in logical pixels.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.set_layout_mode(LayoutMode::classify(width));
    }

    pub fn set_layout_mode(&mut self, layout: LayoutMode) {
        self.state.layout = layout;
    }

    /// Begin a drag at `x`. The first touch dismisses the swipe hint for
    /// good.
    pub fn begin_gesture(&mut self, x: f32) {
        self.state.gesture.begin(x);
        self.state.hint_visible = false;
        self.hint_deadline = None;
    }

    pub fn update_gesture(&mut self, x: f32) {
        self.state.gesture.update(x);
    }

    /// Finish the drag at `x`, committing a scene change when the travel
    /// passed the commit threshold. Does nothing when no drag is active.
    pub fn end_gesture(&mut self, x: f32, now: Instant) {
        if !self.state.gesture.active {
            return;
        }
        let verdict = classify_release(self.state.gesture.start_x, x);
        self.state.gesture.reset();
        match verdict {
            SwipeVerdict::Advance => self.advance(now),
            SwipeVerdict::Retreat => self.retreat(now),
            SwipeVerdict::Stay => {}
        }
    }

    pub fn toggle_menu(&mut self) {
        self.state.menu_open = !self.state.menu_open;
    }

    /// Pick a scene from the menu and close it.
    pub fn select_scene(&mut self, index: usize, now: Instant) {
        self.jump_to(index, now);
        self.state.menu_open = false;
    }

    /// Advance time-driven state to `now`.
    ///
    /// Fires at most one autoplay step per call, expires the swipe hint and
    /// clears a finished transition.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let mut tick = Tick::default();

        if self.autoplay.fire(now) {
            self.advance(now);
            tick.advanced = true;
            tick.changed = true;
        }

        if let Some(deadline) = self.hint_deadline
            && now >= deadline
        {
            self.hint_deadline = None;
            if self.state.hint_visible {
                self.state.hint_visible = false;
                tick.changed = true;
            }
        }

        if let Some(tr) = &self.transition
            && tr.is_complete(now)
        {
            self.transition = None;
            tick.changed = true;
        }

        tick
    }

    /// Earliest instant at which [`Player::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let deadlines = [
            self.autoplay.deadline(),
            self.hint_deadline,
            self.transition.as_ref().map(ActiveTransition::ends_at),
        ];
        deadlines.into_iter().flatten().min()
    }

    /// Change scene and start a transition. A no-op when `to` is already
    /// current; a scene change while autoplay runs restarts its dwell.
    fn navigate(&mut self, to: usize, direction: NavDirection, now: Instant) {
        let from = self.state.current_index;
        if to == from {
            return;
        }
        tracing::debug!(from, to, ?direction, "scene change");
        self.state.current_index = to;
        self.transition = Some(ActiveTransition {
            from,
            to,
            direction,
            kind: self.style.kind,
            ease: self.style.ease,
            started: now,
            duration: self.style.duration,
        });
        if self.state.playing {
            self.autoplay.arm(now);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
