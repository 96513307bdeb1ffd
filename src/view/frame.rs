use std::time::Instant;

use crate::{
    animation::transition::TransitionKind,
    deck::model::Scene,
    foundation::core::{LayoutMode, NavDirection, SWIPE_COMMIT_PX},
    playback::player::Player,
};

/// Fraction of the raw drag distance the scene visually follows.
const DRAG_FOLLOW_FACTOR: f32 = 0.3;

#[derive(Clone, Debug, serde::Serialize)]
/// Fully composed, drawable snapshot of one frame.
///
/// A frame carries plain values only; given the same operation history and
/// the same `now`, [`compose_frame`] always produces an identical frame.
pub struct ViewFrame {
    /// Deck title shown in window chrome and the scene menu.
    pub deck_title: String,
    /// Index of the active scene.
    pub index: usize,
    /// Total number of scenes.
    pub scene_count: usize,
    /// The active scene (the transition target while one runs).
    pub scene: Scene,
    /// Autoplay is running.
    pub playing: bool,
    /// Active layout classification.
    pub layout: LayoutMode,
    /// Completed fraction of the deck, counting the current scene.
    pub progress_fraction: f64,
    /// The swipe hint has not been dismissed yet.
    pub hint_visible: bool,
    /// The scene menu overlay is open.
    pub menu_open: bool,
    /// One row per scene for the menu overlay and nav dots.
    pub menu: Vec<MenuRow>,
    /// Live drag feedback while a pointer is down.
    pub drag: Option<DragFrame>,
    /// Scene transition in flight.
    pub transition: Option<TransitionFrame>,
}

#[derive(Clone, Debug, serde::Serialize)]
/// One scene entry in the menu overlay.
pub struct MenuRow {
    /// Scene index and jump target.
    pub index: usize,
    /// Scene headline.
    pub title: String,
    /// Scene subtitle; may be empty.
    pub subtitle: String,
    /// This row is the active scene.
    pub active: bool,
}

#[derive(Clone, Copy, Debug, serde::Serialize)]
/// Visual feedback for an in-flight drag.
pub struct DragFrame {
    /// Raw signed travel in logical pixels; negative means leftwards.
    pub offset: f32,
    /// Damped horizontal shift to apply to the scene.
    pub shift: f32,
    /// Fill level for the release indicator in `[0, 1]`.
    pub pull_fraction: f32,
    /// Releasing now would commit a scene change.
    pub armed: bool,
    /// Direction a release would commit to; `None` while unarmed.
    pub direction: Option<NavDirection>,
}

#[derive(Clone, Copy, Debug, serde::Serialize)]
/// Snapshot of a running scene transition.
pub struct TransitionFrame {
    /// Scene being left.
    pub from: usize,
    /// Scene being entered.
    pub to: usize,
    /// Travel direction of the change.
    pub direction: NavDirection,
    /// Transition flavor to draw.
    pub kind: TransitionKind,
    /// Eased progress in `[0, 1]`.
    pub progress: f64,
}

#[tracing::instrument(skip(player))]
/// Project the player onto plain drawable values for one frame.
pub fn compose_frame(player: &Player, now: Instant) -> ViewFrame {
    let state = player.state();
    let deck = player.deck();

    let drag = state.gesture.active.then(|| {
        let offset = state.gesture.offset;
        let armed = offset.abs() > SWIPE_COMMIT_PX;
        let direction = if !armed {
            None
        } else if offset < 0.0 {
            Some(NavDirection::Forward)
        } else {
            Some(NavDirection::Backward)
        };
        DragFrame {
            offset,
            shift: offset * DRAG_FOLLOW_FACTOR,
            pull_fraction: (offset.abs() / (SWIPE_COMMIT_PX * 2.0)).min(1.0),
            armed,
            direction,
        }
    });

    let transition = player.transition().map(|tr| TransitionFrame {
        from: tr.from,
        to: tr.to,
        direction: tr.direction,
        kind: tr.kind,
        progress: tr.progress(now),
    });

    let menu = deck
        .scenes
        .iter()
        .map(|scene| MenuRow {
            index: scene.id,
            title: scene.title.clone(),
            subtitle: scene.subtitle.clone(),
            active: scene.id == state.current_index,
        })
        .collect();

    ViewFrame {
        deck_title: deck.title.clone(),
        index: state.current_index,
        scene_count: player.scene_count(),
        scene: player.current_scene().clone(),
        playing: state.playing,
        layout: state.layout,
        progress_fraction: player.progress_fraction(),
        hint_visible: state.hint_visible,
        menu_open: state.menu_open,
        menu,
        drag,
        transition,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/frame.rs"]
mod tests;
