//! Vignette is a scene-based greeting presentation engine.
//!
//! A [`Deck`] (an ordered list of [`Scene`]s plus presentation-wide
//! settings) is driven by a [`Player`]: the state machine behind
//! navigation, autoplay, drag gestures and responsive layout. The render
//! layer never reaches into the player; it draws a [`ViewFrame`] composed
//! as a pure function of player state, which is what the bundled egui
//! front-end ([`ui`]) and the `vignette` binary do.
//!
//! # Pipeline overview
//!
//! 1. **Model**: `Deck` + `Scene` (validated, serde-loadable)
//! 2. **Drive**: `Player` operations mutate state inside the host event loop
//! 3. **Compose**: [`compose_frame`] turns `(player, now)` into a `ViewFrame`
//! 4. **Draw**: the front-end paints the frame and schedules the next wakeup
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic core**: the player never reads the system clock; every
//!   time-dependent operation takes an explicit [`std::time::Instant`].
//! - **One timer handle**: autoplay is a single re-armed deadline, released
//!   on pause, never a stack of intervals.
#![forbid(unsafe_code)]

mod animation;
mod deck;
mod foundation;
mod playback;
mod view;

/// Desktop front-end: egui window, input wiring, painting.
pub mod ui;

pub use animation::ease::Ease;
pub use animation::transition::{
    ActiveTransition, TransitionKind, TransitionStyle, parse_transition,
};
pub use deck::dsl::{DeckBuilder, SceneBuilder, sample_deck};
pub use deck::model::{Deck, Scene, TransitionSpec};
pub use foundation::core::{LayoutMode, MOBILE_BREAKPOINT_PX, NavDirection, SWIPE_COMMIT_PX};
pub use foundation::error::{VignetteError, VignetteResult};
pub use playback::autoplay::AutoplayTimer;
pub use playback::gesture::{GestureState, SwipeVerdict, classify_release};
pub use playback::player::{Player, PlayerState, Tick};
pub use view::frame::{DragFrame, MenuRow, TransitionFrame, ViewFrame, compose_frame};
