use super::*;
use crate::deck::dsl::{DeckBuilder, SceneBuilder};
use crate::deck::model::TransitionSpec;

fn deck_of(n: usize) -> Deck {
    let mut builder = DeckBuilder::new("Test Deck").hint_timeout_ms(None);
    for i in 0..n {
        builder = builder.scene(SceneBuilder::new(format!("Scene {i}")).content(format!("body {i}")));
    }
    builder.build().unwrap()
}

fn player_of(n: usize) -> (Player, Instant) {
    let t0 = Instant::now();
    (Player::new(deck_of(n), t0).unwrap(), t0)
}

/// Player with autoplay already running, armed at `t0`.
fn playing_player_of(n: usize) -> (Player, Instant) {
    let (mut player, t0) = player_of(n);
    player.toggle_play(t0);
    (player, t0)
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn starts_on_first_scene_paused() {
    let (player, _) = player_of(5);
    let state = player.state();

    assert_eq!(state.current_index, 0);
    assert!(!state.playing);
    assert!(state.hint_visible);
    assert!(!state.menu_open);
    assert!(!state.gesture.active);
    assert_eq!(player.current_scene().title, "Scene 0");
    assert_eq!(player.progress_fraction(), 0.2);
    assert!(player.transition().is_none());
    assert_eq!(player.next_deadline(), None);
}

#[test]
fn invalid_deck_is_rejected_up_front() {
    let deck = Deck {
        title: "Broken".to_string(),
        scenes: vec![],
        autoplay_interval_ms: 5000,
        transition: TransitionSpec::default(),
        hint_timeout_ms: None,
    };
    assert!(Player::new(deck, Instant::now()).is_err());
}

#[test]
fn advance_and_retreat_wrap_cyclically() {
    let (mut player, t0) = player_of(5);
    for expected in [1, 2, 3, 4, 0, 1] {
        player.advance(t0);
        assert_eq!(player.state().current_index, expected);
    }
    for expected in [0, 4, 3] {
        player.retreat(t0);
        assert_eq!(player.state().current_index, expected);
    }
}

#[test]
fn retreat_inverts_advance_from_any_index() {
    let (mut player, t0) = player_of(5);
    player.jump_to(3, t0);

    player.advance(t0);
    player.retreat(t0);
    assert_eq!(player.state().current_index, 3);

    player.retreat(t0);
    player.advance(t0);
    assert_eq!(player.state().current_index, 3);
}

#[test]
fn single_scene_deck_never_moves() {
    let (mut player, t0) = player_of(1);
    player.advance(t0);
    assert_eq!(player.state().current_index, 0);
    assert!(player.transition().is_none());

    player.retreat(t0);
    assert_eq!(player.state().current_index, 0);
    assert!(player.transition().is_none());
}

#[test]
fn two_scene_deck_round_trips_both_ways() {
    let (mut player, t0) = player_of(2);
    player.advance(t0);
    assert_eq!(player.state().current_index, 1);
    player.advance(t0);
    assert_eq!(player.state().current_index, 0);
    player.retreat(t0);
    assert_eq!(player.state().current_index, 1);
    player.retreat(t0);
    assert_eq!(player.state().current_index, 0);
}

#[test]
fn wrap_keeps_travel_direction() {
    let (mut player, t0) = player_of(3);
    player.jump_to(2, t0);

    player.advance(t0);
    assert_eq!(player.state().current_index, 0);
    assert_eq!(player.transition().unwrap().direction, NavDirection::Forward);

    player.retreat(t0);
    assert_eq!(player.state().current_index, 2);
    assert_eq!(player.transition().unwrap().direction, NavDirection::Backward);
}

#[test]
fn jump_clamps_past_the_end() {
    let (mut player, t0) = player_of(5);
    player.jump_to(99, t0);
    assert_eq!(player.state().current_index, 4);

    player.jump_to(2, t0);
    assert_eq!(player.state().current_index, 2);
}

#[test]
fn jump_to_current_index_stays_quiet() {
    let (mut player, t0) = player_of(5);
    player.jump_to(2, t0);
    player.tick(t0 + ms(2000));
    assert!(player.transition().is_none());

    player.jump_to(2, t0 + ms(2000));
    assert!(player.transition().is_none());
    assert_eq!(player.state().current_index, 2);
}

#[test]
fn jump_direction_follows_relative_order() {
    let (mut player, t0) = player_of(5);
    player.jump_to(3, t0);
    assert_eq!(player.transition().unwrap().direction, NavDirection::Forward);

    player.jump_to(1, t0);
    assert_eq!(player.transition().unwrap().direction, NavDirection::Backward);
}

#[test]
fn progress_counts_the_current_scene() {
    let (mut player, t0) = player_of(4);
    assert_eq!(player.progress_fraction(), 0.25);
    player.jump_to(3, t0);
    assert_eq!(player.progress_fraction(), 1.0);
}

#[test]
fn swipe_left_past_threshold_advances() {
    let (mut player, t0) = player_of(5);
    player.begin_gesture(300.0);
    player.update_gesture(250.0);
    player.update_gesture(160.0);
    player.end_gesture(160.0, t0);

    assert_eq!(player.state().current_index, 1);
    assert!(!player.state().gesture.active);
}

#[test]
fn swipe_right_past_threshold_retreats() {
    let (mut player, t0) = player_of(5);
    player.begin_gesture(100.0);
    player.end_gesture(230.0, t0);
    assert_eq!(player.state().current_index, 4);
}

#[test]
fn short_swipe_stays_put() {
    let (mut player, t0) = player_of(5);
    player.begin_gesture(300.0);
    player.update_gesture(240.0);
    player.end_gesture(240.0, t0);

    assert_eq!(player.state().current_index, 0);
    assert!(player.transition().is_none());
    assert!(!player.state().gesture.active);
}

#[test]
fn exact_threshold_swipe_stays_put() {
    let (mut player, t0) = player_of(5);
    player.begin_gesture(300.0);
    player.end_gesture(200.0, t0);
    assert_eq!(player.state().current_index, 0);
}

#[test]
fn end_without_begin_is_a_no_op() {
    let (mut player, t0) = player_of(5);
    player.end_gesture(50.0, t0);
    assert_eq!(player.state().current_index, 0);
    assert!(!player.state().gesture.active);
}

#[test]
fn swipes_starting_at_zero_classify_by_travel() {
    let (mut player, t0) = player_of(5);

    // A start of exactly 0.0 is a live gesture, not a missing one.
    player.begin_gesture(0.0);
    player.update_gesture(-150.0);
    player.end_gesture(-150.0, t0);
    assert_eq!(player.state().current_index, 1);

    player.begin_gesture(0.0);
    player.update_gesture(150.0);
    player.end_gesture(150.0, t0);
    assert_eq!(player.state().current_index, 0);

    player.begin_gesture(0.0);
    player.update_gesture(30.0);
    player.end_gesture(30.0, t0);
    assert_eq!(player.state().current_index, 0);
    assert!(!player.state().gesture.active);

    // The short release opened no new window; the retreat's is still up.
    let tr = player.transition().unwrap();
    assert_eq!((tr.from, tr.to), (1, 0));
}

#[test]
fn toggling_play_twice_keeps_one_deadline() {
    let (mut player, t0) = player_of(5);
    player.toggle_play(t0 + ms(100));
    assert!(player.state().playing);
    assert_eq!(player.next_deadline(), Some(t0 + ms(5100)));

    player.toggle_play(t0 + ms(200));
    assert!(!player.state().playing);
    assert_eq!(player.next_deadline(), None);
}

#[test]
fn navigation_while_paused_arms_nothing() {
    let (mut player, t0) = player_of(5);
    player.advance(t0);
    assert_eq!(player.state().current_index, 1);

    // Only the transition window is pending, no autoplay dwell.
    assert_eq!(player.next_deadline(), Some(t0 + ms(800)));
    player.tick(t0 + ms(800));
    assert_eq!(player.next_deadline(), None);
}

#[test]
fn paused_player_never_auto_advances() {
    let (mut player, t0) = player_of(5);
    let tick = player.tick(t0 + Duration::from_secs(60));
    assert!(!tick.advanced);
    assert_eq!(player.state().current_index, 0);

    player.toggle_play(t0 + Duration::from_secs(60));
    player.toggle_play(t0 + Duration::from_secs(61));
    let tick = player.tick(t0 + Duration::from_secs(120));
    assert!(!tick.advanced);
    assert_eq!(player.state().current_index, 0);
}

#[test]
fn autoplay_fires_at_the_exact_interval() {
    let (mut player, t0) = playing_player_of(5);

    let tick = player.tick(t0 + ms(4999));
    assert!(!tick.advanced);
    assert!(!tick.changed);
    assert_eq!(player.state().current_index, 0);

    let tick = player.tick(t0 + ms(5000));
    assert!(tick.advanced);
    assert!(tick.changed);
    assert_eq!(player.state().current_index, 1);
}

#[test]
fn manual_navigation_restarts_the_dwell() {
    let (mut player, t0) = playing_player_of(5);
    player.advance(t0 + ms(4000));
    assert_eq!(player.state().current_index, 1);

    // The deadline armed at t0 must not fire; navigation replaced it.
    let tick = player.tick(t0 + ms(5000));
    assert!(!tick.advanced);
    assert_eq!(player.state().current_index, 1);

    let tick = player.tick(t0 + ms(9000));
    assert!(tick.advanced);
    assert_eq!(player.state().current_index, 2);
}

#[test]
fn late_tick_advances_a_single_scene() {
    let (mut player, t0) = playing_player_of(5);

    let tick = player.tick(t0 + ms(17_500));
    assert!(tick.advanced);
    assert_eq!(player.state().current_index, 1);

    assert!(!player.tick(t0 + ms(22_000)).advanced);
    let tick = player.tick(t0 + ms(22_500));
    assert!(tick.advanced);
    assert_eq!(player.state().current_index, 2);
}

#[test]
fn autoplay_fire_leaves_gesture_tracking_intact() {
    let (mut player, t0) = playing_player_of(5);
    player.begin_gesture(300.0);
    player.update_gesture(260.0);

    let tick = player.tick(t0 + ms(5000));
    assert!(tick.advanced);
    assert_eq!(player.state().current_index, 1);
    assert!(player.state().gesture.active);
    assert_eq!(player.state().gesture.start_x, 300.0);
    assert_eq!(player.state().gesture.offset, -40.0);
}

#[test]
fn first_touch_dismisses_hint_for_good() {
    let deck = DeckBuilder::new("Hinted")
        .hint_timeout_ms(Some(60_000))
        .scene(SceneBuilder::new("One").content("a"))
        .scene(SceneBuilder::new("Two").content("b"))
        .build()
        .unwrap();
    let t0 = Instant::now();
    let mut player = Player::new(deck, t0).unwrap();
    assert!(player.state().hint_visible);

    player.begin_gesture(100.0);
    assert!(!player.state().hint_visible);
    player.end_gesture(100.0, t0);

    // A later hint deadline must not resurrect it.
    player.tick(t0 + Duration::from_secs(120));
    assert!(!player.state().hint_visible);
}

#[test]
fn hint_expires_on_its_deadline() {
    let deck = DeckBuilder::new("Hinted")
        .hint_timeout_ms(Some(1000))
        .scene(SceneBuilder::new("One").content("a"))
        .build()
        .unwrap();
    let t0 = Instant::now();
    let mut player = Player::new(deck, t0).unwrap();
    assert_eq!(player.next_deadline(), Some(t0 + ms(1000)));

    let tick = player.tick(t0 + ms(999));
    assert!(player.state().hint_visible);
    assert!(!tick.changed);

    let tick = player.tick(t0 + ms(1000));
    assert!(!player.state().hint_visible);
    assert!(tick.changed);
    assert_eq!(player.next_deadline(), None);
}

#[test]
fn transition_clears_after_its_duration() {
    let (mut player, t0) = player_of(5);
    player.advance(t0);
    let tr = player.transition().unwrap();
    assert_eq!((tr.from, tr.to), (0, 1));
    assert_eq!(tr.direction, NavDirection::Forward);

    let tick = player.tick(t0 + ms(799));
    assert!(player.transition().is_some());
    assert!(!tick.changed);

    let tick = player.tick(t0 + ms(800));
    assert!(player.transition().is_none());
    assert!(tick.changed);
}

#[test]
fn mid_flight_navigation_replaces_the_transition() {
    let (mut player, t0) = player_of(5);
    player.advance(t0);
    player.advance(t0 + ms(300));

    let tr = player.transition().unwrap();
    assert_eq!((tr.from, tr.to), (1, 2));
    assert_eq!(tr.started, t0 + ms(300));
}

#[test]
fn next_deadline_is_the_earliest_pending() {
    let (mut player, t0) = playing_player_of(5);
    assert_eq!(player.next_deadline(), Some(t0 + ms(5000)));

    // After navigating, the transition end precedes the re-armed dwell.
    player.advance(t0 + ms(1000));
    assert_eq!(player.next_deadline(), Some(t0 + ms(1800)));

    player.tick(t0 + ms(1800));
    assert_eq!(player.next_deadline(), Some(t0 + ms(6000)));
}

#[test]
fn viewport_width_classifies_layout() {
    let (mut player, _) = player_of(3);
    assert!(!player.state().layout.is_mobile());

    player.set_viewport_width(390.0);
    assert!(player.state().layout.is_mobile());

    player.set_viewport_width(1280.0);
    assert!(!player.state().layout.is_mobile());
}

#[test]
fn resize_keeps_an_active_gesture() {
    let (mut player, t0) = player_of(3);
    player.set_viewport_width(390.0);
    player.begin_gesture(200.0);
    player.update_gesture(80.0);

    player.set_viewport_width(1024.0);
    assert!(player.state().gesture.active);
    assert_eq!(player.state().gesture.offset, -120.0);

    player.end_gesture(80.0, t0);
    assert_eq!(player.state().current_index, 1);
}

#[test]
fn menu_selection_jumps_and_closes() {
    let (mut player, t0) = player_of(5);
    player.toggle_menu();
    assert!(player.state().menu_open);

    player.select_scene(3, t0);
    assert_eq!(player.state().current_index, 3);
    assert!(!player.state().menu_open);
}
