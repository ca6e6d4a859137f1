//! Lifecycle tests for the player.

use std::time::Duration;

use crossterm::event::KeyCode;

use super::player_app::PlayerApp;
use crate::algorithms::AlgorithmInput;
use crate::config::VizConfig;
use crate::playback::{PlaybackState, SpeedPreset};

#[test]
fn test_player_lifecycle() {
    let config = VizConfig::builder()
        .algorithm("factorial")
        .input(AlgorithmInput::Number { n: 4 })
        .speed(SpeedPreset::Fastest)
        .autoplay(true)
        .build();
    let mut app = PlayerApp::from_config(&config).unwrap_or_else(|e| panic!("{e}"));

    // Autoplay starts on load
    assert_eq!(app.view().state, PlaybackState::Playing);
    assert_eq!(app.view().len, 9);

    // A 500 ms stall covers two ticks; each lands on its own loop pass
    app.tick(Duration::from_millis(500));
    assert_eq!(app.view().cursor, Some(1));
    app.tick(Duration::ZERO);
    assert_eq!(app.view().cursor, Some(2));

    // Stepping back pauses
    app.handle_key(KeyCode::Left);
    assert_eq!(app.view().state, PlaybackState::Paused);
    assert_eq!(app.view().cursor, Some(1));

    // Paused time does not move the cursor
    app.tick(Duration::from_secs(3));
    assert_eq!(app.view().cursor, Some(1));

    // Resume and run to the end
    app.handle_key(KeyCode::Char(' '));
    for _ in 0..7 {
        app.tick(Duration::from_millis(250));
    }
    assert_eq!(app.view().state, PlaybackState::Finished);
    assert_eq!(app.view().cursor, Some(8));

    // Space at the end does nothing
    app.handle_key(KeyCode::Char(' '));
    assert_eq!(app.view().state, PlaybackState::Finished);

    // Rewind, then quit
    app.handle_key(KeyCode::Char('r'));
    assert_eq!(app.view().cursor, Some(0));
    app.handle_key(KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn test_player_speed_change_applies_next_tick() {
    let config = VizConfig::builder()
        .algorithm("array_sum")
        .input(AlgorithmInput::Array {
            values: vec![1, 2, 3, 4, 5, 6],
        })
        .build();
    let mut app = PlayerApp::from_config(&config).unwrap_or_else(|e| panic!("{e}"));

    app.handle_key(KeyCode::Char(' '));
    app.tick(Duration::from_millis(700));
    assert_eq!(app.view().cursor, Some(0));

    // Switching to 500 ms discards the 700 ms already accrued
    app.handle_key(KeyCode::Char('+'));
    app.tick(Duration::from_millis(499));
    assert_eq!(app.view().cursor, Some(0));
    app.tick(Duration::from_millis(1));
    assert_eq!(app.view().cursor, Some(1));
}
