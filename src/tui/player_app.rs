//! Player application state and key handling.
//!
//! The binary owns the terminal and the wall clock; this struct owns the
//! session and translates keys into playback controls.

use std::time::Duration;

use crossterm::event::KeyCode;
use tracing::warn;

use crate::config::VizConfig;
use crate::error::VizResult;
use crate::playback::{PlaybackState, PlaybackView};
use crate::session::VisualizationSession;

/// Application state for the trace player.
#[derive(Debug)]
pub struct PlayerApp {
    /// The session being played.
    pub session: VisualizationSession,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Last message for the status bar (errors, load results).
    pub message: Option<String>,
}

impl PlayerApp {
    /// Wrap an existing session.
    #[must_use]
    pub const fn new(session: VisualizationSession) -> Self {
        Self {
            session,
            should_quit: false,
            message: None,
        }
    }

    /// Build the session from `config`. Without a configured algorithm the
    /// first registered one is loaded with a generated input.
    ///
    /// # Errors
    ///
    /// Returns error if the configured algorithm or input is rejected.
    pub fn from_config(config: &VizConfig) -> VizResult<Self> {
        let mut session = VisualizationSession::from_config(config)?;
        if session.algorithm().is_none() {
            if let Some(first) = session.registry().names().first().copied() {
                session.load_generated(first)?;
            }
        }
        Ok(Self::new(session))
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.session.controller_mut().toggle(),
            KeyCode::Right => self.session.controller_mut().step_forward(),
            KeyCode::Left => self.session.controller_mut().step_backward(),
            KeyCode::Home => self.session.controller_mut().jump_to_start(),
            KeyCode::End => self.session.controller_mut().jump_to_end(),
            KeyCode::Char('+' | '=') => {
                let controller = self.session.controller_mut();
                let faster = controller.speed().faster();
                controller.set_speed(faster);
            }
            KeyCode::Char('-') => {
                let controller = self.session.controller_mut();
                let slower = controller.speed().slower();
                controller.set_speed(slower);
            }
            KeyCode::Char('r') => self.rewind(),
            KeyCode::Char('l') => self.reload(),
            KeyCode::Char('g') => self.regenerate(),
            KeyCode::Tab => self.next_algorithm(),
            _ => {}
        }
    }

    /// Feed elapsed wall time to autoplay. Moves at most one frame, so the
    /// caller redraws between frames after a stall.
    pub fn tick(&mut self, dt: Duration) {
        self.session.controller_mut().advance(dt);
    }

    /// Back to frame 0, paused.
    fn rewind(&mut self) {
        let controller = self.session.controller_mut();
        controller.pause();
        controller.jump_to_start();
    }

    /// Re-record the current input.
    fn reload(&mut self) {
        match self.session.reload() {
            Ok(Some(_)) => self.message = Some("Reloaded".to_string()),
            Ok(None) => {}
            Err(e) => self.report(&e),
        }
    }

    /// Record the current algorithm on a fresh random input.
    fn regenerate(&mut self) {
        let Some(name) = self.session.algorithm().map(ToString::to_string) else {
            return;
        };
        if let Err(e) = self.session.load_generated(&name) {
            self.report(&e);
        } else {
            self.message = None;
        }
    }

    /// Switch to the next registered algorithm with a generated input.
    fn next_algorithm(&mut self) {
        let names = self.session.registry().names();
        if names.is_empty() {
            return;
        }
        let next = self
            .session
            .algorithm()
            .and_then(|current| names.iter().position(|n| *n == current))
            .map_or(0, |i| (i + 1) % names.len());
        if let Err(e) = self.session.load_generated(names[next]) {
            self.report(&e);
        } else {
            self.message = None;
        }
    }

    fn report(&mut self, error: &crate::error::VizError) {
        warn!(%error, "player action failed");
        self.message = Some(error.to_string());
    }

    /// Check if the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// What to paint.
    #[must_use]
    pub fn view(&self) -> PlaybackView<'_, serde_json::Value> {
        self.session.controller().view()
    }

    /// Narrative of the current frame.
    #[must_use]
    pub fn narrative(&self) -> &str {
        self.view()
            .frame
            .and_then(|f| f.payload().get("narrative"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("")
    }

    /// Progress through the trace in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        let view = self.view();
        match (view.cursor, view.len) {
            (Some(cursor), len) if len > 1 => cursor as f64 / (len - 1) as f64,
            (Some(_), _) => 1.0,
            (None, _) => 0.0,
        }
    }

    /// One-line playback summary for the status bar.
    #[must_use]
    pub fn status_line(&self) -> String {
        let view = self.view();
        let controller = self.session.controller();
        let position = view
            .cursor
            .map_or_else(|| "-".to_string(), |c| format!("{}/{}", c + 1, view.len));
        let mut line = format!(
            "{} | frame {position} | {} | {} per frame",
            self.session.algorithm().unwrap_or("none"),
            view.state,
            controller.speed()
        );
        if view.state == PlaybackState::Finished {
            line.push_str(" | r to rewind");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmInput;

    fn app_with(name: &str, input: AlgorithmInput) -> PlayerApp {
        let config = VizConfig::builder().algorithm(name).input(input).build();
        PlayerApp::from_config(&config).unwrap()
    }

    fn sum_app() -> PlayerApp {
        app_with(
            "array_sum",
            AlgorithmInput::Array {
                values: vec![1, 2, 3],
            },
        )
    }

    #[test]
    fn test_new_app() {
        let app = sum_app();
        assert!(!app.should_quit());
        assert_eq!(app.view().state, PlaybackState::Paused);
        assert_eq!(app.view().cursor, Some(0));
        assert!(app.message.is_none());
    }

    #[test]
    fn test_default_config_loads_first_algorithm() {
        let app = PlayerApp::from_config(&VizConfig::default()).unwrap();
        assert_eq!(app.session.algorithm(), Some("array_sum"));
        assert!(app.view().len > 0);
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = sum_app();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = sum_app();
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_space_toggles_play() {
        let mut app = sum_app();
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.view().state, PlaybackState::Playing);
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.view().state, PlaybackState::Paused);
    }

    #[test]
    fn test_arrow_keys_step() {
        let mut app = sum_app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.view().cursor, Some(2));
        app.handle_key(KeyCode::Left);
        assert_eq!(app.view().cursor, Some(1));
    }

    #[test]
    fn test_home_end() {
        let mut app = sum_app();
        app.handle_key(KeyCode::End);
        assert_eq!(app.view().cursor, Some(3));
        assert_eq!(app.view().state, PlaybackState::Finished);
        assert!((app.progress() - 1.0).abs() < f64::EPSILON);
        assert!(app.status_line().contains("Finished"));

        app.handle_key(KeyCode::Home);
        assert_eq!(app.view().cursor, Some(0));
        assert_eq!(app.view().state, PlaybackState::Paused);
    }

    #[test]
    fn test_speed_keys() {
        let mut app = sum_app();
        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.session.controller().interval(), Duration::from_millis(500));
        app.handle_key(KeyCode::Char('-'));
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(app.session.controller().interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_tick_advances_when_playing() {
        let mut app = sum_app();
        app.tick(Duration::from_secs(5));
        assert_eq!(app.view().cursor, Some(0));

        app.handle_key(KeyCode::Char(' '));
        app.tick(Duration::from_millis(750));
        assert_eq!(app.view().cursor, Some(1));

        // A long stall drains one frame per tick
        app.tick(Duration::from_secs(10));
        assert_eq!(app.view().cursor, Some(2));
        app.tick(Duration::ZERO);
        assert_eq!(app.view().cursor, Some(3));
        assert_eq!(app.view().state, PlaybackState::Finished);
    }

    #[test]
    fn test_rewind_pauses_at_start() {
        let mut app = sum_app();
        app.handle_key(KeyCode::Char(' '));
        app.tick(Duration::from_millis(750));
        app.tick(Duration::from_millis(750));
        assert_eq!(app.view().cursor, Some(2));
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.view().cursor, Some(0));
        assert_eq!(app.view().state, PlaybackState::Paused);
    }

    #[test]
    fn test_reload_rewinds() {
        let mut app = sum_app();
        app.handle_key(KeyCode::End);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.view().cursor, Some(0));
        assert_eq!(app.message.as_deref(), Some("Reloaded"));
    }

    #[test]
    fn test_tab_cycles_algorithms() {
        let mut app = sum_app();
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.session.algorithm(), Some("cookie_assignment"));
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.session.algorithm(), Some("count_zeros"));
    }

    #[test]
    fn test_regenerate_keeps_algorithm() {
        let mut app = sum_app();
        app.handle_key(KeyCode::Char('g'));
        assert_eq!(app.session.algorithm(), Some("array_sum"));
        assert_ne!(
            app.session.input(),
            Some(&AlgorithmInput::Array {
                values: vec![1, 2, 3]
            })
        );
    }

    #[test]
    fn test_narrative_and_status() {
        let app = sum_app();
        assert!(!app.narrative().is_empty());
        let status = app.status_line();
        assert!(status.contains("array_sum"));
        assert!(status.contains("frame 1/4"));
        assert!(status.contains("750ms"));
    }
}
