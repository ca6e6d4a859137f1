//! Terminal player.
//!
//! Application state and key handling live here so they can be tested; the
//! `stepwise-tui` binary owns the terminal and the wall clock.

#[cfg(feature = "tui")]
pub mod player_app;

#[cfg(test)]
#[cfg(feature = "tui")]
mod tests;
