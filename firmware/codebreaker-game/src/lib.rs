//! # CodeBreaker
//!
//! A five-level puzzle played on a touchscreen with an on-screen keyboard.
//! Correct answers each add one character to a secret code.
//!
//! Works with any display that implements [`DisplayBackend`] and any touch
//! controller that can feed a [`TouchInputChannel`]:
//! - SPI LCD (ILI9341, 240×320 portrait) with an XPT2046 touch controller
//! - The host simulator in `tools/codebreaker-sim`
//!
//! # Usage
//!
//! ```no_run
//! use codebreaker_game::{CodeBreaker, DisplayBackend, GameConfig, LEVELS};
//! use codebreaker_input::{Delay, InterruptDriven, TouchInputChannel};
//!
//! static TOUCH: TouchInputChannel = TouchInputChannel::new(320);
//!
//! fn start(display: impl DisplayBackend, delay: impl Delay) -> ! {
//!     let mut game = CodeBreaker::new(
//!         display,
//!         InterruptDriven,
//!         delay,
//!         &TOUCH,
//!         &LEVELS,
//!         GameConfig::default(),
//!     );
//!     game.run()
//! }
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod backend;
pub mod game;
pub mod levels;
pub mod screens;
pub mod text_input;

#[cfg(test)]
mod testing;

pub use app::{CodeBreaker, GameConfig};
pub use backend::{Color, DisplayBackend};
pub use game::{GameSession, GameState, GameStateMachine};
pub use levels::{LevelChallenge, MatchRule, LEVELS};
pub use text_input::{display_tail, KeyOutcome, TextInputSession};

// Re-export input types for convenience
pub use codebreaker_input::{
    Delay, InterruptDriven, KeyboardLayout, RawTouch, TouchEvent, TouchInputChannel,
    TouchReadError, TouchSource, POLL_INTERVAL_MS,
};
