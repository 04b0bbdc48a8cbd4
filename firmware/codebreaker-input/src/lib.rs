//! # CodeBreaker Input Layer
//!
//! Touch capture and on-screen keyboard geometry for the CodeBreaker puzzle:
//! - **Touch**: a single-slot mailbox shared between the touch interrupt and
//!   the main loop, plus the cooperative wait loop built on top of it
//! - **Keyboard**: the fixed 6-row key grid and its hit-test
//!
//! # Usage
//!
//! ```no_run
//! use codebreaker_input::{Delay, InterruptDriven, KeyboardLayout, RawTouch, TouchInputChannel};
//!
//! static TOUCH: TouchInputChannel = TouchInputChannel::new(320);
//!
//! // Called from the XPT2046 pen-down interrupt
//! fn touch_irq(x: u16, y: u16) {
//!     TOUCH.on_touch(RawTouch::new(x, y));
//! }
//!
//! fn keyboard_loop(delay: &mut impl Delay) {
//!     let layout = KeyboardLayout::standard();
//!     loop {
//!         let event = TOUCH.wait_for_touch(&mut InterruptDriven, delay, 100);
//!         if let Some(label) = layout.hit_test(event.x, event.y) {
//!             // handle key
//!         }
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod keyboard;
pub mod touch;

pub use keyboard::{KeyAction, KeyCategory, KeyDefinition, KeyMetrics, KeyPosition, KeyboardLayout};
pub use touch::{
    Delay, InterruptDriven, RawTouch, TouchEvent, TouchInputChannel, TouchReadError, TouchSource,
    POLL_INTERVAL_MS,
};
