//! Scripted touch input
//!
//! A round is planned up front as a list of raw controller readings: the
//! start tap, then per level the briefing tap, the answer keys, ENTER and
//! the result tap, and finally the restart tap on the game-over screen.
//! The readings reach the game either through a polled [`TouchSource`] or
//! from a feeder thread that plays the interrupt handler.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use codebreaker_game::{
    Delay, KeyboardLayout, LevelChallenge, RawTouch, TouchInputChannel, TouchReadError,
    TouchSource,
};

/// Display point used for "touch to continue" screens, above the keyboard
const CONTINUE_POINT: (i32, i32) = (5, 5);

/// Keyboard label that types `c`; letters are entered in upper case
fn key_label(c: char) -> String {
    if c == ' ' {
        "SPACE".to_string()
    } else {
        c.to_ascii_uppercase().to_string()
    }
}

/// Controller reading for a display point
fn raw_at(display_height: u16, (x, y): (i32, i32)) -> RawTouch {
    RawTouch::new(x as u16, (display_height as i32 - y) as u16)
}

/// Taps for one complete game
///
/// `answers` is matched to `levels` by index. Missing answers are entered as
/// empty strings and extras are dropped. Characters without a key are
/// skipped, so the typed answer may differ from the scripted one.
pub fn plan_round(
    layout: &KeyboardLayout,
    levels: &[LevelChallenge],
    answers: &[String],
    display_height: u16,
) -> Vec<RawTouch> {
    if answers.len() != levels.len() {
        log::warn!(
            "{} answers scripted for {} levels",
            answers.len(),
            levels.len()
        );
    }

    let tap = |point| raw_at(display_height, point);
    let mut taps = vec![tap(CONTINUE_POINT)];

    for (i, _) in levels.iter().enumerate() {
        let answer = answers.get(i).map(String::as_str).unwrap_or("");
        taps.push(tap(CONTINUE_POINT));

        for c in answer.chars() {
            match layout.key_center(&key_label(c)) {
                Some(center) => taps.push(tap(center)),
                None => log::warn!("level {}: no key for {:?}, skipped", i + 1, c),
            }
        }
        if let Some(enter) = layout.key_center("ENTER") {
            taps.push(tap(enter));
        }

        taps.push(tap(CONTINUE_POINT));
    }

    taps.push(tap(CONTINUE_POINT));
    taps
}

/// Polled source replaying planned taps
///
/// Reports an untouched screen for `idle_polls` polls before every tap.
pub struct ScriptedSource {
    taps: VecDeque<RawTouch>,
    idle_polls: u32,
    idle: u32,
}

impl ScriptedSource {
    pub fn new(taps: impl IntoIterator<Item = RawTouch>, idle_polls: u32) -> Self {
        Self {
            taps: taps.into_iter().collect(),
            idle_polls,
            idle: 0,
        }
    }
}

#[cfg(test)]
impl ScriptedSource {
    pub fn remaining(&self) -> usize {
        self.taps.len()
    }
}

impl TouchSource for ScriptedSource {
    fn poll_raw(&mut self) -> Result<Option<RawTouch>, TouchReadError> {
        if self.taps.is_empty() {
            return Err(TouchReadError::Disconnected);
        }
        if self.idle < self.idle_polls {
            self.idle += 1;
            return Ok(None);
        }
        self.idle = 0;
        Ok(self.taps.pop_front())
    }
}

/// Host delay backed by `thread::sleep`
///
/// Raises `waiting` on every call; the game only sleeps while it is blocked
/// on an empty touch channel.
pub struct ThreadDelay {
    waiting: Option<Arc<AtomicBool>>,
}

impl ThreadDelay {
    pub fn new() -> Self {
        Self { waiting: None }
    }

    /// Delay that reports idle waits to a [`spawn_feeder`] thread
    pub fn signalling(waiting: Arc<AtomicBool>) -> Self {
        Self {
            waiting: Some(waiting),
        }
    }
}

impl Default for ThreadDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for ThreadDelay {
    fn delay_ms(&mut self, ms: u32) {
        if let Some(waiting) = &self.waiting {
            waiting.store(true, Ordering::Release);
        }
        thread::sleep(Duration::from_millis(ms as u64));
    }
}

fn spin_until(condition: impl Fn() -> bool) {
    while !condition() {
        thread::sleep(Duration::from_millis(1));
    }
}

/// Feed `taps` into `channel` from a separate thread, like a pen-down IRQ
///
/// Each tap is delivered only after the previous one was consumed and the
/// game has since gone back to waiting, so no tap is lost to the stale-touch
/// clear at the top of a wait.
pub fn spawn_feeder(
    channel: Arc<TouchInputChannel>,
    waiting: Arc<AtomicBool>,
    taps: Vec<RawTouch>,
    tap_interval: Duration,
) -> JoinHandle<usize> {
    thread::spawn(move || {
        let mut delivered = 0;
        for raw in taps {
            spin_until(|| !channel.is_pending());
            waiting.store(false, Ordering::Release);
            spin_until(|| waiting.load(Ordering::Acquire));

            thread::sleep(tap_interval);
            log::debug!("irq: raw touch ({}, {})", raw.x, raw.y);
            channel.on_touch(raw);
            delivered += 1;
        }
        delivered
    })
}
