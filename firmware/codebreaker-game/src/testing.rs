//! Test doubles for the display and touch collaborators

use std::collections::VecDeque;
use std::string::{String, ToString};
use std::vec::Vec;

use codebreaker_input::{Delay, KeyboardLayout, RawTouch, TouchReadError, TouchSource};

use crate::backend::{Color, DisplayBackend};

/// Portrait ILI9341
pub const WIDTH: u32 = 240;
pub const HEIGHT: u16 = 320;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text { x: i32, y: i32, text: String, color: Color },
    Rect { x: i32, y: i32, w: u32, h: u32 },
    Fill { x: i32, y: i32, w: u32, h: u32 },
}

/// Records draw calls; `ops` holds the screen since the last clear
pub struct RecordingDisplay {
    ops: Vec<DrawOp>,
    texts: Vec<String>,
    refreshes: usize,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            texts: Vec::new(),
            refreshes: 0,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Whether any text drawn so far contains `needle`
    pub fn shows(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }
}

impl DisplayBackend for RecordingDisplay {
    fn width(&self) -> u32 {
        WIDTH
    }

    fn height(&self) -> u32 {
        HEIGHT as u32
    }

    fn clear(&mut self) {
        self.ops.clear();
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, _background: Option<Color>) {
        self.texts.push(text.to_string());
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn draw_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, _color: Color) {
        self.ops.push(DrawOp::Rect { x, y, w, h });
    }

    fn fill_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, _color: Color) {
        self.ops.push(DrawOp::Fill { x, y, w, h });
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

/// Touch source replaying a fixed list of taps, one per poll
pub struct TapScript {
    layout: KeyboardLayout,
    taps: VecDeque<RawTouch>,
}

impl TapScript {
    pub fn new() -> Self {
        Self {
            layout: KeyboardLayout::standard(),
            taps: VecDeque::new(),
        }
    }

    /// Taps not yet delivered
    pub fn remaining(&self) -> usize {
        self.taps.len()
    }

    /// A tap above the keyboard, for "touch to continue" screens
    pub fn anywhere(mut self) -> Self {
        self.taps.push_back(RawTouch::new(5, HEIGHT - 5));
        self
    }

    /// Type `text` on the keyboard and press ENTER
    pub fn answer(mut self, text: &str) -> Self {
        for c in text.chars() {
            let label = if c == ' ' { "SPACE".to_string() } else { c.to_string() };
            self.key(&label);
        }
        self.key("ENTER");
        self
    }

    fn key(&mut self, label: &str) {
        let (x, y) = self.layout.key_center(label).expect("label has a key");
        self.taps
            .push_back(RawTouch::new(x as u16, (HEIGHT as i32 - y) as u16));
    }
}

impl TouchSource for TapScript {
    fn poll_raw(&mut self) -> Result<Option<RawTouch>, TouchReadError> {
        Ok(self.taps.pop_front())
    }
}

/// Fails the test if the game waits after the script ran out
pub struct PanicDelay;

impl Delay for PanicDelay {
    fn delay_ms(&mut self, _ms: u32) {
        panic!("tap script exhausted");
    }
}

#[test]
fn test_recording_display_keeps_history_across_clear() {
    let mut display = RecordingDisplay::new();
    display.draw_text(0, 0, "first", Color::WHITE, None);
    display.clear();
    display.draw_text(0, 0, "second", Color::WHITE, None);

    assert_eq!(display.ops().len(), 1);
    assert!(display.shows("first"));
    assert!(display.shows("second"));
}
