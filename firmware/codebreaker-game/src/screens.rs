//! Screen rendering
//!
//! Stateless drawing helpers; everything they show is passed in.

use alloc::format;

use codebreaker_input::KeyboardLayout;

use crate::backend::{Color, DisplayBackend};
use crate::levels::LevelChallenge;
use crate::text_input::display_tail;

/// Glyph cell of the 8x8 font
pub const CHAR_WIDTH: u32 = 8;
/// Left edge of all text
pub const TEXT_X: i32 = 10;
/// Baseline rows used by every screen
pub const LINE_Y: [i32; 4] = [10, 30, 50, 70];
/// Line pitch of multi-line prompts
pub const LINE_PITCH: i32 = 20;

/// Height of the input line's erase box
const INPUT_BOX_HEIGHT: u32 = 20;

/// Characters of typed text that fit on the input line
pub fn input_capacity<D: DisplayBackend>(display: &D) -> usize {
    (display.width().saturating_sub(2 * TEXT_X as u32) / CHAR_WIDTH) as usize
}

pub fn title<D: DisplayBackend>(display: &mut D) {
    display.clear();
    display.draw_text(TEXT_X, LINE_Y[0], "CodeBreaker", Color::WHITE, Some(Color::BLUE));
    display.draw_text(TEXT_X, LINE_Y[1], "Touch to start", Color::GREEN, None);
    display.refresh();
}

/// Level heading and challenge text
pub fn briefing<D: DisplayBackend>(display: &mut D, level: &LevelChallenge) {
    display.clear();
    display.draw_text(TEXT_X, LINE_Y[0], level.title, Color::WHITE, None);

    let mut y = LINE_Y[1];
    for line in level.prompt {
        display.draw_text(TEXT_X, y, line, Color::GREEN, None);
        y += LINE_PITCH;
    }

    display.draw_text(TEXT_X, y + LINE_PITCH, "Touch to answer", Color::WHITE, None);
    display.refresh();
}

/// Prompt line plus the keyboard
pub fn input<D: DisplayBackend>(display: &mut D, prompt: &str, layout: &KeyboardLayout) {
    display.clear();
    display.draw_text(TEXT_X, LINE_Y[0], prompt, Color::WHITE, None);
    keyboard(display, layout);
    display.refresh();
}

/// Outline every key and write its label
pub fn keyboard<D: DisplayBackend>(display: &mut D, layout: &KeyboardLayout) {
    for pos in layout.render_positions() {
        display.draw_rectangle(pos.x, pos.y, pos.width as u32, pos.height as u32, Color::GREEN);
        display.draw_text(pos.x + pos.key.text_indent(), pos.y + 10, pos.key.label, Color::WHITE, None);
    }
}

/// Redraw the typed text, keeping the most recent characters visible
pub fn input_line<D: DisplayBackend>(display: &mut D, text: &str) {
    let width = display.width().saturating_sub(2 * TEXT_X as u32);
    display.fill_rectangle(TEXT_X, LINE_Y[1], width, INPUT_BOX_HEIGHT, Color::BLACK);

    if !text.is_empty() {
        let visible = display_tail(text, input_capacity(display));
        display.draw_text(TEXT_X, LINE_Y[1], visible, Color::GREEN, None);
    }
    display.refresh();
}

pub fn level_complete<D: DisplayBackend>(display: &mut D, code_part: Option<char>) {
    display.clear();
    display.draw_text(TEXT_X, LINE_Y[0], "Level Complete!", Color::GREEN, None);
    match code_part {
        Some(c) => display.draw_text(TEXT_X, LINE_Y[1], &format!("Code part: {}", c), Color::WHITE, None),
        None => display.draw_text(TEXT_X, LINE_Y[1], "No code part collected", Color::WHITE, None),
    }
    display.draw_text(TEXT_X, LINE_Y[2], "Touch to continue", Color::GREEN, None);
    display.refresh();
}

pub fn level_failed<D: DisplayBackend>(display: &mut D) {
    display.clear();
    display.draw_text(TEXT_X, LINE_Y[0], "Level Failed!", Color::RED, None);
    display.draw_text(TEXT_X, LINE_Y[1], "Touch to continue", Color::GREEN, None);
    display.refresh();
}

pub fn game_complete<D: DisplayBackend>(display: &mut D, secret_code: &str) {
    display.clear();
    display.draw_text(TEXT_X, LINE_Y[0], "Game Over!", Color::GREEN, None);
    display.draw_text(TEXT_X, LINE_Y[1], "You've completed CodeBreaker!", Color::WHITE, None);
    if secret_code.is_empty() {
        display.draw_text(TEXT_X, LINE_Y[2], "No secret code collected", Color::RED, None);
    } else {
        display.draw_text(
            TEXT_X,
            LINE_Y[2],
            &format!("Secret Code: {}", secret_code),
            Color::BLUE,
            None,
        );
    }
    display.draw_text(TEXT_X, LINE_Y[3], "Touch to restart", Color::GREEN, None);
    display.refresh();
}
