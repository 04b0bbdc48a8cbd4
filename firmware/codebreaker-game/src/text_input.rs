//! Text entry over the on-screen keyboard

use alloc::string::String;

use codebreaker_input::{Delay, KeyAction, KeyboardLayout, TouchEvent, TouchInputChannel, TouchSource};

/// Result of feeding one key or touch into a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Touch missed the keyboard, or DEL on an empty buffer
    Ignored,
    /// Buffer changed
    Edited,
    /// ENTER pressed; carries the final text
    Committed(String),
}

/// Builds one answer from a stream of key presses
///
/// The buffer lives only as long as the session; committing hands it out.
pub struct TextInputSession<'a> {
    layout: &'a KeyboardLayout,
    buffer: String,
}

impl<'a> TextInputSession<'a> {
    pub fn new(layout: &'a KeyboardLayout) -> Self {
        Self {
            layout,
            buffer: String::new(),
        }
    }

    /// Text typed so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Apply a resolved key label
    pub fn apply_key(&mut self, label: &'static str) -> KeyOutcome {
        match KeyAction::from_label(label) {
            KeyAction::Enter => KeyOutcome::Committed(core::mem::take(&mut self.buffer)),
            KeyAction::Delete => {
                if self.buffer.pop().is_some() {
                    KeyOutcome::Edited
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyAction::Space => {
                self.buffer.push(' ');
                KeyOutcome::Edited
            }
            KeyAction::Char(text) => {
                self.buffer.push_str(text);
                KeyOutcome::Edited
            }
        }
    }

    /// Resolve a touch through the keyboard and apply it
    pub fn apply_touch(&mut self, event: TouchEvent) -> KeyOutcome {
        let key = self.layout.hit_test(event.x, event.y);
        log::debug!("touch at ({}, {}) -> key {:?}", event.x, event.y, key);

        match key {
            Some(label) => self.apply_key(label),
            None => KeyOutcome::Ignored,
        }
    }

    /// Poll the channel until ENTER and return the committed text
    ///
    /// `on_edit` sees the full buffer after every change so the caller can
    /// redraw the input line.
    pub fn collect<S, D, F>(
        mut self,
        channel: &TouchInputChannel,
        source: &mut S,
        delay: &mut D,
        interval_ms: u32,
        mut on_edit: F,
    ) -> String
    where
        S: TouchSource,
        D: Delay,
        F: FnMut(&str),
    {
        channel.clear();
        loop {
            let event = channel.wait_for_touch(source, delay, interval_ms);
            match self.apply_touch(event) {
                KeyOutcome::Committed(text) => return text,
                KeyOutcome::Edited => on_edit(&self.buffer),
                KeyOutcome::Ignored => {}
            }
        }
    }
}

/// Last `max_chars` characters of `text`, for a one-line input field
pub fn display_tail(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }

    let skip = count - max_chars;
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}
