//! On-screen keyboard model
//!
//! Fixed 6-row grid drawn below the text area. Keys are laid out left to
//! right with a constant margin; the three special keys (DEL, SPACE, ENTER)
//! are wider than the character keys.

use alloc::vec::Vec;

/// Label of the delete-last-character key
pub const LABEL_DEL: &str = "DEL";
/// Label of the space key
pub const LABEL_SPACE: &str = "SPACE";
/// Label of the commit key
pub const LABEL_ENTER: &str = "ENTER";

const fn normal(label: &'static str) -> KeyDefinition {
    KeyDefinition::new(label, KeyCategory::Normal)
}

const fn special(label: &'static str) -> KeyDefinition {
    KeyDefinition::new(label, KeyCategory::Special)
}

const ROW_0: &[KeyDefinition] = &[
    normal("1"), normal("2"), normal("3"), normal("4"), normal("5"), normal("6"), normal("7"),
];
const ROW_1: &[KeyDefinition] = &[
    normal("8"), normal("9"), normal("0"), normal("A"), normal("B"), normal("C"), normal("D"),
];
const ROW_2: &[KeyDefinition] = &[
    normal("E"), normal("F"), normal("G"), normal("H"), normal("I"), normal("J"), normal("K"),
];
const ROW_3: &[KeyDefinition] = &[
    normal("L"), normal("M"), normal("N"), normal("O"), normal("P"), normal("Q"), normal("R"),
];
const ROW_4: &[KeyDefinition] = &[
    normal("S"), normal("T"), normal("U"), normal("V"), normal("W"), normal("X"), normal("Y"),
];
const ROW_5: &[KeyDefinition] = &[
    normal("Z"),
    normal("_"),
    normal("."),
    special(LABEL_DEL),
    special(LABEL_SPACE),
    special(LABEL_ENTER),
];

const STANDARD_ROWS: &[&[KeyDefinition]] = &[ROW_0, ROW_1, ROW_2, ROW_3, ROW_4, ROW_5];

/// Width class of a key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCategory {
    /// Single character key
    Normal,
    /// DEL, SPACE or ENTER
    Special,
}

/// What pressing a key does to the text being entered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Append the label verbatim
    Char(&'static str),
    /// Remove the last character
    Delete,
    /// Append a single space
    Space,
    /// Commit the text
    Enter,
}

impl KeyAction {
    /// Map a key label to its editing action
    pub fn from_label(label: &'static str) -> Self {
        match label {
            LABEL_DEL => KeyAction::Delete,
            LABEL_SPACE => KeyAction::Space,
            LABEL_ENTER => KeyAction::Enter,
            other => KeyAction::Char(other),
        }
    }
}

/// A single key on the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyDefinition {
    pub label: &'static str,
    pub category: KeyCategory,
}

impl KeyDefinition {
    pub const fn new(label: &'static str, category: KeyCategory) -> Self {
        Self { label, category }
    }

    /// Rendered width in pixels
    pub const fn width(&self, metrics: &KeyMetrics) -> i32 {
        match self.category {
            KeyCategory::Normal => metrics.normal_width,
            KeyCategory::Special => metrics.special_width,
        }
    }

    /// Horizontal offset of the label inside the key outline
    pub fn text_indent(&self) -> i32 {
        match self.label {
            LABEL_DEL => 5,
            LABEL_SPACE | LABEL_ENTER => 1,
            _ => 10,
        }
    }

    pub fn action(&self) -> KeyAction {
        KeyAction::from_label(self.label)
    }
}

/// Pixel geometry shared by all keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyMetrics {
    /// Width of a character key
    pub normal_width: i32,
    /// Width of DEL / SPACE / ENTER
    pub special_width: i32,
    /// Height of every row
    pub row_height: i32,
    /// Gap between keys and between rows
    pub margin: i32,
    /// Top edge of the first row
    pub start_y: i32,
}

impl KeyMetrics {
    /// Geometry for a 240 px wide portrait ILI9341 panel
    pub const STANDARD: KeyMetrics = KeyMetrics {
        normal_width: 32,
        special_width: 43,
        row_height: 30,
        margin: 2,
        start_y: 50,
    };

    /// Vertical distance between the top edges of two rows
    pub const fn row_pitch(&self) -> i32 {
        self.row_height + self.margin
    }
}

impl Default for KeyMetrics {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Where a key is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPosition {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub key: KeyDefinition,
}

/// Immutable keyboard grid, built once at startup
#[derive(Clone, Debug)]
pub struct KeyboardLayout {
    rows: &'static [&'static [KeyDefinition]],
    metrics: KeyMetrics,
}

impl KeyboardLayout {
    /// The CodeBreaker grid: digits and A-Y over five rows of seven, then
    /// `Z _ . DEL SPACE ENTER`
    pub const fn standard() -> Self {
        Self::with_rows(STANDARD_ROWS, KeyMetrics::STANDARD)
    }

    pub const fn with_rows(rows: &'static [&'static [KeyDefinition]], metrics: KeyMetrics) -> Self {
        Self { rows, metrics }
    }

    pub fn rows(&self) -> &'static [&'static [KeyDefinition]] {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn metrics(&self) -> &KeyMetrics {
        &self.metrics
    }

    pub fn width_of(&self, key: &KeyDefinition) -> i32 {
        key.width(&self.metrics)
    }

    /// Positions of every key, row by row
    pub fn render_positions(&self) -> Vec<KeyPosition> {
        let m = &self.metrics;
        let mut positions = Vec::new();
        let mut y = m.start_y;

        for row in self.rows {
            let mut x = 0;
            for key in row.iter() {
                let width = self.width_of(key);
                positions.push(KeyPosition {
                    x,
                    y,
                    width,
                    height: m.row_height,
                    key: *key,
                });
                x += width + m.margin;
            }
            y += m.row_pitch();
        }

        positions
    }

    /// Map a display coordinate to the key under it
    ///
    /// A point inside the gap after a key misses; the scan stops there
    /// instead of trying the following keys.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<&'static str> {
        let m = &self.metrics;
        if y < m.start_y {
            return None;
        }

        let row = ((y - m.start_y) / m.row_pitch()) as usize;
        let keys = self.rows.get(row)?;

        let mut remaining_x = x;
        for key in keys.iter() {
            let width = self.width_of(key);
            if remaining_x < width {
                return Some(key.label);
            }
            remaining_x -= width + m.margin;
            if remaining_x < 0 {
                return None;
            }
        }

        None
    }

    /// Centre of the key labelled `label`
    pub fn key_center(&self, label: &str) -> Option<(i32, i32)> {
        self.render_positions()
            .into_iter()
            .find(|p| p.key.label == label)
            .map(|p| (p.x + p.width / 2, p.y + p.height / 2))
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::standard()
    }
}
