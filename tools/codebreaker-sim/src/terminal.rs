//! Terminal display backend
//!
//! Renders the panel as a grid of 8x8 character cells, one cell per glyph of
//! the firmware font. Rectangle outlines become box characters. Cells hold
//! RGB565 pixels like the LCD framebuffer, so colours print as the panel
//! would show them.

use colored::Colorize;

use codebreaker_game::{Color, DisplayBackend};

/// Pixel size of one cell
const CELL: i32 = 8;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    pixel: u16,
}

impl Cell {
    const fn new(ch: char, color: Color) -> Self {
        Self {
            ch,
            pixel: color.to_rgb565(),
        }
    }
}

/// Cell coordinate of a pixel, rounding toward negative infinity
fn cell(px: i32) -> i32 {
    px.div_euclid(CELL)
}

const BLANK: Cell = Cell::new(' ', Color::BLACK);

pub struct TerminalDisplay {
    width: u32,
    height: u32,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    render: bool,
    frames: usize,
}

impl TerminalDisplay {
    /// `render` false keeps the canvas up to date without printing it
    pub fn new(width: u32, height: u32, render: bool) -> Self {
        let cols = (width / CELL as u32) as usize;
        let rows = (height / CELL as u32) as usize;
        Self {
            width,
            height,
            cols,
            rows,
            cells: vec![BLANK; cols * rows],
            render,
            frames: 0,
        }
    }

    /// Number of refreshes so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Characters of one cell row, trailing blanks removed
    #[cfg(test)]
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        let start = row * self.cols;
        let line: String = self.cells[start..start + self.cols].iter().map(|c| c.ch).collect();
        line.trim_end().to_string()
    }

    /// Whether any row currently contains `needle`
    #[cfg(test)]
    pub fn contains(&self, needle: &str) -> bool {
        (0..self.rows).any(|row| self.row_text(row).contains(needle))
    }

    fn cell_index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if let Some(i) = self.cell_index(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Box glyphs only go on blank cells so labels drawn earlier survive
    fn put_border(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if let Some(i) = self.cell_index(col, row) {
            if self.cells[i].ch == ' ' {
                self.cells[i] = Cell::new(ch, color);
            }
        }
    }

    fn frame(&self) -> String {
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 2) * 4);
        let edge = format!("+{}+\n", "-".repeat(self.cols));
        out.push_str(&edge);
        for row in 0..self.rows {
            out.push('|');
            for cell in &self.cells[row * self.cols..(row + 1) * self.cols] {
                let glyph = cell.ch.to_string();
                let Color { r, g, b } = Color::from_rgb565(cell.pixel);
                out.push_str(&glyph.truecolor(r, g, b).to_string());
            }
            out.push_str("|\n");
        }
        out.push_str(&edge);
        out
    }
}

impl DisplayBackend for TerminalDisplay {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, _background: Option<Color>) {
        let row = cell(y);
        let mut col = cell(x);
        for ch in text.chars() {
            self.put(col, row, Cell::new(ch, color));
            col += 1;
        }
    }

    fn draw_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        if w == 0 || h == 0 {
            return;
        }
        let left = cell(x);
        let top = cell(y);
        let right = cell(x + w as i32 - 1);
        let bottom = cell(y + h as i32 - 1);

        for col in left + 1..right {
            self.put_border(col, top, '-', color);
            self.put_border(col, bottom, '-', color);
        }
        for row in top + 1..bottom {
            self.put_border(left, row, '|', color);
            self.put_border(right, row, '|', color);
        }
        for (col, row) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
            self.put_border(col, row, '+', color);
        }
    }

    fn fill_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        if w == 0 || h == 0 {
            return;
        }
        let glyph = if color == Color::BLACK { ' ' } else { '#' };
        for row in cell(y)..=cell(y + h as i32 - 1) {
            for col in cell(x)..=cell(x + w as i32 - 1) {
                self.put(col, row, Cell::new(glyph, color));
            }
        }
    }

    fn refresh(&mut self) {
        self.frames += 1;
        if self.render {
            println!("{}", self.frame());
        }
    }
}
