// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The character cell terminal interface.
//!
//! Everything in the text side of the crate (the menu viewer, the text bars and the text boot screen) draws
//! through [`TextTerminal`]. The trait is deliberately small: a fixed size grid, an absolute cursor, a current
//! colour pair and a way to emit one code point at a time. Frontends implement it on top of whatever they render
//! with, and the tests implement it with an in-memory grid.

use crate::color::ColorPair;

#[cfg(test)]
pub(crate) mod grid;

/// Upward arrow, shown when there are entries above the visible window.
pub const GLYPH_UP: char = '\u{2191}';

/// Downward arrow, shown when there are entries below the visible window.
pub const GLYPH_DOWN: char = '\u{2193}';

/// Up and down arrow, shown when the window is only one entry tall and it scrolls both ways.
pub const GLYPH_UP_DOWN: char = '\u{2195}';

/// Rightward arrow, marks a label that was cut at the right edge.
pub const GLYPH_CONTINUE: char = '\u{2192}';

/// Light horizontal box drawing line.
pub const GLYPH_HLINE: char = '\u{2500}';

/// Light vertical box drawing line.
pub const GLYPH_VLINE: char = '\u{2502}';

/// Upper left box corner.
pub const GLYPH_CORNER_UL: char = '\u{250c}';

/// Upper right box corner.
pub const GLYPH_CORNER_UR: char = '\u{2510}';

/// Lower left box corner.
pub const GLYPH_CORNER_LL: char = '\u{2514}';

/// Lower right box corner.
pub const GLYPH_CORNER_LR: char = '\u{2518}';

/// A cell position on the terminal, zero based from the upper left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Coordinate {
    /// The column.
    pub x: u16,

    /// The row.
    pub y: u16,
}

impl Coordinate {
    /// Creates a new [`Coordinate`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// The size of a terminal in character cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TermSize {
    /// Number of columns.
    pub width: u16,

    /// Number of rows.
    pub height: u16,
}

/// A character cell output device.
///
/// Writing past the right edge must clip rather than wrap, and writing into the last cell of the last row must
/// not scroll. Callers never rely on the cursor position after a write that clipped.
pub trait TextTerminal {
    /// Clears the whole screen with the current colour and homes the cursor.
    fn clear(&mut self);

    /// Returns the current colour pair.
    fn color(&self) -> ColorPair;

    /// Moves the cursor to an absolute position.
    fn goto(&mut self, pos: Coordinate);

    /// Returns the position of the cursor.
    fn position(&self) -> Coordinate;

    /// Emits one code point at the cursor and advances the cursor by its display width.
    fn put(&mut self, ch: char);

    /// Pushes everything drawn so far to the real output device.
    fn refresh(&mut self);

    /// Sets the colour used by following writes.
    fn set_color(&mut self, color: ColorPair);

    /// Shows or hides the hardware cursor.
    fn set_cursor_visible(&mut self, visible: bool);

    /// Returns the size of the terminal.
    fn size(&self) -> TermSize;

    /// Returns the height of the terminal.
    fn height(&self) -> u16 {
        self.size().height
    }

    /// Emits the same code point `count` times.
    fn put_repeated(&mut self, ch: char, count: usize) {
        for _ in 0..count {
            self.put(ch);
        }
    }

    /// Emits every code point of a string.
    fn put_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.put(ch);
        }
    }

    /// Returns the width of the terminal.
    fn width(&self) -> u16 {
        self.size().width
    }
}

impl<T: TextTerminal + ?Sized> TextTerminal for &mut T {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn color(&self) -> ColorPair {
        (**self).color()
    }

    fn goto(&mut self, pos: Coordinate) {
        (**self).goto(pos);
    }

    fn position(&self) -> Coordinate {
        (**self).position()
    }

    fn put(&mut self, ch: char) {
        (**self).put(ch);
    }

    fn refresh(&mut self) {
        (**self).refresh();
    }

    fn set_color(&mut self, color: ColorPair) {
        (**self).set_color(color);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        (**self).set_cursor_visible(visible);
    }

    fn size(&self) -> TermSize {
        (**self).size()
    }
}
