// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! An in-memory [`TextTerminal`] used by the unit tests.

use alloc::{collections::BTreeSet, string::String, vec, vec::Vec};

use crate::{
    color::ColorPair,
    term::{Coordinate, TermSize, TextTerminal},
    text::char_width,
};

/// Marks the second half of a double width glyph.
const WIDE_TAIL: char = '\0';

/// A terminal backed by a plain grid of cells.
pub(crate) struct GridTerminal {
    /// Row major cells.
    cells: Vec<(char, ColorPair)>,

    /// The current colour.
    color: ColorPair,

    /// The cursor.
    cursor: Coordinate,

    /// Whether the cursor is shown.
    pub(crate) cursor_visible: bool,

    /// How many times [`TextTerminal::refresh`] was called.
    pub(crate) refreshes: usize,

    /// The size of the grid.
    size: TermSize,

    /// Rows written to since the last [`GridTerminal::take_touched`].
    touched: BTreeSet<u16>,
}

impl GridTerminal {
    /// Creates a blank grid.
    pub(crate) fn new(width: u16, height: u16) -> Self {
        let color = ColorPair::default();
        Self {
            cells: vec![(' ', color); usize::from(width) * usize::from(height)],
            color,
            cursor: Coordinate::default(),
            cursor_visible: true,
            refreshes: 0,
            size: TermSize { width, height },
            touched: BTreeSet::new(),
        }
    }

    /// Returns one cell.
    pub(crate) fn cell(&self, x: u16, y: u16) -> (char, ColorPair) {
        self.cells[self.index(x, y)]
    }

    /// Returns the index of a cell.
    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.size.width) + usize::from(x)
    }

    /// Returns the text of one row, without the tails of wide glyphs.
    pub(crate) fn row(&self, y: u16) -> String {
        (0..self.size.width)
            .map(|x| self.cell(x, y).0)
            .filter(|&c| c != WIDE_TAIL)
            .collect()
    }

    /// Returns the rows written to since the last call, and forgets them.
    pub(crate) fn take_touched(&mut self) -> Vec<u16> {
        core::mem::take(&mut self.touched).into_iter().collect()
    }
}

impl TextTerminal for GridTerminal {
    fn clear(&mut self) {
        let color = self.color;
        self.cells.fill((' ', color));
        self.cursor = Coordinate::default();
        self.touched.extend(0..self.size.height);
    }

    fn color(&self) -> ColorPair {
        self.color
    }

    fn goto(&mut self, pos: Coordinate) {
        self.cursor = pos;
    }

    fn position(&self) -> Coordinate {
        self.cursor
    }

    fn put(&mut self, ch: char) {
        let width = u16::try_from(char_width(ch)).unwrap_or(1);
        let Coordinate { x, y } = self.cursor;
        if y < self.size.height && x.saturating_add(width) <= self.size.width {
            let index = self.index(x, y);
            if width == 0 {
                return;
            }
            self.cells[index] = (ch, self.color);
            if width == 2 {
                self.cells[index + 1] = (WIDE_TAIL, self.color);
            }
            self.touched.insert(y);
        }
        self.cursor.x = x.saturating_add(width);
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn set_color(&mut self, color: ColorPair) {
        self.color = color;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn size(&self) -> TermSize {
        self.size
    }
}
