// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Drawing of entry rows and scroll arrows.

use crate::{
    term::{Coordinate, GLYPH_CONTINUE, GLYPH_DOWN, GLYPH_UP, GLYPH_UP_DOWN, TextTerminal},
    text::{char_width, str_width},
    viewer::TextMenuViewer,
};

impl TextMenuViewer<'_> {
    /// Draws one entry row. Rows past the end of the menu are drawn blank.
    pub(super) fn print_entry(&self, term: &mut dyn TextTerminal, y: u16, highlight: bool, index: usize) {
        let geo = self.layout.geometry;
        let label = self
            .menu
            .entries
            .get(index)
            .map(|entry| entry.label(self.hotkey_prefix()))
            .unwrap_or_default();

        term.set_color(if highlight {
            self.ctx.menu_highlight
        } else {
            self.ctx.menu_normal
        });
        term.goto(Coordinate::new(geo.first_entry_x, y));

        let mut x = geo.first_entry_x;
        if geo.num_entries > 1 {
            term.put(' ');
            x = x.saturating_add(1);
        }
        print_clipped(term, &label, usize::from(geo.cursor_x().saturating_sub(x)));

        term.set_color(self.ctx.normal);
        term.goto(Coordinate::new(geo.cursor_x(), y));
    }

    /// Draws every visible row and the scroll arrows, then parks the cursor on the selected row.
    pub(super) fn print_entries(&self, term: &mut dyn TextTerminal) {
        let geo = self.layout.geometry;
        if geo.num_entries == 0 {
            return;
        }

        let arrow_x = geo.arrow_x();
        let scrolled = self.first > 0;

        term.set_color(self.ctx.normal);
        term.goto(Coordinate::new(arrow_x, geo.first_entry_y));
        if geo.num_entries != 1 {
            term.put(if scrolled { GLYPH_UP } else { ' ' });
        }

        let highlight = self.highlight_enabled();
        for (i, y) in (geo.first_entry_y..).take(usize::from(geo.num_entries)).enumerate() {
            self.print_entry(term, y, highlight && self.offset == i, self.first + i);
        }

        let more_below = self.menu.len() > self.first + usize::from(geo.num_entries);
        term.goto(Coordinate::new(
            arrow_x,
            geo.first_entry_y + geo.num_entries - 1,
        ));
        let arrow = if geo.num_entries == 1 {
            match (scrolled, more_below) {
                (true, true) => GLYPH_UP_DOWN,
                (true, false) => GLYPH_UP,
                (false, true) => GLYPH_DOWN,
                (false, false) => ' ',
            }
        } else if more_below {
            GLYPH_DOWN
        } else {
            ' '
        };
        term.put(arrow);

        self.park_cursor(term);
    }
}

/// Prints a label into exactly `columns` columns.
///
/// Short labels are padded with spaces so a highlight covers the whole row. Labels that do not fit are cut, and
/// the last column shows a continuation arrow instead.
pub(super) fn print_clipped(term: &mut dyn TextTerminal, label: &str, columns: usize) {
    if columns == 0 {
        return;
    }

    let width = str_width(label);
    if width <= columns {
        term.put_str(label);
        term.put_repeated(' ', columns - width);
        return;
    }

    let room = columns - 1;
    let mut used = 0;
    for ch in label.chars() {
        let w = char_width(ch);
        if used + w > room {
            break;
        }
        term.put(ch);
        used += w;
    }
    term.put_repeated(' ', room - used);
    term.put(GLYPH_CONTINUE);
}
