// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Drawing of everything around the entries: banner, border and messages.

use crate::{
    layout::{LayoutMode, Region, ScreenGeometry},
    term::{
        Coordinate, GLYPH_CORNER_LL, GLYPH_CORNER_LR, GLYPH_CORNER_UL, GLYPH_CORNER_UR,
        GLYPH_HLINE, GLYPH_VLINE, TextTerminal,
    },
    text::{Margins, center_margin, print_message, str_width},
    viewer::TextMenuViewer,
};

/// The banner of the standard menu.
pub const BANNER: &str = concat!("bootcast version ", env!("CARGO_PKG_VERSION"));

impl TextMenuViewer<'_> {
    /// Clears the screen and draws the page the entries sit on.
    pub(super) fn init_page(&self, term: &mut dyn TextTerminal) {
        term.set_color(self.ctx.normal);
        term.clear();

        match self.layout.mode {
            LayoutMode::Standard => self.init_standard_page(term),
            LayoutMode::Bootcast => self.init_bootcast_page(term),
        }

        term.set_color(self.ctx.normal);
    }

    /// Draws the title and the messages of the bootcast menu.
    fn init_bootcast_page(&self, term: &mut dyn TextTerminal) {
        let regions = self.layout.regions;
        let messages = self.messages;

        if let (Some(region), Some(title)) = (regions.banner, messages.title) {
            print_title(term, title, region.y);
        }

        if let (Some(region), Some(top)) = (regions.top_message, messages.top) {
            print_block(term, top, region);
        }

        if let (Some(region), Some(bottom)) = (regions.bottom_message, messages.bottom) {
            print_block(term, bottom, region);
        }

        if let (Some(region), Some(warning)) = (regions.warning, messages.warning) {
            term.set_color(self.ctx.warning);
            print_block(term, warning, region);
            term.set_color(self.ctx.normal);
        }

        if let (Some(region), Some(footer)) = (regions.footer, messages.footer) {
            print_block(term, footer, region);
        }
    }

    /// Draws the banner, the border and the key help of the standard menu.
    fn init_standard_page(&self, term: &mut dyn TextTerminal) {
        let regions = self.layout.regions;

        if let Some(region) = regions.banner {
            print_title(term, BANNER, region.y);
        }

        if self.layout.geometry.border > 0 {
            term.set_color(self.ctx.menu_normal);
            draw_border(term, &self.layout.geometry);
            term.set_color(self.ctx.normal);
        }

        if let Some(region) = regions.help {
            let mut y = region.y;
            for paragraph in self.messages.help(self.nested, false) {
                let printed = print_message(term, paragraph, y, Margins::STANDARD, None);
                y = y.saturating_add(u16::try_from(printed).unwrap_or(u16::MAX));
            }
        }
    }
}

/// Draws a box around the entry rows.
pub(super) fn draw_border(term: &mut dyn TextTerminal, geo: &ScreenGeometry) {
    let left = geo.first_entry_x.saturating_sub(1);
    let right = geo.cursor_x().saturating_add(1);
    let inner = usize::from(geo.entry_width) + 1;

    term.goto(Coordinate::new(left, geo.first_entry_y.saturating_sub(1)));
    term.put(GLYPH_CORNER_UL);
    term.put_repeated(GLYPH_HLINE, inner);
    term.put(GLYPH_CORNER_UR);

    for y in (geo.first_entry_y..).take(usize::from(geo.num_entries)) {
        term.goto(Coordinate::new(left, y));
        term.put(GLYPH_VLINE);
        term.goto(Coordinate::new(right, y));
        term.put(GLYPH_VLINE);
    }

    term.goto(Coordinate::new(left, geo.first_entry_y + geo.num_entries));
    term.put(GLYPH_CORNER_LL);
    term.put_repeated(GLYPH_HLINE, inner);
    term.put(GLYPH_CORNER_LR);
}

/// Prints a message into its region, centred when the region is a single row.
fn print_block(term: &mut dyn TextTerminal, text: &str, region: Region) {
    let margins = if region.lines == 1 {
        let margin = center_margin(text, term.width());
        Margins::new(margin, margin)
    } else {
        Margins::STANDARD
    };
    print_message(term, text, region.y, margins, Some(usize::from(region.lines)));
}

/// Prints a title centred on a row.
fn print_title(term: &mut dyn TextTerminal, title: &str, y: u16) {
    let width = str_width(title);
    let x = usize::from(term.width()).saturating_sub(width) / 2;
    term.goto(Coordinate::new(u16::try_from(x).unwrap_or(0), y));
    term.put_str(title);
}
