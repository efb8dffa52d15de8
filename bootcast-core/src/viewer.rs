// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The menu viewer.
//!
//! A viewer owns the layout of one menu session and keeps the screen in step with the selection. The input loop
//! drives it through the [`MenuViewer`] callbacks: it reports the newly selected entry, prints the remaining seconds
//! of the countdown, clears the countdown once the user interacts, and finally hands the terminal back.
//!
//! Selection changes inside the visible window only repaint the two rows involved. Scrolling the window repaints
//! every row.

use alloc::format;

use crate::{
    color::RenderContext,
    env::Environment,
    layout::{LayoutMode, LayoutRequest, MenuLayout, MenuMessages, compute_geometry},
    menu::Menu,
    term::{Coordinate, TextTerminal},
    text::{Margins, center_margin, count_lines, expand_count, print_message},
};

mod entry;
mod page;

pub use page::BANNER;

/// The column the bootcast menu parks the cursor at.
const PARK_X: u16 = 1;

/// How the countdown is worded. Decided on the first countdown of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeoutStyle {
    /// Nothing printed yet.
    #[default]
    Unknown,

    /// A full sentence.
    Normal,

    /// Just the seconds, when the sentence does not fit.
    Terse,

    /// Just the seconds without margins, on terminals narrower than ten columns.
    TerseNoMargin,
}

/// What a selection change repainted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing was repainted.
    None,

    /// The previously selected row and the newly selected row.
    Rows([u16; 2]),

    /// Every entry row.
    Full,
}

/// The callbacks a menu input loop drives.
pub trait MenuViewer {
    /// Removes the countdown from the screen.
    fn clear_timeout(&mut self, term: &mut dyn TextTerminal);

    /// Gives the terminal back, with the cursor visible again.
    fn finalize(&mut self, term: &mut dyn TextTerminal);

    /// Prints the seconds left before the default entry is booted.
    fn print_timeout(&mut self, term: &mut dyn TextTerminal, seconds: u32);

    /// Moves the highlight to another entry, scrolling if it is outside the window.
    fn set_chosen_entry(&mut self, term: &mut dyn TextTerminal, entry: usize) -> Redraw;
}

/// A [`MenuViewer`] for character cell terminals, in either layout mode.
pub struct TextMenuViewer<'a> {
    /// The colours of this session.
    ctx: RenderContext,

    /// The environment the menu was configured from.
    env: &'a Environment,

    /// The index of the first visible entry.
    first: usize,

    /// The current layout.
    layout: MenuLayout,

    /// The menu being shown.
    menu: &'a Menu,

    /// The messages around the menu.
    messages: MenuMessages<'a>,

    /// The menu was opened from another menu.
    nested: bool,

    /// The row of the selected entry within the window.
    offset: usize,

    /// The cached countdown wording.
    timeout_style: TimeoutStyle,
}

impl<'a> TextMenuViewer<'a> {
    /// Lays out and draws a menu with `entry` selected.
    ///
    /// The layout mode and colours are taken from the environment.
    pub fn new(
        term: &mut dyn TextTerminal,
        menu: &'a Menu,
        env: &'a Environment,
        entry: usize,
        nested: bool,
    ) -> Self {
        let mode = LayoutMode::from_env(env);
        let ctx = match mode {
            LayoutMode::Standard => RenderContext::standard(env),
            LayoutMode::Bootcast => RenderContext::bootcast(env),
        };

        let mut viewer = Self {
            ctx,
            env,
            first: 0,
            layout: MenuLayout::default(),
            menu,
            messages: MenuMessages::from_env(env),
            nested,
            offset: entry.min(menu.len().saturating_sub(1)),
            timeout_style: TimeoutStyle::Unknown,
        };
        viewer.layout = viewer.compute_layout(term, mode);

        term.set_cursor_visible(false);
        viewer.repaint(term);
        viewer
    }

    /// Returns the index of the first visible entry.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn first(&self) -> usize {
        self.first
    }

    /// Returns the current layout.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// Lays the menu out again and repaints everything, for example after the terminal was resized.
    pub fn redraw(&mut self, term: &mut dyn TextTerminal) {
        let selected = self.selected();
        self.layout = self.compute_layout(term, self.layout.mode);
        self.first = 0;
        self.offset = selected;
        self.timeout_style = TimeoutStyle::Unknown;
        self.repaint(term);
    }

    /// Returns the index of the highlighted entry.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn selected(&self) -> usize {
        self.first + self.offset
    }

    /// Returns the wording the countdown uses.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn timeout_style(&self) -> TimeoutStyle {
        self.timeout_style
    }

    /// Computes a layout for the current terminal size.
    fn compute_layout(&self, term: &dyn TextTerminal, mode: LayoutMode) -> MenuLayout {
        compute_geometry(&LayoutRequest {
            mode,
            size: term.size(),
            nested: self.nested,
            edit_mode: false,
            messages: self.messages,
            label_width: self.menu.max_label_width(self.hotkey_prefix()),
            ..LayoutRequest::default()
        })
    }

    /// Returns true if the selected entry is highlighted.
    fn highlight_enabled(&self) -> bool {
        self.layout.mode == LayoutMode::Standard || !self.env.is_present("menu_nohighlight")
    }

    /// Returns true if labels carry a hotkey prefix.
    fn hotkey_prefix(&self) -> bool {
        self.layout.mode == LayoutMode::Bootcast
    }

    /// Parks the cursor where the mode keeps it between updates.
    fn park_cursor(&self, term: &mut dyn TextTerminal) {
        let geo = self.layout.geometry;
        let pos = match self.layout.mode {
            LayoutMode::Standard => Coordinate::new(
                geo.cursor_x(),
                geo.first_entry_y + u16::try_from(self.offset).unwrap_or(0),
            ),
            LayoutMode::Bootcast => Coordinate::new(PARK_X, geo.first_entry_y + geo.num_entries),
        };
        term.goto(pos);
    }

    /// Prints the bootcast prompt without a countdown.
    fn print_prompt(&self, term: &mut dyn TextTerminal) {
        let Some(prompt) = self.env.get("menu_prompt") else {
            return;
        };
        self.print_prompt_line(term, prompt);
    }

    /// Prints one centred line on the countdown row of the bootcast menu.
    fn print_prompt_line(&self, term: &mut dyn TextTerminal, line: &str) {
        let geo = self.layout.geometry;
        let margin = center_margin(line, term.width());
        term.set_color(self.ctx.normal);
        print_message(
            term,
            line,
            geo.timeout_y,
            Margins::new(margin, 0),
            Some(usize::from(geo.timeout_lines.max(1))),
        );
        self.park_cursor(term);
        term.refresh();
    }

    /// Draws the whole page, fixing up the window so the selected entry is visible.
    fn repaint(&mut self, term: &mut dyn TextTerminal) {
        let num = usize::from(self.layout.geometry.num_entries);
        let selected = self.selected();
        if num == 0 {
            self.first = selected;
            self.offset = 0;
        } else if self.offset > num - 1 {
            self.first = selected - (num - 1);
            self.offset = num - 1;
        }

        self.init_page(term);
        self.print_entries(term);
        if self.layout.mode == LayoutMode::Bootcast {
            self.print_prompt(term);
        }
        self.park_cursor(term);
        term.refresh();
    }
}

impl MenuViewer for TextMenuViewer<'_> {
    fn clear_timeout(&mut self, term: &mut dyn TextTerminal) {
        if self.layout.mode == LayoutMode::Bootcast {
            self.print_prompt(term);
            return;
        }

        let width = usize::from(term.width().saturating_sub(1));
        let geo = self.layout.geometry;
        term.set_color(self.ctx.normal);
        for y in (geo.timeout_y..).take(usize::from(geo.timeout_lines)) {
            term.goto(Coordinate::new(0, y));
            term.put_repeated(' ', width);
        }

        let fits_below =
            u32::from(geo.first_entry_y) + u32::from(geo.num_entries) < u32::from(term.height());
        if geo.num_entries > 0 && geo.num_entries <= 5 && geo.border == 0 && fits_below {
            term.goto(Coordinate::new(
                geo.arrow_x(),
                geo.first_entry_y + geo.num_entries - 1,
            ));
            term.put(' ');

            self.layout.geometry.timeout_lines = 0;
            self.layout.geometry.num_entries += 1;
            self.print_entries(term);
        }

        self.park_cursor(term);
        term.refresh();
    }

    fn finalize(&mut self, term: &mut dyn TextTerminal) {
        term.set_color(self.ctx.normal);
        term.set_cursor_visible(true);
        term.refresh();
    }

    fn print_timeout(&mut self, term: &mut dyn TextTerminal, seconds: u32) {
        if self.layout.mode == LayoutMode::Bootcast {
            let Some(prompt) = self.env.get("menu_prompt") else {
                return;
            };
            match self.env.get("menu_timeout") {
                Some(format) => {
                    let line = format!("{prompt} {}", expand_count(format, seconds));
                    self.print_prompt_line(term, &line);
                }
                None => self.print_prompt_line(term, prompt),
            }
            return;
        }

        let geo = self.layout.geometry;
        if geo.timeout_lines == 0 {
            return;
        }

        let verbose =
            format!("The highlighted entry will be executed automatically in {seconds}s.");
        if self.timeout_style == TimeoutStyle::Unknown {
            let lines = count_lines(&verbose, Margins::TIMEOUT, term.width());
            self.timeout_style = if lines <= usize::from(geo.timeout_lines) {
                TimeoutStyle::Normal
            } else if term.width() < 10 {
                TimeoutStyle::TerseNoMargin
            } else {
                TimeoutStyle::Terse
            };
        }

        let (message, margins) = match self.timeout_style {
            TimeoutStyle::Unknown | TimeoutStyle::Normal => (verbose, Margins::TIMEOUT),
            TimeoutStyle::Terse => (format!("{seconds}s"), Margins::TIMEOUT),
            TimeoutStyle::TerseNoMargin => (format!("{seconds}s"), Margins::NONE),
        };

        term.set_color(self.ctx.normal);
        print_message(
            term,
            &message,
            geo.timeout_y,
            margins,
            Some(usize::from(geo.timeout_lines)),
        );
        self.park_cursor(term);
        term.refresh();
    }

    fn set_chosen_entry(&mut self, term: &mut dyn TextTerminal, entry: usize) -> Redraw {
        if self.menu.is_empty() || !self.highlight_enabled() {
            return Redraw::None;
        }

        let entry = entry.min(self.menu.len() - 1);
        let geo = self.layout.geometry;
        let num = usize::from(geo.num_entries);
        if num == 0 {
            self.first = entry;
            self.offset = 0;
            return Redraw::None;
        }

        let old_offset = self.offset;
        let redraw = if entry < self.first {
            self.first = entry;
            self.offset = 0;
            Redraw::Full
        } else if entry - self.first > num - 1 {
            self.first = entry - (num - 1);
            self.offset = num - 1;
            Redraw::Full
        } else {
            self.offset = entry - self.first;
            let row = |offset: usize| geo.first_entry_y + u16::try_from(offset).unwrap_or(0);
            Redraw::Rows([row(old_offset), row(self.offset)])
        };

        match redraw {
            Redraw::Rows([old_row, new_row]) => {
                self.print_entry(term, old_row, false, self.first + old_offset);
                self.print_entry(term, new_row, true, self.first + self.offset);
            }
            Redraw::Full => self.print_entries(term),
            Redraw::None => (),
        }

        self.park_cursor(term);
        term.refresh();
        redraw
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec::Vec};

    use super::*;
    use crate::{
        menu::MenuEntry,
        term::{GLYPH_DOWN, GLYPH_UP, grid::GridTerminal},
    };

    fn menu(count: usize) -> Menu {
        Menu {
            entries: (0..count)
                .map(|i| MenuEntry::new(&format!("entry {i}")))
                .collect(),
            ..Menu::default()
        }
    }

    fn bootcast_env() -> Environment {
        let mut env = Environment::new();
        env.set("miray_bootcast_menu", "1");
        env.set("menu_title", "Bootcast");
        env.set("menu_prompt", "Select:");
        env.set("menu_timeout", "%d seconds");
        env
    }

    #[test]
    fn test_move_within_window() {
        let menu = menu(20);
        let env = Environment::new();
        let mut term = GridTerminal::new(80, 16);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 2, false);
        let geo = viewer.layout().geometry;
        assert_eq!(geo.num_entries, 5);
        assert_eq!(geo.first_entry_y, 4);
        assert!(!term.cursor_visible);

        term.take_touched();
        assert_eq!(viewer.set_chosen_entry(&mut term, 3), Redraw::Rows([6, 7]));
        assert_eq!(term.take_touched(), [6, 7]);
        assert_eq!(viewer.selected(), 3);
        assert_eq!(term.cell(geo.first_entry_x, 7).1, RenderContext::default().menu_highlight);
        assert_eq!(term.cell(geo.first_entry_x, 6).1, RenderContext::default().menu_normal);
        assert!(term.row(7).contains("entry 3"));
    }

    #[test]
    fn test_scroll_window() {
        let menu = menu(20);
        let env = Environment::new();
        let mut term = GridTerminal::new(80, 16);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 2, false);
        let geo = viewer.layout().geometry;
        assert_eq!(term.cell(geo.arrow_x(), 8).0, GLYPH_DOWN);
        assert_eq!(term.cell(geo.arrow_x(), 4).0, ' ');

        assert_eq!(viewer.set_chosen_entry(&mut term, 10), Redraw::Full);
        assert_eq!(viewer.first(), 6);
        assert_eq!(viewer.selected(), 10);
        assert_eq!(term.cell(geo.arrow_x(), 4).0, GLYPH_UP);
        assert!(term.row(8).contains("entry 10"));

        assert_eq!(viewer.set_chosen_entry(&mut term, 1), Redraw::Full);
        assert_eq!(viewer.first(), 1);
        assert_eq!(viewer.selected(), 1);

        assert_eq!(viewer.set_chosen_entry(&mut term, 99), Redraw::Full);
        assert_eq!(viewer.selected(), 19);
        assert_eq!(term.cell(geo.arrow_x(), 8).0, ' ');
    }

    #[test]
    fn test_initial_selection_scrolled() {
        let menu = menu(20);
        let env = Environment::new();
        let mut term = GridTerminal::new(80, 16);
        let viewer = TextMenuViewer::new(&mut term, &menu, &env, 12, false);
        assert_eq!(viewer.first(), 8);
        assert_eq!(viewer.selected(), 12);
    }

    #[test]
    fn test_border_and_banner() {
        let menu = menu(3);
        let env = Environment::new();
        let mut term = GridTerminal::new(80, 25);
        let _viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        assert!(term.row(1).contains(BANNER));
        assert_eq!(term.cell(1, 3).0, crate::term::GLYPH_CORNER_UL);
        assert_eq!(term.cell(78, 3).0, crate::term::GLYPH_CORNER_UR);
        assert_eq!(term.cell(1, 18).0, crate::term::GLYPH_CORNER_LL);
        assert!(term.row(20).contains("select which entry"));
    }

    #[test]
    fn test_timeout_styles() {
        let menu = menu(3);
        let env = Environment::new();

        let mut term = GridTerminal::new(80, 16);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        viewer.print_timeout(&mut term, 10);
        assert_eq!(viewer.timeout_style(), TimeoutStyle::Normal);
        let y = viewer.layout().geometry.timeout_y;
        assert!(term.row(y).starts_with("   The highlighted entry will be executed automatically in 10s."));
        viewer.print_timeout(&mut term, 9);
        assert_eq!(viewer.timeout_style(), TimeoutStyle::Normal);
        assert!(term.row(y).contains("in 9s."));

        let mut term = GridTerminal::new(20, 60);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        viewer.print_timeout(&mut term, 5);
        assert_eq!(viewer.timeout_style(), TimeoutStyle::Terse);
        let y = viewer.layout().geometry.timeout_y;
        assert_eq!(term.row(y).trim_end(), "   5s");

        let mut term = GridTerminal::new(8, 30);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        viewer.print_timeout(&mut term, 5);
        assert_eq!(viewer.timeout_style(), TimeoutStyle::TerseNoMargin);
        let y = viewer.layout().geometry.timeout_y;
        assert_eq!(term.row(y).trim_end(), "5s");
    }

    #[test]
    fn test_clear_timeout() {
        let menu = menu(10);
        let env = Environment::new();

        let mut term = GridTerminal::new(80, 16);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        viewer.print_timeout(&mut term, 3);
        viewer.clear_timeout(&mut term);
        let geo = viewer.layout().geometry;
        assert_eq!(term.row(geo.timeout_y).trim(), "");
        assert_eq!(geo.num_entries, 5);

        let mut term = GridTerminal::new(80, 9);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        assert_eq!(viewer.layout().geometry.border, 0);
        assert_eq!(viewer.layout().geometry.num_entries, 4);
        viewer.clear_timeout(&mut term);
        let geo = viewer.layout().geometry;
        assert_eq!(geo.num_entries, 5);
        assert_eq!(geo.timeout_lines, 0);
        assert!(term.row(geo.first_entry_y + 4).contains("entry 4"));
    }

    #[test]
    fn test_bootcast_prompt() {
        let mut menu = menu(3);
        menu.entries[0].hotkey = Some('i');
        let env = bootcast_env();
        let mut term = GridTerminal::new(80, 25);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        let geo = viewer.layout().geometry;
        assert_eq!(geo.timeout_y, 5);
        assert_eq!(term.row(5).trim(), "Select:");
        assert!(term.row(2).contains("Bootcast"));
        assert!(term.row(geo.first_entry_y).contains("<i> entry 0"));
        assert!(term.row(geo.first_entry_y + 1).contains("    entry 1"));

        viewer.print_timeout(&mut term, 5);
        assert_eq!(term.row(5).trim(), "Select: 5 seconds");
        viewer.clear_timeout(&mut term);
        assert_eq!(term.row(5).trim(), "Select:");
        assert_eq!(term.position(), Coordinate::new(1, geo.first_entry_y + geo.num_entries));
    }

    #[test]
    fn test_bootcast_without_prompt() {
        let menu = menu(3);
        let mut env = bootcast_env();
        env.unset("menu_prompt");
        let mut term = GridTerminal::new(80, 25);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        viewer.print_timeout(&mut term, 5);
        assert_eq!(term.row(5).trim(), "");

        env.set("menu_prompt", "Select:");
        env.unset("menu_timeout");
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        viewer.print_timeout(&mut term, 5);
        assert_eq!(term.row(5).trim(), "Select:");
    }

    #[test]
    fn test_bootcast_no_highlight() {
        let menu = menu(3);
        let mut env = bootcast_env();
        env.set("menu_nohighlight", "1");
        let mut term = GridTerminal::new(80, 25);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        assert_eq!(viewer.set_chosen_entry(&mut term, 2), Redraw::None);

        let highlight = RenderContext::bootcast(&env).menu_highlight;
        let geo = viewer.layout().geometry;
        let highlighted: Vec<_> = (0..80)
            .filter(|&x| term.cell(x, geo.first_entry_y).1 == highlight)
            .collect();
        assert!(highlighted.is_empty());
    }

    #[test]
    fn test_bootcast_warning() {
        let menu = menu(3);
        let mut env = bootcast_env();
        env.set("menu_warning", "Careful");
        env.set("menu_footer", "footer text");
        let mut term = GridTerminal::new(80, 25);
        let viewer = TextMenuViewer::new(&mut term, &menu, &env, 0, false);
        let warning = viewer.layout().regions.warning.expect("warning region");
        let row = term.row(warning.y);
        assert_eq!(row.trim(), "Careful");
        let x = u16::try_from(row.find('C').expect("warning text")).expect("fits");
        assert_eq!(term.cell(x, warning.y).1, RenderContext::default().warning);
        assert!(term.row(warning.y + 2).contains("footer text"));
    }

    #[test]
    fn test_redraw_and_finalize() {
        let menu = menu(20);
        let env = Environment::new();
        let mut term = GridTerminal::new(80, 16);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 12, false);

        let mut large = GridTerminal::new(80, 40);
        viewer.redraw(&mut large);
        assert_eq!(viewer.selected(), 12);
        assert_eq!(viewer.first(), 0);

        viewer.finalize(&mut large);
        assert!(large.cursor_visible);
        assert!(large.refreshes > 0);
    }

    #[test]
    fn test_empty_menu() {
        let menu = menu(0);
        let env = Environment::new();
        let mut term = GridTerminal::new(80, 25);
        let mut viewer = TextMenuViewer::new(&mut term, &menu, &env, 3, false);
        assert_eq!(viewer.set_chosen_entry(&mut term, 1), Redraw::None);
        viewer.print_timeout(&mut term, 1);
        viewer.clear_timeout(&mut term);
    }
}
