// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The character cell boot screen.
//!
//! The screen is a column of centred rows: the message row, two progress bars (or the countdown) below it, a
//! warning seven rows above the bottom and, while nothing is loading, a summary of the menu hotkeys on the last
//! row.

use alloc::string::String;
use core::time::Duration;

use uefi::proto::console::text::Color;

use crate::{
    bar::TextBar,
    color::ColorPair,
    menu::Menu,
    screen::{BootScreen, ProgressUpdate, ScreenData},
    term::{
        Coordinate, GLYPH_CORNER_LL, GLYPH_CORNER_LR, GLYPH_CORNER_UL, GLYPH_CORNER_UR,
        GLYPH_HLINE, GLYPH_VLINE, TextTerminal,
    },
    text::{expand_count, str_width},
};

/// The row of the main message.
pub const MESSAGE_ROW: u16 = 13;

/// The row of the first progress bar. The second one is right below.
pub const BAR_ROW: u16 = 15;

/// The length of both progress bars.
pub const BAR_LEN: u16 = 24;

/// How far above the bottom the warning is printed.
const WARNING_ROWS_FROM_BOTTOM: u16 = 7;

/// Blank columns between the frame of a message box and its text.
const BOX_PADDING: usize = 2;

/// The colour of the countdown rows.
const TIMEOUT_COLOR: ColorPair = ColorPair::new(Color::DarkGray, Color::Black);

/// The colour of the warning row.
const WARNING_COLOR: ColorPair = ColorPair::new(Color::Yellow, Color::Black);

/// The colour of message boxes unless another is given.
const BOX_COLOR: ColorPair = ColorPair::new(Color::White, Color::Red);

/// Whether the progress bars are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarState {
    /// No bars. The menu summary is shown instead.
    Hidden,

    /// Loading has started, the bars appear with the first progress.
    Armed,

    /// The bars are on screen.
    Shown,
}

/// A boot screen on a [`TextTerminal`].
pub struct TextBootScreen<T> {
    /// Where everything is drawn.
    term: T,

    /// The bar of the first stage.
    bar1: TextBar,

    /// The bar of the second stage.
    bar2: TextBar,

    /// Whether the bars are shown.
    bars: BarState,

    /// Whether the activity description replaces the other messages.
    activity: bool,

    /// The menu summary for the last row.
    menu_text: Option<String>,

    /// The current warning.
    warning: Option<String>,

    /// Messages and counters.
    data: ScreenData,
}

/// Returns the column that centres something `width` columns wide.
fn centered(width: usize, term_width: u16) -> u16 {
    let term_width = usize::from(term_width);
    if width >= term_width {
        0
    } else {
        u16::try_from((term_width - width) / 2).unwrap_or(0)
    }
}

/// Plays the finish animation of a bar, drawing each frame after waiting for it.
fn play(bar: &mut TextBar, term: &mut dyn TextTerminal, pacer: &mut dyn FnMut(Duration)) {
    let mut animation = bar.finish();
    while let Some(delay) = animation.next() {
        pacer(delay);
        animation.bar().draw(term);
        term.refresh();
    }
}

impl<T: TextTerminal> TextBootScreen<T> {
    /// Creates a screen with hidden bars centred on the terminal.
    pub fn new(term: T) -> Self {
        let x = centered(usize::from(BAR_LEN), term.width());
        Self {
            bar1: TextBar::progress(Coordinate::new(x, BAR_ROW), BAR_LEN),
            bar2: TextBar::progress(Coordinate::new(x, BAR_ROW + 1), BAR_LEN),
            term,
            bars: BarState::Hidden,
            activity: false,
            menu_text: None,
            warning: None,
            data: ScreenData::default(),
        }
    }

    /// Returns the state of the bars.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn bar_state(&self) -> BarState {
        self.bars
    }

    /// Returns both progress bars.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn bars(&self) -> (&TextBar, &TextBar) {
        (&self.bar1, &self.bar2)
    }

    /// Returns the messages and counters.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn data(&self) -> &ScreenData {
        &self.data
    }

    /// Returns the terminal.
    pub const fn terminal(&self) -> &T {
        &self.term
    }

    /// Returns the terminal mutably.
    pub const fn terminal_mut(&mut self) -> &mut T {
        &mut self.term
    }

    /// Gives the terminal back.
    pub fn into_terminal(self) -> T {
        self.term
    }

    /// Prints a centred row, blanking the rest of it up to the last usable column.
    fn put_line(&mut self, y: u16, message: &str) {
        let width = self.term.width();
        let offset = centered(str_width(message), width);
        self.term.goto(Coordinate::new(0, y));
        self.term.put_repeated(' ', usize::from(offset));
        self.term.put_str(message);
        let used = usize::from(offset) + str_width(message);
        self.term
            .put_repeated(' ', usize::from(width.saturating_sub(1)).saturating_sub(used));
    }

    /// Draws the bars that belong to the configured stages.
    fn draw_bars(&mut self) {
        self.bar1.draw(&mut self.term);
        if self.data.stage_max > 1 {
            self.bar2.draw(&mut self.term);
        }
    }

    /// Draws the messages, the bars and the warning.
    fn put_text(&mut self) {
        let descr = self
            .data
            .activity_descr
            .clone()
            .filter(|d| self.activity && !d.is_empty());

        if let Some(descr) = descr {
            self.put_line(MESSAGE_ROW, &descr);
        } else if let (Some(seconds), Some(message)) =
            (self.data.timeout, self.data.timeout_message.clone())
        {
            self.put_line(MESSAGE_ROW, &message);

            let saved = self.term.color();
            self.term.set_color(TIMEOUT_COLOR);
            if let Some(format) = self.data.timeout_format.clone() {
                self.put_line(MESSAGE_ROW + 2, &expand_count(&format, seconds));
            }
            if let Some(stop) = self.data.timeout_stop.clone() {
                self.put_line(MESSAGE_ROW + 4, &stop);
            }
            self.term.set_color(saved);
        } else if let Some(message) = self.data.default_message.clone() {
            self.put_line(MESSAGE_ROW, &message);
        }

        if self.bars == BarState::Shown {
            self.draw_bars();
        }

        if self.bars == BarState::Hidden
            && let Some(menu_text) = self.menu_text.clone()
        {
            let last = self.term.height().saturating_sub(1);
            self.put_line(last, &menu_text);
        }
        self.term.goto(Coordinate::new(0, MESSAGE_ROW + 2));

        if let Some(warning) = self.warning.clone() {
            let saved = self.term.color();
            self.term.set_color(WARNING_COLOR);
            let y = self.term.height().saturating_sub(WARNING_ROWS_FROM_BOTTOM);
            self.put_line(y, &warning);
            self.term.set_color(saved);
        }
    }

    /// Prints one row of a message box: `left`, `fill` up to the last column, then `right`.
    fn put_box_row(&mut self, pos: Coordinate, columns: usize, edges: (char, char), fill: char) {
        self.term.goto(pos);
        self.term.put(edges.0);
        self.term.put_repeated(fill, columns.saturating_sub(2));
        self.term.put(edges.1);
    }
}

impl<T: TextTerminal> BootScreen for TextBootScreen<T> {
    fn reset(&mut self) {
        self.bars = BarState::Hidden;
        self.activity = false;
        self.bar1.reset();
        self.bar2.reset();
    }

    fn clear(&mut self) {
        self.term.clear();
        self.term.refresh();
    }

    fn redraw(&mut self) {
        self.term.set_cursor_visible(false);
        self.term.clear();
        self.put_text();
        self.term.refresh();
    }

    fn redraw_text(&mut self, clear: bool) {
        if clear {
            let size = self.term.size();
            let last = size.height.saturating_sub(1);
            for y in MESSAGE_ROW..last {
                self.term.goto(Coordinate::new(0, y));
                self.term.put_repeated(' ', usize::from(size.width));
            }
            // the bottom right cell stays untouched so the console never scrolls
            self.term.goto(Coordinate::new(0, last));
            self.term
                .put_repeated(' ', usize::from(size.width.saturating_sub(1)));
        }
        self.put_text();
        self.term.refresh();
    }

    fn set_property(&mut self, name: &str, value: Option<&str>) {
        match name {
            "activity" => {
                if value.is_some() {
                    self.bars = BarState::Armed;
                    self.activity = true;
                } else {
                    self.bars = BarState::Hidden;
                    self.activity = false;
                }
            }
            "stage" => {
                self.data.apply(name, value);
                if self.data.stage > 1 {
                    self.bar1.set_progress(1, 1);
                }
            }
            _ => {
                if !self.data.apply(name, value) {
                    log::debug!("text screen ignores property {name}");
                }
            }
        }
    }

    fn set_progress(&mut self, update: ProgressUpdate) {
        if self.bars == BarState::Hidden {
            return;
        }
        self.bars = BarState::Shown;

        if let ProgressUpdate::Value { current, max } = update
            && self.data.stage <= self.data.stage_max
        {
            match self.data.stage {
                0 | 1 => {
                    self.bar1.set_progress(current, max);
                    self.bar2.set_progress(0, 1);
                }
                2 => {
                    self.bar1.set_progress(1, 1);
                    self.bar2.set_progress(current, max);
                }
                _ => (),
            }
        }

        self.draw_bars();
        self.term.refresh();
    }

    fn finish(&mut self, pacer: &mut dyn FnMut(Duration)) {
        if self.bars != BarState::Shown {
            return;
        }
        play(&mut self.bar1, &mut self.term, pacer);
        if self.data.stage_max > 1 {
            play(&mut self.bar2, &mut self.term, pacer);
        }
    }

    fn warning(&mut self, warning: Option<&str>) {
        self.warning = warning.map(String::from);
        self.redraw_text(true);
    }

    fn message_box(&mut self, lines: &[&str], color: Option<ColorPair>) {
        let saved = self.term.color();
        self.term.set_color(color.unwrap_or(BOX_COLOR));

        let mut text_width = lines.iter().map(|l| str_width(l)).max().unwrap_or(0);
        if text_width % 2 != 0 {
            text_width += 1;
        }
        let columns = text_width + 2 + 2 * BOX_PADDING;
        let x = centered(columns, self.term.width());
        let mut y = BAR_ROW;

        self.put_box_row(
            Coordinate::new(x, y),
            columns,
            (GLYPH_CORNER_UL, GLYPH_CORNER_UR),
            GLYPH_HLINE,
        );
        y += 1;
        self.put_box_row(Coordinate::new(x, y), columns, (GLYPH_VLINE, GLYPH_VLINE), ' ');
        for line in lines {
            y += 1;
            self.term.goto(Coordinate::new(x, y));
            self.term.put(GLYPH_VLINE);
            self.term.put_repeated(' ', BOX_PADDING);
            self.term.put_str(line);
            let used = 1 + BOX_PADDING + str_width(line);
            self.term.put_repeated(' ', columns.saturating_sub(1).saturating_sub(used));
            self.term.put(GLYPH_VLINE);
        }
        y += 1;
        self.put_box_row(Coordinate::new(x, y), columns, (GLYPH_VLINE, GLYPH_VLINE), ' ');
        y += 1;
        self.put_box_row(
            Coordinate::new(x, y),
            columns,
            (GLYPH_CORNER_LL, GLYPH_CORNER_LR),
            GLYPH_HLINE,
        );

        self.term.set_color(saved);
        self.term.refresh();
    }

    fn set_menu(&mut self, menu: Option<&Menu>) {
        let max_width = usize::from(self.term.width().saturating_sub(1));
        self.menu_text = menu
            .map(|m| m.summary_line(max_width))
            .filter(|line| !line.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;
    use crate::{bar::BarStyle, menu::MenuEntry, term::grid::GridTerminal};

    fn screen() -> TextBootScreen<GridTerminal> {
        TextBootScreen::new(GridTerminal::new(80, 25))
    }

    fn lit_cells(screen: &TextBootScreen<GridTerminal>, y: u16) -> usize {
        let highlight = BarStyle::default().highlight;
        (0..80)
            .filter(|&x| {
                let (ch, color) = screen.terminal().cell(x, y);
                ch == GLYPH_HLINE && color == highlight
            })
            .count()
    }

    #[test]
    fn test_countdown_text() {
        let mut screen = screen();
        screen.set_property("timeout_message", Some("Starting the system"));
        screen.set_property("timeout_format", Some("Booting in %d seconds"));
        screen.set_property("timeout_stop", Some("Press ESC to stop"));
        screen.set_property("default_message", Some("Press a hotkey"));
        screen.set_property("timeout", Some("5"));
        screen.redraw();

        let term = screen.terminal();
        assert_eq!(term.row(13).trim(), "Starting the system");
        assert!(term.row(13).starts_with(&" ".repeat(30)));
        assert_eq!(term.row(15).trim(), "Booting in 5 seconds");
        assert_eq!(term.cell(30, 15).1, TIMEOUT_COLOR);
        assert_eq!(term.row(17).trim(), "Press ESC to stop");
        assert!(!term.cursor_visible);

        screen.set_property("timeout", None);
        screen.redraw();
        assert_eq!(screen.terminal().row(13).trim(), "Press a hotkey");
        assert_eq!(screen.terminal().row(15).trim(), "");
    }

    #[test]
    fn test_menu_summary_until_loading() {
        let mut screen = screen();
        let menu = Menu {
            entries: vec![
                MenuEntry {
                    hotkey: Some('i'),
                    ..MenuEntry::new("Install")
                },
                MenuEntry::new("Rescue"),
            ],
            ..Menu::default()
        };
        screen.set_menu(Some(&menu));
        screen.redraw();
        assert_eq!(screen.terminal().row(24).trim(), "<i> Install   Rescue");

        screen.set_property("activity", Some("1"));
        screen.set_property("activity_descr", Some("Loading"));
        screen.redraw();
        assert_eq!(screen.terminal().row(24).trim(), "");
        assert_eq!(screen.terminal().row(13).trim(), "Loading");
    }

    #[test]
    fn test_progress_needs_activity() {
        let mut screen = screen();
        screen.set_progress(ProgressUpdate::Value { current: 1, max: 2 });
        assert_eq!(screen.bar_state(), BarState::Hidden);
        assert_eq!(screen.bars().0.position(), 0);

        screen.set_property("activity", Some("1"));
        assert_eq!(screen.bar_state(), BarState::Armed);
        screen.set_progress(ProgressUpdate::Value { current: 1, max: 2 });
        assert_eq!(screen.bar_state(), BarState::Shown);
        assert_eq!(screen.bars().0.position(), 12);
        assert_eq!(lit_cells(&screen, 15), 12);
        assert_eq!(screen.terminal().cell(28, 15).0, GLYPH_HLINE);
        assert_eq!(screen.terminal().cell(27, 15).0, ' ');
        assert_eq!(screen.terminal().row(16).trim(), "");

        screen.set_progress(ProgressUpdate::Advance);
        assert_eq!(screen.bars().0.position(), 12);
    }

    #[test]
    fn test_second_stage() {
        let mut screen = screen();
        screen.set_property("stage_max", Some("2"));
        screen.set_property("activity", Some("1"));
        screen.set_progress(ProgressUpdate::Value { current: 3, max: 4 });
        screen.set_property("stage", Some("2"));
        assert!(screen.bars().0.is_full());

        screen.set_progress(ProgressUpdate::Value { current: 1, max: 4 });
        assert_eq!(screen.bars().1.position(), 6);
        assert_eq!(lit_cells(&screen, 15), 24);
        assert_eq!(lit_cells(&screen, 16), 6);
    }

    #[test]
    fn test_finish_fills_bars() {
        let mut screen = screen();
        let mut delays = Vec::new();
        screen.finish(&mut |d| delays.push(d));
        assert!(delays.is_empty());

        screen.set_property("activity", Some("1"));
        screen.set_progress(ProgressUpdate::Value { current: 0, max: 1 });
        screen.finish(&mut |d| delays.push(d));
        assert_eq!(delays.len(), 25);
        assert_eq!(lit_cells(&screen, 15), 24);

        screen.reset();
        assert_eq!(screen.bar_state(), BarState::Hidden);
        assert_eq!(screen.bars().0.position(), 0);
    }

    #[test]
    fn test_warning_row() {
        let mut screen = screen();
        screen.warning(Some("Battery low"));
        assert_eq!(screen.terminal().row(18).trim(), "Battery low");
        let x = u16::try_from(screen.terminal().row(18).find('B').unwrap_or(0)).unwrap_or(0);
        assert_eq!(screen.terminal().cell(x, 18).1, WARNING_COLOR);

        screen.warning(None);
        assert_eq!(screen.terminal().row(18).trim(), "");
    }

    #[test]
    fn test_message_box() {
        let mut screen = screen();
        screen.message_box(&["Error", "Boot failed!"], None);
        let term = screen.terminal();

        assert_eq!(term.cell(31, 15).0, GLYPH_CORNER_UL);
        assert_eq!(term.cell(48, 15).0, GLYPH_CORNER_UR);
        assert_eq!(term.cell(49, 15).0, ' ');
        assert_eq!(term.row(16).trim(), format!("{GLYPH_VLINE}{}{GLYPH_VLINE}", " ".repeat(16)));
        assert_eq!(
            term.row(17).trim(),
            format!("{GLYPH_VLINE}  Error{}{GLYPH_VLINE}", " ".repeat(9))
        );
        assert_eq!(
            term.row(18).trim(),
            format!("{GLYPH_VLINE}  Boot failed!{}{GLYPH_VLINE}", " ".repeat(2))
        );
        assert_eq!(term.cell(31, 20).0, GLYPH_CORNER_LL);
        assert_eq!(term.cell(48, 20).0, GLYPH_CORNER_LR);
        assert_eq!(term.cell(40, 17).1, BOX_COLOR);
        assert_eq!(term.color(), ColorPair::default());
    }
}
