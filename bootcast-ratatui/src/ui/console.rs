// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The UEFI text console as a ratatui [`Backend`].
//!
//! Cells arrive from a buffer diff in row order. Neighbouring cells of one row that share a [`ColorPair`] are sent
//! as a single string, and the colour and cursor are only sent when they differ from what the console already has.
//! The bottom-right cell is never written, because the console scrolls when it is.

use alloc::string::String;
use core::fmt::Write;

use bootcast_core::{
    BootcastResult, color::ColorPair, error::BootcastError, system::helper::locate_protocol,
    text::str_width,
};
use log::debug;
use ratatui_core::{
    backend::{Backend, ClearType, WindowSize},
    buffer::Cell,
    layout::{Position, Size},
};
use uefi::{Status, boot::ScopedProtocol, proto::console::text::Output};

use crate::ui::palette::pair_of;

/// Cells of one row in one colour, waiting to be written.
struct Run {
    /// The first cell.
    start: Position,

    /// The column after the last cell.
    end: u16,

    /// The colour of every cell.
    color: ColorPair,

    /// The symbols of the cells.
    text: String,
}

impl Run {
    /// Starts an empty run.
    const fn new(start: Position, color: ColorPair) -> Self {
        Self {
            start,
            end: start.x,
            color,
            text: String::new(),
        }
    }

    /// Returns true if a cell at `pos` drawn in `color` carries on this run.
    fn continues(&self, pos: Position, color: ColorPair) -> bool {
        pos.y == self.start.y && pos.x == self.end && color == self.color
    }

    /// Appends the symbol of one cell.
    fn push(&mut self, symbol: &str) {
        self.text.push_str(symbol);
        self.end = self.end.saturating_add(symbol_width(symbol));
    }
}

/// Returns how many columns a cell symbol covers.
fn symbol_width(symbol: &str) -> u16 {
    u16::try_from(str_width(symbol).max(1)).unwrap_or(1)
}

/// The console, as ratatui sees it.
pub struct UefiConsole {
    /// The [`Output`] of the console.
    output: ScopedProtocol<Output>,

    /// Columns and rows of the console mode, which does not change while the menu runs.
    size: Size,

    /// The colour the console writes in, once known.
    color: Option<ColorPair>,

    /// Where the console cursor is, once known.
    cursor: Option<Position>,

    /// Whether the cursor is shown, once known.
    cursor_visible: Option<bool>,
}

impl UefiConsole {
    /// Opens the console in its current mode.
    ///
    /// # Errors
    ///
    /// May return an `Error` if there is no [`Output`], or its mode cannot be queried.
    pub fn new() -> BootcastResult<Self> {
        let output = locate_protocol::<Output>()?;
        let mode = output
            .current_mode()?
            .ok_or(BootcastError::Uefi(Status::UNSUPPORTED.into()))?;
        let size = Size::new(
            u16::try_from(mode.columns()).unwrap_or(u16::MAX),
            u16::try_from(mode.rows()).unwrap_or(u16::MAX),
        );

        Ok(Self {
            output,
            size,
            color: None,
            cursor: None,
            cursor_visible: None,
        })
    }

    /// Sets the colour of following writes and clears.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the console refuses the colours.
    pub fn set_color(&mut self, color: ColorPair) -> BootcastResult<()> {
        if self.color != Some(color) {
            self.output.set_color(color.fg, color.bg)?;
            self.color = Some(color);
        }
        Ok(())
    }

    /// Returns true if writing `width` columns at `pos` would reach the bottom-right cell.
    const fn scrolls(&self, pos: Position, width: u16) -> bool {
        pos.y.saturating_add(1) >= self.size.height
            && pos.x.saturating_add(width) >= self.size.width
    }

    /// Moves the console cursor, unless it is already there.
    fn move_to(&mut self, pos: Position) -> BootcastResult<()> {
        if self.cursor != Some(pos) {
            self.output
                .set_cursor_position(usize::from(pos.x), usize::from(pos.y))?;
            self.cursor = Some(pos);
        }
        Ok(())
    }

    /// Shows or hides the cursor, unless it already is.
    fn enable_cursor(&mut self, visible: bool) {
        if self.cursor_visible == Some(visible) {
            return;
        }
        if let Err(e) = self.output.enable_cursor(visible) {
            debug!("console cursor cannot be toggled: {e}");
        }
        self.cursor_visible = Some(visible);
    }

    /// Writes a run in its colour.
    fn write_run(&mut self, run: &Run) -> BootcastResult<()> {
        if run.text.is_empty() {
            return Ok(());
        }
        self.move_to(run.start)?;
        self.set_color(run.color)?;
        self.output
            .write_str(&run.text)
            .map_err(|_| BootcastError::Uefi(Status::DEVICE_ERROR.into()))?;
        self.cursor = Some(Position::new(run.end, run.start.y));
        Ok(())
    }

    /// Writes spaces in the current colour from `from` up to the end of its row.
    fn blank_row(&mut self, from: Position) -> BootcastResult<()> {
        let mut run = Run::new(from, self.color.unwrap_or_default());
        for x in from.x..self.size.width {
            if self.scrolls(Position::new(x, from.y), 1) {
                break;
            }
            run.push(" ");
        }
        self.write_run(&run)?;
        self.move_to(from)
    }
}

impl Backend for UefiConsole {
    type Error = BootcastError;

    fn draw<'a, I>(&mut self, content: I) -> BootcastResult<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        let mut run: Option<Run> = None;
        for (x, y, cell) in content {
            let pos = Position::new(x, y);
            let symbol = cell.symbol();
            if self.scrolls(pos, symbol_width(symbol)) {
                continue;
            }

            let color = pair_of(cell.fg, cell.bg);
            if !run.as_ref().is_some_and(|r| r.continues(pos, color)) {
                if let Some(done) = run.take() {
                    self.write_run(&done)?;
                }
                run = Some(Run::new(pos, color));
            }
            if let Some(current) = &mut run {
                current.push(symbol);
            }
        }

        match run {
            Some(done) => self.write_run(&done),
            None => Ok(()),
        }
    }

    fn hide_cursor(&mut self) -> BootcastResult<()> {
        self.enable_cursor(false);
        Ok(())
    }

    fn show_cursor(&mut self) -> BootcastResult<()> {
        self.enable_cursor(true);
        Ok(())
    }

    fn get_cursor_position(&mut self) -> BootcastResult<Position> {
        if let Some(pos) = self.cursor {
            return Ok(pos);
        }
        let (x, y) = self.output.cursor_position();
        let pos = Position::new(
            u16::try_from(x).unwrap_or(u16::MAX),
            u16::try_from(y).unwrap_or(u16::MAX),
        );
        self.cursor = Some(pos);
        Ok(pos)
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> BootcastResult<()> {
        self.move_to(position.into())
    }

    fn clear(&mut self) -> BootcastResult<()> {
        self.output.clear()?;
        self.cursor = Some(Position::new(0, 0));
        Ok(())
    }

    fn clear_region(&mut self, clear_type: ClearType) -> BootcastResult<()> {
        match clear_type {
            ClearType::All => self.clear(),
            ClearType::CurrentLine => {
                let pos = self.get_cursor_position()?;
                self.blank_row(Position::new(0, pos.y))?;
                self.move_to(pos)
            }
            ClearType::UntilNewLine => {
                let pos = self.get_cursor_position()?;
                self.blank_row(pos)
            }
            _ => Err(BootcastError::Uefi(Status::UNSUPPORTED.into())),
        }
    }

    fn size(&self) -> BootcastResult<Size> {
        Ok(self.size)
    }

    fn window_size(&mut self) -> BootcastResult<WindowSize> {
        Ok(WindowSize {
            columns_rows: self.size,
            pixels: Size::new(0, 0),
        })
    }

    fn flush(&mut self) -> BootcastResult<()> {
        Ok(())
    }
}
