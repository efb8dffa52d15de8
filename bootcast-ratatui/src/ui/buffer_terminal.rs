// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! A [`TextTerminal`] backed by a ratatui cell [`Buffer`].
//!
//! The library draws incrementally: after the first page it only touches the rows that changed, and expects
//! everything else to stay on screen. A ratatui `Terminal` resets its back buffer after every frame, so instead
//! this keeps two buffers of its own. Writes go to `buffer`, and [`TextTerminal::refresh`] sends the cells that
//! differ from `shown` to the [`UefiConsole`], the same diff a `Terminal` flush does.

use bootcast_core::{
    BootcastResult,
    color::ColorPair,
    term::{Coordinate, TermSize, TextTerminal},
    text::char_width,
};
use log::debug;
use ratatui_core::{backend::Backend, buffer::Buffer, layout::Rect, style::Style};

use crate::ui::{console::UefiConsole, palette::style_of};

/// The console, as seen through a cell buffer.
pub struct BufferTerminal {
    /// Where finished frames go.
    console: UefiConsole,

    /// The cells as the library drew them.
    buffer: Buffer,

    /// The cells as they are on the console.
    shown: Buffer,

    /// The colour of following writes.
    color: ColorPair,

    /// The style matching `color`.
    style: Style,

    /// The cursor.
    cursor: Coordinate,

    /// Whether the hardware cursor is shown at `cursor` after a refresh.
    cursor_visible: bool,
}

impl BufferTerminal {
    /// Creates a [`BufferTerminal`] covering the current console mode, and clears the console.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the console mode could not be queried or the console could not be cleared.
    pub fn new(mut console: UefiConsole) -> BootcastResult<Self> {
        let size = console.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let color = ColorPair::default();
        let style = style_of(color);

        console.set_color(color)?;
        console.clear()?;

        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, style);
        Ok(Self {
            console,
            shown: buffer.clone(),
            buffer,
            color,
            style,
            cursor: Coordinate::default(),
            cursor_visible: true,
        })
    }

    /// Returns true if a character of `width` columns fits at the cursor.
    ///
    /// The last cell of the last row never fits, because writing it scrolls the console.
    fn fits(&self, width: u16) -> bool {
        let area = self.buffer.area;
        let Coordinate { x, y } = self.cursor;
        let end = x.saturating_add(width);
        if y >= area.height || end > area.width {
            return false;
        }
        !(y + 1 == area.height && end == area.width)
    }
}

impl TextTerminal for BufferTerminal {
    fn clear(&mut self) {
        let area = self.buffer.area;
        self.buffer.reset();
        self.buffer.set_style(area, self.style);
        self.shown.clone_from(&self.buffer);
        self.cursor = Coordinate::default();

        let cleared = self
            .console
            .set_color(self.color)
            .and_then(|()| self.console.clear());
        if let Err(e) = cleared {
            debug!("could not clear the console: {e}");
        }
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
        let width = u16::try_from(char_width(ch)).unwrap_or(u16::MAX);
        if width == 0 {
            return;
        }

        if self.fits(width)
            && let Some(cell) = self.buffer.cell_mut((self.cursor.x, self.cursor.y))
        {
            cell.set_char(ch).set_style(self.style);
        }
        self.cursor.x = self.cursor.x.saturating_add(width);
    }

    fn refresh(&mut self) {
        let updates = self.shown.diff(&self.buffer);
        if let Err(e) = self.console.draw(updates.into_iter()) {
            debug!("could not draw to the console: {e}");
        }
        self.shown.clone_from(&self.buffer);

        if self.cursor_visible {
            let _ = self
                .console
                .set_cursor_position((self.cursor.x, self.cursor.y));
        }
        let _ = self.console.flush();
    }

    fn set_color(&mut self, color: ColorPair) {
        self.color = color;
        self.style = style_of(color);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
        let _ = if visible {
            self.console.show_cursor()
        } else {
            self.console.hide_cursor()
        };
    }

    fn size(&self) -> TermSize {
        let area = self.buffer.area;
        TermSize {
            width: area.width,
            height: area.height,
        }
    }
}
