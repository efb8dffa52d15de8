// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Provides [`TextBar`], a one row progress or activity bar for character cell terminals.
//!
//! A progress bar fills from the left as a transfer advances. An activity bar has no notion of how much work is
//! left, so a short highlight keeps sliding from left to right and wraps around.
//!
//! Neither bar ever sleeps. [`TextBar::finish`] returns a [`FinishAnimation`], an iterator of frames that each
//! carry the delay the host should wait before drawing the bar again.

use core::time::Duration;

use uefi::proto::console::text::Color;

use crate::{
    color::ColorPair,
    term::{Coordinate, GLYPH_HLINE, TextTerminal},
};

/// The width of the sliding highlight of an activity bar.
pub const ACTIVITY_HIGHLIGHT_WIDTH: i32 = 3;

/// The delay between frames of a fill animation.
pub const FILL_FRAME_DELAY: Duration = Duration::from_millis(5);

/// The delay between frames while an activity bar finishes its current run.
pub const CYCLE_FRAME_DELAY: Duration = Duration::from_millis(50);

/// Which kind of bar it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarKind {
    /// Fills proportionally to a known amount of work.
    Progress,

    /// Slides a highlight while the amount of work is unknown.
    Activity,
}

/// Glyphs and colours of a bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarStyle {
    /// The glyph of cells that are not highlighted.
    pub glyph_normal: char,

    /// The glyph of highlighted cells.
    pub glyph_highlight: char,

    /// The colour of cells that are not highlighted.
    pub normal: ColorPair,

    /// The colour of highlighted cells.
    pub highlight: ColorPair,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            glyph_normal: GLYPH_HLINE,
            glyph_highlight: GLYPH_HLINE,
            normal: ColorPair::new(Color::DarkGray, Color::Black),
            highlight: ColorPair::new(Color::White, Color::Black),
        }
    }
}

/// A one row bar at a fixed position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBar {
    /// Progress or activity.
    kind: BarKind,

    /// The left end of the bar.
    origin: Coordinate,

    /// The number of cells.
    len: i32,

    /// The fill position (progress) or the start of the highlight (activity).
    pos: i32,

    /// Set once an activity bar has switched to filling from the left.
    filling: bool,

    /// Glyphs and colours.
    style: BarStyle,
}

impl TextBar {
    /// Creates an empty activity bar.
    #[must_use = "Has no effect if the result is unused"]
    pub fn activity(origin: Coordinate, len: u16) -> Self {
        Self {
            kind: BarKind::Activity,
            origin,
            len: i32::from(len),
            pos: 1 - ACTIVITY_HIGHLIGHT_WIDTH,
            filling: false,
            style: BarStyle::default(),
        }
    }

    /// Creates an empty progress bar.
    #[must_use = "Has no effect if the result is unused"]
    pub fn progress(origin: Coordinate, len: u16) -> Self {
        Self {
            kind: BarKind::Progress,
            origin,
            len: i32::from(len),
            pos: 0,
            filling: false,
            style: BarStyle::default(),
        }
    }

    /// Replaces the glyphs and colours.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn with_style(mut self, style: BarStyle) -> Self {
        self.style = style;
        self
    }

    /// Moves the highlight of an activity bar one cell to the right, wrapping at the end.
    ///
    /// This does nothing to a progress bar.
    pub fn advance(&mut self) {
        if self.kind != BarKind::Activity {
            return;
        }
        self.pos += 1;
        if self.pos >= self.len {
            self.pos = 1 - ACTIVITY_HIGHLIGHT_WIDTH;
        }
    }

    /// Draws the bar. The cursor and colour of the terminal are left as they were.
    pub fn draw(&self, term: &mut dyn TextTerminal) {
        let saved_pos = term.position();
        let saved_color = term.color();

        let (start, end) = self.highlight();
        let start = start.max(0);
        term.goto(self.origin);

        let mut highlighted = None;
        for x in 0..self.len {
            let lit = start <= x && x < end;
            if highlighted != Some(lit) {
                term.set_color(if lit {
                    self.style.highlight
                } else {
                    self.style.normal
                });
                highlighted = Some(lit);
            }
            term.put(if lit {
                self.style.glyph_highlight
            } else {
                self.style.glyph_normal
            });
        }

        term.goto(saved_pos);
        term.set_color(saved_color);
    }

    /// Starts the animation that takes the bar to its full state.
    ///
    /// A progress bar fills one cell per frame from where it is. An activity bar first lets the highlight run
    /// off the right edge, then fills from the left.
    pub fn finish(&mut self) -> FinishAnimation<'_> {
        let phase = match self.kind {
            BarKind::Progress => FinishPhase::Fill {
                next: self.pos.max(0),
            },
            BarKind::Activity if self.filling => FinishPhase::Fill { next: self.pos },
            BarKind::Activity => FinishPhase::Cycle,
        };
        FinishAnimation { bar: self, phase }
    }

    /// Returns the columns that are highlighted, as a half open range that may start left of the bar.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn highlight(&self) -> (i32, i32) {
        match self.kind {
            BarKind::Activity if !self.filling => {
                (self.pos, self.pos + ACTIVITY_HIGHLIGHT_WIDTH)
            }
            _ => (0, self.pos),
        }
    }

    /// Returns true if the bar is completely filled.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn is_full(&self) -> bool {
        let (start, end) = self.highlight();
        start <= 0 && end >= self.len
    }

    /// Returns which kind of bar this is.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn kind(&self) -> BarKind {
        self.kind
    }

    /// Returns the number of cells.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn len(&self) -> i32 {
        self.len
    }

    /// Returns the left end of the bar.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Returns the fill position or the start of the highlight.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn position(&self) -> i32 {
        self.pos
    }

    /// Empties the bar.
    pub const fn reset(&mut self) {
        self.filling = false;
        self.pos = match self.kind {
            BarKind::Progress => 0,
            BarKind::Activity => 1 - ACTIVITY_HIGHLIGHT_WIDTH,
        };
    }

    /// Feeds progress into the bar.
    ///
    /// A progress bar moves to `current / max` of its length, but never backwards; a `max` of zero or a `current`
    /// past `max` is ignored. An activity bar ignores both numbers and advances.
    pub fn set_progress(&mut self, current: u64, max: u64) {
        match self.kind {
            BarKind::Activity => self.advance(),
            BarKind::Progress => {
                if max == 0 || current > max {
                    return;
                }
                let len = u128::from(self.len.unsigned_abs());
                let pos = u128::from(current) * len / u128::from(max);
                let pos = i32::try_from(pos).unwrap_or(self.len);
                self.pos = self.pos.max(pos);
            }
        }
    }

    /// Moves the bar. It keeps its length and state.
    pub const fn set_origin(&mut self, origin: Coordinate) {
        self.origin = origin;
    }
}

/// Where a [`FinishAnimation`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FinishPhase {
    /// The highlight of an activity bar is running off the right edge.
    Cycle,

    /// The bar is filling from the left, `next` is the fill of the next frame.
    Fill {
        /// The fill position of the next frame.
        next: i32,
    },

    /// The bar is full.
    Done,
}

/// The frames of a bar finishing. Each item is the delay to wait before drawing the bar.
///
/// The animation always ends, after at most `len + ACTIVITY_HIGHLIGHT_WIDTH` frames for the cycling phase plus
/// `len + 1` frames for the fill.
pub struct FinishAnimation<'a> {
    /// The bar being animated.
    bar: &'a mut TextBar,

    /// How far along the animation is.
    phase: FinishPhase,
}

impl FinishAnimation<'_> {
    /// Returns the bar in the state of the most recent frame.
    #[must_use = "Has no effect if the result is unused"]
    pub fn bar(&self) -> &TextBar {
        self.bar
    }
}

impl Iterator for FinishAnimation<'_> {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                FinishPhase::Cycle => {
                    if self.bar.pos > 0 {
                        self.bar.advance();
                        return Some(CYCLE_FRAME_DELAY);
                    }
                    self.bar.filling = true;
                    self.phase = FinishPhase::Fill {
                        next: ACTIVITY_HIGHLIGHT_WIDTH,
                    };
                }
                FinishPhase::Fill { next } => {
                    if next > self.bar.len {
                        self.bar.pos = self.bar.len;
                        self.phase = FinishPhase::Done;
                        return None;
                    }
                    self.bar.pos = next;
                    self.phase = FinishPhase::Fill { next: next + 1 };
                    return Some(FILL_FRAME_DELAY);
                }
                FinishPhase::Done => return None,
            }
        }
    }
}
