// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The pixel progress and activity bars.
//!
//! Both variants share one component, [`GuiBar`], and differ only in [`GuiBarKind`]. The bar is drawn as a one
//! pixel border around a track; the filled or highlighted part of the track uses the foreground colour and the
//! rest the background colour.

use alloc::string::String;
use core::time::Duration;

use crate::{
    gui::{Canvas, PaintableComponent, PropertyEffect, Rect, Rgba},
    screen::ProgressUpdate,
};

/// How far the activity highlight moves per step.
pub const ACTIVITY_STEP: i32 = 1;

/// The width of the activity highlight in pixels.
pub const ACTIVITY_HIGHLIGHT_WIDTH: u32 = 31;

/// The preferred width of a bar.
pub const MINIMAL_WIDTH: u32 = 200;

/// The preferred height of a bar.
pub const MINIMAL_HEIGHT: u32 = 28;

/// The delay between frames of a finish animation.
pub const FINISH_FRAME_DELAY: Duration = Duration::from_millis(5);

/// The state that differs between the two variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuiBarKind {
    /// Fills `value / end` of the track.
    Progress {
        /// Work done.
        value: u64,

        /// Total work. Nothing is painted while it is zero.
        end: u64,
    },

    /// Slides a highlight along the track.
    Activity {
        /// The left edge of the highlight, relative to the track. Negative while it enters from the left.
        value: i32,

        /// How far the highlight moves per advance.
        step: i32,

        /// The width of the highlight.
        highlight_width: u32,
    },
}

/// A progress or activity bar component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuiBar {
    /// The variant specific state.
    kind: GuiBarKind,

    /// Where the bar is.
    bounds: Rect,

    /// The id set with the `id` property.
    id: Option<String>,

    /// Hidden bars do not paint.
    visible: bool,

    /// The colour of the frame.
    border_color: Rgba,

    /// The colour of the unfilled track.
    bg_color: Rgba,

    /// The colour of the filled track or highlight.
    fg_color: Rgba,

    /// The pixmap pattern of the track.
    bar_style: Option<String>,

    /// The pixmap pattern of the highlight.
    highlight_style: Option<String>,

    /// The directory pixmap patterns are looked up in.
    theme_dir: Option<String>,

    /// Whether the highlight is drawn over the track instead of replacing it.
    highlight_overlay: bool,
}

impl GuiBar {
    /// Creates a bar of the given kind with the default colours.
    const fn with_kind(kind: GuiBarKind) -> Self {
        Self {
            kind,
            bounds: Rect::new(0, 0, 0, 0),
            id: None,
            visible: true,
            border_color: Rgba::BLACK,
            bg_color: Rgba::GRAY,
            fg_color: Rgba::LIGHT_GRAY,
            bar_style: None,
            highlight_style: None,
            theme_dir: None,
            highlight_overlay: false,
        }
    }

    /// Creates an activity bar.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn activity() -> Self {
        Self::with_kind(GuiBarKind::Activity {
            value: ACTIVITY_STEP - ACTIVITY_HIGHLIGHT_WIDTH.cast_signed(),
            step: ACTIVITY_STEP,
            highlight_width: ACTIVITY_HIGHLIGHT_WIDTH,
        })
    }

    /// Creates an empty progress bar.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn progress() -> Self {
        Self::with_kind(GuiBarKind::Progress { value: 0, end: 0 })
    }

    /// Returns the variant specific state.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn kind(&self) -> GuiBarKind {
        self.kind
    }

    /// Returns true if the bar paints.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the bar.
    pub const fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Returns the pixmap patterns and theme directory set through properties.
    ///
    /// They are kept so a theme can be reapplied, but bars are always painted as plain rectangles.
    #[must_use = "Has no effect if the result is unused"]
    pub fn styles(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        (
            self.bar_style.as_deref(),
            self.highlight_style.as_deref(),
            self.theme_dir.as_deref(),
        )
    }

    /// Returns true if the highlight is drawn over the track.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn highlight_overlay(&self) -> bool {
        self.highlight_overlay
    }

    /// Returns the width of the track between the borders.
    fn track_width(&self) -> u32 {
        self.bounds.width.saturating_sub(2)
    }

    /// Moves the activity highlight by one step, wrapping once it leaves the track.
    fn advance(&mut self) {
        let track = i32::try_from(self.track_width()).unwrap_or(i32::MAX);
        if let GuiBarKind::Activity {
            value,
            step,
            highlight_width,
        } = &mut self.kind
        {
            *value = value.saturating_add(*step);
            if *value >= track {
                *value = *step - i32::try_from(*highlight_width).unwrap_or(i32::MAX);
            }
        }
    }

    /// Feeds a progress update into the bar and makes it visible.
    ///
    /// Activity bars only react to [`ProgressUpdate::Advance`] and progress bars only to
    /// [`ProgressUpdate::Value`].
    pub fn set_state(&mut self, visible: bool, update: ProgressUpdate) {
        match (&mut self.kind, update) {
            (GuiBarKind::Activity { .. }, ProgressUpdate::Advance) => {
                self.visible = visible;
                self.advance();
            }
            (GuiBarKind::Progress { value, end }, ProgressUpdate::Value { current, max }) => {
                self.visible = visible;
                *value = current;
                *end = max;
            }
            _ => (),
        }
    }

    /// Returns the highlighted part of the track as a half open pixel range, or `None` if nothing is painted.
    #[must_use = "Has no effect if the result is unused"]
    pub fn highlight(&self) -> Option<(u32, u32)> {
        let track = self.track_width();
        match self.kind {
            GuiBarKind::Progress { end: 0, .. } => None,
            GuiBarKind::Progress { value, end } => {
                let filled = u128::from(value) * u128::from(track) / u128::from(end);
                Some((0, u32::try_from(filled).unwrap_or(track).min(track)))
            }
            GuiBarKind::Activity {
                value,
                highlight_width,
                ..
            } => {
                let clamp = |v: i64| u32::try_from(v.clamp(0, i64::from(track))).unwrap_or(0);
                let start = i64::from(value);
                Some((clamp(start), clamp(start + i64::from(highlight_width))))
            }
        }
    }

    /// Starts the finish animation.
    ///
    /// The activity highlight first runs to the end of the track and back in from the left, then grows until it
    /// covers the whole bar. A progress bar has nothing to animate.
    pub fn finish(&mut self) -> GuiFinish<'_> {
        let phase = match self.kind {
            GuiBarKind::Activity { step, .. } if step != 0 => {
                if self.bounds.width <= 2 {
                    GuiFinishPhase::Grow
                } else {
                    GuiFinishPhase::RunOut
                }
            }
            _ => GuiFinishPhase::Done,
        };
        GuiFinish { bar: self, phase }
    }
}

/// Fills the part of `rect` that lies in `clip`.
fn fill_clipped(canvas: &mut dyn Canvas, color: Rgba, rect: &Rect, clip: &Rect) {
    let rect = rect.intersect(clip);
    if !rect.is_empty() {
        canvas.fill_rect(color, &rect);
    }
}

/// Converts a track offset into a pixel offset from the left edge of the bar.
fn to_x(base: i32, offset: u32) -> i32 {
    base.saturating_add(1)
        .saturating_add(i32::try_from(offset).unwrap_or(i32::MAX))
}

impl PaintableComponent for GuiBar {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn paint(&self, canvas: &mut dyn Canvas, region: &Rect) {
        let bounds = self.bounds;
        if !self.visible || !region.overlaps(&bounds) {
            return;
        }
        let Some((start, end)) = self.highlight() else {
            return;
        };
        let clip = region.intersect(&bounds);
        let track = self.track_width();
        let inner_height = bounds.height.saturating_sub(2);
        let y = bounds.y.saturating_add(1);

        fill_clipped(canvas, self.border_color, &bounds, &clip);

        let left = Rect::new(to_x(bounds.x, 0), y, start, inner_height);
        let lit = Rect::new(to_x(bounds.x, start), y, end.saturating_sub(start), inner_height);
        let right = Rect::new(to_x(bounds.x, end), y, track.saturating_sub(end), inner_height);

        if self.highlight_overlay {
            let whole = Rect::new(to_x(bounds.x, 0), y, track, inner_height);
            fill_clipped(canvas, self.bg_color, &whole, &clip);
        } else {
            fill_clipped(canvas, self.bg_color, &left, &clip);
            fill_clipped(canvas, self.bg_color, &right, &clip);
        }
        fill_clipped(canvas, self.fg_color, &lit, &clip);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn minimal_size(&self) -> (u32, u32) {
        (MINIMAL_WIDTH.max(2), MINIMAL_HEIGHT.max(2))
    }

    fn set_property(&mut self, name: &str, value: Option<&str>) -> PropertyEffect {
        let color = match name {
            "border_color" => Some(&mut self.border_color),
            "bg_color" => Some(&mut self.bg_color),
            "fg_color" => Some(&mut self.fg_color),
            _ => None,
        };
        if let Some(color) = color {
            return match value.and_then(Rgba::parse) {
                Some(parsed) => {
                    *color = parsed;
                    PropertyEffect::Applied
                }
                None => {
                    log::debug!("ignoring bad colour for {name}: {value:?}");
                    PropertyEffect::Ignored
                }
            };
        }

        match name {
            "bar_style" => self.bar_style = value.map(String::from),
            "highlight_style" => self.highlight_style = value.map(String::from),
            "theme_dir" => self.theme_dir = value.map(String::from),
            "highlight_overlay" => self.highlight_overlay = value == Some("true"),
            "id" => self.id = value.map(String::from),
            "activity_finish" => {
                return match self.kind {
                    GuiBarKind::Activity { step, .. } if step != 0 => PropertyEffect::StartFinish,
                    _ => PropertyEffect::Ignored,
                };
            }
            _ => return PropertyEffect::Ignored,
        }
        PropertyEffect::Applied
    }
}

/// Where a [`GuiFinish`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GuiFinishPhase {
    /// The highlight runs off the right end of the track.
    RunOut,

    /// The highlight runs in from the left until it touches the start.
    RunIn,

    /// The highlight widens until it covers the bar.
    Grow,

    /// One more frame of the full bar.
    Last,

    /// Nothing left.
    Done,
}

/// The frames of a [`GuiBar`] finishing. Each item is the delay to wait before painting the bar again.
pub struct GuiFinish<'a> {
    /// The bar being animated.
    bar: &'a mut GuiBar,

    /// How far along the animation is.
    phase: GuiFinishPhase,
}

impl GuiFinish<'_> {
    /// Returns the bar in the state of the most recent frame.
    #[must_use = "Has no effect if the result is unused"]
    pub fn bar(&self) -> &GuiBar {
        self.bar
    }
}

impl Iterator for GuiFinish<'_> {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        let width = self.bar.bounds.width;
        loop {
            let GuiBarKind::Activity {
                value,
                step,
                highlight_width,
            } = self.bar.kind
            else {
                self.phase = GuiFinishPhase::Done;
                return None;
            };
            match self.phase {
                GuiFinishPhase::RunOut if value > 0 => {
                    self.bar.advance();
                    return Some(FINISH_FRAME_DELAY);
                }
                GuiFinishPhase::RunOut => self.phase = GuiFinishPhase::RunIn,
                GuiFinishPhase::RunIn if value < 0 => {
                    self.bar.advance();
                    return Some(FINISH_FRAME_DELAY);
                }
                GuiFinishPhase::RunIn => self.phase = GuiFinishPhase::Grow,
                GuiFinishPhase::Grow if highlight_width < width => {
                    self.bar.kind = GuiBarKind::Activity {
                        value: if width <= 2 { 0 } else { value },
                        step,
                        highlight_width: highlight_width
                            .saturating_add(step.unsigned_abs().max(1))
                            .min(width),
                    };
                    return Some(FINISH_FRAME_DELAY);
                }
                GuiFinishPhase::Grow => self.phase = GuiFinishPhase::Last,
                GuiFinishPhase::Last => {
                    self.phase = GuiFinishPhase::Done;
                    return Some(FINISH_FRAME_DELAY);
                }
                GuiFinishPhase::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::{FrameBuffer, canvas::tests::rgb};

    fn bar_at(mut bar: GuiBar, width: u32) -> GuiBar {
        bar.set_bounds(Rect::new(0, 0, width, 10));
        bar
    }

    #[test]
    fn test_progress_paint() {
        let mut bar = bar_at(GuiBar::progress(), 12);
        let mut fb = FrameBuffer::new(12, 10);
        bar.paint(&mut fb, &Rect::new(0, 0, 12, 10));
        assert_eq!(rgb(&fb, 0, 0), (0, 0, 0));
        assert_eq!(rgb(&fb, 5, 5), (0, 0, 0));

        bar.set_state(true, ProgressUpdate::Value { current: 1, max: 2 });
        assert_eq!(bar.highlight(), Some((0, 5)));
        bar.paint(&mut fb, &Rect::new(0, 0, 12, 10));
        assert_eq!(rgb(&fb, 0, 5), (0, 0, 0));
        assert_eq!(rgb(&fb, 1, 5), (200, 200, 200));
        assert_eq!(rgb(&fb, 5, 5), (200, 200, 200));
        assert_eq!(rgb(&fb, 6, 5), (128, 128, 128));
        assert_eq!(rgb(&fb, 10, 5), (128, 128, 128));
        assert_eq!(rgb(&fb, 11, 5), (0, 0, 0));
        assert_eq!(rgb(&fb, 5, 0), (0, 0, 0));

        bar.set_state(true, ProgressUpdate::Advance);
        assert_eq!(bar.highlight(), Some((0, 5)));
    }

    #[test]
    fn test_paint_respects_region() {
        let mut bar = bar_at(GuiBar::progress(), 12);
        bar.set_state(true, ProgressUpdate::Value { current: 1, max: 1 });
        let mut fb = FrameBuffer::new(12, 10);
        bar.paint(&mut fb, &Rect::new(6, 0, 6, 10));
        assert_eq!(rgb(&fb, 3, 5), (0, 0, 0));
        assert_eq!(rgb(&fb, 7, 5), (200, 200, 200));
    }

    #[test]
    fn test_activity_wraps() {
        let mut bar = bar_at(GuiBar::activity(), 50);
        let start = ACTIVITY_STEP - 31;
        assert!(matches!(bar.kind(), GuiBarKind::Activity { value, .. } if value == start));

        for _ in 0..(48 - start) {
            bar.set_state(true, ProgressUpdate::Advance);
        }
        assert!(matches!(bar.kind(), GuiBarKind::Activity { value, .. } if value == start));

        bar.set_state(true, ProgressUpdate::Value { current: 3, max: 4 });
        assert!(matches!(bar.kind(), GuiBarKind::Activity { value, .. } if value == start));
    }

    #[test]
    fn test_activity_finish() {
        let mut bar = bar_at(GuiBar::activity(), 100);
        for _ in 0..40 {
            bar.set_state(true, ProgressUpdate::Advance);
        }
        assert!(matches!(bar.kind(), GuiBarKind::Activity { value: 10, .. }));

        assert_eq!(
            bar.set_property("activity_finish", None),
            PropertyEffect::StartFinish
        );
        let frames = bar.finish().count();
        assert_eq!(frames, 88 + 30 + 69 + 1);
        assert_eq!(bar.highlight(), Some((0, 98)));
        assert!(matches!(
            bar.kind(),
            GuiBarKind::Activity {
                value: 0,
                highlight_width: 100,
                ..
            }
        ));
    }

    #[test]
    fn test_finish_narrow_bar_ends() {
        for width in 0..=3 {
            let mut bar = bar_at(GuiBar::activity(), width);
            assert!(bar.finish().count() < 300);
        }
        let mut bar = GuiBar::progress();
        assert_eq!(bar.finish().count(), 0);
        assert_eq!(
            bar.set_property("activity_finish", None),
            PropertyEffect::Ignored
        );
    }

    #[test]
    fn test_properties() {
        let mut bar = GuiBar::activity();
        assert_eq!(
            bar.set_property("fg_color", Some("#ff0000")),
            PropertyEffect::Applied
        );
        assert_eq!(
            bar.set_property("bg_color", Some("not a colour")),
            PropertyEffect::Ignored
        );
        assert_eq!(
            bar.set_property("highlight_overlay", Some("true")),
            PropertyEffect::Applied
        );
        assert!(bar.highlight_overlay());
        let _ = bar.set_property("bar_style", Some("bar_*.png"));
        let _ = bar.set_property("theme_dir", Some("/themes/x"));
        assert_eq!(bar.styles(), (Some("bar_*.png"), None, Some("/themes/x")));
        assert_eq!(
            bar.set_property("sparkle", Some("yes")),
            PropertyEffect::Ignored
        );
        assert_eq!(bar.minimal_size(), (200, 28));
    }
}
