// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The pixel boot screen.
//!
//! An activity bar and, below it, a progress bar sit centred in the lower third of the screen. Each change is painted into a
//! [`FrameBuffer`] first and then handed to the [`Surface`] as a whole. The pixel screen has no font, so text
//! that the text screen would print (warnings, message boxes) goes to the log.

use alloc::string::String;
use core::time::Duration;

use crate::{
    color::ColorPair,
    gui::{
        Canvas, Container, FrameBuffer, GuiBar, GuiBarKind, PaintableComponent, PropertyEffect,
        Rect, Rgba, Surface,
    },
    menu::Menu,
    screen::{BootScreen, ProgressUpdate, ScreenData},
};

/// The id of the activity bar, used to address its properties as `activity:<name>`.
pub const ACTIVITY_BAR_ID: &str = "activity";

/// The id of the progress bar, used to address its properties as `progress:<name>`.
pub const PROGRESS_BAR_ID: &str = "progress";

/// The vertical gap between the activity bar and the progress bar, in pixels.
pub const BAR_GAP: u32 = 8;

/// A boot screen painted onto a [`Surface`].
pub struct GfxBootScreen<S> {
    /// Where finished frames are shown.
    surface: S,

    /// The frame being painted.
    fb: FrameBuffer,

    /// The bars.
    widgets: Container<GuiBar>,

    /// The colour behind the bars.
    background: Rgba,

    /// Whether loading has started.
    activity: bool,

    /// Set when a bar asked for its finish animation through a property.
    finish_requested: bool,

    /// Messages and counters.
    data: ScreenData,
}

impl<S: Surface> GfxBootScreen<S> {
    /// Creates a screen covering the whole surface, with both bars hidden.
    pub fn new(surface: S) -> Self {
        let (width, height) = surface.resolution();
        let screen = Rect::new(0, 0, width, height);
        let mut widgets = Container::new(screen);

        for id in [ACTIVITY_BAR_ID, PROGRESS_BAR_ID] {
            let mut bar = if id == ACTIVITY_BAR_ID {
                GuiBar::activity()
            } else {
                GuiBar::progress()
            };
            let _ = bar.set_property("id", Some(id));
            let (w, h) = bar.minimal_size();
            let x = width.saturating_sub(w) / 2;
            let mut y = height / 3 * 2;
            if id == PROGRESS_BAR_ID {
                y = y.saturating_add(h).saturating_add(BAR_GAP);
            }
            bar.set_bounds(Rect::new(
                i32::try_from(x).unwrap_or(0),
                i32::try_from(y).unwrap_or(0),
                w,
                h,
            ));
            bar.set_visible(false);
            widgets.add(bar);
        }

        Self {
            surface,
            fb: FrameBuffer::new(width, height),
            widgets,
            background: Rgba::BLACK,
            activity: false,
            finish_requested: false,
            data: ScreenData::default(),
        }
    }

    /// Returns the bars.
    #[must_use = "Has no effect if the result is unused"]
    pub fn bars(&self) -> &[GuiBar] {
        self.widgets.children()
    }

    /// Returns the messages and counters.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn data(&self) -> &ScreenData {
        &self.data
    }

    /// Returns the frame buffer as last presented.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Returns the surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Paints a region of the screen and shows the frame.
    fn paint(&mut self, region: &Rect) {
        self.fb.fill_rect(self.background, region);
        self.widgets.paint(&mut self.fb, region);
        self.surface.present(&self.fb);
    }

    /// Paints the whole screen and shows the frame.
    fn paint_all(&mut self) {
        let bounds = self.widgets.bounds();
        self.paint(&bounds);
    }

    /// Routes an `id:name` property to the child with that id.
    fn set_child_property(&mut self, id: &str, name: &str, value: Option<&str>) {
        let Some(child) = self.widgets.find_mut(id) else {
            log::debug!("no component with id {id}");
            return;
        };
        match child.set_property(name, value) {
            PropertyEffect::StartFinish => self.finish_requested = true,
            PropertyEffect::Applied => self.paint_all(),
            PropertyEffect::Ignored => (),
        }
    }
}

impl<S: Surface> BootScreen for GfxBootScreen<S> {
    fn reset(&mut self) {
        self.activity = false;
        self.finish_requested = false;
        for bar in self.widgets.children_mut() {
            if matches!(bar.kind(), GuiBarKind::Progress { .. }) {
                bar.set_state(false, ProgressUpdate::Value { current: 0, max: 0 });
            }
            bar.set_visible(false);
        }
    }

    fn clear(&mut self) {
        let bounds = self.widgets.bounds();
        self.fb.fill_rect(self.background, &bounds);
        self.surface.present(&self.fb);
    }

    fn redraw(&mut self) {
        self.paint_all();
    }

    fn redraw_text(&mut self, _clear: bool) {
        let message = if self.activity {
            self.data.activity_descr.as_deref()
        } else if self.data.counting_down() {
            self.data.timeout_message.as_deref()
        } else {
            self.data.default_message.as_deref()
        };
        if let Some(message) = message {
            log::info!("{message}");
        }
    }

    fn set_property(&mut self, name: &str, value: Option<&str>) {
        if let Some((id, name)) = name.split_once(':') {
            self.set_child_property(id, name, value);
            return;
        }
        match name {
            "activity" => {
                self.activity = value.is_some();
                if let Some(bar) = self.widgets.find_mut(ACTIVITY_BAR_ID) {
                    bar.set_visible(self.activity);
                }
                self.paint_all();
            }
            "background" => {
                if let Some(color) = value.and_then(Rgba::parse) {
                    self.background = color;
                    self.paint_all();
                }
            }
            _ => {
                if !self.data.apply(name, value) {
                    log::debug!("gfx screen ignores property {name}");
                }
            }
        }
    }

    fn set_progress(&mut self, update: ProgressUpdate) {
        if !self.activity {
            return;
        }
        let mut dirty: Option<Rect> = None;
        for bar in self.widgets.children_mut() {
            bar.set_state(true, update);
            if bar.is_visible() {
                let bounds = bar.bounds();
                dirty = Some(dirty.map_or(bounds, |d| d.union(&bounds)));
            }
        }
        if let Some(region) = dirty {
            self.paint(&region);
        }
    }

    fn finish(&mut self, pacer: &mut dyn FnMut(Duration)) {
        if !self.activity && !self.finish_requested {
            return;
        }
        self.finish_requested = false;

        let Self {
            surface,
            fb,
            widgets,
            background,
            ..
        } = self;
        for bar in widgets.children_mut() {
            if !bar.is_visible() {
                continue;
            }
            if matches!(bar.kind(), GuiBarKind::Progress { .. }) {
                bar.set_state(true, ProgressUpdate::Value { current: 1, max: 1 });
            }
            let bounds = bar.bounds();
            let mut animation = bar.finish();
            while let Some(delay) = animation.next() {
                pacer(delay);
                fb.fill_rect(*background, &bounds);
                animation.bar().paint(&mut *fb, &bounds);
                surface.present(&*fb);
            }
        }
        self.paint_all();
    }

    fn warning(&mut self, warning: Option<&str>) {
        if let Some(warning) = warning {
            log::warn!("{warning}");
        }
    }

    fn message_box(&mut self, lines: &[&str], _color: Option<ColorPair>) {
        for line in lines {
            log::error!("{line}");
        }
    }

    fn set_menu(&mut self, menu: Option<&Menu>) {
        if let Some(menu) = menu {
            let summary: String = menu.summary_line(usize::MAX);
            log::debug!("splash menu: {summary}");
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::gui::canvas::tests::rgb;

    /// Keeps the last presented frame.
    struct Recorder {
        last: Option<FrameBuffer>,
        presented: usize,
    }

    impl Surface for Recorder {
        fn resolution(&self) -> (u32, u32) {
            (640, 480)
        }

        fn present(&mut self, fb: &FrameBuffer) {
            self.last = Some(fb.clone());
            self.presented += 1;
        }
    }

    fn screen() -> GfxBootScreen<Recorder> {
        GfxBootScreen::new(Recorder {
            last: None,
            presented: 0,
        })
    }

    #[test]
    fn test_bars_centred_and_hidden() {
        let screen = screen();
        let [activity, progress] = screen.bars() else {
            panic!("expected two bars");
        };
        assert_eq!(activity.bounds(), Rect::new(220, 320, 200, 28));
        assert_eq!(progress.bounds(), Rect::new(220, 356, 200, 28));
        assert!(!activity.bounds().overlaps(&progress.bounds()));
        assert!(screen.bars().iter().all(|bar| !bar.is_visible()));
    }

    #[test]
    fn test_both_bars_visible() {
        let mut screen = screen();
        screen.set_property("activity", Some("1"));
        for _ in 0..40 {
            screen.set_progress(ProgressUpdate::Advance);
        }
        screen.set_progress(ProgressUpdate::Value { current: 1, max: 2 });
        assert!(screen.bars().iter().all(GuiBar::is_visible));

        let fb = screen.frame();
        // the activity highlight covers track pixels 10..41
        assert_eq!(rgb(fb, 221 + 20, 330), (200, 200, 200));
        assert_eq!(rgb(fb, 221 + 5, 330), (128, 128, 128));
        assert_eq!(rgb(fb, 221 + 60, 330), (128, 128, 128));
        // the progress bar is half full
        assert_eq!(rgb(fb, 221 + 50, 370), (200, 200, 200));
        assert_eq!(rgb(fb, 221 + 150, 370), (128, 128, 128));
        // the gap between them stays background
        assert_eq!(rgb(fb, 300, 350), (0, 0, 0));
    }

    #[test]
    fn test_progress_needs_activity() {
        let mut screen = screen();
        screen.set_progress(ProgressUpdate::Advance);
        assert_eq!(screen.surface().presented, 0);

        screen.set_property("activity", Some("1"));
        screen.set_progress(ProgressUpdate::Value { current: 1, max: 2 });
        let shown = screen.surface().presented;
        assert!(shown >= 2);

        // track pixels 0..99 are lit, the rest is background
        let fb = screen.surface().last.as_ref().map(FrameBuffer::clone);
        let fb = fb.unwrap_or_else(|| FrameBuffer::new(1, 1));
        assert_eq!(rgb(&fb, 221 + 50, 370), (200, 200, 200));
        assert_eq!(rgb(&fb, 221 + 150, 370), (128, 128, 128));
        assert_eq!(rgb(&fb, 220, 370), (0, 0, 0));
    }

    #[test]
    fn test_child_properties() {
        let mut screen = screen();
        screen.set_property("progress:fg_color", Some("#ff0000"));
        screen.set_property("activity", Some("1"));
        screen.set_progress(ProgressUpdate::Value { current: 1, max: 1 });
        assert_eq!(rgb(screen.frame(), 300, 370), (255, 0, 0));

        screen.set_property("nobody:fg_color", Some("#00ff00"));
        screen.set_property("timeout_message", Some("Starting"));
        assert_eq!(screen.data().timeout_message.as_deref(), Some("Starting"));
    }

    #[test]
    fn test_finish_plays_activity() {
        let mut screen = screen();
        let mut delays = Vec::new();
        screen.finish(&mut |d| delays.push(d));
        assert!(delays.is_empty());

        screen.set_property("activity", Some("1"));
        for _ in 0..10 {
            screen.set_progress(ProgressUpdate::Advance);
        }
        screen.finish(&mut |d| delays.push(d));
        assert!(!delays.is_empty());

        let activity = &screen.bars()[0];
        assert_eq!(activity.highlight(), Some((0, 198)));
        assert_eq!(rgb(screen.frame(), 221, 330), (200, 200, 200));
        assert_eq!(rgb(screen.frame(), 418, 330), (200, 200, 200));
    }

    #[test]
    fn test_finish_on_request() {
        let mut screen = screen();
        screen.set_property("activity:activity_finish", None);
        let mut frames = 0;
        screen.finish(&mut |_| frames += 1);
        assert_eq!(frames, 0);

        screen.set_property("activity", Some("1"));
        screen.reset();
        screen.set_property("activity:activity_finish", None);
        screen.finish(&mut |_| frames += 1);
        assert_eq!(frames, 0);
        assert!(screen.bars().iter().all(|bar| !bar.is_visible()));
    }
}
