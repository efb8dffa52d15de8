// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The boot screens shown while an image is being loaded.
//!
//! A boot screen shows the countdown text before anything is booted, and the progress or activity bars while the
//! chosen image is read. There is a character cell variant ([`TextBootScreen`]) and a pixel variant
//! ([`GfxBootScreen`]), both driven through the [`BootScreen`] trait.

use alloc::string::String;
use core::time::Duration;

use crate::{color::ColorPair, env::Environment, menu::Menu};

pub mod gfx;
pub mod text;

pub use gfx::GfxBootScreen;
pub use text::TextBootScreen;

/// The prefix of environment keys that are forwarded to the boot screen as properties.
pub const SCREEN_VAR_PREFIX: &str = "bootscreen_";

/// A piece of progress reported while loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// `current` of `max` units are done.
    Value {
        /// Units done.
        current: u64,

        /// Units in total.
        max: u64,
    },

    /// Something happened, but how much is left is unknown.
    Advance,
}

/// A screen that shows boot progress.
pub trait BootScreen {
    /// Forgets activity mode and hides the bars, as after returning from a failed boot.
    fn reset(&mut self);

    /// Blanks the screen.
    fn clear(&mut self);

    /// Blanks the screen and draws everything again.
    fn redraw(&mut self);

    /// Draws the text again, first blanking the text area if `clear` is set.
    fn redraw_text(&mut self, clear: bool);

    /// Changes a named property. Unknown names are ignored.
    fn set_property(&mut self, name: &str, value: Option<&str>);

    /// Feeds progress into the bars.
    fn set_progress(&mut self, update: ProgressUpdate);

    /// Plays the animation that fills the bars, calling `pacer` with the delay before each frame.
    fn finish(&mut self, pacer: &mut dyn FnMut(Duration));

    /// Shows a warning, or removes it if `None`.
    fn warning(&mut self, warning: Option<&str>);

    /// Shows a boxed message in the given colour, or white on red.
    fn message_box(&mut self, lines: &[&str], color: Option<ColorPair>);

    /// Sets the menu whose hotkeys are listed while the splash is up.
    fn set_menu(&mut self, menu: Option<&Menu>);
}

/// Forwards every `bootscreen_*` environment key to a screen as a property without the prefix.
pub fn configure_from_env(screen: &mut dyn BootScreen, env: &Environment) {
    for (key, value) in env.iter() {
        if let Some(name) = key.strip_prefix(SCREEN_VAR_PREFIX) {
            screen.set_property(name, Some(value));
        }
    }
}

/// The texts and counters both screen variants share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenData {
    /// Shown instead of everything else while in activity mode.
    pub activity_descr: Option<String>,

    /// Shown while the countdown runs.
    pub timeout_message: Option<String>,

    /// The countdown, with `%d` standing for the seconds left.
    pub timeout_format: Option<String>,

    /// How to stop the countdown.
    pub timeout_stop: Option<String>,

    /// Shown when there is no countdown.
    pub default_message: Option<String>,

    /// The loading stage, starting at 0.
    pub stage: u32,

    /// The number of stages with their own bar.
    pub stage_max: u32,

    /// Seconds left on the countdown, if it runs.
    pub timeout: Option<u32>,
}

impl Default for ScreenData {
    fn default() -> Self {
        Self {
            activity_descr: None,
            timeout_message: None,
            timeout_format: None,
            timeout_stop: None,
            default_message: None,
            stage: 0,
            stage_max: 1,
            timeout: None,
        }
    }
}

impl ScreenData {
    /// Applies a property, returning false if the name is not one of the shared ones.
    ///
    /// Numbers that fail to parse leave the value as it was.
    pub fn apply(&mut self, name: &str, value: Option<&str>) -> bool {
        let text = value.map(String::from);
        match name {
            "activity_descr" => self.activity_descr = text,
            "timeout_message" => self.timeout_message = text,
            "timeout_format" => self.timeout_format = text,
            "timeout_stop" => self.timeout_stop = text,
            "default_message" => self.default_message = text,
            "stage" => self.stage = parse_or(value, self.stage),
            "stage_max" => self.stage_max = parse_or(value, self.stage_max),
            "timeout" => {
                self.timeout = match value {
                    Some(v) => v.trim().parse().ok(),
                    None => None,
                };
            }
            _ => return false,
        }
        true
    }

    /// Returns true if a countdown is running.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn counting_down(&self) -> bool {
        self.timeout.is_some()
    }
}

/// Parses a number, keeping `previous` when that fails.
fn parse_or(value: Option<&str>, previous: u32) -> u32 {
    match value.map(|v| v.trim().parse()) {
        Some(Ok(parsed)) => parsed,
        _ => {
            log::warn!("ignoring bad number {value:?}");
            previous
        }
    }
}
