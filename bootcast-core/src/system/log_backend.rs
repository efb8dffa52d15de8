// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Simple UEFI backend for the [`log`] crate.
//!
//! Records are written to the console as `[time level file:line] - message`. Warnings and errors are drawn in
//! colour so they stand out from whatever the boot screen left on the console.

use core::fmt::Write;

use log::{Level, Metadata, Record};
use uefi::{proto::console::text::Color, runtime, system::with_stdout};

/// A simple logging backend for UEFI.
#[derive(Default)]
pub struct UefiLogger;

impl UefiLogger {
    /// Constructs a new [`UefiLogger`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self
    }
}

/// Returns the console colour of a level, if it has one.
const fn level_color(level: Level) -> Option<Color> {
    match level {
        Level::Error => Some(Color::LightRed),
        Level::Warn => Some(Color::Yellow),
        _ => None,
    }
}

impl log::Log for UefiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let time = runtime::get_time().unwrap_or(runtime::Time::invalid());
            let level = record.level();
            let file = record.file().unwrap_or_default();
            let line = record.line().unwrap_or_default();
            let args = record.args();
            with_stdout(|stdout| {
                if let Some(color) = level_color(level) {
                    let _ = stdout.set_color(color, Color::Black);
                }
                let _ = stdout.write_fmt(format_args!("[{time} {level} {file}:{line}] - {args}\n"));
                if level_color(level).is_some() {
                    let _ = stdout.set_color(Color::LightGray, Color::Black);
                }
            });
        }
    }

    fn flush(&self) {}
}
