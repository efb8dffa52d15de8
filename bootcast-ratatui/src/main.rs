// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The `bootcast` boot stage.
//!
//! This provides a [`main`] function that loads the configuration, shows the menu, reads the chosen image behind a
//! boot screen and starts it. Because UEFI applications may only return Status, errors that end the application are
//! logged and left on screen for a moment before control goes back to the firmware.

#![no_main]
#![no_std]

extern crate alloc;

use bootcast_core::{error::BootcastError, system::log_backend::UefiLogger};
use log::error;
use thiserror::Error;
use uefi::{
    boot::{self, start_image},
    prelude::*,
};

use crate::{
    app::App,
    ui::{buffer_terminal::BufferTerminal, console::UefiConsole},
};

mod app;
mod ui;

/// How long a fatal error stays on screen, in microseconds.
const FATAL_DELAY: usize = 5_000_000;

/// The global logging instance.
static LOGGER: UefiLogger = UefiLogger::new();

/// An error that may occur when running the application.
#[derive(Error, Debug)]
pub enum MainError {
    /// An error occurred in the boot stage library.
    #[error("Bootcast Error: {0}")]
    BootcastError(#[from] BootcastError),

    /// An error occurred while running the App.
    #[error("App Error: {0}")]
    AppError(#[from] crate::app::AppError),
}

/// The actual main function of the program.
///
/// # Errors
///
/// May return an `Error` if the terminal backend could not be initialized, or a failure occurs while the `App` is
/// initialized or ran.
fn main_func() -> Result<Option<Handle>, MainError> {
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Warn)); // if the logger was already set, then ignore it

    let console = UefiConsole::new()?;
    let mut terminal = BufferTerminal::new(console)?;
    let mut app = App::new()?;

    app.run(&mut terminal)
}

/// The main function of the program.
#[entry]
fn main() -> Status {
    match main_func() {
        Ok(Some(image)) => start_image(image).status(),
        Ok(None) => Status::SUCCESS,
        Err(e) => {
            error!("{e}");
            boot::stall(FATAL_DELAY);
            Status::ABORTED
        }
    }
}
