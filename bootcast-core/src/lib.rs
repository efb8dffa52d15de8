// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The `bootcast` library crate.
//!
//! This provides the menu layout engine, the menu viewer, the text and graphical progress bars and the boot
//! screens of a vendor boot stage. Everything that touches the screen goes through narrow interfaces
//! ([`term::TextTerminal`] for character cells and [`gui::canvas::Canvas`] for pixels), so the whole engine can
//! be driven by a UEFI frontend such as `bootcast-ratatui`, by the fuzzers, or by the unit tests on the host.
//!
//! ## MSRV
//!
//! The minimum supported rust version is 1.88.0.

#![cfg_attr(not(any(fuzzing, test, doctest)), no_std)]

/// The primary result type that wraps around [`crate::error::BootcastError`].
pub type BootcastResult<T> = Result<T, crate::error::BootcastError>;

pub mod bar;
pub mod color;
pub mod config;
pub mod env;
pub mod error;
pub mod gui;
pub mod layout;
pub mod menu;
pub mod screen;
pub mod system;
pub mod term;
pub mod text;
pub mod viewer;

extern crate alloc;
