// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The user interface of the boot stage.
//!
//! The menu and the text boot screen are drawn by the library through [`buffer_terminal::BufferTerminal`], which
//! keeps a ratatui cell buffer and flushes the cells that changed through [`console::UefiConsole`]. The
//! graphical boot screen bypasses all of this and draws with the Graphics Output Protocol.

pub mod buffer_terminal;
pub mod console;
pub mod palette;
