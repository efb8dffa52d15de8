// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Panic handler that shows the panic on the console, then shuts down.
//!
//! This is enabled with the `panic_handler` feature.

#![cfg(feature = "panic_handler")]
use core::fmt::Write;

use uefi::{
    Status, boot,
    proto::console::text::Color,
    runtime::{self, ResetType},
    system,
};

/// How long the panic stays on screen when no key can be waited for.
const PANIC_DELAY: usize = 10_000_000;

/// The panic handler.
#[panic_handler]
fn panic_handler(info: &core::panic::PanicInfo) -> ! {
    system::with_stdout(|stdout| {
        let _ = stdout.set_color(Color::White, Color::Red);
        let _ = writeln!(stdout, "[PANIC]: {info}");
        let _ = stdout.set_color(Color::LightGray, Color::Black);
        let _ = writeln!(stdout, "Press a key to shut down");
    });
    system::with_stdin(|stdin| {
        if let Some(event) = stdin.wait_for_key_event() {
            let _ = boot::wait_for_event(&mut [event]);
        } else {
            system::with_stdout(|stdout| {
                let _ = writeln!(stdout, "No keyboard, shutting down in 10 seconds");
            });
            boot::stall(PANIC_DELAY);
        }
    });
    runtime::reset(ResetType::SHUTDOWN, Status::ABORTED, None);
}
