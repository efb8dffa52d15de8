// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Waiting between animation frames.
//!
//! The bars never sleep on their own. Their finish animations yield the delay before each frame, and the
//! frontend passes [`stall`] (or anything else that waits) as the pacer.

use core::time::Duration;

use uefi::boot;

/// Converts a [`Duration`] into whole microseconds for [`boot::stall`], saturating on overflow.
#[must_use = "Has no effect if the result is unused"]
pub fn to_micros(delay: Duration) -> usize {
    usize::try_from(delay.as_micros()).unwrap_or(usize::MAX)
}

/// Busy waits for a [`Duration`] using the boot services.
pub fn stall(delay: Duration) {
    boot::stall(to_micros(delay));
}
