// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

#![no_main]

use bootcast_core::{
    layout::{LayoutMode, LayoutRequest, MenuMessages, compute_geometry},
    term::TermSize,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let [flags, w0, w1, h0, h1, l0, l1, rest @ ..] = data else {
        return;
    };
    let Ok(text) = core::str::from_utf8(rest) else {
        return;
    };

    // the remaining bytes are the messages, separated by NUL
    let mut parts = text.split('\0').map(|s| Some(s).filter(|s| !s.is_empty()));
    let mut next = || parts.next().flatten();
    let messages = MenuMessages {
        footer1: next(),
        footer2: next(),
        title: next(),
        top: next(),
        bottom: next(),
        warning: next(),
        footer: next(),
    };

    let request = LayoutRequest {
        mode: if flags & 1 == 0 {
            LayoutMode::Standard
        } else {
            LayoutMode::Bootcast
        },
        size: TermSize {
            width: u16::from_le_bytes([*w0, *w1]),
            height: u16::from_le_bytes([*h0, *h1]),
        },
        nested: flags & 2 != 0,
        edit_mode: flags & 4 != 0,
        messages,
        label_width: usize::from(u16::from_le_bytes([*l0, *l1])),
        ..LayoutRequest::default()
    };

    let layout = compute_geometry(&request);
    assert!(layout.geometry.border <= 1);
    assert_eq!(layout, compute_geometry(&request));
});
