// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = bootcast_core::config::Config::parse(data);
    let _ = config.menu.default_entry();
    let _ = config.menu.summary_line(80);
});
