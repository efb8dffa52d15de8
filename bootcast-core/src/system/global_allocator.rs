// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Uses the UEFI pool allocator as the global allocator.
//!
//! This is enabled with the `global_allocator` feature, so that frontends with their own allocator (and the host
//! side tests and fuzzers) can leave it off.

#![cfg(feature = "global_allocator")]
use uefi::allocator::Allocator;

/// The UEFI global allocator.
#[global_allocator]
static ALLOCATOR: Allocator = Allocator;
