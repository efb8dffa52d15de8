// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Maps console [`ColorPair`]s into ratatui [`Style`]s and back.
//!
//! A pair turned into a style by [`style_of`] comes back unchanged from [`pair_of`], as long as its background is
//! one of the eight colours a console background can take.

use bootcast_core::color::ColorPair;
use ratatui_core::style::{Color as RatatuiColor, Style};
use uefi::proto::console::text::Color as UefiColor;

/// Returns the [`Style`] of cells drawn with a [`ColorPair`].
#[must_use = "Has no effect if the result is unused"]
pub const fn style_of(pair: ColorPair) -> Style {
    Style::new()
        .fg(uefi_to_ansi_color_fg(pair.fg))
        .bg(uefi_to_ansi_color_bg(pair.bg))
}

/// Returns the [`ColorPair`] a cell drawn in `fg` on `bg` is written with.
///
/// Colours with no console counterpart fall back to the parts of [`ColorPair::default`].
#[must_use = "Has no effect if the result is unused"]
pub fn pair_of(fg: RatatuiColor, bg: RatatuiColor) -> ColorPair {
    let default = ColorPair::default();
    ColorPair::new(
        ansi_to_uefi_color_fg(fg).unwrap_or(default.fg),
        ansi_to_uefi_color_bg(bg).unwrap_or(default.bg),
    )
}

/// Convert ANSI colors [`RatatuiColor`] to UEFI foreground colors [`UefiColor`].
///
/// ANSI yellow is the dim variant, which the console calls [`UefiColor::Brown`].
const fn ansi_to_uefi_color_fg(color: RatatuiColor) -> Option<UefiColor> {
    let color = match color {
        RatatuiColor::Black => UefiColor::Black,
        RatatuiColor::Red => UefiColor::Red,
        RatatuiColor::Green => UefiColor::Green,
        RatatuiColor::Yellow => UefiColor::Brown,
        RatatuiColor::LightYellow => UefiColor::Yellow,
        RatatuiColor::Blue => UefiColor::Blue,
        RatatuiColor::Magenta => UefiColor::Magenta,
        RatatuiColor::Cyan => UefiColor::Cyan,
        RatatuiColor::Gray => UefiColor::LightGray,
        RatatuiColor::DarkGray => UefiColor::DarkGray,
        RatatuiColor::LightRed => UefiColor::LightRed,
        RatatuiColor::LightGreen => UefiColor::LightGreen,
        RatatuiColor::LightBlue => UefiColor::LightBlue,
        RatatuiColor::LightMagenta => UefiColor::LightMagenta,
        RatatuiColor::LightCyan => UefiColor::LightCyan,
        RatatuiColor::White => UefiColor::White,
        _ => return None,
    };
    Some(color)
}

/// Convert ANSI colors [`RatatuiColor`] to UEFI background colors [`UefiColor`].
const fn ansi_to_uefi_color_bg(color: RatatuiColor) -> Option<UefiColor> {
    let color = match color {
        RatatuiColor::Black => UefiColor::Black,
        RatatuiColor::Blue => UefiColor::Blue,
        RatatuiColor::Green => UefiColor::Green,
        RatatuiColor::Cyan => UefiColor::Cyan,
        RatatuiColor::Red => UefiColor::Red,
        RatatuiColor::Magenta => UefiColor::Magenta,
        RatatuiColor::Yellow => UefiColor::Brown,
        RatatuiColor::Gray => UefiColor::LightGray,
        _ => return None,
    };
    Some(color)
}

/// Convert UEFI foreground colors [`UefiColor`] to ANSI colors [`RatatuiColor`].
const fn uefi_to_ansi_color_fg(color: UefiColor) -> RatatuiColor {
    match color {
        UefiColor::Black => RatatuiColor::Black,
        UefiColor::Blue => RatatuiColor::Blue,
        UefiColor::Green => RatatuiColor::Green,
        UefiColor::Cyan => RatatuiColor::Cyan,
        UefiColor::Red => RatatuiColor::Red,
        UefiColor::Magenta => RatatuiColor::Magenta,
        UefiColor::Brown => RatatuiColor::Yellow,
        UefiColor::LightGray => RatatuiColor::Gray,
        UefiColor::DarkGray => RatatuiColor::DarkGray,
        UefiColor::LightBlue => RatatuiColor::LightBlue,
        UefiColor::LightGreen => RatatuiColor::LightGreen,
        UefiColor::LightCyan => RatatuiColor::LightCyan,
        UefiColor::LightRed => RatatuiColor::LightRed,
        UefiColor::LightMagenta => RatatuiColor::LightMagenta,
        UefiColor::Yellow => RatatuiColor::LightYellow,
        UefiColor::White => RatatuiColor::White,
    }
}

/// Convert UEFI background colors [`UefiColor`] to ANSI colors [`RatatuiColor`].
///
/// Only the first 8 colors may be used for bg, so the bright colors are mapped to their dark variants.
const fn uefi_to_ansi_color_bg(color: UefiColor) -> RatatuiColor {
    match color {
        UefiColor::Black | UefiColor::DarkGray => RatatuiColor::Black,
        UefiColor::Blue | UefiColor::LightBlue => RatatuiColor::Blue,
        UefiColor::Green | UefiColor::LightGreen => RatatuiColor::Green,
        UefiColor::Cyan | UefiColor::LightCyan => RatatuiColor::Cyan,
        UefiColor::Red | UefiColor::LightRed => RatatuiColor::Red,
        UefiColor::Magenta | UefiColor::LightMagenta => RatatuiColor::Magenta,
        UefiColor::Brown | UefiColor::Yellow => RatatuiColor::Yellow,
        UefiColor::LightGray | UefiColor::White => RatatuiColor::Gray,
    }
}
