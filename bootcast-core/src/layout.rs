// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The menu geometry layout engine.
//!
//! Given the size of the terminal and the messages that have to fit around the menu, [`compute_geometry`] decides
//! where the entries go, how many of them are visible at once, and where the countdown is printed. There are two
//! policies:
//!
//! - [`LayoutMode::Standard`], a bordered GRUB style menu with a version banner and a help footer. When the
//!   terminal is too small it gives up decorations in a fixed order (see [`RelaxStep`]).
//! - [`LayoutMode::Bootcast`], a borderless vendor menu with a centred title, optional top and bottom messages, a
//!   warning line and a one line footer. The entry block is narrowed to the widest label and centred.
//!
//! The result is recomputed from scratch on every full redraw, so nothing from a previous, smaller terminal leaks
//! into the next layout.

use tinyvec::ArrayVec;

use crate::{env::Environment, term::TermSize};

mod bootcast;
mod standard;

pub use standard::{EDIT_HELP, FOOTER1_DEFAULT, FOOTER2_DEFAULT, FOOTER2_NESTED_DEFAULT};

/// Which layout policy to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// The bordered GRUB style menu.
    #[default]
    Standard,

    /// The borderless vendor menu.
    Bootcast,
}

impl LayoutMode {
    /// Picks the layout the environment asks for.
    #[must_use = "Has no effect if the result is unused"]
    pub fn from_env(env: &Environment) -> Self {
        if env.is_bootcast() {
            Self::Bootcast
        } else {
            Self::Standard
        }
    }
}

/// The limits below which the standard layout starts giving up decorations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutThresholds {
    /// Fewest visible entries that must remain once the footer is accounted for.
    pub min_entries: i32,

    /// Narrowest entry column.
    pub min_entry_width: i32,

    /// Fewest visible entries that must remain for the footer to be shown at all.
    pub min_entries_with_footer: i32,
}

impl LayoutThresholds {
    /// The stock thresholds.
    pub const DEFAULT: Self = Self {
        min_entries: 3,
        min_entry_width: 10,
        min_entries_with_footer: 2,
    };
}

impl Default for LayoutThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One decoration the standard layout gave up to make room, in the order they are given up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelaxStep {
    /// The blank lines above the banner and the outer margins were dropped.
    #[default]
    CompactMargins,

    /// The border around the entries was removed.
    RemoveBorder,

    /// The countdown was shortened from two rows to one.
    ShortenTimeout,

    /// The version banner was hidden.
    HideBanner,
}

/// Where the entries are and how many fit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenGeometry {
    /// 1 if a border is drawn around the entries, 0 otherwise.
    pub border: u16,

    /// The column where entries begin.
    pub first_entry_x: u16,

    /// The number of columns an entry may use.
    pub entry_width: u16,

    /// The row of the first visible entry.
    pub first_entry_y: u16,

    /// The number of entries visible at once.
    pub num_entries: u16,

    /// The number of rows the countdown may use.
    pub timeout_lines: u16,

    /// The row of the countdown.
    pub timeout_y: u16,

    /// The number of columns right of the entry column.
    pub right_margin: u16,
}

impl ScreenGeometry {
    /// Returns the column the cursor is parked at while the menu waits, just after the entry column.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn cursor_x(&self) -> u16 {
        self.first_entry_x.saturating_add(self.entry_width)
    }

    /// Returns the column of the scroll arrows.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn arrow_x(&self) -> u16 {
        self.cursor_x()
            .saturating_add(self.border)
            .saturating_add(1)
    }
}

/// A block of rows holding a message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// The first row.
    pub y: u16,

    /// The number of rows.
    pub lines: u16,
}

/// The rows of everything around the entries. Missing messages have no region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Regions {
    /// The version banner (standard) or the menu title (bootcast).
    pub banner: Option<Region>,

    /// The custom message above the entries.
    pub top_message: Option<Region>,

    /// The key help below the entries.
    pub help: Option<Region>,

    /// The custom message below the entries.
    pub bottom_message: Option<Region>,

    /// The warning line.
    pub warning: Option<Region>,

    /// The footer line.
    pub footer: Option<Region>,
}

/// The result of a layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuLayout {
    /// Which policy produced the layout.
    pub mode: LayoutMode,

    /// The entry geometry.
    pub geometry: ScreenGeometry,

    /// The message regions.
    pub regions: Regions,

    /// The decorations the layout gave up, in order.
    pub relaxations: ArrayVec<[RelaxStep; 4]>,
}

/// The messages that may appear around the menu.
///
/// Each field is [`None`] when the corresponding environment variable is unset or empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuMessages<'a> {
    /// `menu_footer1_gfx`, replacing the arrow key hint of the standard menu.
    pub footer1: Option<&'a str>,

    /// `menu_footer2`, replacing the boot hint of a nested standard menu.
    pub footer2: Option<&'a str>,

    /// `menu_title`.
    pub title: Option<&'a str>,

    /// `menu_msg_custom_top`.
    pub top: Option<&'a str>,

    /// `menu_msg_custom_bottom`.
    pub bottom: Option<&'a str>,

    /// `menu_warning`.
    pub warning: Option<&'a str>,

    /// `menu_footer`.
    pub footer: Option<&'a str>,
}

impl<'a> MenuMessages<'a> {
    /// Reads the messages from the environment.
    #[must_use = "Has no effect if the result is unused"]
    pub fn from_env(env: &'a Environment) -> Self {
        Self {
            footer1: env.get("menu_footer1_gfx"),
            footer2: env.get("menu_footer2"),
            title: env.get("menu_title"),
            top: env.get("menu_msg_custom_top"),
            bottom: env.get("menu_msg_custom_bottom"),
            warning: env.get("menu_warning"),
            footer: env.get("menu_footer"),
        }
    }

    /// Returns the paragraphs of the standard help footer, in print order.
    #[must_use = "Has no effect if the result is unused"]
    pub fn help(&self, nested: bool, edit_mode: bool) -> ArrayVec<[&'a str; 2]> {
        let mut help = ArrayVec::new();
        if edit_mode {
            help.push(EDIT_HELP);
        } else {
            help.push(self.footer1.unwrap_or(FOOTER1_DEFAULT));
            help.push(if nested {
                self.footer2.unwrap_or(FOOTER2_NESTED_DEFAULT)
            } else {
                FOOTER2_DEFAULT
            });
        }
        help
    }
}

/// Everything the layout depends on.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutRequest<'a> {
    /// The policy.
    pub mode: LayoutMode,

    /// The size of the terminal.
    pub size: TermSize,

    /// The menu was opened from another menu.
    pub nested: bool,

    /// An entry is being edited.
    pub edit_mode: bool,

    /// The messages around the menu.
    pub messages: MenuMessages<'a>,

    /// The display width of the widest entry label, including its hotkey prefix.
    pub label_width: usize,

    /// The relaxation limits of the standard policy.
    pub thresholds: LayoutThresholds,
}

/// Computes the layout of a menu.
///
/// This never fails. Terminals too small for anything useful get a layout with no visible entries rather than an
/// error, and every coordinate is clamped to the terminal.
#[must_use = "Has no effect if the result is unused"]
pub fn compute_geometry(request: &LayoutRequest<'_>) -> MenuLayout {
    let layout = match request.mode {
        LayoutMode::Standard => standard::layout(request),
        LayoutMode::Bootcast => bootcast::layout(request),
    };
    log::debug!(
        "{:?} layout for {}x{}: {:?}",
        request.mode,
        request.size.width,
        request.size.height,
        layout.geometry
    );
    layout
}

/// Converts an intermediate layout value into a cell coordinate, clamping at the edges of `u16`.
fn cell(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

/// Converts a line count into the signed arithmetic the layout is done in.
fn signed(lines: usize) -> i32 {
    i32::try_from(lines).unwrap_or(i32::MAX)
}

/// Clamps the number of visible entries so they end inside the terminal.
fn clamp_entries(num_entries: i32, first_entry_y: i32, border: i32, height: i32) -> i32 {
    num_entries.clamp(0, (height - first_entry_y - border).max(0))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn request(mode: LayoutMode, width: u16, height: u16) -> LayoutRequest<'static> {
        LayoutRequest {
            mode,
            size: TermSize { width, height },
            label_width: 18,
            ..LayoutRequest::default()
        }
    }

    #[test]
    fn test_thresholds_default() {
        let thresholds = LayoutThresholds::default();
        assert_eq!(thresholds.min_entries, 3);
        assert_eq!(thresholds.min_entry_width, 10);
        assert_eq!(thresholds.min_entries_with_footer, 2);
    }

    #[test]
    fn test_mode_from_env() {
        let mut env = Environment::new();
        assert_eq!(LayoutMode::from_env(&env), LayoutMode::Standard);
        env.set("miray_bootcast_menu", "1");
        assert_eq!(LayoutMode::from_env(&env), LayoutMode::Bootcast);
    }

    #[test]
    fn test_help_paragraphs() {
        let messages = MenuMessages {
            footer1: Some("one"),
            footer2: Some("two"),
            ..MenuMessages::default()
        };
        assert_eq!(messages.help(true, false).as_slice(), ["one", "two"]);
        assert_eq!(messages.help(false, false).as_slice(), ["one", FOOTER2_DEFAULT]);
        assert_eq!(messages.help(false, true).as_slice(), [EDIT_HELP]);
        assert_eq!(
            MenuMessages::default().help(true, false).as_slice(),
            [FOOTER1_DEFAULT, FOOTER2_NESTED_DEFAULT]
        );
    }

    #[test]
    fn test_tiny_terminals() {
        for mode in [LayoutMode::Standard, LayoutMode::Bootcast] {
            for (w, h) in [(0, 0), (1, 1), (3, 2), (80, 1), (1, 50)] {
                let layout = compute_geometry(&request(mode, w, h));
                let geo = layout.geometry;
                assert!(geo.entry_width >= 1);
                assert!(
                    u32::from(geo.first_entry_y) + u32::from(geo.num_entries) + u32::from(geo.border)
                        <= u32::from(h)
                        || geo.num_entries == 0
                );
            }
        }
    }

    proptest! {
        #[test]
        fn geometry_invariants(
            width in 20u16..300,
            height in 8u16..200,
            bootcast in any::<bool>(),
            nested in any::<bool>(),
            edit_mode in any::<bool>(),
            label_width in 0usize..120,
        ) {
            let mode = if bootcast { LayoutMode::Bootcast } else { LayoutMode::Standard };
            let request = LayoutRequest {
                nested,
                edit_mode,
                label_width,
                ..request(mode, width, height)
            };
            let geo = compute_geometry(&request).geometry;
            prop_assert!(geo.entry_width >= 1);
            prop_assert!(geo.first_entry_y + geo.num_entries + geo.border <= height);
            prop_assert!(geo.border <= 1);
            prop_assert_eq!(compute_geometry(&request), compute_geometry(&request));
        }

        #[test]
        fn doesnt_panic(
            width in any::<u16>(),
            height in any::<u16>(),
            bootcast in any::<bool>(),
            top in "\\PC{0,300}",
            label_width in any::<usize>(),
        ) {
            let mode = if bootcast { LayoutMode::Bootcast } else { LayoutMode::Standard };
            let request = LayoutRequest {
                messages: MenuMessages {
                    top: Some(top.as_str()),
                    bottom: Some(top.as_str()),
                    footer1: Some(top.as_str()),
                    ..MenuMessages::default()
                },
                label_width,
                ..request(mode, width, height)
            };
            let _ = compute_geometry(&request);
        }
    }
}
