// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Colour pairs and the per session [`RenderContext`].
//!
//! Colours are written the GRUB way, as `foreground/background` pairs of colour names (for example
//! `light-gray/blue`). A pair that fails to parse never changes the colour that is already in effect.

use uefi::proto::console::text::Color;

use crate::env::Environment;

/// The colour names, in the order of their attribute values.
const COLOR_NAMES: [(&str, Color); 16] = [
    ("black", Color::Black),
    ("blue", Color::Blue),
    ("green", Color::Green),
    ("cyan", Color::Cyan),
    ("red", Color::Red),
    ("magenta", Color::Magenta),
    ("brown", Color::Brown),
    ("light-gray", Color::LightGray),
    ("dark-gray", Color::DarkGray),
    ("light-blue", Color::LightBlue),
    ("light-green", Color::LightGreen),
    ("light-cyan", Color::LightCyan),
    ("light-red", Color::LightRed),
    ("light-magenta", Color::LightMagenta),
    ("yellow", Color::Yellow),
    ("white", Color::White),
];

/// Background colours must be one of the eight dark colours on UEFI text consoles.
const MAX_BACKGROUND: u8 = 8;

/// A foreground and background colour.
#[derive(Clone, Copy, Debug)]
pub struct ColorPair {
    /// The foreground colour.
    pub fg: Color,

    /// The background colour.
    pub bg: Color,
}

impl ColorPair {
    /// Creates a new [`ColorPair`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// Returns the pair packed into a VGA style attribute byte.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn attribute(self) -> u8 {
        (self.fg as u8) | ((self.bg as u8) << 4)
    }

    /// Parses a `foreground/background` pair of colour names.
    ///
    /// Returns [`None`] if either name is unknown, the separator is missing, or the background is not one of the
    /// eight colours a UEFI console can use as a background.
    #[must_use = "Has no effect if the result is unused"]
    pub fn parse(pair: &str) -> Option<Self> {
        let (fg, bg) = pair.trim().split_once('/')?;
        let fg = match_color_name(fg)?;
        let bg = match_color_name(bg)?;
        ((bg as u8) < MAX_BACKGROUND).then_some(Self { fg, bg })
    }

    /// Parses a pair, falling back to `previous` when the value is missing or invalid.
    #[must_use = "Has no effect if the result is unused"]
    pub fn parse_or(pair: Option<&str>, previous: Self) -> Self {
        pair.and_then(Self::parse).unwrap_or(previous)
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new(Color::LightGray, Color::Black)
    }
}

impl PartialEq for ColorPair {
    fn eq(&self, other: &Self) -> bool {
        self.attribute() == other.attribute()
    }
}

impl Eq for ColorPair {}

/// The colours used while drawing a menu or a boot screen.
///
/// One of these is created for every session and passed down to whatever draws, so there is no global colour
/// state to go stale between a menu and the boot screen that follows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderContext {
    /// Plain text.
    pub normal: ColorPair,

    /// Highlighted text outside of the menu.
    pub highlight: ColorPair,

    /// Menu entries that are not selected.
    pub menu_normal: ColorPair,

    /// The selected menu entry.
    pub menu_highlight: ColorPair,

    /// Warning lines.
    pub warning: ColorPair,
}

impl RenderContext {
    /// Creates the colours of the bootcast menu.
    ///
    /// The selected entry defaults to white on light blue and warnings are yellow on black. Both menu colours can
    /// be overridden with `menu_color_normal` and `menu_color_highlight`.
    #[must_use = "Has no effect if the result is unused"]
    pub fn bootcast(env: &Environment) -> Self {
        let base = Self::default();
        Self {
            menu_normal: ColorPair::parse_or(env.get("menu_color_normal"), base.normal),
            menu_highlight: ColorPair::parse_or(
                env.get("menu_color_highlight"),
                ColorPair::new(Color::White, Color::LightBlue),
            ),
            ..base
        }
    }

    /// Creates the colours of the standard menu.
    ///
    /// The menu uses the terminal colours unless `menu_color_normal` or `menu_color_highlight` say otherwise.
    #[must_use = "Has no effect if the result is unused"]
    pub fn standard(env: &Environment) -> Self {
        let base = Self::default();
        Self {
            menu_normal: ColorPair::parse_or(env.get("menu_color_normal"), base.normal),
            menu_highlight: ColorPair::parse_or(env.get("menu_color_highlight"), base.highlight),
            ..base
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        let normal = ColorPair::default();
        let highlight = ColorPair::new(Color::Black, Color::LightGray);
        Self {
            normal,
            highlight,
            menu_normal: normal,
            menu_highlight: highlight,
            warning: ColorPair::new(Color::Yellow, Color::Black),
        }
    }
}

/// Matches a GRUB colour name.
fn match_color_name(name: &str) -> Option<Color> {
    let name = name.trim();
    COLOR_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, color)| color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        let pair = ColorPair::parse("light-gray/blue").expect("valid pair");
        assert!(matches!(pair.fg, Color::LightGray));
        assert!(matches!(pair.bg, Color::Blue));

        let pair = ColorPair::parse(" White/Black ").expect("names are case insensitive");
        assert!(matches!(pair.fg, Color::White));
    }

    #[test]
    fn test_bad_pair_keeps_previous() {
        let previous = ColorPair::new(Color::Green, Color::Red);
        for bad in ["light-gray", "mauve/black", "white/yellow", "", "/"] {
            assert_eq!(ColorPair::parse_or(Some(bad), previous), previous);
        }
        assert_eq!(ColorPair::parse_or(None, previous), previous);
    }

    #[test]
    fn test_bootcast_colors() {
        let mut env = Environment::default();
        let ctx = RenderContext::bootcast(&env);
        assert!(matches!(ctx.menu_highlight.fg, Color::White));
        assert!(matches!(ctx.menu_highlight.bg, Color::LightBlue));
        assert!(matches!(ctx.warning.fg, Color::Yellow));

        env.set("menu_color_highlight", "black/cyan");
        env.set("menu_color_normal", "not/a-colour");
        let ctx = RenderContext::bootcast(&env);
        assert!(matches!(ctx.menu_highlight.bg, Color::Cyan));
        assert_eq!(ctx.menu_normal, ctx.normal);
    }
}
