// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Display widths, word wrapping and message printing.
//!
//! The layout engine sizes regions by measuring messages before anything is drawn, and the same messages are
//! printed afterwards. Both go through [`wrap`], so a message measured at `n` rows is always printed on exactly
//! `n` rows.

use alloc::string::String;
use core::fmt::Write;

use unicode_width::UnicodeWidthChar;

use crate::term::{Coordinate, TextTerminal};

/// Stands in for a double width glyph on rows only one column wide.
pub const WIDE_PLACEHOLDER: &str = "?";

/// Left and right margins of a message, in columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    /// Columns left blank before the text.
    pub left: u16,

    /// Columns left blank after the text.
    pub right: u16,
}

impl Margins {
    /// No margins at all.
    pub const NONE: Self = Self::new(0, 0);

    /// The margins of footer and header messages.
    pub const STANDARD: Self = Self::new(6, 6);

    /// The margins of the countdown message.
    pub const TIMEOUT: Self = Self::new(3, 1);

    /// Creates new [`Margins`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(left: u16, right: u16) -> Self {
        Self { left, right }
    }
}

/// An iterator over the rows of a word wrapped message.
///
/// Paragraphs are separated by `\n`. Words are broken at spaces, and a word wider than a whole row is broken
/// wherever it has to be. Every row holds at least one character, so wrapping always finishes, and no row is
/// wider than the limit.
pub struct WrappedLines<'a> {
    /// The paragraphs not started yet.
    paragraphs: core::str::Lines<'a>,

    /// The unwrapped rest of the current paragraph, if one is in progress.
    rest: Option<&'a str>,

    /// The widest row allowed.
    max_width: usize,
}

impl<'a> Iterator for WrappedLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = match self.rest.take() {
            Some(rest) => rest,
            None => {
                let paragraph = self.paragraphs.next()?;
                if paragraph.is_empty() {
                    return Some(paragraph);
                }
                paragraph
            }
        };

        let (line, rest) = split_row(rest, self.max_width);
        if !rest.is_empty() {
            self.rest = Some(rest);
        }
        Some(line)
    }
}

/// Returns the display width of one character.
///
/// Wide glyphs count two columns, combining marks and control characters count zero.
#[must_use = "Has no effect if the result is unused"]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Returns the display width of a string.
#[must_use = "Has no effect if the result is unused"]
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Returns the widest row a message may use on a terminal of a given width.
///
/// The last column is never used, so that a message on the last row cannot scroll the screen.
#[must_use = "Has no effect if the result is unused"]
pub fn line_width(term_width: u16, margins: Margins) -> usize {
    usize::from(
        term_width
            .saturating_sub(margins.left)
            .saturating_sub(margins.right)
            .saturating_sub(1),
    )
    .max(1)
}

/// Word wraps a message to rows no wider than `max_width` columns.
#[must_use = "Has no effect if the result is unused"]
pub fn wrap(text: &str, max_width: usize) -> WrappedLines<'_> {
    WrappedLines {
        paragraphs: text.lines(),
        rest: None,
        max_width: max_width.max(1),
    }
}

/// Counts the rows a message needs between the given margins, without drawing anything.
///
/// An empty message needs no rows.
#[must_use = "Has no effect if the result is unused"]
pub fn count_lines(text: &str, margins: Margins, term_width: u16) -> usize {
    wrap(text, line_width(term_width, margins)).count()
}

/// Prints a word wrapped message starting on row `y`, and returns the number of rows printed.
///
/// Every printed row is cleared from the first column up to the last usable column, so a shorter message
/// replaces a longer one cleanly. At most `max_lines` rows are printed, and nothing is printed below the bottom of
/// the terminal.
pub fn print_message(
    term: &mut dyn TextTerminal,
    text: &str,
    y: u16,
    margins: Margins,
    max_lines: Option<usize>,
) -> usize {
    let size = term.size();
    let last_column = usize::from(size.width.saturating_sub(1));
    let rows = wrap(text, line_width(size.width, margins)).take(max_lines.unwrap_or(usize::MAX));

    let mut printed = 0;
    for (row, line) in (y..size.height).zip(rows) {
        term.goto(Coordinate::new(0, row));
        term.put_repeated(' ', usize::from(margins.left));
        term.put_str(line);
        let used = usize::from(margins.left) + str_width(line);
        term.put_repeated(' ', last_column.saturating_sub(used));
        printed += 1;
    }
    printed
}

/// Returns the left margin that centres a single row message.
#[must_use = "Has no effect if the result is unused"]
pub fn center_margin(text: &str, term_width: u16) -> u16 {
    let width = str_width(text);
    let term_width = usize::from(term_width);
    if width < term_width {
        u16::try_from((term_width - 1 - width) / 2).unwrap_or(0)
    } else {
        0
    }
}

/// Expands a countdown format, replacing the first `%d` with `value` and `%%` with `%`.
#[must_use = "Has no effect if the result is unused"]
pub fn expand_count(format: &str, value: u32) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    let mut chars = format.chars().peekable();
    let mut expanded = false;
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('d') if !expanded => {
                chars.next();
                let _ = write!(out, "{value}");
                expanded = true;
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }
    out
}

/// Splits the first row off a paragraph.
///
/// A glyph wider than the whole row is replaced by [`WIDE_PLACEHOLDER`].
fn split_row(text: &str, max_width: usize) -> (&str, &str) {
    let mut width = 0;
    let mut last_space = None;
    for (i, ch) in text.char_indices() {
        let w = char_width(ch);
        if width + w > max_width {
            if ch == ' ' {
                return (&text[..i], text[i..].trim_start_matches(' '));
            }
            if let Some(space) = last_space {
                return (&text[..space], text[space..].trim_start_matches(' '));
            }
            if i == 0 {
                return (WIDE_PLACEHOLDER, &text[ch.len_utf8()..]);
            }
            return (&text[..i], &text[i..]);
        }
        if ch == ' ' && i > 0 {
            last_space = Some(i);
        }
        width += w;
    }
    (text, "")
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::*;
    use crate::term::grid::GridTerminal;

    #[test]
    fn test_widths() {
        assert_eq!(str_width("abc"), 3);
        assert_eq!(str_width("\u{4e2d}\u{6587}"), 4);
        assert_eq!(str_width("e\u{301}"), 1);
        assert_eq!(str_width(""), 0);
    }

    #[test]
    fn test_wrap_words() {
        let lines: Vec<_> = wrap("the quick brown fox", 10).collect();
        assert_eq!(lines, ["the quick", "brown fox"]);

        let lines: Vec<_> = wrap("first\n\nthird", 10).collect();
        assert_eq!(lines, ["first", "", "third"]);
    }

    #[test]
    fn test_wrap_hard_break() {
        let lines: Vec<_> = wrap("abcdefghij klm", 4).collect();
        assert_eq!(lines, ["abcd", "efgh", "ij", "klm"]);

        let lines: Vec<_> = wrap("\u{4e2d}\u{6587}", 2).collect();
        assert_eq!(lines, ["\u{4e2d}", "\u{6587}"]);
    }

    #[test]
    fn test_wide_glyph_on_narrow_row() {
        let lines: Vec<_> = wrap("\u{4e2d}a\u{6587}", 1).collect();
        assert_eq!(lines, [WIDE_PLACEHOLDER, "a", WIDE_PLACEHOLDER]);
        assert!(lines.iter().all(|line| str_width(line) <= 1));

        let mut term = GridTerminal::new(14, 2);
        let printed = print_message(&mut term, "\u{4e2d}", 0, Margins::STANDARD, None);
        assert_eq!(printed, 1);
        assert_eq!(term.row(0).trim_end(), "      ?");
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines("", Margins::STANDARD, 80), 0);
        assert_eq!(count_lines("short", Margins::STANDARD, 80), 1);
        let footer = "Press enter to boot the selected OS, `e' to edit the commands before booting or `c' for a command-line.";
        assert_eq!(count_lines(footer, Margins::STANDARD, 80), 2);
    }

    #[test]
    fn test_print_matches_count() {
        let mut term = GridTerminal::new(30, 10);
        let text = "a message long enough to wrap over several rows of the grid";
        let counted = count_lines(text, Margins::STANDARD, 30);
        let printed = print_message(&mut term, text, 2, Margins::STANDARD, None);
        assert_eq!(counted, printed);
        assert!(term.row(2).starts_with("      a "));
        assert_eq!(term.row(2 + u16::try_from(printed).unwrap_or(0)).trim(), "");
    }

    #[test]
    fn test_print_clipped_at_bottom() {
        let mut term = GridTerminal::new(12, 3);
        let printed = print_message(&mut term, "one two three four five", 1, Margins::NONE, None);
        assert_eq!(printed, 2);
    }

    #[test]
    fn test_center_margin() {
        assert_eq!(center_margin("abcd", 10), 2);
        assert_eq!(center_margin("abcdefghi", 10), 0);
        assert_eq!(center_margin("abcdefghijkl", 10), 0);
    }

    #[test]
    fn test_expand_count() {
        assert_eq!(expand_count("%ds", 5), "5s");
        assert_eq!(expand_count("in %d seconds (100%%)", 12), "in 12 seconds (100%)");
        assert_eq!(expand_count("no number", 3), "no number");
        assert_eq!(expand_count("%d and %d", 1), "1 and %d");
    }

    proptest! {
        #[test]
        fn wrap_is_deterministic(text in "\\PC{0,200}", width in 1usize..100) {
            let first: Vec<_> = wrap(&text, width).collect();
            let second: Vec<_> = wrap(&text, width).collect();
            prop_assert_eq!(&first, &second);
            for line in first {
                prop_assert!(str_width(line) <= width);
            }
        }
    }
}
