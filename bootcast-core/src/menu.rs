// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Provides [`Menu`] and [`MenuEntry`], the list of things the user can pick from.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use thiserror::Error;
use uefi::CString16;

use crate::{
    BootcastResult,
    system::helper::{normalize_path, str_to_cstr},
    text::{char_width, str_width},
};

/// The separator between entry labels on the one line menu summary.
const SUMMARY_SEPARATOR: &str = "   ";

/// An `Error` that may result from turning a [`MenuEntry`] into something bootable.
#[derive(Error, Debug)]
pub enum EntryError {
    /// The entry has no image to load.
    #[error("Entry \"{0}\" has no image path")]
    MissingPath(String),
}

/// A single selectable entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuEntry {
    /// The title shown to the user.
    pub title: String,

    /// A key that selects the entry directly.
    pub hotkey: Option<char>,

    /// The path of the EFI image booted by the entry, on the same filesystem as the boot stage.
    pub path: Option<String>,
}

impl MenuEntry {
    /// Creates a new [`MenuEntry`] without a hotkey or image.
    #[must_use = "Has no effect if the result is unused"]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            hotkey: None,
            path: None,
        }
    }

    /// Returns the path to the image of this entry as a UEFI path.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the entry has no path, or the path cannot be expressed in UCS-2.
    pub fn image_path(&self) -> BootcastResult<CString16> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| EntryError::MissingPath(self.title.clone()))?;
        Ok(str_to_cstr(&normalize_path(path))?)
    }

    /// Returns the text drawn for this entry.
    ///
    /// With `hotkey_prefix` set the label is `<k> title`, or the title indented by the same four columns if the
    /// entry has no hotkey. Control characters that would move the cursor are replaced by spaces, in the title and
    /// in the hotkey.
    #[must_use = "Has no effect if the result is unused"]
    pub fn label(&self, hotkey_prefix: bool) -> String {
        let mut label = String::with_capacity(self.title.len() + 4);
        if hotkey_prefix {
            match self.hotkey {
                Some(key) => {
                    label.push('<');
                    label.push(sanitize_char(key));
                    label.push_str("> ");
                }
                None => label.push_str("    "),
            }
        }
        label.extend(self.title.chars().map(sanitize_char));
        label
    }
}

/// A movement of the selection, as bound to the navigation keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// One entry up.
    Previous,

    /// One entry down.
    Next,

    /// A window of this many entries up.
    PageUp(usize),

    /// A window of this many entries down.
    PageDown(usize),

    /// The first entry.
    First,

    /// The last entry.
    Last,
}

/// An ordered list of [`MenuEntry`]s with a default choice and an optional countdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    /// The entries, in display order.
    pub entries: Vec<MenuEntry>,

    /// The entry picked when the countdown expires.
    pub default: usize,

    /// Seconds until the default entry is booted. [`None`] waits forever.
    pub timeout: Option<u32>,
}

impl Menu {
    /// Returns the index of the default entry, clamped to the menu.
    #[must_use = "Has no effect if the result is unused"]
    pub fn default_entry(&self) -> usize {
        self.default.min(self.entries.len().saturating_sub(1))
    }

    /// Returns the entry whose hotkey matches a pressed key, ignoring case.
    #[must_use = "Has no effect if the result is unused"]
    pub fn find_hotkey(&self, key: char) -> Option<usize> {
        self.entries.iter().position(|entry| {
            entry
                .hotkey
                .is_some_and(|hotkey| hotkey.to_lowercase().eq(key.to_lowercase()))
        })
    }

    /// Returns true if the menu has no entries.
    #[must_use = "Has no effect if the result is unused"]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use = "Has no effect if the result is unused"]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the display width of the widest label.
    #[must_use = "Has no effect if the result is unused"]
    pub fn max_label_width(&self, hotkey_prefix: bool) -> usize {
        self.entries
            .iter()
            .map(|entry| str_width(&entry.label(hotkey_prefix)))
            .max()
            .unwrap_or(0)
    }

    /// Moves a selection, stopping at either end of the menu.
    ///
    /// A page step of zero moves by one entry.
    #[must_use = "Has no effect if the result is unused"]
    pub fn step(&self, selected: usize, step: Step) -> usize {
        let last = self.entries.len().saturating_sub(1);
        let selected = match step {
            Step::Previous => selected.saturating_sub(1),
            Step::Next => selected.saturating_add(1),
            Step::PageUp(page) => selected.saturating_sub(page.max(1)),
            Step::PageDown(page) => selected.saturating_add(page.max(1)),
            Step::First => 0,
            Step::Last => last,
        };
        selected.min(last)
    }

    /// Returns every label on one line, cut to `max_width` columns.
    ///
    /// This is what the text boot screen shows on its last row, so users can see the hotkeys while the splash is
    /// up.
    #[must_use = "Has no effect if the result is unused"]
    pub fn summary_line(&self, max_width: usize) -> String {
        let mut line = String::new();
        let mut width = 0;
        let labels = self.entries.iter().map(|entry| entry.label(true));
        for (i, label) in labels.enumerate() {
            let label = label.trim_start();
            let sep = if i == 0 { "" } else { SUMMARY_SEPARATOR };
            for ch in sep.chars().chain(label.chars()) {
                let w = char_width(ch);
                if width + w > max_width {
                    return line;
                }
                width += w;
                line.push(ch);
            }
        }
        line
    }
}

/// Replaces characters that would move the cursor with a space.
fn sanitize_char(ch: char) -> char {
    match ch {
        '\n' | '\u{8}' | '\r' | '\u{1b}' => ' ',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, hotkey: Option<char>) -> MenuEntry {
        MenuEntry {
            hotkey,
            ..MenuEntry::new(title)
        }
    }

    #[test]
    fn test_labels() {
        let install = entry("Install", Some('i'));
        let disk = entry("Boot\rfrom\ndisk\u{1b}", None);
        assert_eq!(install.label(true), "<i> Install");
        assert_eq!(install.label(false), "Install");
        assert_eq!(disk.label(true), "    Boot from disk ");

        let escape = entry("Setup", Some('\u{1b}'));
        assert_eq!(escape.label(true), "< > Setup");
        assert!(!escape.label(true).contains('\u{1b}'));
    }

    #[test]
    fn test_hotkeys() {
        let menu = Menu {
            entries: vec![entry("Install", Some('i')), entry("Rescue", Some('R'))],
            ..Menu::default()
        };
        assert_eq!(menu.find_hotkey('I'), Some(0));
        assert_eq!(menu.find_hotkey('r'), Some(1));
        assert_eq!(menu.find_hotkey('x'), None);
    }

    #[test]
    fn test_default_clamped() {
        let mut menu = Menu {
            entries: vec![entry("a", None), entry("b", None)],
            default: 9,
            timeout: None,
        };
        assert_eq!(menu.default_entry(), 1);
        menu.entries.clear();
        assert_eq!(menu.default_entry(), 0);
    }

    #[test]
    fn test_step() {
        let menu = Menu {
            entries: (0..10).map(|i| entry(&i.to_string(), None)).collect(),
            ..Menu::default()
        };
        assert_eq!(menu.step(0, Step::Previous), 0);
        assert_eq!(menu.step(3, Step::Next), 4);
        assert_eq!(menu.step(9, Step::Next), 9);
        assert_eq!(menu.step(2, Step::PageUp(4)), 0);
        assert_eq!(menu.step(2, Step::PageDown(4)), 6);
        assert_eq!(menu.step(8, Step::PageDown(4)), 9);
        assert_eq!(menu.step(5, Step::PageDown(0)), 6);
        assert_eq!(menu.step(5, Step::First), 0);
        assert_eq!(menu.step(5, Step::Last), 9);
        assert_eq!(Menu::default().step(3, Step::Next), 0);
    }

    #[test]
    fn test_summary_line() {
        let menu = Menu {
            entries: vec![entry("Install", Some('i')), entry("Rescue", Some('r'))],
            ..Menu::default()
        };
        assert_eq!(menu.summary_line(80), "<i> Install   <r> Rescue");
        assert_eq!(menu.summary_line(14), "<i> Install   ");
        assert_eq!(menu.max_label_width(true), 11);
    }

    #[test]
    fn test_image_path() {
        let mut install = entry("Install", None);
        assert!(install.image_path().is_err());
        install.path = Some("/EFI/install/boot.efi".to_string());
        let path = install.image_path().expect("path should convert");
        assert_eq!(path.to_string(), "\\EFI\\install\\boot.efi");
    }
}
