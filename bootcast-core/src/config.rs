// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Provides [`Config`], the environment and menu read from the configuration file.
//!
//! The file holds space separated key value pairs, one per line. Every key except `entry` becomes an environment
//! variable. Each `entry` line adds one menu entry, with a hotkey (`-` for none), the path of the image to boot and
//! the title, which runs to the end of the line.
//!
//! Example configuration:
//!
//! ```text
//! # Switch to the vendor menu layout
//! miray_bootcast_menu 1
//! menu_title Bootcast rescue system
//! menu_msg_custom_top Select what should be started.
//! menu_prompt Your choice:
//! menu_timeout Starting in %d seconds
//! menu_color_highlight white/blue
//!
//! timeout 10
//! default 0
//!
//! entry i /EFI/install/bootx64.efi Install the system
//! entry r /EFI/rescue/bootx64.efi Rescue a broken installation
//! entry - /EFI/tools/memtest.efi Memory test
//! ```
//!
//! Bytes that are not UTF-8 are replaced, and lines that cannot be understood are skipped with a warning.

use alloc::string::String;
use log::warn;
use uefi::{CStr16, cstr16};

use crate::{
    BootcastResult,
    env::Environment,
    menu::{Menu, MenuEntry},
    system::fs::UefiFileSystem,
};

/// The hardcoded configuration path for the [`Config`].
const CONFIG_PATH: &CStr16 = cstr16!("\\loader\\bootcast.conf");

/// The largest configuration file that is read.
const MAX_CONFIG_SIZE: usize = 64 * 1024;

/// The configuration of the boot stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Every key value pair except the entries.
    pub env: Environment,

    /// The menu built from the `entry` lines, `default` and `timeout`.
    pub menu: Menu,
}

impl Config {
    /// Loads the [`Config`] from the filesystem the boot stage was started from.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the filesystem of the boot image does not support
    /// [`uefi::proto::media::fs::SimpleFileSystem`]. A missing or unreadable file gives an empty [`Config`].
    pub fn new() -> BootcastResult<Self> {
        let mut fs = UefiFileSystem::from_image_fs()?;

        if !fs.exists(CONFIG_PATH) {
            return Ok(Self::default());
        }

        match fs.read(CONFIG_PATH, MAX_CONFIG_SIZE) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) => {
                warn!("{e}");
                Ok(Self::default())
            }
        }
    }

    /// Parses the contents of a configuration file.
    #[must_use = "Has no effect if the result is unused"]
    pub fn parse(content: &[u8]) -> Self {
        let mut env = Environment::new();
        let mut menu = Menu::default();

        let content = String::from_utf8_lossy(content);
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line
                .split_once(char::is_whitespace)
                .map_or((line, ""), |(k, v)| (k, v.trim()));
            let key = key.to_ascii_lowercase();

            if key == "entry" {
                match parse_entry(value) {
                    Some(entry) => menu.entries.push(entry),
                    None => warn!("ignoring malformed entry line: {line}"),
                }
            } else {
                env.set(&key, value);
            }
        }

        menu.default = env.parse("default").unwrap_or(0);
        menu.timeout = env.parse("timeout");

        Self { env, menu }
    }
}

/// Parses the value of an `entry` line: `<hotkey|-> <path> <title>`.
fn parse_entry(value: &str) -> Option<MenuEntry> {
    let mut parts = value.splitn(3, char::is_whitespace);
    let hotkey = parts.next()?;
    let path = parts.next()?;
    let title = parts.next()?.trim();
    if title.is_empty() {
        return None;
    }

    let hotkey = match hotkey {
        "-" => None,
        key => {
            let mut chars = key.chars();
            let first = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Some(first)
        }
    };

    Some(MenuEntry {
        title: title.into(),
        hotkey,
        path: (path != "-").then(|| path.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_config() {
        let config = r"
            # vendor menu
            MIRAY_BOOTCAST_MENU 1
            menu_title   Rescue system
            menu_nohighlight
            timeout 10
            default 1

            entry i /EFI/install/boot.efi Install the   system
            entry - /EFI/rescue/boot.efi Rescue
            entry xy /EFI/bad.efi Two letter hotkey
            entry - /EFI/untitled.efi
        "
        .as_bytes();

        let config = Config::parse(config);
        assert!(config.env.is_bootcast());
        assert_eq!(config.env.get("menu_title"), Some("Rescue system"));
        assert!(config.env.is_present("menu_nohighlight"));
        assert_eq!(config.menu.timeout, Some(10));
        assert_eq!(config.menu.default, 1);

        assert_eq!(config.menu.len(), 2);
        assert_eq!(config.menu.entries[0].title, "Install the   system");
        assert_eq!(config.menu.entries[0].hotkey, Some('i'));
        assert_eq!(
            config.menu.entries[1].path.as_deref(),
            Some("/EFI/rescue/boot.efi")
        );
        assert_eq!(config.menu.entries[1].hotkey, None);
    }

    #[test]
    fn test_negative_timeout_waits() {
        let config = Config::parse(b"timeout -1\ndefault nope");
        assert_eq!(config.menu.timeout, None);
        assert_eq!(config.menu.default, 0);
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        let config = Config::parse(b"menu_title caf\xe9\nentry - /a.efi A");
        assert_eq!(config.env.get("menu_title"), Some("caf\u{fffd}"));
        assert_eq!(config.menu.len(), 1);
    }

    proptest! {
        #[test]
        fn doesnt_panic(x in any::<Vec<u8>>()) {
            let _ = Config::parse(&x);
        }

        #[test]
        fn doesnt_panic_on_text(s in "\\PC*") {
            let _ = Config::parse(s.as_bytes());
        }
    }
}
