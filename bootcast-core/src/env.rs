// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Provides [`Environment`], the string variables that steer the menu and the boot screens.
//!
//! These behave like GRUB environment variables: every value is a string, a missing variable and an empty one
//! are both "unset" for the purposes of the menu, and whoever reads a variable decides how to interpret it.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
};

/// The variable that switches the menu into bootcast mode.
pub const BOOTCAST_MENU_VAR: &str = "miray_bootcast_menu";

/// An ordered map of environment variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    /// The variables, keyed by name.
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Creates an empty [`Environment`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Returns a variable if it is set to a non-empty value.
    #[must_use = "Has no effect if the result is unused"]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns true if the bootcast menu is selected.
    ///
    /// The menu is selected when `miray_bootcast_menu` is non-empty and does not start with `0`.
    #[must_use = "Has no effect if the result is unused"]
    pub fn is_bootcast(&self) -> bool {
        self.get(BOOTCAST_MENU_VAR)
            .is_some_and(|value| !value.starts_with('0'))
    }

    /// Returns true if a variable is present at all, even with an empty value.
    #[must_use = "Has no effect if the result is unused"]
    pub fn is_present(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Iterates over every variable in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses a variable as a number, ignoring it if it is not one.
    #[must_use = "Has no effect if the result is unused"]
    pub fn parse<T: core::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|value| value.trim().parse().ok())
    }

    /// Sets a variable, replacing any previous value.
    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    /// Removes a variable.
    pub fn unset(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootcast_flag() {
        let mut env = Environment::new();
        assert!(!env.is_bootcast());

        env.set(BOOTCAST_MENU_VAR, "");
        assert!(!env.is_bootcast());
        assert!(env.is_present(BOOTCAST_MENU_VAR));

        env.set(BOOTCAST_MENU_VAR, "0");
        assert!(!env.is_bootcast());

        env.set(BOOTCAST_MENU_VAR, "1");
        assert!(env.is_bootcast());

        env.set(BOOTCAST_MENU_VAR, "yes");
        assert!(env.is_bootcast());

        env.unset(BOOTCAST_MENU_VAR);
        assert!(!env.is_bootcast());
    }

    #[test]
    fn test_parse() {
        let mut env = Environment::new();
        env.set("timeout", " 7 ");
        env.set("default", "two");
        assert_eq!(env.parse::<u32>("timeout"), Some(7));
        assert_eq!(env.parse::<usize>("default"), None);
        assert_eq!(env.parse::<usize>("missing"), None);
    }
}
