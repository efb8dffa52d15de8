// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Various helper functions for other modules.

use alloc::string::String;
use smallvec::SmallVec;
use thiserror::Error;
use uefi::{
    CString16, Event,
    boot::{self, EventType, ScopedProtocol, TimerTrigger, Tpl},
    proto::ProtocolPointer,
};

use crate::BootcastResult;

/// The max length of a path in UEFI.
const MAX_PATH: usize = 256;

/// An `Error` that may result from converting a [`String`] to another format.
#[derive(Error, Debug)]
pub enum StrError {
    /// A [`String`] could not be converted into a [`CString16`]
    #[error("Could not convert String to CString16")]
    CstrFromStr(#[from] uefi::data_types::FromStrError),
}

/// Gets a [`CString16`] from an [`&str`].
///
/// # Errors
///
/// May return an `Error` if the string could not be converted into a [`CString16`], either due to unsupported
/// characters or an invalid nul character.
pub fn str_to_cstr(str: &str) -> Result<CString16, StrError> {
    Ok(CString16::try_from(str)?)
}

/// Normalizes a path to make it more aligned with UEFI expectations
///
/// Forward slashes become backslashes, runs of separators collapse into one, and a missing leading separator is
/// added, so `EFI//boot/x.efi` becomes `\EFI\boot\x.efi`.
#[must_use = "Has no effect if the result is unused"]
pub fn normalize_path(path: &str) -> String {
    let mut out: SmallVec<[char; MAX_PATH]> = SmallVec::with_capacity(path.len() + 1);
    for ch in core::iter::once('\\').chain(path.chars()) {
        let ch = if ch == '/' { '\\' } else { ch };
        if ch == '\\' && out.last() == Some(&'\\') {
            continue;
        }
        out.push(ch);
    }
    out.into_iter().collect()
}

/// Opens the first instance of a protocol exclusively.
///
/// # Errors
///
/// May return an `Error` if no handle supports the protocol, or it could not be opened.
pub fn locate_protocol<P: ProtocolPointer + ?Sized>() -> BootcastResult<ScopedProtocol<P>> {
    let handle = boot::get_handle_for_protocol::<P>()?;
    Ok(boot::open_protocol_exclusive::<P>(handle)?)
}

/// Creates a timer event that fires on the given trigger.
///
/// # Errors
///
/// May return an `Error` if the event could not be created or the timer could not be set.
pub fn create_timer(trigger: TimerTrigger) -> BootcastResult<Event> {
    // SAFETY: no notification function is registered, so the firmware never calls back into this program.
    let event = unsafe { boot::create_event(EventType::TIMER, Tpl::APPLICATION, None, None)? };
    boot::set_timer(&event, trigger)?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uefi::cstr16;

    #[test]
    fn test_str_to_cstr() -> Result<(), StrError> {
        let cstr = str_to_cstr("foo bar")?;
        assert_eq!(&*cstr, cstr16!("foo bar"));
        assert!(str_to_cstr("nul\0inside").is_err());
        Ok(())
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/EFI/boot/x.efi"), "\\EFI\\boot\\x.efi");
        assert_eq!(normalize_path("EFI//boot\\/x.efi"), "\\EFI\\boot\\x.efi");
        assert_eq!(normalize_path(""), "\\");
    }
}
