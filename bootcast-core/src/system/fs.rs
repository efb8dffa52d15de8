// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Filesystem helpers.
//!
//! These wrap the UEFI [`SimpleFileSystem`] protocol. Only reading is needed: the configuration file is read in
//! one piece, and boot images are read in chunks so that a boot screen can show how far along the read is.

use alloc::{vec, vec::Vec};
use thiserror::Error;
use uefi::{
    CStr16, Status,
    boot::{self, ScopedProtocol},
    proto::media::{
        file::{File, FileAttribute, FileInfo, FileMode, RegularFile},
        fs::SimpleFileSystem,
    },
};

use crate::BootcastResult;

/// The size of the pieces boot images are read in.
pub const READ_CHUNK_SIZE: usize = 64 * 1024;

/// An error that may result from performing filesystem operations
#[derive(Error, Debug)]
pub enum FsError {
    /// A file could not be opened.
    #[error("Failed to open file")]
    OpenErr(Status),

    /// A file could not be read.
    #[error("Failed to read file")]
    ReadErr(Status),

    /// A file was larger than the caller allows.
    #[error("File too large ({size} bytes, at most {max} allowed)")]
    TooLarge {
        /// The size of the file.
        size: u64,

        /// The largest size the caller accepts.
        max: usize,
    },
}

/// A rust-ier wrapper around [`SimpleFileSystem`].
pub struct UefiFileSystem(ScopedProtocol<SimpleFileSystem>);

impl UefiFileSystem {
    /// Create a new [`UefiFileSystem`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(fs: ScopedProtocol<SimpleFileSystem>) -> Self {
        Self(fs)
    }

    /// Create a new [`UefiFileSystem`] from the filesystem the boot stage was loaded from.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the boot image's filesystem does not support [`SimpleFileSystem`].
    pub fn from_image_fs() -> BootcastResult<Self> {
        let fs = boot::get_image_file_system(boot::image_handle())?;
        Ok(Self(fs))
    }

    /// Checks if a file exists.
    ///
    /// A file that could not be verified to exist (for example because the volume could not be opened) counts as
    /// missing.
    pub fn exists(&mut self, path: &CStr16) -> bool {
        let Ok(mut root) = self.0.open_volume() else {
            return false;
        };

        root.open(path, FileMode::Read, FileAttribute::empty())
            .is_ok()
    }

    /// Reads a whole file of at most `max` bytes.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the volume couldn't be opened, the path does not point to a regular file, the
    /// file is larger than `max`, or the file could not be read.
    pub fn read(&mut self, path: &CStr16, max: usize) -> Result<Vec<u8>, FsError> {
        self.read_with_progress(path, max, &mut |_, _| ())
    }

    /// Reads a whole file of at most `max` bytes in chunks, reporting the bytes read so far and the file size
    /// after every chunk.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the volume couldn't be opened, the path does not point to a regular file, the
    /// file is larger than `max`, or the file could not be read. A file that ends early is a read error.
    pub fn read_with_progress(
        &mut self,
        path: &CStr16,
        max: usize,
        progress: &mut dyn FnMut(u64, u64),
    ) -> Result<Vec<u8>, FsError> {
        let mut file = self.get_regular_file(path)?;

        let info = file
            .get_boxed_info::<FileInfo>()
            .map_err(|e| FsError::ReadErr(e.status()))?;
        let total = info.file_size();
        let size = usize::try_from(total)
            .ok()
            .filter(|&size| size <= max)
            .ok_or(FsError::TooLarge { size: total, max })?;

        let mut buf = vec![0; size];
        let mut done = 0;
        progress(0, total);
        while done < size {
            let end = (done + READ_CHUNK_SIZE).min(size);
            let bytes = file
                .read(&mut buf[done..end])
                .map_err(|e| FsError::ReadErr(e.status()))?;
            if bytes == 0 {
                return Err(FsError::ReadErr(Status::END_OF_FILE));
            }
            done += bytes;
            progress(u64::try_from(done).unwrap_or(total), total);
        }

        Ok(buf)
    }

    /// Gets a handle to a [`RegularFile`] in the filesystem.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the volume couldn't be opened, or the path does not point to a file.
    fn get_regular_file(&mut self, path: &CStr16) -> Result<RegularFile, FsError> {
        let mut root = self
            .0
            .open_volume()
            .map_err(|e| FsError::OpenErr(e.status()))?;
        root.open(path, FileMode::Read, FileAttribute::empty())
            .map_err(|e| FsError::OpenErr(e.status()))?
            .into_regular_file()
            .ok_or(FsError::OpenErr(Status::INVALID_PARAMETER))
    }
}
