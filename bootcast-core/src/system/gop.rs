// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! A [`Surface`] backed by the Graphics Output Protocol.
//!
//! GOP is the only pixel output every firmware has, so frames are blitted from memory to video in one piece.
//! Hardware acceleration is not needed for a couple of bars.

use uefi::{
    boot::ScopedProtocol,
    proto::console::gop::{BltOp, BltRegion, GraphicsOutput},
};

use crate::{
    BootcastResult,
    gui::{Canvas, FrameBuffer, Surface},
    system::helper::locate_protocol,
};

/// The screen, as seen through [`GraphicsOutput`].
pub struct GopSurface {
    /// The protocol.
    gop: ScopedProtocol<GraphicsOutput>,

    /// The resolution of the current mode.
    resolution: (u32, u32),
}

impl GopSurface {
    /// Opens the first [`GraphicsOutput`] in its current mode.
    ///
    /// # Errors
    ///
    /// May return an `Error` if there is no [`GraphicsOutput`].
    pub fn new() -> BootcastResult<Self> {
        let gop = locate_protocol::<GraphicsOutput>()?;
        let (w, h) = gop.current_mode_info().resolution();
        let resolution = (
            u32::try_from(w).unwrap_or(u32::MAX),
            u32::try_from(h).unwrap_or(u32::MAX),
        );
        Ok(Self { gop, resolution })
    }
}

impl Surface for GopSurface {
    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn present(&mut self, fb: &FrameBuffer) {
        let (w, h) = fb.size();
        let (w, h) = (
            usize::try_from(w).unwrap_or(0),
            usize::try_from(h).unwrap_or(0),
        );
        let result = self.gop.blt(BltOp::BufferToVideo {
            buffer: fb.pixels(),
            src: BltRegion::Full,
            dest: (0, 0),
            dims: (w, h),
        });
        if let Err(e) = result {
            log::debug!("blit failed: {e}");
        }
    }
}
