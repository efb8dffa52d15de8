// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Drawing targets for components.

use alloc::{vec, vec::Vec};

use uefi::proto::console::gop::BltPixel;

use crate::gui::{Rect, Rgba};

/// Something rectangles can be painted onto.
pub trait Canvas {
    /// Returns the width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Fills a rectangle, blending by the alpha of the colour. Parts outside the canvas are dropped.
    fn fill_rect(&mut self, color: Rgba, rect: &Rect);
}

/// A place a finished [`FrameBuffer`] is shown, such as the screen.
pub trait Surface {
    /// Returns the width and height in pixels.
    fn resolution(&self) -> (u32, u32);

    /// Shows the contents of a frame buffer.
    fn present(&mut self, fb: &FrameBuffer);
}

/// An off screen image in the pixel format of the firmware.
#[derive(Clone)]
pub struct FrameBuffer {
    /// Row major pixels.
    pixels: Vec<BltPixel>,

    /// The width in pixels.
    width: u32,

    /// The height in pixels.
    height: u32,
}

impl FrameBuffer {
    /// Creates a black frame buffer.
    #[must_use = "Has no effect if the result is unused"]
    pub fn new(width: u32, height: u32) -> Self {
        let len = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            pixels: vec![BltPixel::new(0, 0, 0); len],
            width,
            height,
        }
    }

    /// Returns the pixels, row by row.
    #[must_use = "Has no effect if the result is unused"]
    pub fn pixels(&self) -> &[BltPixel] {
        &self.pixels
    }

    /// Returns one pixel, if it is inside.
    #[must_use = "Has no effect if the result is unused"]
    pub fn pixel(&self, x: u32, y: u32) -> Option<BltPixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Returns the index of a pixel.
    fn index(&self, x: u32, y: u32) -> usize {
        usize::try_from(u64::from(y) * u64::from(self.width) + u64::from(x)).unwrap_or(usize::MAX)
    }
}

/// Mixes one channel of `over` onto `under`.
fn blend(under: u8, over: u8, alpha: u8) -> u8 {
    let a = u16::from(alpha);
    let mixed = (u16::from(over) * a + u16::from(under) * (255 - a)) / 255;
    u8::try_from(mixed).unwrap_or(u8::MAX)
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, color: Rgba, rect: &Rect) {
        let clip = rect.intersect(&Rect::new(0, 0, self.width, self.height));
        if clip.is_empty() || color.alpha == 0 {
            return;
        }
        let x0 = clip.x.unsigned_abs();
        let y0 = clip.y.unsigned_abs();
        for y in y0..y0 + clip.height {
            let start = self.index(x0, y);
            let Some(row) = self
                .pixels
                .get_mut(start..start + clip.width as usize)
            else {
                return;
            };
            for px in row {
                if color.alpha == u8::MAX {
                    *px = BltPixel::new(color.red, color.green, color.blue);
                } else {
                    px.red = blend(px.red, color.red, color.alpha);
                    px.green = blend(px.green, color.green, color.alpha);
                    px.blue = blend(px.blue, color.blue, color.alpha);
                }
            }
        }
    }
}
