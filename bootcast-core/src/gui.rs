// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! A tiny retained widget layer for pixel screens.
//!
//! Components paint rectangles onto a [`Canvas`], usually a [`FrameBuffer`] that is later handed to a
//! [`Surface`] in one piece. A [`Container`] owns its children and forwards painting and property changes to them.

use alloc::{string::String, vec::Vec};

pub mod bar;
pub mod canvas;

pub use bar::{GuiBar, GuiBarKind, GuiFinish};
pub use canvas::{Canvas, FrameBuffer, Surface};

/// A rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    /// The left edge.
    pub x: i32,

    /// The top edge.
    pub y: i32,

    /// The width.
    pub width: u32,

    /// The height.
    pub height: u32,
}

impl Rect {
    /// Creates a new [`Rect`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the exclusive right edge.
    #[must_use = "Has no effect if the result is unused"]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Returns the exclusive bottom edge.
    #[must_use = "Has no effect if the result is unused"]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Returns true if the rectangle covers no pixel.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the overlap of two rectangles, which may be empty.
    #[must_use = "Has no effect if the result is unused"]
    pub fn intersect(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let width = u32::try_from(right - i64::from(x)).unwrap_or(0);
        let height = u32::try_from(bottom - i64::from(y)).unwrap_or(0);
        Self::new(x, y, width, height)
    }

    /// Returns the smallest rectangle that covers both.
    #[must_use = "Has no effect if the result is unused"]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let width = u32::try_from(self.right().max(other.right()) - i64::from(x)).unwrap_or(u32::MAX);
        let height =
            u32::try_from(self.bottom().max(other.bottom()) - i64::from(y)).unwrap_or(u32::MAX);
        Self::new(x, y, width, height)
    }

    /// Returns true if the two rectangles share at least one pixel.
    #[must_use = "Has no effect if the result is unused"]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Moves the rectangle by an offset.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}

/// A colour with an alpha channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    /// Red.
    pub red: u8,

    /// Green.
    pub green: u8,

    /// Blue.
    pub blue: u8,

    /// Opacity, 255 is opaque.
    pub alpha: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Opaque gray.
    pub const GRAY: Self = Self::opaque(128, 128, 128);

    /// Opaque light gray.
    pub const LIGHT_GRAY: Self = Self::opaque(200, 200, 200);

    /// Creates an opaque colour.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: u8::MAX,
        }
    }

    /// Parses a colour.
    ///
    /// Accepted are `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, a comma separated `r, g, b` or `r, g, b, a` in
    /// decimal, and a few names such as `black` or `light-gray`.
    #[must_use = "Has no effect if the result is unused"]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if s.contains(',') {
            return Self::parse_decimal(s);
        }
        Self::named(s)
    }

    /// Parses the digits after a `#`.
    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let digit = |i: usize, len: usize| -> Option<u8> {
            let v = u8::from_str_radix(hex.get(i * len..(i + 1) * len)?, 16).ok()?;
            Some(if len == 1 { v * 0x11 } else { v })
        };
        let (len, has_alpha) = match hex.len() {
            3 => (1, false),
            4 => (1, true),
            6 => (2, false),
            8 => (2, true),
            _ => return None,
        };
        Some(Self {
            red: digit(0, len)?,
            green: digit(1, len)?,
            blue: digit(2, len)?,
            alpha: if has_alpha { digit(3, len)? } else { u8::MAX },
        })
    }

    /// Parses `r, g, b[, a]`.
    fn parse_decimal(s: &str) -> Option<Self> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u8>().ok())
            .collect::<Option<Vec<_>>>()?;
        match parts[..] {
            [red, green, blue] => Some(Self::opaque(red, green, blue)),
            [red, green, blue, alpha] => Some(Self {
                red,
                green,
                blue,
                alpha,
            }),
            _ => None,
        }
    }

    /// Looks up a colour by name.
    fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::opaque(255, 255, 255),
            "gray" | "grey" => Self::GRAY,
            "light-gray" | "lightgray" | "light-grey" => Self::LIGHT_GRAY,
            "dark-gray" | "darkgray" | "dark-grey" => Self::opaque(64, 64, 64),
            "red" => Self::opaque(255, 0, 0),
            "green" => Self::opaque(0, 128, 0),
            "blue" => Self::opaque(0, 0, 255),
            "yellow" => Self::opaque(255, 255, 0),
            "transparent" => Self::default(),
            _ => return None,
        };
        Some(color)
    }
}

/// What a component wants the caller to do after a property change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyEffect {
    /// The property was stored. Repainting is enough.
    Applied,

    /// The name is not one the component knows. Nothing changed.
    Ignored,

    /// The component asked to play its finish animation.
    StartFinish,
}

/// Something that can be laid out and painted onto a [`Canvas`].
pub trait PaintableComponent {
    /// Returns the id the component was given with the `id` property.
    fn id(&self) -> Option<&str>;

    /// Returns true if the component is of the named kind.
    fn is_instance(&self, kind: &str) -> bool {
        kind == "component"
    }

    /// Paints the part of the component that lies inside `region`.
    fn paint(&self, canvas: &mut dyn Canvas, region: &Rect);

    /// Returns where the component is.
    fn bounds(&self) -> Rect;

    /// Moves or resizes the component.
    fn set_bounds(&mut self, bounds: Rect);

    /// Returns the smallest width and height the component looks right at.
    fn minimal_size(&self) -> (u32, u32);

    /// Changes a named property. A `None` value clears it where that makes sense.
    fn set_property(&mut self, name: &str, value: Option<&str>) -> PropertyEffect;
}

/// A component that owns other components of one type.
#[derive(Clone, Debug, Default)]
pub struct Container<T> {
    /// Where the container is.
    bounds: Rect,

    /// The children, painted in order.
    children: Vec<T>,

    /// The id of the container.
    id: Option<String>,
}

impl<T: PaintableComponent> Container<T> {
    /// Creates an empty container.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            children: Vec::new(),
            id: None,
        }
    }

    /// Adds a child on top of the others.
    pub fn add(&mut self, child: T) {
        self.children.push(child);
    }

    /// Returns the children.
    #[must_use = "Has no effect if the result is unused"]
    pub fn children(&self) -> &[T] {
        &self.children
    }

    /// Returns the children mutably.
    pub fn children_mut(&mut self) -> &mut [T] {
        &mut self.children
    }

    /// Returns the child with an id.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut T> {
        self.children.iter_mut().find(|c| c.id() == Some(id))
    }
}

impl<T: PaintableComponent> PaintableComponent for Container<T> {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn is_instance(&self, kind: &str) -> bool {
        kind == "component" || kind == "container"
    }

    fn paint(&self, canvas: &mut dyn Canvas, region: &Rect) {
        let region = region.intersect(&self.bounds);
        if region.is_empty() {
            return;
        }
        for child in &self.children {
            if child.bounds().overlaps(&region) {
                child.paint(canvas, &region);
            }
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn minimal_size(&self) -> (u32, u32) {
        self.children.iter().fold((0, 0), |(w, h), c| {
            let (cw, ch) = c.minimal_size();
            (w.max(cw), h.max(ch))
        })
    }

    fn set_property(&mut self, name: &str, value: Option<&str>) -> PropertyEffect {
        if name == "id" {
            self.id = value.map(String::from);
            PropertyEffect::Applied
        } else {
            PropertyEffect::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 0, 5, 5));
        assert!(!a.overlaps(&Rect::new(10, 0, 5, 5)));
        assert!(a.intersect(&Rect::new(20, 20, 1, 1)).is_empty());
        assert_eq!(a.union(&b), Rect::new(0, -5, 15, 15));
    }

    #[test]
    fn test_rgba_parse() {
        assert_eq!(Rgba::parse("#fff"), Some(Rgba::opaque(255, 255, 255)));
        assert_eq!(Rgba::parse("#102030"), Some(Rgba::opaque(16, 32, 48)));
        assert_eq!(
            Rgba::parse("#10203040"),
            Some(Rgba {
                red: 16,
                green: 32,
                blue: 48,
                alpha: 64
            })
        );
        assert_eq!(Rgba::parse("1, 2, 3"), Some(Rgba::opaque(1, 2, 3)));
        assert_eq!(Rgba::parse("Light-Gray"), Some(Rgba::LIGHT_GRAY));
        assert_eq!(Rgba::parse("#12"), None);
        assert_eq!(Rgba::parse("#ggg"), None);
        assert_eq!(Rgba::parse("1, 2"), None);
        assert_eq!(Rgba::parse("256, 0, 0"), None);
        assert_eq!(Rgba::parse("mauve"), None);
    }

    #[test]
    fn test_container_find_and_id() {
        let mut container = Container::new(Rect::new(0, 0, 400, 100));
        let mut bar = GuiBar::activity();
        let _ = bar.set_property("id", Some("activity"));
        container.add(bar);
        container.add(GuiBar::progress());

        assert!(container.find_mut("activity").is_some());
        assert!(container.find_mut("progress").is_none());
        assert_eq!(
            container.set_property("id", Some("root")),
            PropertyEffect::Applied
        );
        assert_eq!(container.id(), Some("root"));
        assert_eq!(
            container.set_property("bg_color", Some("#000")),
            PropertyEffect::Ignored
        );
        assert_eq!(container.minimal_size(), (200, 28));
        assert!(container.is_instance("container"));
    }
}
