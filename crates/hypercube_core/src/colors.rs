//! Colors for edges, faces and markers
//!
//! Each axis has a fixed palette entry used for the edges running along it.
//! A face is colored by blending the colors of the two axes spanning its
//! plane; blends are memoized in a [`FaceColors`] table owned by the caller.

use std::collections::HashMap;

/// An opaque RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Channel-wise average of two colors (rounded down)
    pub fn blend(self, other: Color) -> Color {
        let avg = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
        Color::rgb(avg(self.r, other.r), avg(self.g, other.g), avg(self.b, other.b))
    }

    /// `#rrggbb` form, for renderers that take CSS-style colors
    pub fn to_html(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

/// Node marker color
pub const NODE: Color = Color::WHITE;
/// Center marker color
pub const CENTER: Color = Color::WHITE;
/// Vanishing point marker color (a shade of aqua)
pub const VANISHING_POINT: Color = Color::rgb(140, 208, 244);
/// Label text color
pub const TEXT: Color = Color::rgb(250, 200, 200);
/// Background; must be black so ghosting fades towards it
pub const BACKGROUND: Color = Color::BLACK;
/// Edge color used for higher dimensions when they are drawn muted
pub const DIM4_GRAY: Color = Color::rgb(128, 128, 128);

/// Per-axis palette with display names
pub const PALETTE: [(Color, &str); 16] = [
    (Color::from_hex(0xff0000), "red"),
    (Color::from_hex(0xffffff), "white"),
    (Color::from_hex(0x00a8ec), "blue"),
    (Color::from_hex(0x00ff00), "green"),
    (Color::from_hex(0x00ffff), "aqua"),
    (Color::from_hex(0xffff00), "yellow"),
    (Color::from_hex(0xff00ff), "fuschia"),
    (Color::from_hex(0xff8000), "orange"),
    (Color::from_hex(0x800080), "purple"),
    (Color::from_hex(0xe62b86), "pink"),
    (Color::from_hex(0xf1a629), "lt.orange"),
    (Color::from_hex(0xfff99d), "lemon yellow"),
    (Color::from_hex(0x8dcb41), "lt. green"),
    (Color::from_hex(0xbfb2d3), "lilac"),
    (Color::from_hex(0x826b89), "purple"),
    (Color::from_hex(0xc0c0c0), "silver"),
];

/// Color of the edges that run along `axis`
///
/// # Panics
/// If `axis` is beyond the palette.
pub fn edge_color(axis: usize) -> Color {
    PALETTE[axis].0
}

/// Display name of the color for `axis`
pub fn color_name(axis: usize) -> &'static str {
    PALETTE[axis].1
}

/// One `axis name #rrggbb` entry per axis, for logs and legends
pub fn axis_legend(dims: usize) -> String {
    (0..dims)
        .map(|axis| format!("{} {} {}", axis, color_name(axis), edge_color(axis).to_html()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Memo table mapping a pair of axes to the blended face color
///
/// The pair is unordered: `(i, j)` and `(j, i)` share one entry.
#[derive(Clone, Debug, Default)]
pub struct FaceColors {
    cache: HashMap<(usize, usize), Color>,
}

impl FaceColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for the face plane spanned by `dim_a` and `dim_b`
    pub fn color_for(&mut self, dim_a: usize, dim_b: usize) -> Color {
        let key = if dim_a <= dim_b { (dim_a, dim_b) } else { (dim_b, dim_a) };
        *self
            .cache
            .entry(key)
            .or_insert_with(|| edge_color(key.0).blend(edge_color(key.1)))
    }

    /// Number of memoized planes
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
