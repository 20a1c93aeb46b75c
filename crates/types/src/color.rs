//! Color value types.

use std::ops::Add;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Index of this color in a 24-bit lookup table (`r + g*256 + b*65536`).
    #[inline(always)]
    pub const fn cube_index(self) -> usize {
        self.r as usize | (self.g as usize) << 8 | (self.b as usize) << 16
    }

    /// Inverse of [`Rgb::cube_index`].
    #[inline(always)]
    pub const fn from_cube_index(index: usize) -> Self {
        Self {
            r: (index & 0xFF) as u8,
            g: ((index >> 8) & 0xFF) as u8,
            b: ((index >> 16) & 0xFF) as u8,
        }
    }

    /// Squared Euclidean distance in RGB space.
    #[inline(always)]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// RGBA color used by every drawing call.
///
/// Alpha drives how a write composes with what is already in the cell:
/// - `a == 0`: the write is skipped
/// - `a == 255`: the write replaces the cell
/// - otherwise: [`Color::blend`] with the current cell color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 140, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn opaque(self) -> Self {
        self.with_alpha(255)
    }

    pub const fn to_rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// True when all four channels are zero.
    ///
    /// Triangle fills treat this as "draw nothing at all", which is stricter than the
    /// per-pixel alpha-0 skip.
    pub const fn is_clear(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0 && self.a == 0
    }

    /// Compose `self` onto `dst`.
    ///
    /// This is an additive approximation, not the conventional "over" operator: the
    /// source is scaled by its alpha and added to the destination without attenuating
    /// the destination. Channels saturate at 255.
    ///
    /// ```
    /// use tui_raster_types::Color;
    ///
    /// let dst = Color::rgb(100, 100, 100);
    /// assert_eq!(Color::rgb(10, 20, 30).blend(dst), Color::rgb(10, 20, 30));
    /// assert_eq!(Color::TRANSPARENT.blend(dst), dst);
    /// assert_eq!(Color::new(255, 0, 0, 51).blend(dst), Color::new(151, 100, 100, 255));
    /// ```
    pub fn blend(self, dst: Color) -> Color {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let add = |s: u8, d: u8| -> u8 {
                    let scaled = s as u16 * a as u16 / 255;
                    (d as u16 + scaled).min(255) as u8
                };
                Color {
                    r: add(self.r, dst.r),
                    g: add(self.g, dst.g),
                    b: add(self.b, dst.b),
                    a: self.a.saturating_add(dst.a),
                }
            }
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::rgb(rgb.r, rgb.g, rgb.b)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Color::new(r, g, b, a)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

/// `src + dst` is [`Color::blend`].
impl Add for Color {
    type Output = Color;

    fn add(self, dst: Color) -> Color {
        self.blend(dst)
    }
}
