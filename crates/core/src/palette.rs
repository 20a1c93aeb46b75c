//! Palette quantizer - maps true color onto 16 base colors plus shading glyphs
//!
//! A terminal cell can only show one glyph with one foreground and one background
//! color out of a 16-color palette. Shade glyphs cover a fraction of the cell with the
//! foreground, so the eye mixes the two colors:
//!
//! | Level | Glyph | Foreground coverage |
//! |-------|-------|---------------------|
//! | 0 | `█` | 4/4 |
//! | 1 | `▓` | 3/4 |
//! | 2 | `▒` | 2/4 |
//! | 3 | `░` | 1/4 |
//!
//! The quantizer precomputes, for every 24-bit RGB value, the (foreground, background,
//! level) combination whose mixed color is closest in RGB space. The table has one
//! packed `u16` per RGB value: low 8 bits are the attribute (`fg | bg << 4`), the high
//! bits are the shade level.
//!
//! # Determinism
//!
//! Candidates are enumerated in a fixed order (level, then foreground, then background)
//! and the first candidate with the smallest squared distance wins. The table is
//! filled in 8x8x8 blocks; each block first discards candidates that cannot be nearest
//! anywhere inside it, which never changes the result of the exhaustive search.

use std::sync::Arc;
use std::time::Instant;

use arrayvec::ArrayVec;
use log::debug;
use once_cell::sync::Lazy;
use rayon::prelude::*;

use crate::types::{Rgb, PALETTE_SIZE, RGB_CUBE_SIZE};

/// Legacy 16-color console palette, indexed by the classic attribute bits
/// (`1` blue, `2` green, `4` red, `8` intensity).
pub const CONSOLE_COLORS: [Rgb; PALETTE_SIZE] = [
    Rgb::new(0, 0, 0),
    Rgb::new(0, 0, 128),
    Rgb::new(0, 128, 0),
    Rgb::new(0, 128, 128),
    Rgb::new(128, 0, 0),
    Rgb::new(128, 0, 128),
    Rgb::new(128, 128, 0),
    Rgb::new(192, 192, 192),
    Rgb::new(128, 128, 128),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(255, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 255, 255),
];

/// Edge length of a table-filling block (per channel).
const BLOCK: usize = 8;
const BLOCKS_PER_AXIS: usize = 256 / BLOCK;
const PLANE: usize = 256 * 256;

/// Full blocks use `bg == fg`; each shaded level pairs every fg with every other bg.
const CANDIDATE_COUNT: usize = PALETTE_SIZE + 3 * PALETTE_SIZE * (PALETTE_SIZE - 1);

static SHARED: Lazy<Arc<Palette>> = Lazy::new(|| Arc::new(Palette::new(CONSOLE_COLORS)));

/// Shading glyph level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    Full = 0,
    Dark = 1,
    Medium = 2,
    Light = 3,
}

impl Shade {
    pub const ALL: [Shade; 4] = [Shade::Full, Shade::Dark, Shade::Medium, Shade::Light];

    pub const fn glyph(self) -> char {
        match self {
            Shade::Full => '\u{2588}',
            Shade::Dark => '\u{2593}',
            Shade::Medium => '\u{2592}',
            Shade::Light => '\u{2591}',
        }
    }

    /// Foreground coverage in quarters of a cell.
    pub const fn coverage(self) -> u32 {
        4 - self as u32
    }

    pub const fn from_level(level: u8) -> Self {
        match level & 0b11 {
            0 => Shade::Full,
            1 => Shade::Dark,
            2 => Shade::Medium,
            _ => Shade::Light,
        }
    }
}

/// Result of quantizing one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantized {
    /// `fg | bg << 4`
    pub attribute: u8,
    pub shade: Shade,
}

impl Quantized {
    #[inline(always)]
    pub const fn unpack(packed: u16) -> Self {
        Self {
            attribute: (packed & 0xFF) as u8,
            shade: Shade::from_level((packed >> 8) as u8),
        }
    }

    #[inline(always)]
    pub const fn pack(self) -> u16 {
        self.attribute as u16 | (self.shade as u16) << 8
    }

    pub const fn fg(self) -> usize {
        (self.attribute & 0x0F) as usize
    }

    pub const fn bg(self) -> usize {
        (self.attribute >> 4) as usize
    }

    pub const fn glyph(self) -> char {
        self.shade.glyph()
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    rgb: [i32; 3],
    packed: u16,
}

/// Precomputed total mapping from 24-bit RGB to (attribute, shade).
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
    table: Box<[u16]>,
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette")
            .field("colors", &self.colors)
            .finish_non_exhaustive()
    }
}

impl Palette {
    /// Build the lookup table for `colors`.
    ///
    /// This walks all 16.7M RGB values and is meant to run once at startup.
    pub fn new(colors: [Rgb; PALETTE_SIZE]) -> Self {
        let started = Instant::now();
        let candidates = candidates(&colors);
        let mut table = vec![0u16; RGB_CUBE_SIZE].into_boxed_slice();

        // One chunk = BLOCK consecutive blue planes.
        table
            .par_chunks_mut(BLOCK * PLANE)
            .enumerate()
            .for_each(|(blue_block, chunk)| {
                let b0 = blue_block * BLOCK;
                for gb in 0..BLOCKS_PER_AXIS {
                    for rb in 0..BLOCKS_PER_AXIS {
                        fill_block(chunk, [rb * BLOCK, gb * BLOCK, b0], &candidates);
                    }
                }
            });

        debug!(
            "palette table built: {} candidates, {:?}",
            candidates.len(),
            started.elapsed()
        );
        Self { colors, table }
    }

    /// Process-wide palette over [`CONSOLE_COLORS`], built on first use.
    pub fn shared() -> Arc<Palette> {
        Arc::clone(&SHARED)
    }

    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    /// Base color at `index` (0..16).
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index & 0x0F]
    }

    #[inline(always)]
    pub fn packed(&self, rgb: Rgb) -> u16 {
        self.table[rgb.cube_index()]
    }

    #[inline(always)]
    pub fn quantize(&self, rgb: Rgb) -> Quantized {
        Quantized::unpack(self.packed(rgb))
    }

    /// The color a viewer perceives for a quantized cell.
    pub fn apparent(&self, q: Quantized) -> Rgb {
        mix(self.color(q.fg()), self.color(q.bg()), q.shade)
    }
}

fn mix(fg: Rgb, bg: Rgb, shade: Shade) -> Rgb {
    let k = shade.coverage();
    let ch = |f: u8, b: u8| -> u8 { ((f as u32 * k + b as u32 * (4 - k) + 2) / 4) as u8 };
    Rgb::new(ch(fg.r, bg.r), ch(fg.g, bg.g), ch(fg.b, bg.b))
}

fn candidates(colors: &[Rgb; PALETTE_SIZE]) -> ArrayVec<Candidate, CANDIDATE_COUNT> {
    let mut out = ArrayVec::new();
    for shade in Shade::ALL {
        for fg in 0..PALETTE_SIZE {
            for bg in 0..PALETTE_SIZE {
                let full = shade == Shade::Full;
                if full != (fg == bg) {
                    continue;
                }
                let rgb = mix(colors[fg], colors[bg], shade);
                out.push(Candidate {
                    rgb: [rgb.r as i32, rgb.g as i32, rgb.b as i32],
                    packed: Quantized {
                        attribute: (fg | bg << 4) as u8,
                        shade,
                    }
                    .pack(),
                });
            }
        }
    }
    out
}

/// Squared distance from `c` to the nearest and farthest points of the block
/// starting at `lo`.
fn block_bounds(c: &[i32; 3], lo: [usize; 3]) -> (i32, i32) {
    let mut near = 0;
    let mut far = 0;
    for axis in 0..3 {
        let lo = lo[axis] as i32;
        let hi = lo + BLOCK as i32 - 1;
        let v = c[axis];
        let d_near = if v < lo {
            lo - v
        } else if v > hi {
            v - hi
        } else {
            0
        };
        let d_far = (v - lo).abs().max((v - hi).abs());
        near += d_near * d_near;
        far += d_far * d_far;
    }
    (near, far)
}

fn fill_block(chunk: &mut [u16], lo: [usize; 3], candidates: &[Candidate]) {
    let best_far = candidates
        .iter()
        .map(|c| block_bounds(&c.rgb, lo).1)
        .min()
        .unwrap_or(0);

    // Order preserved so ties still resolve to the earliest candidate.
    let mut survivors: ArrayVec<Candidate, CANDIDATE_COUNT> = ArrayVec::new();
    for c in candidates {
        if block_bounds(&c.rgb, lo).0 <= best_far {
            survivors.push(*c);
        }
    }

    for db in 0..BLOCK {
        let b = (lo[2] + db) as i32;
        for dg in 0..BLOCK {
            let g = (lo[1] + dg) as i32;
            let row = db * PLANE + (lo[1] + dg) * 256;
            for dr in 0..BLOCK {
                let r = (lo[0] + dr) as i32;
                chunk[row + lo[0] + dr] = nearest(&survivors, [r, g, b]);
            }
        }
    }
}

#[inline(always)]
fn nearest(candidates: &[Candidate], p: [i32; 3]) -> u16 {
    let mut best = i32::MAX;
    let mut packed = 0;
    for c in candidates {
        let dr = c.rgb[0] - p[0];
        let dg = c.rgb[1] - p[1];
        let db = c.rgb[2] - p[2];
        let d = dr * dr + dg * dg + db * db;
        if d < best {
            best = d;
            packed = c.packed;
        }
    }
    packed
}
