//! Rotated ellipse outlines.
//!
//! A rotated ellipse is handled through its implicit form `u·x² + v·y² + w·xy = 1`
//! relative to the center. Rotation is counter-clockwise, matching [`Mat2::rotation`].
//!
//! The unrotated outline has no implementation yet; [`Rasterizer::draw_oval_line`]
//! draws nothing when `rotation == 0`.
//!
//! [`Mat2::rotation`]: crate::types::Mat2::rotation

use super::Rasterizer;
use crate::types::{Color, Oval, Vec2};

/// Implicit ellipse with semi-axes `a` (local x) and `b` (local y).
#[derive(Debug, Clone, Copy)]
struct Quadric {
    u: f32,
    v: f32,
    w: f32,
    ab: f32,
}

impl Quadric {
    fn new(a: f32, b: f32, rotation: f32) -> Self {
        let (s, c) = rotation.sin_cos();
        let s2 = s * s;
        let c2 = 1.0 - s2;
        let at = 1.0 / (a * a);
        let bt = 1.0 / (b * b);
        Self {
            u: c2 * at + s2 * bt,
            v: s2 * at + c2 * bt,
            w: 2.0 * c * s * (at - bt),
            ab: a * b,
        }
    }

    #[inline(always)]
    fn eval(&self, x: f32, y: f32) -> f32 {
        self.u * x * x + self.v * y * y + self.w * x * y
    }

    /// Largest `|y|` reached by the ellipse.
    fn half_height(&self) -> f32 {
        self.ab * self.u.sqrt()
    }

    /// Left and right `x` where the ellipse crosses row `y`.
    fn row(&self, y: f32) -> Option<(f32, f32)> {
        let by = self.w * y;
        let disc = by * by - 4.0 * self.u * (self.v * y * y - 1.0);
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let den = 2.0 * self.u;
        Some(((-by - root) / den, (-by + root) / den))
    }
}

impl Rasterizer<'_> {
    /// Outline of an ellipse with semi-axes `size`, rotated by `rotation` radians.
    ///
    /// - `thickness == 1`: the upper arcs are walked from the leftmost and rightmost
    ///   points to the top, stepping the dominant axis and testing the implicit
    ///   inequality to decide when to step the other; the lower arcs are their point
    ///   reflections.
    /// - `thickness > 1`: every row inside the outer ellipse is filled between the
    ///   outer and inner boundaries.
    pub fn draw_oval_line(
        &mut self,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
        thickness: i32,
    ) {
        if thickness < 1 || size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        // TODO: axis-aligned outline (rotation == 0).
        if rotation == 0.0 {
            return;
        }
        if thickness == 1 {
            self.walk_oval(center, Quadric::new(size.x, size.y, rotation), color);
        } else {
            self.fill_oval_ring(center, size, rotation, color, thickness);
        }
    }

    pub fn draw_oval_shape_line(&mut self, oval: Oval, rotation: f32, color: Color, thickness: i32) {
        self.draw_oval_line(oval.position, oval.size, rotation, color, thickness);
    }

    fn walk_oval(&mut self, center: Vec2, q: Quadric, color: Color) {
        let Quadric { u, v, w, ab } = q;

        // Extremes: leftmost/rightmost (vertical tangent) and top (horizontal tangent).
        let left_x = -v.sqrt() * ab;
        let left_y = -w * left_x * 0.5 / v;
        let top_y = u.sqrt() * ab;
        let top_x = -w * top_y * 0.5 / u;

        // Points where the tangent slope is +1 (upper-left arc) and -1 (upper-right arc).
        let s = -(2.0 * u + w) / (2.0 * v + w);
        let t = (2.0 * u - w) / (2.0 * v - w);
        let incline_x = -1.0 / (u + v * s * s + w * s).sqrt();
        let incline_y = s * incline_x;
        let decline_x = 1.0 / (u + v * t * t + w * t).sqrt();
        let decline_y = t * decline_x;

        let (mut x1, mut y1) = (left_x, left_y);
        let (mut x2, mut y2) = (-left_x, -left_y);

        self.plot_mirrored(center, x1, y1, color);
        self.plot_mirrored(center, x2, y2, color);
        self.plot_mirrored(center, top_x, top_y, color);

        // Steep sections: step y, pull x inward once outside.
        while y1 < incline_y {
            self.plot_mirrored(center, x1, y1, color);
            y1 += 1.0;
            if q.eval(x1, y1) > 1.0 {
                x1 += 1.0;
            }
        }
        while y2 < decline_y {
            self.plot_mirrored(center, x2, y2, color);
            y2 += 1.0;
            if q.eval(x2, y2) > 1.0 {
                x2 -= 1.0;
            }
        }

        // Shallow sections: step x, raise y while the midpoint above is inside.
        while x1 < top_x {
            self.plot_mirrored(center, x1, y1, color);
            x1 += 1.0;
            if q.eval(x1, y1 + 0.5) < 1.0 {
                y1 += 1.0;
            }
        }
        while x2 > top_x {
            self.plot_mirrored(center, x2, y2, color);
            x2 -= 1.0;
            if q.eval(x2, y2 + 0.5) < 1.0 {
                y2 += 1.0;
            }
        }
    }

    fn fill_oval_ring(
        &mut self,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
        thickness: i32,
    ) {
        let half = 0.5 * thickness as f32;
        let outer = Quadric::new(size.x + half, size.y + half, rotation);
        let inner = (size.x > half && size.y > half)
            .then(|| Quadric::new(size.x - half, size.y - half, rotation));

        let rows = outer.half_height() as i32;
        for dy in -rows..=rows {
            let y = dy as f32;
            let Some((outer_left, outer_right)) = outer.row(y) else {
                continue;
            };
            let row = (center.y + y) as i32;
            match inner.and_then(|q| q.row(y)) {
                Some((inner_left, inner_right)) => {
                    self.span(row, center.x + outer_left, center.x + inner_left, color);
                    self.span(row, center.x + inner_right, center.x + outer_right, color);
                }
                None => self.span(row, center.x + outer_left, center.x + outer_right, color),
            }
        }
    }

    #[inline(always)]
    fn plot_mirrored(&mut self, center: Vec2, x: f32, y: f32, color: Color) {
        self.plot((center.x + x) as i32, (center.y + y) as i32, color);
        self.plot((center.x - x) as i32, (center.y - y) as i32, color);
    }
}
