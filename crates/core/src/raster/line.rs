//! Lines: single-cell Bresenham and thick strokes.

use super::Rasterizer;
use crate::types::{Color, IVec2, Line, Vec2};

impl Rasterizer<'_> {
    /// Bresenham line from `from` to `to`, both endpoints included.
    ///
    /// Lines entirely beyond one edge of the buffer are skipped without walking them.
    pub fn draw_line(&mut self, from: IVec2, to: IVec2, color: Color) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        if (from.x < 0 && to.x < 0)
            || (from.y < 0 && to.y < 0)
            || (from.x >= w && to.x >= w)
            || (from.y >= h && to.y >= h)
        {
            return;
        }

        let dx = (to.x as i64 - from.x as i64).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let dy = -(to.y as i64 - from.y as i64).abs();
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut p = from;

        loop {
            self.set_pixel(p, color);
            if p == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                p.x += sx;
            }
            if e2 <= dx {
                err += dx;
                p.y += sy;
            }
        }
    }

    /// [`Rasterizer::draw_line`] with endpoints snapped to cells.
    pub fn draw_line_shape(&mut self, line: Line, color: Color) {
        self.draw_line(line.points[0].into(), line.points[1].into(), color);
    }

    /// Line stroked `thickness` cells wide.
    ///
    /// Axis-aligned segments become a solid band centered on the segment. Oblique
    /// segments are filled as a quad (two triangles) offset by half the thickness on
    /// each side, without caps.
    pub fn draw_line_ex(&mut self, from: Vec2, to: Vec2, color: Color, thickness: i32) {
        if thickness < 1 {
            return;
        }
        if thickness == 1 {
            self.draw_line(from.into(), to.into(), color);
            return;
        }

        let p0 = IVec2::from(from);
        let p1 = IVec2::from(to);
        let half = (thickness as f32 * 0.5) as i32;

        if p0.x == p1.x {
            let (bottom, top) = (p0.y.min(p1.y), p0.y.max(p1.y));
            let left = p0.x - half;
            for y in bottom..=top {
                for x in left..left + thickness {
                    self.plot(x, y, color);
                }
            }
            return;
        }

        if p0.y == p1.y {
            let (left, right) = (p0.x.min(p1.x), p0.x.max(p1.x));
            let bottom = p0.y - half;
            for y in bottom..bottom + thickness {
                for x in left..=right {
                    self.plot(x, y, color);
                }
            }
            return;
        }

        let offset = ((to - from).normalize() * (0.5 * thickness as f32)).perp();
        let top_left = from + offset;
        let top_right = to + offset;
        let bottom_left = from - offset;
        let bottom_right = to - offset;

        self.draw_triangle(top_left, top_right, bottom_right, color);
        self.draw_triangle(top_left, bottom_right, bottom_left, color);
    }

    pub fn draw_line_shape_ex(&mut self, line: Line, color: Color, thickness: i32) {
        self.draw_line_ex(line.points[0], line.points[1], color, thickness);
    }
}
