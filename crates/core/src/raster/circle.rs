//! Circle outline and thick circle ring.

use super::Rasterizer;
use crate::types::{Circle, Color, Vec2};

impl Rasterizer<'_> {
    /// Midpoint circle outline using 8-way symmetry.
    ///
    /// The radius-tracking coordinate steps inward once `x² + y² > radius² + 1`, which
    /// biases the boundary slightly outward.
    pub fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let mut x: i32 = 0;
        let mut y = radius as i32;
        let limit = radius * radius + 1.0;

        self.plot_offset(center, 0, y, color);
        self.plot_offset(center, y, 0, color);
        self.plot_offset(center, 0, -y, color);
        self.plot_offset(center, -y, 0, color);

        loop {
            x += 1;
            if (x as i64 * x as i64 + y as i64 * y as i64) as f32 > limit {
                y -= 1;
            }

            self.plot_offset(center, x, y, color);
            self.plot_offset(center, -x, -y, color);
            self.plot_offset(center, -x, y, color);
            self.plot_offset(center, x, -y, color);

            if x > y {
                break;
            }

            self.plot_offset(center, y, x, color);
            self.plot_offset(center, -y, -x, color);
            self.plot_offset(center, -y, x, color);
            self.plot_offset(center, y, -x, color);
        }
    }

    pub fn draw_circle_shape(&mut self, circle: Circle, color: Color) {
        self.draw_circle(circle.position, circle.radius, color);
    }

    /// Ring between `radius - thickness/2` and `radius + thickness/2`.
    ///
    /// Each row offset fills the span between the inner and outer circle, mirrored into
    /// all four quadrants. Rows past the inner circle's extent are bounded by the outer
    /// circle only.
    pub fn draw_circle_line(&mut self, center: Vec2, radius: f32, color: Color, thickness: i32) {
        if thickness < 1 {
            return;
        }
        let half = 0.5 * thickness as f32;
        let inner = radius - half;
        let outer = radius + half;
        let inner_sq = inner * inner;
        let outer_sq = outer * outer;

        let mut d: i32 = 0;

        let upper = inner as i32;
        while d < upper {
            let dd = d as f32 * d as f32;
            let left = (inner_sq - dd).sqrt() as i32;
            let right = (outer_sq - dd).sqrt() as i32;
            for x in left..=right {
                self.mirror4(center, x, d, color);
            }
            d += 1;
        }

        let upper = outer as i32;
        while d <= upper {
            let right = (outer_sq - d as f32 * d as f32).sqrt() as i32;
            for x in 0..=right {
                self.mirror4(center, x, d, color);
            }
            d += 1;
        }
    }

    pub fn draw_circle_shape_line(&mut self, circle: Circle, color: Color, thickness: i32) {
        self.draw_circle_line(circle.position, circle.radius, color, thickness);
    }

    #[inline(always)]
    pub(crate) fn plot_offset(&mut self, center: Vec2, dx: i32, dy: i32, color: Color) {
        self.plot(
            (center.x + dx as f32) as i32,
            (center.y + dy as f32) as i32,
            color,
        );
    }

    #[inline(always)]
    fn mirror4(&mut self, center: Vec2, dx: i32, dy: i32, color: Color) {
        self.plot_offset(center, dx, dy, color);
        self.plot_offset(center, dx, -dy, color);
        self.plot_offset(center, -dx, dy, color);
        self.plot_offset(center, -dx, -dy, color);
    }
}
