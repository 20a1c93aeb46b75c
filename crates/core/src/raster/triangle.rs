//! Filled triangles.
//!
//! Vertices are snapped to cells by truncation, then the triangle is filled as a set of
//! inclusive row (or column) spans bounded by its edges. Edges are evaluated relative to
//! one of their endpoints so that the endpoint itself lands exactly on its cell.

use super::Rasterizer;
use crate::types::{Color, IVec2, Mat2, Triangle, Vec2};

/// Twice the signed area of `abc`.
#[inline]
fn cross(a: IVec2, b: IVec2, c: IVec2) -> i64 {
    let (abx, aby) = (b.x as i64 - a.x as i64, b.y as i64 - a.y as i64);
    let (acx, acy) = (c.x as i64 - a.x as i64, c.y as i64 - a.y as i64);
    abx * acy - aby * acx
}

/// `a - b` without overflowing for far off-screen coordinates.
#[inline]
fn delta(a: i32, b: i32) -> f32 {
    (a as i64 - b as i64) as f32
}

/// Slope of `a → b` as change in `x` per unit `y`.
#[inline]
fn dx_dy(a: IVec2, b: IVec2) -> f32 {
    delta(a.x, b.x) / delta(a.y, b.y)
}

/// Slope of `a → b` as change in `y` per unit `x`.
#[inline]
fn dy_dx(a: IVec2, b: IVec2) -> f32 {
    delta(a.y, b.y) / delta(a.x, b.x)
}

/// The first vertex pair sharing a coordinate, with the remaining vertex last.
fn shared_pair(p: &[IVec2; 3], key: impl Fn(IVec2) -> i32) -> Option<(usize, usize, usize)> {
    [(0, 1, 2), (1, 2, 0), (2, 0, 1)]
        .into_iter()
        .find(|&(a, b, _)| key(p[a]) == key(p[b]))
}

impl Rasterizer<'_> {
    /// Fill the triangle `p0 p1 p2`.
    ///
    /// A color with every channel zero draws nothing, as does a triangle whose snapped
    /// vertices are collinear.
    pub fn draw_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
        if color.is_clear() {
            return;
        }
        self.fill_triangle([p0.into(), p1.into(), p2.into()], false, color);
    }

    /// Fill `triangle`, rotating its relative points about its position first.
    ///
    /// Unlike [`Rasterizer::draw_triangle`], triangles with a vertical edge are filled
    /// column by column.
    pub fn draw_triangle_shape(&mut self, triangle: Triangle, rotation: f32, color: Color) {
        if color.is_clear() {
            return;
        }
        let rot = Mat2::rotation(rotation);
        let place = |p: Vec2| -> IVec2 {
            let p = if rotation != 0.0 { rot * p } else { p };
            (p + triangle.position).into()
        };
        let [a, b, c] = triangle.points;
        self.fill_triangle([place(a), place(b), place(c)], true, color);
    }

    fn fill_triangle(&mut self, p: [IVec2; 3], columns_first: bool, color: Color) {
        if cross(p[0], p[1], p[2]) == 0 {
            return;
        }

        if columns_first {
            if let Some((a, b, m)) = shared_pair(&p, |v| v.x) {
                let (a, b) = if p[a].y > p[b].y { (a, b) } else { (b, a) };
                self.fill_column_flat(p[a], p[b], p[m], color);
                return;
            }
        }

        if let Some((a, b, m)) = shared_pair(&p, |v| v.y) {
            let (a, b) = if p[a].x < p[b].x { (a, b) } else { (b, a) };
            self.fill_row_flat(p[a], p[b], p[m], color);
            return;
        }

        self.fill_general(p, color);
    }

    /// `left` and `right` share a row; `apex` is the third vertex.
    fn fill_row_flat(&mut self, left: IVec2, right: IVec2, apex: IVec2, color: Color) {
        let ml = dx_dy(left, apex);
        let mr = dx_dy(right, apex);
        let (bottom, top) = (apex.y.min(left.y), apex.y.max(left.y));
        for h in bottom.max(0)..=top.min(self.height() as i32 - 1) {
            let dh = delta(h, apex.y);
            self.span(h, apex.x as f32 + ml * dh, apex.x as f32 + mr * dh, color);
        }
    }

    /// `upper` and `lower` share a column; `apex` is the third vertex.
    fn fill_column_flat(&mut self, upper: IVec2, lower: IVec2, apex: IVec2, color: Color) {
        let mu = dy_dx(upper, apex);
        let ml = dy_dx(lower, apex);
        let max_row = self.height() as i32 - 1;
        let (left, right) = (apex.x.min(upper.x), apex.x.max(upper.x));
        for w in left.max(0)..=right.min(self.width() as i32 - 1) {
            let dw = delta(w, apex.x);
            let bottom = (apex.y as f32 + ml * dw) as i32;
            let top = (apex.y as f32 + mu * dw).floor() as i32;
            for h in bottom.max(0)..=top.min(max_row) {
                self.plot(w, h, color);
            }
        }
    }

    /// No two vertices share a row: split at the middle vertex.
    fn fill_general(&mut self, p: [IVec2; 3], color: Color) {
        let mut a = 0;
        let mut b = 0;
        for i in 1..3 {
            if p[i].y > p[a].y {
                a = i;
            }
            if p[i].y < p[b].y {
                b = i;
            }
        }
        let (top, bottom, mid) = (p[a], p[b], p[3 - a - b]);

        let m_top = dx_dy(top, mid);
        let m_bottom = dx_dy(bottom, mid);
        let m_long = dx_dy(top, bottom);

        let long_x = |h: i32| bottom.x as f32 + m_long * delta(h, bottom.y);
        let top_x = |h: i32| mid.x as f32 + m_top * delta(h, mid.y);
        let bottom_x = |h: i32| mid.x as f32 + m_bottom * delta(h, mid.y);

        // The long edge is on the left when it passes the middle row left of the middle vertex.
        let long_on_left = long_x(mid.y) <= mid.x as f32;

        let (first, last) = (bottom.y.max(0), top.y.min(self.height() as i32 - 1));
        for h in first..mid.y.min(last + 1) {
            let (l, r) = if long_on_left {
                (long_x(h), bottom_x(h))
            } else {
                (bottom_x(h), long_x(h))
            };
            self.span(h, l, r, color);
        }
        for h in mid.y.max(first)..=last {
            let (l, r) = if long_on_left {
                (long_x(h), top_x(h))
            } else {
                (top_x(h), long_x(h))
            };
            self.span(h, l, r, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::cross;
    use crate::framebuffer::FrameBuffer;
    use crate::types::{Color, IVec2, Triangle, Vec2};

    fn lit(fb: &FrameBuffer) -> HashSet<(i32, i32)> {
        let mut out = HashSet::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.pixel(x, y) != Some(Color::BLACK) {
                    out.insert((x, y));
                }
            }
        }
        out
    }

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn cross_sign_follows_winding() {
        let (a, b, c) = (IVec2::new(0, 0), IVec2::new(4, 0), IVec2::new(0, 3));
        assert_eq!(cross(a, b, c), 12);
        assert_eq!(cross(a, c, b), -12);
        assert_eq!(cross(a, a, c), 0);
    }

    #[test]
    fn flat_bottom_triangle_rows_are_inclusive() {
        let mut fb = FrameBuffer::with_size(12, 12);
        fb.rasterizer()
            .draw_triangle(v(0.0, 0.0), v(10.0, 0.0), v(5.0, 10.0), Color::WHITE);
        let cells = lit(&fb);
        for x in 0..=10 {
            assert!(cells.contains(&(x, 0)), "missing ({x},0)");
        }
        assert!(!cells.contains(&(11, 0)));
        assert!(cells.contains(&(5, 10)));
        assert_eq!(cells.iter().filter(|(_, y)| *y == 10).count(), 1);
    }

    #[test]
    fn general_triangle_reaches_every_vertex() {
        let mut fb = FrameBuffer::with_size(12, 12);
        fb.rasterizer()
            .draw_triangle(v(0.0, 0.0), v(8.0, 3.0), v(2.0, 9.0), Color::WHITE);
        let cells = lit(&fb);
        assert!(cells.contains(&(0, 0)));
        assert!(cells.contains(&(8, 3)));
        assert!(cells.contains(&(2, 9)));
        assert!(cells.contains(&(3, 4)));
        assert!(!cells.contains(&(8, 8)));
        assert!(cells.iter().all(|(x, y)| (0..=8).contains(x) && (0..=9).contains(y)));
    }

    #[test]
    fn vertex_order_does_not_matter() {
        let pts = [v(1.0, 2.0), v(14.0, 6.0), v(5.0, 13.0)];
        let mut reference = None;
        for [i, j, k] in [[0, 1, 2], [2, 1, 0], [1, 0, 2], [1, 2, 0], [2, 0, 1], [0, 2, 1]] {
            let mut fb = FrameBuffer::with_size(16, 16);
            fb.rasterizer().draw_triangle(pts[i], pts[j], pts[k], Color::WHITE);
            let cells = lit(&fb);
            match &reference {
                None => reference = Some(cells),
                Some(r) => assert_eq!(r, &cells),
            }
        }
    }

    #[test]
    fn degenerate_triangles_draw_nothing() {
        let mut fb = FrameBuffer::with_size(12, 12);
        let mut r = fb.rasterizer();
        r.draw_triangle(v(0.0, 0.0), v(5.0, 5.0), v(10.0, 10.0), Color::WHITE);
        r.draw_triangle(v(3.0, 3.0), v(3.0, 3.0), v(8.0, 1.0), Color::WHITE);
        r.draw_triangle(v(1.0, 4.0), v(9.0, 4.0), v(5.0, 4.9), Color::WHITE);
        assert!(lit(&fb).is_empty());
    }

    #[test]
    fn clear_color_draws_nothing() {
        let mut fb = FrameBuffer::with_size(12, 12);
        fb.rasterizer()
            .draw_triangle(v(0.0, 0.0), v(10.0, 0.0), v(5.0, 10.0), Color::TRANSPARENT);
        assert!(lit(&fb).is_empty());
    }

    #[test]
    fn shape_with_vertical_edge_fills_by_columns() {
        let mut fb = FrameBuffer::with_size(24, 24);
        let tri = Triangle::new(v(10.0, 10.0), [v(0.0, 0.0), v(0.0, 8.0), v(4.0, 4.0)]);
        fb.rasterizer().draw_triangle_shape(tri, 0.0, Color::WHITE);
        let cells = lit(&fb);
        assert_eq!(cells.len(), 9 + 7 + 5 + 3 + 1);
        assert!((10..=18).all(|y| cells.contains(&(10, y))));
        assert!(cells.contains(&(14, 14)));
    }

    #[test]
    fn rotated_shape_stays_around_its_position() {
        let mut fb = FrameBuffer::with_size(40, 40);
        let tri = Triangle::new(
            v(20.0, 20.0),
            [v(-5.0, -5.0), v(5.0, -5.0), v(0.0, 5.0)],
        );
        fb.rasterizer()
            .draw_triangle_shape(tri, std::f32::consts::FRAC_PI_2, Color::WHITE);
        let cells = lit(&fb);
        assert!(cells.contains(&(20, 20)));
        assert!(cells.iter().all(|(x, y)| (14..=26).contains(x) && (14..=26).contains(y)));
    }

    #[test]
    fn far_off_screen_vertices_are_clipped() {
        let far = IVec2::new(-2_000_000_000, 0);
        assert_eq!(
            cross(far, IVec2::new(2_000_000_000, 1), IVec2::new(5, 10)),
            37_999_999_995
        );

        let mut fb = FrameBuffer::with_size(20, 20);
        fb.rasterizer()
            .draw_triangle(v(-2e9, 0.0), v(2e9, 1.0), v(5.0, 10.0), Color::WHITE);
        let cells = lit(&fb);
        for x in 0..20 {
            assert!(cells.contains(&(x, 5)), "missing ({x},5)");
        }
        assert!(cells.iter().all(|(_, y)| *y <= 10));
    }

    #[test]
    fn far_off_screen_column_edge_is_clipped() {
        let mut fb = FrameBuffer::with_size(20, 20);
        fb.rasterizer().draw_triangle_shape(
            Triangle::new(
                v(0.0, 0.0),
                [v(-2e9, -2e9), v(-2e9, 2e9), v(10.0, 5.0)],
            ),
            0.0,
            Color::WHITE,
        );
        let cells = lit(&fb);
        assert!(cells.contains(&(5, 5)));
        assert!(cells.iter().all(|(x, _)| *x <= 10));
    }
}
