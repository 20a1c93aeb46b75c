//! Center-anchored rectangles, filled and outlined.

use super::Rasterizer;
use crate::types::{Color, Mat2, Rect, Vec2};

/// Corners of a `size` rectangle rotated about `center`: top-left, top-right,
/// bottom-right, bottom-left.
fn corners(center: Vec2, half: Vec2, rotation: f32) -> [Vec2; 4] {
    let rot = Mat2::rotation(rotation);
    [
        Vec2::new(-half.x, half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(-half.x, -half.y),
    ]
    .map(|p| rot * p + center)
}

impl Rasterizer<'_> {
    /// Fill a rectangle of `size` centered on `center`.
    ///
    /// Unrotated rectangles cover columns `[cx - w/2, cx + w/2)` and rows
    /// `[cy - h/2, cy + h/2)` (bounds truncated), clipped to the buffer, each cell
    /// written once. Rotated rectangles are split along the TL–BR diagonal.
    pub fn draw_rect(&mut self, center: Vec2, size: Vec2, rotation: f32, color: Color) {
        let half = size * 0.5;
        if rotation == 0.0 {
            let min_x = ((center.x - half.x) as i32).max(0);
            let max_x = ((center.x + half.x) as i32).min(self.width() as i32);
            let min_y = ((center.y - half.y) as i32).max(0);
            let max_y = ((center.y + half.y) as i32).min(self.height() as i32);
            for y in min_y..max_y {
                for x in min_x..max_x {
                    self.plot(x, y, color);
                }
            }
            return;
        }

        let [tl, tr, br, bl] = corners(center, half, rotation);
        self.draw_triangle(tl, tr, br, color);
        self.draw_triangle(tl, br, bl, color);
    }

    pub fn draw_rect_shape(&mut self, rect: Rect, rotation: f32, color: Color) {
        self.draw_rect(rect.position, rect.size, rotation, color);
    }

    /// Rectangle outline `thickness` cells wide.
    pub fn draw_rect_line(
        &mut self,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
        thickness: i32,
    ) {
        if thickness < 1 {
            return;
        }
        match (rotation == 0.0, thickness == 1) {
            (true, true) => self.rect_edges(center, size, color),
            (true, false) => self.rect_bands(center, size, color, thickness),
            (false, true) => {
                let [tl, tr, br, bl] = corners(center, size * 0.5, rotation);
                let offset = (tr - br).normalize();
                self.draw_line(tl.into(), tr.into(), color);
                self.draw_line((tr - offset).into(), (br + offset).into(), color);
                self.draw_line(br.into(), bl.into(), color);
                self.draw_line((bl + offset).into(), (tl - offset).into(), color);
            }
            (false, false) => {
                let half = size * 0.5;
                let t = 0.5 * thickness as f32;
                let outer = corners(center, Vec2::new(half.x + t, half.y + t), rotation);
                let inner = corners(center, Vec2::new(half.x - t, half.y - t), rotation);
                for i in 0..4 {
                    let j = (i + 1) % 4;
                    self.draw_triangle(outer[i], outer[j], inner[j], color);
                    self.draw_triangle(outer[i], inner[i], inner[j], color);
                }
            }
        }
    }

    pub fn draw_rect_shape_line(&mut self, rect: Rect, rotation: f32, color: Color, thickness: i32) {
        self.draw_rect_line(rect.position, rect.size, rotation, color, thickness);
    }

    /// Single-cell edges; the side columns stop short of the top and bottom rows.
    fn rect_edges(&mut self, center: Vec2, size: Vec2, color: Color) {
        let half = size * 0.5;
        let bottom = (center.y - half.y) as i32;
        let top = (center.y + half.y) as i32;
        let left = (center.x - half.x) as i32;
        let right = (center.x + half.x) as i32;

        for y in bottom + 1..top {
            self.plot(left, y, color);
            self.plot(right, y, color);
        }
        for x in left..=right {
            self.plot(x, top, color);
            self.plot(x, bottom, color);
        }
    }

    /// Bottom band paired with the top band, then left band paired with the right band.
    fn rect_bands(&mut self, center: Vec2, size: Vec2, color: Color, thickness: i32) {
        let t = thickness as f32;
        let rise = size.y as i32;
        let run = size.x as i32 + 1;

        let bottom = (center.y - (size.y + t) * 0.5) as i32;
        let top = bottom + thickness - 1;
        let left = (center.x - (size.x + t) * 0.5) as i32;
        let right = (center.x + (size.x + t) * 0.5) as i32;
        for y in bottom..=top {
            for x in left..=right {
                self.plot(x, y, color);
                self.plot(x, y + rise, color);
            }
        }

        let bottom = top + 1;
        let top = (bottom as f32 + size.y - t - 1.0) as i32;
        let right = left + thickness - 1;
        for y in bottom..=top {
            for x in left..=right {
                self.plot(x, y, color);
                self.plot(x + run, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::framebuffer::FrameBuffer;
    use crate::types::{Color, Rect, Vec2};

    const FAINT_RED: Color = Color::new(255, 0, 0, 51);

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

    /// Every lit cell was blended exactly once.
    fn written_once(fb: &FrameBuffer) -> bool {
        fb.pixels()
            .iter()
            .all(|c| *c == Color::BLACK || c.r == 51)
    }

    #[test]
    fn fill_covers_half_open_box() {
        let mut fb = FrameBuffer::with_size(10, 10);
        fb.rasterizer()
            .draw_rect(Vec2::new(5.0, 5.0), Vec2::new(4.0, 4.0), 0.0, FAINT_RED);
        let cells = lit(&fb);
        assert_eq!(cells.len(), 16);
        assert!(cells.iter().all(|(x, y)| (3..7).contains(x) && (3..7).contains(y)));
        assert!(written_once(&fb));
    }

    #[test]
    fn fill_is_clipped_to_the_buffer() {
        let mut fb = FrameBuffer::with_size(10, 10);
        fb.rasterizer()
            .draw_rect_shape(Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0)), 0.0, Color::WHITE);
        assert_eq!(lit(&fb).len(), 25);
    }

    #[test]
    fn rotated_fill_stays_near_center() {
        let mut fb = FrameBuffer::with_size(40, 40);
        fb.rasterizer().draw_rect(
            Vec2::new(20.0, 20.0),
            Vec2::new(10.0, 10.0),
            std::f32::consts::FRAC_PI_4,
            Color::WHITE,
        );
        let cells = lit(&fb);
        assert!(cells.contains(&(20, 20)));
        assert!(cells.contains(&(20, 25)));
        assert!(cells.iter().all(|(x, y)| (12..=28).contains(x) && (12..=28).contains(y)));
    }

    #[test]
    fn thin_outline_touches_corners_once() {
        let mut fb = FrameBuffer::with_size(20, 20);
        fb.rasterizer().draw_rect_line(
            Vec2::new(10.0, 10.0),
            Vec2::new(8.0, 6.0),
            0.0,
            FAINT_RED,
            1,
        );
        let cells = lit(&fb);
        assert_eq!(cells.len(), 2 * 9 + 2 * 5);
        for corner in [(6, 7), (14, 7), (6, 13), (14, 13)] {
            assert!(cells.contains(&corner));
        }
        assert!(!cells.contains(&(10, 10)));
        assert!(written_once(&fb));
    }

    #[test]
    fn thick_outline_is_a_hollow_ring() {
        let mut fb = FrameBuffer::with_size(20, 20);
        fb.rasterizer().draw_rect_line(
            Vec2::new(10.0, 10.0),
            Vec2::new(8.0, 6.0),
            0.0,
            FAINT_RED,
            2,
        );
        let cells = lit(&fb);
        let mut expected = HashSet::new();
        for y in 6..=13 {
            for x in 5..=15 {
                if !((7..=13).contains(&x) && (8..=11).contains(&y)) {
                    expected.insert((x, y));
                }
            }
        }
        assert_eq!(cells, expected);
        assert!(written_once(&fb));
    }

    #[test]
    fn rotated_outlines_leave_the_center_empty() {
        for thickness in [1, 3] {
            let mut fb = FrameBuffer::with_size(40, 40);
            fb.rasterizer().draw_rect_line(
                Vec2::new(20.0, 20.0),
                Vec2::new(16.0, 12.0),
                0.3,
                Color::WHITE,
                thickness,
            );
            let cells = lit(&fb);
            assert!(cells.len() > 40, "thickness {thickness}");
            assert!(!cells.contains(&(20, 20)), "thickness {thickness}");
        }
    }

    #[test]
    fn non_positive_thickness_draws_nothing() {
        let mut fb = FrameBuffer::with_size(20, 20);
        let mut r = fb.rasterizer();
        r.draw_rect_line(Vec2::new(10.0, 10.0), Vec2::new(8.0, 6.0), 0.0, Color::WHITE, 0);
        r.draw_rect_line(Vec2::new(10.0, 10.0), Vec2::new(8.0, 6.0), 0.4, Color::WHITE, -1);
        assert!(lit(&fb).is_empty());
    }
}
