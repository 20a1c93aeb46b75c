//! Animated scene exercising every primitive.
//!
//! The grid is split into a 3x2 layout; each panel animates one family of primitives
//! from the elapsed time, so the output only depends on the clock.

use std::f32::consts::TAU;

use crate::core::Rasterizer;
use crate::engine::{Control, Frame, Scene};
use crate::types::{Circle, Color, IVec2, Line, Oval, Rect, Triangle, Vec2};

/// Radians per second for the rotating panels.
const SPIN: f32 = 0.6;

#[derive(Debug, Clone, Default)]
pub struct DemoScene {
    frames: u64,
}

impl DemoScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw the scene at time `t` seconds.
    pub fn draw(&self, r: &mut Rasterizer<'_>, t: f32) {
        let (w, h) = (r.width() as f32, r.height() as f32);
        let panel = Vec2::new(w / 3.0, h / 2.0);
        let center = |col: usize, row: usize| {
            Vec2::new(panel.x * (col as f32 + 0.5), panel.y * (row as f32 + 0.5))
        };
        let extent = panel.x.min(panel.y) * 0.4;
        let angle = (t * SPIN) % TAU;

        triangles(r, center(0, 1), extent, angle);
        circles(r, center(1, 1), extent, t);
        ovals(r, center(2, 1), extent, angle);
        rects(r, center(0, 0), extent, angle);
        lines(r, center(1, 0), extent, angle);
        blending(r, center(2, 0), extent, t);
    }
}

impl Scene for DemoScene {
    fn update(&mut self, frame: &mut Frame<'_>) -> Control {
        let t = frame.elapsed().as_secs_f32();
        self.draw(frame.raster(), t);
        self.frames += 1;
        Control::Continue
    }
}

fn triangles(r: &mut Rasterizer<'_>, c: Vec2, e: f32, angle: f32) {
    let tri = Triangle::new(
        c,
        [
            Vec2::new(-e, -e * 0.6),
            Vec2::new(e, -e * 0.6),
            Vec2::new(0.0, e),
        ],
    );
    r.draw_triangle_shape(tri, angle, Color::ORANGE);
    r.draw_triangle(
        c + Vec2::new(-e * 0.3, -e * 0.2),
        c + Vec2::new(e * 0.3, -e * 0.2),
        c + Vec2::new(0.0, e * 0.4),
        Color::new(0, 0, 255, 160),
    );
}

fn circles(r: &mut Rasterizer<'_>, c: Vec2, e: f32, t: f32) {
    let pulse = 0.75 + 0.25 * (t * 2.0).sin();
    r.draw_circle_shape(Circle::new(c, e * pulse), Color::CYAN);
    r.draw_circle_shape_line(Circle::new(c, e * 0.5), Color::MAGENTA, 3);
    r.draw_circle(c, e * 0.15, Color::WHITE);
}

fn ovals(r: &mut Rasterizer<'_>, c: Vec2, e: f32, angle: f32) {
    // Keep clear of the unrotated case, which draws nothing.
    let angle = angle + 0.01;
    r.draw_oval_line(c, Vec2::new(e, e * 0.45), angle, Color::GREEN, 1);
    r.draw_oval_shape_line(
        Oval::new(c, Vec2::new(e * 0.55, e * 0.3)),
        -angle,
        Color::YELLOW,
        2,
    );
}

fn rects(r: &mut Rasterizer<'_>, c: Vec2, e: f32, angle: f32) {
    let size = Vec2::new(e * 1.6, e);
    r.draw_rect(c, size * 0.35, 0.0, Color::GRAY);
    r.draw_rect_shape(Rect::new(c, size * 0.5), angle, Color::RED);
    r.draw_rect_line(c, size, angle, Color::WHITE, 1);
    r.draw_rect_shape_line(Rect::new(c, size * 1.2), 0.0, Color::BLUE, 2);
}

fn lines(r: &mut Rasterizer<'_>, c: Vec2, e: f32, angle: f32) {
    for i in 0..8 {
        let a = angle + i as f32 * TAU / 8.0;
        let tip = c + Vec2::new(a.cos(), a.sin()) * e;
        r.draw_line(IVec2::from(c), IVec2::from(tip), Color::rgb(200, 200, 200));
    }
    let dir = Vec2::new(angle.cos(), angle.sin()) * (e * 0.8);
    r.draw_line_shape_ex(Line::new(c - dir, c + dir), Color::GREEN, 3);
    r.draw_line_ex(
        c + Vec2::new(-e, -e * 0.9),
        c + Vec2::new(e, -e * 0.9),
        Color::YELLOW,
        2,
    );
    r.draw_line_shape(
        Line::new(c + Vec2::new(-e, e * 0.9), c + Vec2::new(e, e * 0.9)),
        Color::RED,
    );
}

/// Overlapping translucent boxes; their sums land between palette colors and pick up
/// shade glyphs.
fn blending(r: &mut Rasterizer<'_>, c: Vec2, e: f32, t: f32) {
    let wobble = Vec2::new(t.sin(), t.cos()) * (e * 0.3);
    let size = Vec2::new(e * 1.2, e * 1.2);
    let red = c - Vec2::new(e * 0.3, 0.0) + wobble;
    let green = c + Vec2::new(e * 0.3, 0.0) - wobble;
    let blue = c + Vec2::new(0.0, e * 0.3);
    r.draw_rect(red, size, 0.0, Color::new(255, 0, 0, 120));
    r.draw_rect(green, size, 0.0, Color::new(0, 255, 0, 120));
    r.draw_rect(blue, size, 0.0, Color::new(0, 0, 255, 120));
    for x in 0..(e * 2.0) as i32 {
        let level = (x as f32 / (e * 2.0) * 255.0) as u8;
        let base = IVec2::from(c - Vec2::new(e, e * 0.95));
        r.set_pixel(base + IVec2::new(x, 0), Color::rgb(level, level, level));
    }
}
