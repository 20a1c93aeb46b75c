//! Primitive shape values.
//!
//! These carry geometry only; they are consumed by value by the rasterizer and never
//! retained.

use crate::geometry::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    pub points: [Vec2; 2],
}

impl Line {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { points: [from, to] }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub position: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// Center-anchored rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }
}

/// Triangle with vertices relative to `position`.
///
/// Rotation is applied to the relative points before `position` is added.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    pub position: Vec2,
    pub points: [Vec2; 3],
}

impl Triangle {
    pub fn new(position: Vec2, points: [Vec2; 3]) -> Self {
        Self { position, points }
    }
}

/// Ellipse centered at `position` with semi-axes `size.x` and `size.y`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oval {
    pub position: Vec2,
    pub size: Vec2,
}

impl Oval {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }
}
