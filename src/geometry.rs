//! Geometry primitives shared by panels, draggers and the runtime
//!
//! Root space is y-down with the origin at the top-left corner of the
//! reference resolution. Screen space is root space multiplied by the UI
//! render scale.
//!
//! All functions here are pure (no I/O, no side effects) and can be
//! tested independently of the rest of the runtime.

use serde::{Deserialize, Serialize};

// ============================================================================
// Vectors
// ============================================================================

/// A 2D vector or point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };
    pub const HALF: Vec2 = Vec2 { x: 0.5, y: 0.5 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise multiplication
    #[inline]
    pub fn scale(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }

    /// Linear interpolation between `a` and `b` per component
    #[inline]
    pub fn lerp(a: Vec2, b: Vec2, t: Vec2) -> Vec2 {
        Vec2::new(a.x + (b.x - a.x) * t.x, a.y + (b.y - a.y) * t.y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle (top-left origin, y-down)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning `(0, 0)` to `size`
    pub fn from_size(size: Vec2) -> Self {
        Self::new(0.0, 0.0, size.x, size.y)
    }

    /// Half-open containment test: left/top edges are inside, right/bottom are not
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Grow the rectangle by `amount` on every side
    pub fn inflate(&self, amount: f32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// True if `other` lies fully inside `self` (with a small epsilon for float drift)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }

    /// Offset needed to move `self` inside `bounds`.
    ///
    /// When `self` is larger than `bounds` on an axis, the result aligns the
    /// left/top edges.
    pub fn clamp_offset(&self, bounds: &Rect) -> Vec2 {
        fn axis(start: f32, len: f32, min: f32, max: f32) -> f32 {
            if len >= max - min || start < min {
                min - start
            } else if start + len > max {
                max - (start + len)
            } else {
                0.0
            }
        }

        Vec2::new(
            axis(self.x, self.width, bounds.x, bounds.right()),
            axis(self.y, self.height, bounds.y, bounds.bottom()),
        )
    }
}

// ============================================================================
// Axis
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

// ============================================================================
// RectTransform
// ============================================================================

/// Anchored placement of a rectangle inside a parent of known size
///
/// The anchors are normalized points in the parent (`(0,0)` top-left,
/// `(1,1)` bottom-right). When `anchor_min != anchor_max` the rectangle
/// stretches with the parent and `size_delta` is added on top of the
/// stretched size. The pivot is a normalized point inside the rectangle;
/// `anchored_position` is the offset of the pivot from the anchor reference
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectTransform {
    pub anchor_min: Vec2,
    pub anchor_max: Vec2,
    pub pivot: Vec2,
    pub anchored_position: Vec2,
    pub size_delta: Vec2,
    /// Uniform local scale applied around the pivot
    pub scale: f32,
}

impl Default for RectTransform {
    fn default() -> Self {
        Self {
            anchor_min: Vec2::HALF,
            anchor_max: Vec2::HALF,
            pivot: Vec2::HALF,
            anchored_position: Vec2::ZERO,
            size_delta: Vec2::new(100.0, 100.0),
            scale: 1.0,
        }
    }
}

impl RectTransform {
    /// Unscaled size of the rectangle for the given parent size
    pub fn size(&self, parent: Vec2) -> Vec2 {
        (self.anchor_max - self.anchor_min).scale(parent) + self.size_delta
    }

    /// Position of the pivot in parent space
    pub fn pivot_point(&self, parent: Vec2) -> Vec2 {
        let anchor_ref = Vec2::lerp(
            self.anchor_min.scale(parent),
            self.anchor_max.scale(parent),
            self.pivot,
        );
        anchor_ref + self.anchored_position
    }

    /// Unscaled rectangle in parent space
    pub fn local_rect(&self, parent: Vec2) -> Rect {
        self.rect_with_scale(parent, 1.0)
    }

    /// Rectangle in parent space, including the local scale
    pub fn world_rect(&self, parent: Vec2) -> Rect {
        self.rect_with_scale(parent, self.scale)
    }

    fn rect_with_scale(&self, parent: Vec2, scale: f32) -> Rect {
        let size = self.size(parent) * scale;
        let origin = self.pivot_point(parent) - self.pivot.scale(size);
        Rect::new(origin.x, origin.y, size.x, size.y)
    }

    /// Set the size along one axis, keeping the current anchors and pivot
    pub fn set_size_with_current_anchors(&mut self, axis: Axis, size: f32, parent: Vec2) {
        let stretch = (self.anchor_max - self.anchor_min).scale(parent);
        match axis {
            Axis::Horizontal => self.size_delta.x = size - stretch.x,
            Axis::Vertical => self.size_delta.y = size - stretch.y,
        }
    }

    /// Move the pivot without moving the rectangle on screen
    pub fn set_pivot_preserving_position(&mut self, pivot: Vec2, parent: Vec2) {
        let before = self.world_rect(parent);
        self.pivot = pivot;
        let after = self.world_rect(parent);
        self.anchored_position += before.position() - after.position();
    }
}

// ============================================================================
// Screen
// ============================================================================

/// Host surface description: reference resolution and UI render scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    /// Size of root space in reference units
    pub reference_resolution: Vec2,
    /// Screen pixels per reference unit
    pub scale: f32,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            reference_resolution: Vec2::new(1920.0, 1080.0),
            scale: 1.0,
        }
    }
}

impl Screen {
    pub fn new(reference_resolution: Vec2, scale: f32) -> Self {
        Self {
            reference_resolution: sanitize_resolution(reference_resolution),
            scale: sanitize_scale(scale),
        }
    }

    /// Bounds every panel must stay inside
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.reference_resolution)
    }

    /// Convert a screen-pixel pointer position to root space
    pub fn to_root(&self, screen_point: Vec2) -> Vec2 {
        screen_point / self.scale
    }

    /// Convert a root-space point to screen pixels
    pub fn to_screen(&self, root_point: Vec2) -> Vec2 {
        root_point * self.scale
    }
}

/// Scales at or below zero (or NaN) would make pointer conversion meaningless
pub(crate) fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > f32::EPSILON {
        scale
    } else {
        1.0
    }
}

/// Each axis must be finite and positive, otherwise it falls back to the
/// default resolution so panel clamping never sees NaN bounds
pub(crate) fn sanitize_resolution(resolution: Vec2) -> Vec2 {
    let fallback = Screen::default().reference_resolution;
    let axis = |value: f32, default: f32| if value.is_finite() && value > 0.0 { value } else { default };
    Vec2::new(axis(resolution.x, fallback.x), axis(resolution.y, fallback.y))
}
