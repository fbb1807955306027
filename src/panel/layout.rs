//! Panel placement: transform, defaults, size limits and root bounds
//!
//! Geometry requests are never errors here. Sizes below the minimum and
//! positions outside the root are clamped silently.

use crate::geometry::{Axis, Rect, RectTransform, Vec2};

/// Minimum and optional maximum size of a panel (unscaled units)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
}

impl SizeLimits {
    /// Clamp a width into the limits. The minimum wins over a smaller maximum.
    pub fn clamp_width(&self, width: f32) -> f32 {
        let capped = self.max_width.map_or(width, |max| width.min(max));
        capped.max(self.min_width)
    }

    pub fn clamp_height(&self, height: f32) -> f32 {
        let capped = self.max_height.map_or(height, |max| height.min(max));
        capped.max(self.min_height)
    }

    pub fn clamp(&self, size: Vec2) -> Vec2 {
        Vec2::new(self.clamp_width(size.x), self.clamp_height(size.y))
    }
}

/// Everything needed to place a panel inside its root
#[derive(Debug, Clone, PartialEq)]
pub struct PanelGeometry {
    pub transform: RectTransform,
    /// Declared defaults, reapplied by `apply_defaults`
    pub default_transform: RectTransform,
    pub limits: SizeLimits,
    /// Reference resolution of the owning root
    root_size: Vec2,
}

impl PanelGeometry {
    pub fn new(default_transform: RectTransform, limits: SizeLimits, root_size: Vec2) -> Self {
        Self {
            transform: default_transform,
            default_transform,
            limits,
            root_size,
        }
    }

    /// Panel rectangle in root space, including local scale
    pub fn rect(&self) -> Rect {
        self.transform.world_rect(self.root_size)
    }

    /// Unscaled size
    pub fn size(&self) -> Vec2 {
        self.transform.size(self.root_size)
    }

    pub fn root_size(&self) -> Vec2 {
        self.root_size
    }

    /// Bounds the panel must stay inside
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.root_size)
    }

    pub fn set_root_size(&mut self, root_size: Vec2) {
        self.root_size = root_size;
    }

    /// Set the unscaled size directly, without clamping
    pub(crate) fn set_size_unchecked(&mut self, size: Vec2) {
        self.transform
            .set_size_with_current_anchors(Axis::Horizontal, size.x, self.root_size);
        self.transform
            .set_size_with_current_anchors(Axis::Vertical, size.y, self.root_size);
    }

    /// Set the unscaled size, clamped into the limits
    pub fn set_size(&mut self, size: Vec2) {
        let clamped = self.limits.clamp(size);
        self.set_size_unchecked(clamped);
    }

    pub fn set_pivot_preserving_position(&mut self, pivot: Vec2) {
        self.transform
            .set_pivot_preserving_position(pivot, self.root_size);
    }

    /// Clamp the size into the limits. Returns true if it changed.
    pub fn ensure_valid_size(&mut self) -> bool {
        let size = self.size();
        let clamped = self.limits.clamp(size);
        if clamped == size {
            return false;
        }
        self.set_size_unchecked(clamped);
        true
    }

    /// Move the panel so its full rectangle lies inside the root bounds.
    /// Returns true if it moved.
    pub fn ensure_valid_position(&mut self) -> bool {
        let offset = self.rect().clamp_offset(&self.bounds());
        if offset == Vec2::ZERO {
            return false;
        }
        self.transform.anchored_position += offset;
        true
    }

    /// Reset to the declared defaults, then validate size and position
    pub fn apply_defaults(&mut self) {
        self.transform = self.default_transform;
        self.ensure_valid_size();
        self.ensure_valid_position();
    }
}
