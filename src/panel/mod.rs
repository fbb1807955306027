//! Panels: movable, resizable containers managed by a UI root
//!
//! ## Architecture
//!
//! - `PanelContent`: what a concrete panel type supplies (defaults, capabilities, hooks)
//! - `Panel`: the container the runtime owns (geometry, flags, lifecycle, dragger)
//! - `PanelGeometry`: transform, defaults and size limits, clamped into the root
//! - `ResizeSides`: bit flags for the grabbable edges
//!
//! Panels are created and destroyed through [`crate::Runtime`], which registers
//! them with the owning root's [`crate::PanelManager`].

mod content;
mod layout;
mod sides;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dragger::{Capabilities, DragUpdate, Interaction, InteractionSettings, PanelDragger};
use crate::geometry::{Rect, RectTransform, Vec2};
use crate::input::ButtonState;
use crate::root::RootId;
use crate::runtime::Runtime;
use crate::scheduler::FrameScheduler;

pub use content::{ContentContext, DragRegion, PanelContent, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
pub use layout::{PanelGeometry, SizeLimits};
pub use sides::ResizeSides;

/// Stable panel identity, unique within one UI root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PanelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle position of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    Constructing,
    SizedAndPositioned,
    Active,
    Inactive,
    Destroyed,
}

/// A panel container: content plus everything the runtime tracks for it
pub struct Panel {
    id: PanelId,
    content: Box<dyn PanelContent>,
    geometry: PanelGeometry,
    capabilities: Capabilities,
    dragger: PanelDragger,
    enabled: bool,
    pinned: bool,
    state: PanelState,
    construction_failed: bool,
    late_constructed: bool,
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("rect", &self.rect())
            .field("enabled", &self.enabled)
            .field("pinned", &self.pinned)
            .field("state", &self.state)
            .field("mode", &self.dragger.mode())
            .finish()
    }
}

impl Panel {
    /// Build the container from the content's declared defaults.
    ///
    /// The panel starts disabled in `Constructing`; nothing is applied to
    /// the content yet.
    pub(crate) fn new(content: Box<dyn PanelContent>, root_size: Vec2, resize_thickness: f32) -> Self {
        let default_transform = RectTransform {
            anchor_min: content.default_anchor_min(),
            anchor_max: content.default_anchor_max(),
            pivot: content.default_pivot(),
            anchored_position: content.default_position(),
            size_delta: content.default_size(),
            scale: 1.0,
        };
        let limits = SizeLimits {
            min_width: content.min_width(),
            min_height: content.min_height(),
            max_width: content.max_width(),
            max_height: content.max_height(),
        };
        let geometry = PanelGeometry::new(default_transform, limits, root_size);
        let capabilities = Capabilities {
            can_drag: content.can_drag(),
            can_resize: content.can_resize(),
            drag_region: content.drag_region(),
        };
        let dragger = PanelDragger::new(&geometry, resize_thickness);

        Self {
            id: content.id(),
            content,
            geometry,
            capabilities,
            dragger,
            enabled: false,
            pinned: false,
            state: PanelState::Constructing,
            construction_failed: false,
            late_constructed: false,
        }
    }

    pub fn id(&self) -> &PanelId {
        &self.id
    }

    /// Rectangle in root space (scaled)
    pub fn rect(&self) -> Rect {
        self.geometry.rect()
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn dragger(&self) -> &PanelDragger {
        &self.dragger
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// `construct_content` returned an error
    pub fn construction_failed(&self) -> bool {
        self.construction_failed
    }

    pub fn is_late_constructed(&self) -> bool {
        self.late_constructed
    }

    pub fn content(&self) -> &dyn PanelContent {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> &mut dyn PanelContent {
        self.content.as_mut()
    }

    pub fn set_can_drag(&mut self, can_drag: bool) {
        self.capabilities.can_drag = can_drag;
    }

    pub fn set_can_resize(&mut self, sides: ResizeSides) {
        self.capabilities.can_resize = sides;
    }

    pub fn set_drag_region(&mut self, region: DragRegion) {
        self.capabilities.drag_region = region;
    }

    /// Set the local scale. Size and position are revalidated.
    pub fn set_scale(&mut self, scale: f32) {
        self.geometry.transform.scale = crate::geometry::sanitize_scale(scale);
        self.revalidate();
    }

    // ------------------------------------------------------------------------
    // Lifecycle (driven by the manager and runtime)
    // ------------------------------------------------------------------------

    /// Run `construct_content` once, then apply the default size and position
    pub(crate) fn construct(&mut self, root: &RootId, scheduler: &FrameScheduler<Runtime>) {
        if self.state != PanelState::Constructing {
            return;
        }
        let mut ctx = ContentContext {
            root,
            panel: &self.id,
            rect: self.geometry.rect(),
            scheduler,
        };
        if let Err(err) = self.content.construct_content(&mut ctx) {
            tracing::error!(panel = %self.id, root = %root, "Panel content construction failed: {:#}", err);
            self.construction_failed = true;
        }

        self.geometry.apply_defaults();
        self.dragger.refresh_strips(&self.geometry);
        self.state = PanelState::SizedAndPositioned;
        tracing::debug!(panel = %self.id, rect = ?self.rect(), "Panel sized and positioned");
    }

    /// Run `construct_late` once. Skipped for panels whose construction failed.
    pub(crate) fn construct_late(&mut self, root: &RootId, scheduler: &FrameScheduler<Runtime>) {
        if self.late_constructed || self.construction_failed || self.state == PanelState::Destroyed {
            return;
        }
        self.late_constructed = true;
        let mut ctx = ContentContext {
            root,
            panel: &self.id,
            rect: self.geometry.rect(),
            scheduler,
        };
        if let Err(err) = self.content.construct_late(&mut ctx) {
            tracing::error!(panel = %self.id, root = %root, "Late panel construction failed: {:#}", err);
            self.construction_failed = true;
        }
    }

    /// Switch enabled state. Returns false if nothing changed.
    pub(crate) fn set_enabled(&mut self, enabled: bool) -> bool {
        if self.enabled == enabled || self.state == PanelState::Destroyed {
            return false;
        }
        self.enabled = enabled;
        self.state = if enabled {
            PanelState::Active
        } else {
            PanelState::Inactive
        };
        self.content.on_active_changed(enabled);
        true
    }

    pub(crate) fn set_pinned(&mut self, pinned: bool) -> bool {
        if self.pinned == pinned {
            return false;
        }
        self.pinned = pinned;
        true
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.enabled = false;
        self.state = PanelState::Destroyed;
        self.content.on_destroy();
    }

    // ------------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------------

    /// Clamp size into the limits; strips follow the new size
    pub fn ensure_valid_size(&mut self) -> bool {
        let changed = self.geometry.ensure_valid_size();
        if changed {
            self.dragger.refresh_strips(&self.geometry);
        }
        changed
    }

    pub fn ensure_valid_position(&mut self) -> bool {
        self.geometry.ensure_valid_position()
    }

    /// Reapply the declared default size and position
    pub(crate) fn reset_to_default(&mut self) {
        self.geometry.apply_defaults();
        self.dragger.refresh_strips(&self.geometry);
    }

    /// Root resolution changed
    pub(crate) fn set_root_size(&mut self, root_size: Vec2) {
        self.geometry.set_root_size(root_size);
        self.revalidate();
    }

    pub(crate) fn set_resize_thickness(&mut self, thickness: f32) {
        self.dragger.set_thickness(thickness, &self.geometry);
    }

    fn revalidate(&mut self) {
        self.geometry.ensure_valid_size();
        self.geometry.ensure_valid_position();
        self.dragger.refresh_strips(&self.geometry);
    }

    // ------------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------------

    /// True if a root-space point is inside the panel or on one of its
    /// usable resize strips
    pub fn hit_test(&self, pointer: Vec2) -> bool {
        if self.rect().contains(pointer) {
            return true;
        }
        if self.pinned {
            return false;
        }
        let sides = self.dragger.resize_sides_at(&self.geometry, pointer);
        sides.intersects(self.capabilities.can_resize)
    }

    /// Feed one root-space pointer sample through the dragger.
    ///
    /// Pinned panels change nothing but still absorb a pointer over them.
    pub(crate) fn handle_pointer(
        &mut self,
        settings: &InteractionSettings,
        pointer: Vec2,
        button: ButtonState,
    ) -> DragUpdate {
        if self.pinned {
            return DragUpdate {
                handled: self.rect().contains(pointer),
                ..Default::default()
            };
        }
        let update = self
            .dragger
            .update(&mut self.geometry, &self.capabilities, settings, pointer, button);
        self.notify_finished(update.finished);
        update
    }

    /// End any drag, resize or hover at once
    pub(crate) fn force_end_interaction(&mut self) -> DragUpdate {
        let update = self.dragger.force_end(&mut self.geometry);
        self.notify_finished(update.finished);
        update
    }

    /// Drop hover state when another panel took the pointer
    pub(crate) fn clear_hover(&mut self) -> Option<ResizeSides> {
        self.dragger.clear_hover()
    }

    fn notify_finished(&mut self, finished: Option<Interaction>) {
        let rect = self.rect();
        match finished {
            Some(Interaction::Drag) => self.content.on_finish_drag(rect),
            Some(Interaction::Resize(_)) => self.content.on_finish_resize(rect),
            None => {}
        }
    }
}
