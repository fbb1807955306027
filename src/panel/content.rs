//! The contract a concrete panel type implements
//!
//! The runtime only manages the panel *container*. Everything a panel shows
//! lives behind [`PanelContent`]; the runtime calls its hooks at fixed points
//! of the lifecycle and never looks inside.

use crate::geometry::{Rect, Vec2};
use crate::runtime::Runtime;
use crate::scheduler::FrameScheduler;

use super::{PanelId, ResizeSides};
use crate::root::RootId;

/// Default minimum width for panels that do not declare one
pub const DEFAULT_MIN_WIDTH: f32 = 200.0;
/// Default minimum height for panels that do not declare one
pub const DEFAULT_MIN_HEIGHT: f32 = 100.0;

/// Which part of a panel starts a drag when pressed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragRegion {
    /// Top strip of the panel, `title_bar_height` tall (from the runtime config)
    TitleBar,
    /// A custom area in panel-local coordinates (origin at the panel's top-left)
    Area(Rect),
    /// Anywhere inside the panel
    WholePanel,
}

/// What the content hooks get to see while being constructed
pub struct ContentContext<'a> {
    pub root: &'a RootId,
    pub panel: &'a PanelId,
    /// Panel rectangle in root space at the time of the call
    pub rect: Rect,
    /// Scheduler handle, for content that wants timers or deferred work
    pub scheduler: &'a FrameScheduler<Runtime>,
}

/// A panel type: declared geometry defaults, capabilities and lifecycle hooks
pub trait PanelContent {
    /// Stable identity, unique within one UI root
    fn id(&self) -> PanelId;

    fn min_width(&self) -> f32 {
        DEFAULT_MIN_WIDTH
    }

    fn min_height(&self) -> f32 {
        DEFAULT_MIN_HEIGHT
    }

    fn max_width(&self) -> Option<f32> {
        None
    }

    fn max_height(&self) -> Option<f32> {
        None
    }

    fn default_anchor_min(&self) -> Vec2 {
        Vec2::new(0.25, 0.25)
    }

    fn default_anchor_max(&self) -> Vec2 {
        Vec2::new(0.75, 0.75)
    }

    fn default_pivot(&self) -> Vec2 {
        Vec2::HALF
    }

    fn default_position(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Added to the size implied by the default anchors
    fn default_size(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn can_drag(&self) -> bool {
        true
    }

    fn can_resize(&self) -> ResizeSides {
        ResizeSides::ALL
    }

    fn drag_region(&self) -> DragRegion {
        DragRegion::TitleBar
    }

    /// Build the panel's content. Called exactly once, before the default
    /// size and position are applied.
    fn construct_content(&mut self, ctx: &mut ContentContext<'_>) -> anyhow::Result<()>;

    /// Called one tick after construction, once a full layout pass has run
    fn construct_late(&mut self, _ctx: &mut ContentContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_active_changed(&mut self, _active: bool) {}

    fn on_finish_drag(&mut self, _rect: Rect) {}

    fn on_finish_resize(&mut self, _rect: Rect) {}

    fn on_destroy(&mut self) {}
}
