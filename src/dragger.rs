//! Per-panel pointer interaction: drag, resize and resize-hover
//!
//! A [`PanelDragger`] is a small state machine fed one root-space pointer
//! sample per tick. It moves and resizes the panel geometry it is handed and
//! reports what happened through a [`DragUpdate`]; it never emits events or
//! touches z-order itself. The manager turns updates into events.
//!
//! Deltas are always measured from the pointer and geometry captured when an
//! interaction starts, never accumulated frame by frame.

use crate::geometry::{Rect, Vec2};
use crate::input::ButtonState;
use crate::panel::{DragRegion, PanelGeometry, ResizeSides};

/// Default thickness of the resize strips, in root units
pub const DEFAULT_RESIZE_THICKNESS: f32 = 10.0;
/// Default height of the title bar drag surface, in root units
pub const DEFAULT_TITLE_BAR_HEIGHT: f32 = 30.0;

/// Interaction tuning shared by every panel in a runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSettings {
    pub resize_thickness: f32,
    pub title_bar_height: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            resize_thickness: DEFAULT_RESIZE_THICKNESS,
            title_bar_height: DEFAULT_TITLE_BAR_HEIGHT,
        }
    }
}

/// What a panel allows the pointer to do with it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capabilities {
    pub can_drag: bool,
    pub can_resize: ResizeSides,
    pub drag_region: DragRegion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Idle,
    Dragging,
    Resizing(ResizeSides),
    /// Not interacting, pointer resting over a resize strip
    HoverResize(ResizeSides),
}

/// A finished or started pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Drag,
    Resize(ResizeSides),
}

/// Outcome of feeding one pointer sample to a dragger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragUpdate {
    /// The pointer belongs to this panel for the current tick
    pub handled: bool,
    pub started: Option<Interaction>,
    pub finished: Option<Interaction>,
    pub hover_exit: Option<ResizeSides>,
    pub hover_enter: Option<ResizeSides>,
}

impl DragUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Capture {
    pointer: Vec2,
    anchored_position: Vec2,
    /// Unscaled size
    size: Vec2,
    /// Root-space rect
    rect: Rect,
}

// ============================================================================
// Resize strips
// ============================================================================

/// Resize hit zones in panel-local coordinates (origin at the panel's
/// top-left corner, scaled size).
///
/// The resize area is the panel rect grown by half the thickness on every
/// side; each side strip is `thickness` wide along that area's edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStrips {
    size: Vec2,
    thickness: f32,
    outer: Rect,
}

impl ResizeStrips {
    pub fn new(size: Vec2, thickness: f32) -> Self {
        let thickness = thickness.max(0.0);
        Self {
            size,
            thickness,
            outer: Rect::from_size(size).inflate(thickness / 2.0),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Whole resize area (panel rect plus the outer half of each strip)
    pub fn outer(&self) -> Rect {
        self.outer
    }

    /// Strip rectangle for a single side
    pub fn strip(&self, side: ResizeSides) -> Option<Rect> {
        let o = self.outer;
        let t = self.thickness;
        match side {
            s if s == ResizeSides::TOP => Some(Rect::new(o.x, o.y, o.width, t)),
            s if s == ResizeSides::BOTTOM => Some(Rect::new(o.x, o.bottom() - t, o.width, t)),
            s if s == ResizeSides::LEFT => Some(Rect::new(o.x, o.y, t, o.height)),
            s if s == ResizeSides::RIGHT => Some(Rect::new(o.right() - t, o.y, t, o.height)),
            _ => None,
        }
    }

    /// Sides whose strips contain `local`.
    ///
    /// On panels thinner than the strips, opposite strips overlap; the
    /// nearer edge wins.
    pub fn hit(&self, local: Vec2) -> ResizeSides {
        if self.thickness <= 0.0 || !self.outer.contains(local) {
            return ResizeSides::empty();
        }
        let half = self.thickness / 2.0;

        let vertical = pick(
            local.y < half,
            local.y >= self.size.y - half,
            local.y < self.size.y / 2.0,
            ResizeSides::TOP,
            ResizeSides::BOTTOM,
        );
        let horizontal = pick(
            local.x < half,
            local.x >= self.size.x - half,
            local.x < self.size.x / 2.0,
            ResizeSides::LEFT,
            ResizeSides::RIGHT,
        );
        vertical | horizontal
    }
}

fn pick(near_start: bool, near_end: bool, start_closer: bool, start: ResizeSides, end: ResizeSides) -> ResizeSides {
    match (near_start, near_end) {
        (true, true) if start_closer => start,
        (true, true) => end,
        (true, false) => start,
        (false, true) => end,
        (false, false) => ResizeSides::empty(),
    }
}

// ============================================================================
// Dragger
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PanelDragger {
    mode: DragMode,
    capture: Option<Capture>,
    strips: ResizeStrips,
    default_pivot: Vec2,
}

impl PanelDragger {
    pub fn new(geometry: &PanelGeometry, thickness: f32) -> Self {
        Self {
            mode: DragMode::Idle,
            capture: None,
            strips: ResizeStrips::new(geometry.rect().size(), thickness),
            default_pivot: geometry.default_transform.pivot,
        }
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Dragging or resizing
    pub fn is_interacting(&self) -> bool {
        matches!(self.mode, DragMode::Dragging | DragMode::Resizing(_))
    }

    pub fn hovered_sides(&self) -> Option<ResizeSides> {
        match self.mode {
            DragMode::HoverResize(sides) => Some(sides),
            _ => None,
        }
    }

    pub fn strips(&self) -> &ResizeStrips {
        &self.strips
    }

    /// Recompute the cached strips for the panel's current size
    pub fn refresh_strips(&mut self, geometry: &PanelGeometry) {
        self.strips = ResizeStrips::new(geometry.rect().size(), self.strips.thickness);
    }

    pub fn set_thickness(&mut self, thickness: f32, geometry: &PanelGeometry) {
        self.strips = ResizeStrips::new(geometry.rect().size(), thickness);
    }

    /// Resize sides under a root-space point, before capability masking
    pub fn resize_sides_at(&self, geometry: &PanelGeometry, pointer: Vec2) -> ResizeSides {
        self.strips.hit(pointer - geometry.rect().position())
    }

    /// Feed one pointer sample (root space)
    pub fn update(
        &mut self,
        geometry: &mut PanelGeometry,
        caps: &Capabilities,
        settings: &InteractionSettings,
        pointer: Vec2,
        button: ButtonState,
    ) -> DragUpdate {
        let mut out = DragUpdate::default();

        match self.mode {
            DragMode::Dragging => {
                out.handled = true;
                if button.is_down() {
                    self.drag_step(geometry, pointer);
                } else {
                    self.end_drag(geometry);
                    out.finished = Some(Interaction::Drag);
                }
            }
            DragMode::Resizing(sides) => {
                out.handled = true;
                if button.is_down() {
                    self.resize_step(geometry, sides, pointer);
                } else {
                    self.end_resize(geometry);
                    out.finished = Some(Interaction::Resize(sides));
                }
            }
            DragMode::Idle | DragMode::HoverResize(_) => {
                let rect = geometry.rect();
                if rect.size() != self.strips.size() {
                    self.refresh_strips(geometry);
                }
                let local = pointer - rect.position();
                let sides = self.strips.hit(local) & caps.can_resize;
                let inside = rect.contains(pointer);

                match button {
                    ButtonState::Pressed => {
                        out.hover_exit = self.clear_hover();
                        if !sides.is_empty() {
                            self.begin_resize(geometry, sides, pointer);
                            out.started = Some(Interaction::Resize(sides));
                            out.handled = true;
                        } else if caps.can_drag
                            && in_drag_region(caps.drag_region, settings, rect, local)
                        {
                            self.begin_drag(geometry, pointer);
                            out.started = Some(Interaction::Drag);
                            out.handled = true;
                        } else {
                            out.handled = inside;
                        }
                    }
                    // Pressed somewhere else: no hover prompts while the button is down
                    ButtonState::Held => {
                        out.hover_exit = self.clear_hover();
                        out.handled = inside;
                    }
                    ButtonState::Idle | ButtonState::Released => {
                        if sides.is_empty() {
                            out.hover_exit = self.clear_hover();
                            out.handled = inside;
                        } else {
                            if self.mode != DragMode::HoverResize(sides) {
                                out.hover_exit = self.clear_hover();
                                self.mode = DragMode::HoverResize(sides);
                                out.hover_enter = Some(sides);
                            }
                            out.handled = true;
                        }
                    }
                }
            }
        }

        out
    }

    /// End whatever is in progress, as if the button had been released
    pub fn force_end(&mut self, geometry: &mut PanelGeometry) -> DragUpdate {
        let mut out = DragUpdate::default();
        match self.mode {
            DragMode::Dragging => {
                self.end_drag(geometry);
                out.finished = Some(Interaction::Drag);
            }
            DragMode::Resizing(sides) => {
                self.end_resize(geometry);
                out.finished = Some(Interaction::Resize(sides));
            }
            DragMode::HoverResize(sides) => {
                self.mode = DragMode::Idle;
                out.hover_exit = Some(sides);
            }
            DragMode::Idle => {}
        }
        out
    }

    /// Leave the hover state. Returns the sides that were hovered.
    pub fn clear_hover(&mut self) -> Option<ResizeSides> {
        let hovered = self.hovered_sides();
        if hovered.is_some() {
            self.mode = DragMode::Idle;
        }
        hovered
    }

    fn capture(geometry: &PanelGeometry, pointer: Vec2) -> Capture {
        Capture {
            pointer,
            anchored_position: geometry.transform.anchored_position,
            size: geometry.size(),
            rect: geometry.rect(),
        }
    }

    // ------------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------------

    fn begin_drag(&mut self, geometry: &PanelGeometry, pointer: Vec2) {
        self.capture = Some(Self::capture(geometry, pointer));
        self.mode = DragMode::Dragging;
        tracing::trace!(?pointer, "Drag started");
    }

    fn drag_step(&mut self, geometry: &mut PanelGeometry, pointer: Vec2) {
        let Some(capture) = self.capture else {
            return;
        };
        geometry.transform.anchored_position = capture.anchored_position + (pointer - capture.pointer);
        geometry.ensure_valid_position();
    }

    fn end_drag(&mut self, geometry: &mut PanelGeometry) {
        geometry.ensure_valid_position();
        self.capture = None;
        self.mode = DragMode::Idle;
        tracing::trace!(rect = ?geometry.rect(), "Drag finished");
    }

    // ------------------------------------------------------------------------
    // Resize
    // ------------------------------------------------------------------------

    fn begin_resize(&mut self, geometry: &mut PanelGeometry, sides: ResizeSides, pointer: Vec2) {
        // Pin the edges opposite the grabbed sides
        let mut pivot = geometry.transform.pivot;
        if sides.contains(ResizeSides::LEFT) {
            pivot.x = 1.0;
        } else if sides.contains(ResizeSides::RIGHT) {
            pivot.x = 0.0;
        }
        if sides.contains(ResizeSides::TOP) {
            pivot.y = 1.0;
        } else if sides.contains(ResizeSides::BOTTOM) {
            pivot.y = 0.0;
        }
        geometry.set_pivot_preserving_position(pivot);

        self.capture = Some(Self::capture(geometry, pointer));
        self.mode = DragMode::Resizing(sides);
        tracing::trace!(sides = sides.describe(), "Resize started");
    }

    fn resize_step(&mut self, geometry: &mut PanelGeometry, sides: ResizeSides, pointer: Vec2) {
        let Some(capture) = self.capture else {
            return;
        };
        let scale = geometry.transform.scale.max(f32::EPSILON);
        let bounds = geometry.bounds();
        let delta = pointer - capture.pointer;
        let mut size = capture.size;

        let h = sides.horizontal_sign();
        if h != 0.0 {
            let room = if h > 0.0 {
                bounds.right() - capture.rect.x
            } else {
                capture.rect.right() - bounds.x
            };
            let width = (capture.size.x + h * delta.x / scale).min(room / scale);
            size.x = geometry.limits.clamp_width(width);
        }

        let v = sides.vertical_sign();
        if v != 0.0 {
            let room = if v > 0.0 {
                bounds.bottom() - capture.rect.y
            } else {
                capture.rect.bottom() - bounds.y
            };
            let height = (capture.size.y + v * delta.y / scale).min(room / scale);
            size.y = geometry.limits.clamp_height(height);
        }

        geometry.set_size_unchecked(size);
        geometry.ensure_valid_position();
    }

    fn end_resize(&mut self, geometry: &mut PanelGeometry) {
        geometry.set_pivot_preserving_position(self.default_pivot);
        geometry.ensure_valid_size();
        geometry.ensure_valid_position();
        self.refresh_strips(geometry);
        self.capture = None;
        self.mode = DragMode::Idle;
        tracing::trace!(rect = ?geometry.rect(), "Resize finished");
    }
}

fn in_drag_region(region: DragRegion, settings: &InteractionSettings, rect: Rect, local: Vec2) -> bool {
    match region {
        DragRegion::TitleBar => {
            let bar = Rect::new(0.0, 0.0, rect.width, settings.title_bar_height.min(rect.height));
            bar.contains(local)
        }
        DragRegion::Area(area) => area.contains(local),
        DragRegion::WholePanel => Rect::from_size(rect.size()).contains(local),
    }
}
