//! Per-root panel registry: z-order, focus and pointer forwarding
//!
//! Panel order in the list is z-order (last = topmost). Each tick the
//! manager first resolves focus for a fresh press, then feeds the pointer to
//! the panels' draggers topmost-first until one of them handles it.
//!
//! Events produced here are queued on the manager and moved to the runtime's
//! queue after every tick or request.

use crate::dragger::{DragUpdate, Interaction, InteractionSettings};
use crate::error::{Result, RuntimeError};
use crate::events::PanelEvent;
use crate::geometry::Vec2;
use crate::input::{ButtonState, InputArbitration};
use crate::panel::{Panel, PanelId};
use crate::root::RootId;

#[derive(Debug)]
pub struct PanelManager {
    root: RootId,
    panels: Vec<Panel>,
    root_size: Vec2,
    settings: InteractionSettings,
    events: Vec<PanelEvent>,
}

impl PanelManager {
    pub fn new(root: RootId, root_size: Vec2, settings: InteractionSettings) -> Self {
        Self {
            root,
            panels: Vec::new(),
            root_size,
            settings,
            events: Vec::new(),
        }
    }

    pub fn root(&self) -> &RootId {
        &self.root
    }

    pub fn root_size(&self) -> Vec2 {
        self.root_size
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Panels bottom to top
    pub fn panels(&self) -> impl DoubleEndedIterator<Item = &Panel> {
        self.panels.iter()
    }

    /// Panel ids bottom to top
    pub fn z_order(&self) -> Vec<PanelId> {
        self.panels.iter().map(|p| p.id().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn contains(&self, id: &PanelId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn panel(&self, id: &PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id() == id)
    }

    pub fn panel_mut(&mut self, id: &PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id() == id)
    }

    /// Topmost enabled panel
    pub fn topmost(&self) -> Option<&Panel> {
        self.panels.iter().rev().find(|p| p.is_enabled())
    }

    fn index_of(&self, id: &PanelId) -> Option<usize> {
        self.panels.iter().position(|p| p.id() == id)
    }

    fn require(&self, id: &PanelId) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| RuntimeError::unknown_panel(&self.root, id))
    }

    /// Add a panel on top. It stays disabled until activated.
    pub(crate) fn register(&mut self, panel: Panel) -> Result<()> {
        if self.contains(panel.id()) {
            return Err(RuntimeError::DuplicatePanel {
                root: self.root.clone(),
                panel: panel.id().clone(),
            });
        }
        tracing::debug!(root = %self.root, panel = %panel.id(), "Panel registered");
        self.panels.push(panel);
        Ok(())
    }

    /// End interactions, run the destroy hook and remove the panel
    pub(crate) fn unregister(&mut self, id: &PanelId) -> Result<Panel> {
        let index = self.require(id)?;
        let update = self.panels[index].force_end_interaction();
        self.push_drag_events(index, &update);

        let mut panel = self.panels.remove(index);
        panel.mark_destroyed();
        self.events.push(PanelEvent::Destroyed { panel: id.clone() });
        tracing::debug!(root = %self.root, panel = %id, "Panel destroyed");
        Ok(panel)
    }

    // ========================================================================
    // Per-tick update
    // ========================================================================

    /// Resolve focus and forward one root-space pointer sample
    pub fn update(&mut self, pointer: Vec2, button: ButtonState, arb: &mut InputArbitration) {
        if button == ButtonState::Pressed && !arb.focus_handled {
            self.resolve_focus(pointer, arb);
        }
        self.forward_pointer(pointer, button, arb);
    }

    fn resolve_focus(&mut self, pointer: Vec2, arb: &mut InputArbitration) {
        let hit = self
            .panels
            .iter()
            .rposition(|p| p.is_enabled() && p.hit_test(pointer));

        match hit {
            Some(index) => {
                arb.focus_handled = true;
                tracing::trace!(root = %self.root, panel = %self.panels[index].id(), "Focus claimed");
                if self.move_to_top(index) {
                    self.events.push(PanelEvent::PanelsReordered);
                }
            }
            None => self.events.push(PanelEvent::ClickedOutsidePanels),
        }
    }

    fn forward_pointer(&mut self, pointer: Vec2, button: ButtonState, arb: &mut InputArbitration) {
        // An interaction in progress keeps the pointer even if another panel
        // was raised above it mid-drag
        let mut order: Vec<usize> = (0..self.panels.len()).rev().collect();
        if let Some(pos) = order
            .iter()
            .position(|&i| self.panels[i].is_enabled() && self.panels[i].dragger().is_interacting())
        {
            let index = order.remove(pos);
            order.insert(0, index);
        }

        for index in order {
            if !self.panels[index].is_enabled() {
                continue;
            }
            if arb.drag_handled {
                // Pointer belongs to something above: drop stale hover prompts
                if let Some(sides) = self.panels[index].clear_hover() {
                    let panel = self.panels[index].id().clone();
                    self.events.push(PanelEvent::ResizeHoverExit { panel, sides });
                }
                continue;
            }

            let update = self.panels[index].handle_pointer(&self.settings, pointer, button);
            self.push_drag_events(index, &update);
            if update.handled {
                arb.drag_handled = true;
            }
            if update.started.is_some() && self.move_to_top(index) {
                self.events.push(PanelEvent::PanelsReordered);
            }
        }
    }

    fn push_drag_events(&mut self, index: usize, update: &DragUpdate) {
        let panel = &self.panels[index];
        let id = panel.id();
        if let Some(sides) = update.hover_exit {
            self.events.push(PanelEvent::ResizeHoverExit {
                panel: id.clone(),
                sides,
            });
        }
        if let Some(sides) = update.hover_enter {
            self.events.push(PanelEvent::ResizeHoverEnter {
                panel: id.clone(),
                sides,
            });
        }
        match update.finished {
            Some(Interaction::Drag) => self.events.push(PanelEvent::FinishedDrag {
                panel: id.clone(),
                rect: panel.rect(),
            }),
            Some(Interaction::Resize(_)) => self.events.push(PanelEvent::FinishedResize {
                panel: id.clone(),
                rect: panel.rect(),
            }),
            None => {}
        }
    }

    /// Move a panel to the end of the list. Returns false if it already was.
    fn move_to_top(&mut self, index: usize) -> bool {
        if index + 1 >= self.panels.len() {
            return false;
        }
        let panel = self.panels.remove(index);
        self.panels.push(panel);
        true
    }

    // ========================================================================
    // Panel operations
    // ========================================================================

    /// Activate or deactivate a panel. Activation raises it and reports a
    /// reorder; deactivation ends any interaction. Returns false if the panel
    /// was already in that state.
    pub fn set_active(&mut self, id: &PanelId, active: bool) -> Result<bool> {
        self.apply_active(id, active, true)
    }

    /// Like [`Self::set_active`] but leaves z-order untouched
    pub fn set_active_only(&mut self, id: &PanelId, active: bool) -> Result<bool> {
        self.apply_active(id, active, false)
    }

    fn apply_active(&mut self, id: &PanelId, active: bool, reorder: bool) -> Result<bool> {
        let mut index = self.require(id)?;
        if self.panels[index].is_enabled() == active {
            return Ok(false);
        }

        if !active {
            let update = self.panels[index].force_end_interaction();
            self.push_drag_events(index, &update);
        }
        self.panels[index].set_enabled(active);
        self.events.push(PanelEvent::ActiveChanged {
            panel: id.clone(),
            active,
        });

        if active && reorder {
            self.move_to_top(index);
            index = self.panels.len() - 1;
            self.events.push(PanelEvent::PanelsReordered);
        }
        tracing::debug!(root = %self.root, panel = %self.panels[index].id(), active, "Panel active state changed");
        Ok(true)
    }

    /// Flip the active state. Returns the new state.
    pub fn toggle(&mut self, id: &PanelId) -> Result<bool> {
        let index = self.require(id)?;
        let active = !self.panels[index].is_enabled();
        self.set_active(id, active)?;
        Ok(active)
    }

    /// Pin or unpin. Pinning ends any interaction at once.
    pub fn set_pinned(&mut self, id: &PanelId, pinned: bool) -> Result<bool> {
        let index = self.require(id)?;
        if pinned {
            let update = self.panels[index].force_end_interaction();
            self.push_drag_events(index, &update);
        }
        Ok(self.panels[index].set_pinned(pinned))
    }

    /// Raise a panel to the top. Returns false if it already was.
    pub fn bring_to_front(&mut self, id: &PanelId) -> Result<bool> {
        let index = self.require(id)?;
        let moved = self.move_to_top(index);
        if moved {
            self.events.push(PanelEvent::PanelsReordered);
        }
        Ok(moved)
    }

    pub fn ensure_valid_size(&mut self, id: &PanelId) -> Result<bool> {
        let index = self.require(id)?;
        Ok(self.panels[index].ensure_valid_size())
    }

    pub fn ensure_valid_position(&mut self, id: &PanelId) -> Result<bool> {
        let index = self.require(id)?;
        Ok(self.panels[index].ensure_valid_position())
    }

    /// Re-clamp every panel's size and position
    pub fn ensure_valid_positions(&mut self) {
        for panel in &mut self.panels {
            panel.ensure_valid_size();
            panel.ensure_valid_position();
        }
    }

    /// Reapply a panel's declared default size and position
    pub fn reset_to_default(&mut self, id: &PanelId) -> Result<()> {
        let index = self.require(id)?;
        let update = self.panels[index].force_end_interaction();
        self.push_drag_events(index, &update);
        self.panels[index].reset_to_default();
        Ok(())
    }

    /// Any panel mid-drag or mid-resize
    pub fn is_interacting(&self) -> bool {
        self.panels
            .iter()
            .any(|p| p.is_enabled() && p.dragger().is_interacting())
    }

    /// Force-end every interaction and hover (root disabled or removed)
    pub(crate) fn end_interactions(&mut self) {
        for index in 0..self.panels.len() {
            let update = self.panels[index].force_end_interaction();
            self.push_drag_events(index, &update);
        }
    }

    /// Destroy every panel, topmost first
    pub(crate) fn clear(&mut self) {
        let ids: Vec<PanelId> = self.panels.iter().rev().map(|p| p.id().clone()).collect();
        for id in ids {
            // Ids were just read from the list
            let _ = self.unregister(&id);
        }
    }

    pub(crate) fn push_event(&mut self, event: PanelEvent) {
        self.events.push(event);
    }

    pub(crate) fn set_root_size(&mut self, root_size: Vec2) {
        self.root_size = root_size;
        for panel in &mut self.panels {
            panel.set_root_size(root_size);
        }
    }

    pub(crate) fn set_settings(&mut self, settings: InteractionSettings) {
        self.settings = settings;
        for panel in &mut self.panels {
            panel.set_resize_thickness(settings.resize_thickness);
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Events queued since the last drain
    pub fn events(&self) -> &[PanelEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }
}
