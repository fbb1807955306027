//! The runtime context: scheduler, UI roots, screen and per-tick arbitration
//!
//! The host owns one [`Runtime`] and calls [`Runtime::tick`] once per frame.
//! Everything else (panels, timers, coroutines) hangs off it; there is no
//! global state, so several runtimes can coexist in one process.
//!
//! Tick order:
//! 1. scheduler: coroutines due this tick, then per-frame callbacks (timers)
//! 2. arbitration reset
//! 3. roots topmost-first: focus resolution, then pointer forwarding
//! 4. queued events move to the runtime's event queue

use crate::config::RuntimeConfig;
use crate::dragger::InteractionSettings;
use crate::error::{Result, RuntimeError};
use crate::events::{PanelEvent, RootEvent};
use crate::geometry::{sanitize_resolution, sanitize_scale, Screen, Vec2};
use crate::input::{FrameInput, InputArbitration};
use crate::manager::PanelManager;
use crate::panel::{Panel, PanelContent, PanelId};
use crate::root::{RootId, UiRoot};
use crate::scheduler::{FrameScheduler, Step};

#[derive(Debug)]
pub struct Runtime {
    scheduler: FrameScheduler<Runtime>,
    /// Bottom to top
    roots: Vec<UiRoot>,
    screen: Screen,
    settings: InteractionSettings,
    arbitration: InputArbitration,
    events: Vec<RootEvent>,
    last_input: Option<FrameInput>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(&RuntimeConfig::default())
    }
}

impl Runtime {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            scheduler: FrameScheduler::new(),
            roots: Vec::new(),
            screen: config.screen(),
            settings: config.interaction(),
            arbitration: InputArbitration::default(),
            events: Vec::new(),
            last_input: None,
        }
    }

    pub fn scheduler(&self) -> &FrameScheduler<Runtime> {
        &self.scheduler
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    /// Claims made during the most recent tick
    pub fn arbitration(&self) -> InputArbitration {
        self.arbitration
    }

    pub fn last_input(&self) -> Option<FrameInput> {
        self.last_input
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advance one frame
    pub fn tick(&mut self, input: &FrameInput) {
        #[cfg(feature = "profile-tracing")]
        let _span = tracing::info_span!("runtime_tick", time = ?input.time).entered();

        let scheduler = self.scheduler.clone();
        scheduler.tick(input.time, self);

        self.arbitration.reset();
        let pointer = self.screen.to_root(input.pointer.position);
        let button = input.pointer.button;

        let mut arb = self.arbitration;
        for index in self.root_update_order() {
            let root = &mut self.roots[index];
            if !root.is_enabled() {
                continue;
            }
            root.manager_mut().update(pointer, button, &mut arb);
        }
        self.arbitration = arb;

        self.last_input = Some(*input);
        self.flush_events();
    }

    /// Roots topmost-first, except that a root with an interaction in
    /// progress goes first so it always sees the release
    fn root_update_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.roots.len()).rev().collect();
        if let Some(pos) = order
            .iter()
            .position(|&i| self.roots[i].is_enabled() && self.roots[i].manager().is_interacting())
        {
            let index = order.remove(pos);
            order.insert(0, index);
        }
        order
    }

    // ========================================================================
    // Roots
    // ========================================================================

    /// Add an empty root on top of the others
    pub fn create_root(&mut self, id: impl Into<RootId>) -> Result<()> {
        let id = id.into();
        if self.root_index(&id).is_some() {
            return Err(RuntimeError::DuplicateRoot { root: id });
        }
        tracing::debug!(root = %id, "UI root created");
        self.roots
            .push(UiRoot::new(id, self.screen.reference_resolution, self.settings));
        Ok(())
    }

    /// Destroy every panel in the root, then remove it
    pub fn remove_root(&mut self, id: &RootId) -> Result<()> {
        let index = self.require_root(id)?;
        self.roots[index].manager_mut().clear();
        self.flush_events();
        self.roots.remove(index);
        tracing::debug!(root = %id, "UI root removed");
        Ok(())
    }

    /// Enable or disable a root. Disabled roots take no input and end any
    /// interaction in progress.
    pub fn set_root_enabled(&mut self, id: &RootId, enabled: bool) -> Result<bool> {
        let index = self.require_root(id)?;
        let root = &mut self.roots[index];
        let changed = root.set_enabled(enabled);
        if changed && !enabled {
            root.manager_mut().end_interactions();
            self.flush_events();
        }
        Ok(changed)
    }

    /// Raise a root above every other root
    pub fn bring_root_to_front(&mut self, id: &RootId) -> Result<bool> {
        let index = self.require_root(id)?;
        if index + 1 == self.roots.len() {
            return Ok(false);
        }
        let root = self.roots.remove(index);
        self.roots.push(root);
        Ok(true)
    }

    /// Roots bottom to top
    pub fn roots(&self) -> impl DoubleEndedIterator<Item = &UiRoot> {
        self.roots.iter()
    }

    /// Root ids bottom to top
    pub fn root_order(&self) -> Vec<RootId> {
        self.roots.iter().map(|r| r.id().clone()).collect()
    }

    pub fn root(&self, id: &RootId) -> Option<&UiRoot> {
        self.roots.iter().find(|r| r.id() == id)
    }

    pub fn root_mut(&mut self, id: &RootId) -> Option<&mut UiRoot> {
        self.roots.iter_mut().find(|r| r.id() == id)
    }

    pub fn manager(&self, root: &RootId) -> Result<&PanelManager> {
        self.root(root)
            .map(UiRoot::manager)
            .ok_or_else(|| RuntimeError::UnknownRoot { root: root.clone() })
    }

    /// Run a manager operation and move its events to the runtime queue
    pub fn with_manager<T>(
        &mut self,
        root: &RootId,
        op: impl FnOnce(&mut PanelManager) -> Result<T>,
    ) -> Result<T> {
        let index = self.require_root(root)?;
        let result = op(self.roots[index].manager_mut());
        self.flush_events();
        result
    }

    fn root_index(&self, id: &RootId) -> Option<usize> {
        self.roots.iter().position(|r| r.id() == id)
    }

    fn require_root(&self, id: &RootId) -> Result<usize> {
        self.root_index(id)
            .ok_or_else(|| RuntimeError::UnknownRoot { root: id.clone() })
    }

    // ========================================================================
    // Panels
    // ========================================================================

    pub fn panel(&self, root: &RootId, panel: &PanelId) -> Option<&Panel> {
        self.root(root).and_then(|r| r.manager().panel(panel))
    }

    pub fn panel_mut(&mut self, root: &RootId, panel: &PanelId) -> Option<&mut Panel> {
        self.root_mut(root).and_then(|r| r.manager_mut().panel_mut(panel))
    }

    /// Create a panel in `root`.
    ///
    /// The panel is registered (disabled), its content constructed, defaults
    /// applied and then activated on top. `construct_late` runs on the next
    /// tick. A failing `construct_content` is logged and leaves the panel
    /// registered with `construction_failed()` set.
    pub fn create_panel(&mut self, root: &RootId, content: Box<dyn PanelContent>) -> Result<PanelId> {
        let index = self.require_root(root)?;
        let scheduler = self.scheduler.clone();
        let thickness = self.settings.resize_thickness;
        let manager = self.roots[index].manager_mut();

        let panel = Panel::new(content, manager.root_size(), thickness);
        let id = panel.id().clone();
        manager.register(panel)?;

        if let Some(panel) = manager.panel_mut(&id) {
            panel.construct(root, &scheduler);
        }
        manager.push_event(PanelEvent::Created { panel: id.clone() });
        manager.set_active(&id, true)?;
        self.flush_events();

        let late_root = root.clone();
        let late_panel = id.clone();
        self.scheduler.schedule(move |runtime: &mut Runtime, _| {
            runtime.construct_late(&late_root, &late_panel);
            Step::Done
        });

        tracing::debug!(root = %root, panel = %id, "Panel created");
        Ok(id)
    }

    fn construct_late(&mut self, root: &RootId, panel: &PanelId) {
        let scheduler = self.scheduler.clone();
        match self.panel_mut(root, panel) {
            Some(panel) => panel.construct_late(root, &scheduler),
            None => tracing::debug!(root = %root, panel = %panel, "Panel gone before late construction"),
        }
    }

    /// Unregister a panel, end its interactions and run its destroy hook
    pub fn destroy_panel(&mut self, root: &RootId, panel: &PanelId) -> Result<()> {
        self.with_manager(root, |manager| manager.unregister(panel).map(drop))
    }

    // ========================================================================
    // Screen
    // ========================================================================

    /// Change the UI render scale and re-clamp every panel
    pub fn set_ui_scale(&mut self, scale: f32) {
        self.screen.scale = sanitize_scale(scale);
        for root in &mut self.roots {
            root.manager_mut().ensure_valid_positions();
        }
        tracing::debug!(scale = self.screen.scale, "UI scale changed");
    }

    /// Change the reference resolution (root space) and re-clamp every panel
    pub fn set_reference_resolution(&mut self, resolution: Vec2) {
        let resolution = sanitize_resolution(resolution);
        self.screen.reference_resolution = resolution;
        for root in &mut self.roots {
            root.manager_mut().set_root_size(resolution);
        }
        tracing::debug!(?resolution, "Reference resolution changed");
    }

    pub fn set_interaction_settings(&mut self, settings: InteractionSettings) {
        self.settings = settings;
        for root in &mut self.roots {
            root.manager_mut().set_settings(settings);
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    fn flush_events(&mut self) {
        for root in &mut self.roots {
            let id = root.id().clone();
            for event in root.manager_mut().take_events() {
                self.events.push(RootEvent {
                    root: id.clone(),
                    event,
                });
            }
        }
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<RootEvent> {
        self.flush_events();
        std::mem::take(&mut self.events)
    }
}
