//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use panelkit::{
    ButtonState, ContentContext, DragRegion, FrameInput, PanelContent, PanelEvent, PanelId,
    PointerState, Rect, ResizeSides, RootId, Runtime, RuntimeConfig, Vec2,
};

/// Hook calls recorded by a [`TestPanel`]
pub type HookLog = Rc<RefCell<Vec<String>>>;

/// Panel content with builder-style declared defaults and a hook log
pub struct TestPanel {
    id: &'static str,
    size: Vec2,
    position: Vec2,
    min: Vec2,
    max_width: Option<f32>,
    can_drag: bool,
    can_resize: ResizeSides,
    region: DragRegion,
    fail_construction: bool,
    pub log: HookLog,
}

impl TestPanel {
    /// 200x100 panel centered in the root
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            size: Vec2::new(200.0, 100.0),
            position: Vec2::ZERO,
            min: Vec2::new(100.0, 60.0),
            max_width: None,
            can_drag: true,
            can_resize: ResizeSides::ALL,
            region: DragRegion::TitleBar,
            fail_construction: false,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    /// Offset of the panel center from the root center
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn min(mut self, width: f32, height: f32) -> Self {
        self.min = Vec2::new(width, height);
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn resize(mut self, sides: ResizeSides) -> Self {
        self.can_resize = sides;
        self
    }

    pub fn no_drag(mut self) -> Self {
        self.can_drag = false;
        self
    }

    pub fn region(mut self, region: DragRegion) -> Self {
        self.region = region;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_construction = true;
        self
    }

    /// Shared handle to the hook log
    pub fn log(&self) -> HookLog {
        Rc::clone(&self.log)
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }
}

impl PanelContent for TestPanel {
    fn id(&self) -> PanelId {
        PanelId::from(self.id)
    }

    fn min_width(&self) -> f32 {
        self.min.x
    }

    fn min_height(&self) -> f32 {
        self.min.y
    }

    fn max_width(&self) -> Option<f32> {
        self.max_width
    }

    fn default_anchor_min(&self) -> Vec2 {
        Vec2::HALF
    }

    fn default_anchor_max(&self) -> Vec2 {
        Vec2::HALF
    }

    fn default_position(&self) -> Vec2 {
        self.position
    }

    fn default_size(&self) -> Vec2 {
        self.size
    }

    fn can_drag(&self) -> bool {
        self.can_drag
    }

    fn can_resize(&self) -> ResizeSides {
        self.can_resize
    }

    fn drag_region(&self) -> DragRegion {
        self.region
    }

    fn construct_content(&mut self, _ctx: &mut ContentContext<'_>) -> anyhow::Result<()> {
        self.record("construct");
        if self.fail_construction {
            anyhow::bail!("content unavailable");
        }
        Ok(())
    }

    fn construct_late(&mut self, _ctx: &mut ContentContext<'_>) -> anyhow::Result<()> {
        self.record("construct_late");
        Ok(())
    }

    fn on_active_changed(&mut self, active: bool) {
        self.record(format!("active={}", active));
    }

    fn on_finish_drag(&mut self, _rect: Rect) {
        self.record("finish_drag");
    }

    fn on_finish_resize(&mut self, _rect: Rect) {
        self.record("finish_resize");
    }

    fn on_destroy(&mut self) {
        self.record("destroy");
    }
}

/// Runtime with a 1000x800 root space at scale 1, 10 unit strips and a
/// 30 unit title bar
pub fn test_runtime() -> Runtime {
    let config = RuntimeConfig {
        reference_resolution: Vec2::new(1000.0, 800.0),
        ui_scale: 1.0,
        resize_thickness: 10.0,
        title_bar_height: 30.0,
    };
    Runtime::new(&config)
}

/// Runtime with one root called "main"
pub fn runtime_with_root() -> (Runtime, RootId) {
    let mut runtime = test_runtime();
    let root = RootId::from("main");
    runtime.create_root(root.clone()).unwrap();
    (runtime, root)
}

/// Create a panel and discard the setup events
pub fn add_panel(runtime: &mut Runtime, root: &RootId, panel: TestPanel) -> PanelId {
    let id = runtime.create_panel(root, Box::new(panel)).unwrap();
    runtime.drain_events();
    id
}

/// Drives ticks with a monotonically increasing clock (16ms per frame)
pub struct Clock {
    pub now: Duration,
}

impl Clock {
    pub fn new() -> Self {
        Self { now: Duration::ZERO }
    }

    pub fn frame(&mut self, runtime: &mut Runtime, x: f32, y: f32, button: ButtonState) {
        runtime.tick(&FrameInput::new(
            self.now,
            PointerState::new(Vec2::new(x, y), button),
        ));
        self.now += Duration::from_millis(16);
    }

    pub fn press(&mut self, runtime: &mut Runtime, x: f32, y: f32) {
        self.frame(runtime, x, y, ButtonState::Pressed);
    }

    pub fn hold(&mut self, runtime: &mut Runtime, x: f32, y: f32) {
        self.frame(runtime, x, y, ButtonState::Held);
    }

    pub fn release(&mut self, runtime: &mut Runtime, x: f32, y: f32) {
        self.frame(runtime, x, y, ButtonState::Released);
    }

    pub fn idle(&mut self, runtime: &mut Runtime, x: f32, y: f32) {
        self.frame(runtime, x, y, ButtonState::Idle);
    }

    /// Press, move in held frames, release
    pub fn drag(&mut self, runtime: &mut Runtime, from: (f32, f32), to: (f32, f32), steps: u32) {
        self.press(runtime, from.0, from.1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            self.hold(runtime, x, y);
        }
        self.release(runtime, to.0, to.1);
    }
}

/// Drain and drop the root tag
pub fn events(runtime: &mut Runtime) -> Vec<PanelEvent> {
    runtime.drain_events().into_iter().map(|e| e.event).collect()
}

pub fn count_reorders(events: &[PanelEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PanelEvent::PanelsReordered))
        .count()
}

pub fn rect_of(runtime: &Runtime, root: &RootId, panel: &PanelId) -> Rect {
    runtime.panel(root, panel).unwrap().rect()
}

pub fn z_order(runtime: &Runtime, root: &RootId) -> Vec<String> {
    runtime
        .manager(root)
        .unwrap()
        .z_order()
        .into_iter()
        .map(|id| id.to_string())
        .collect()
}
