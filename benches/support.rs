//! Shared helpers for benchmarks

use std::time::Duration;

use panelkit::{
    ButtonState, ContentContext, FrameInput, PanelContent, PanelId, PointerState, RootId, Runtime,
    RuntimeConfig, Vec2,
};

/// Content that declares a size and position and does nothing else
pub struct BenchPanel {
    id: String,
    position: Vec2,
}

impl PanelContent for BenchPanel {
    fn id(&self) -> PanelId {
        PanelId::new(self.id.clone())
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
        Vec2::new(240.0, 160.0)
    }

    fn construct_content(&mut self, _ctx: &mut ContentContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Runtime with one root holding `panels` panels laid out on a grid.
/// The last panel is topmost and centered.
#[allow(dead_code)]
pub fn make_runtime(panels: usize) -> (Runtime, RootId) {
    let config = RuntimeConfig {
        reference_resolution: Vec2::new(1920.0, 1080.0),
        ..Default::default()
    };
    let mut runtime = Runtime::new(&config);
    let root = RootId::from("bench");
    runtime.create_root(root.clone()).unwrap();

    for i in 0..panels {
        let position = if i + 1 == panels {
            Vec2::ZERO
        } else {
            let col = (i % 6) as f32;
            let row = ((i / 6) % 5) as f32;
            Vec2::new(col * 260.0 - 650.0, row * 180.0 - 360.0)
        };
        let panel = BenchPanel {
            id: format!("panel-{}", i),
            position,
        };
        runtime.create_panel(&root, Box::new(panel)).unwrap();
    }
    runtime.drain_events();
    (runtime, root)
}

/// Drives ticks 16ms apart
#[allow(dead_code)]
pub struct BenchClock {
    now: Duration,
}

#[allow(dead_code)]
impl BenchClock {
    pub fn new() -> Self {
        Self { now: Duration::ZERO }
    }

    pub fn tick(&mut self, runtime: &mut Runtime, x: f32, y: f32, button: ButtonState) {
        runtime.tick(&FrameInput::new(
            self.now,
            PointerState::new(Vec2::new(x, y), button),
        ));
        self.now += Duration::from_millis(16);
    }
}
