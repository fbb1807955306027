//! Headless scenario runner
//!
//! A scenario is a YAML script: UI roots, panels described by their declared
//! defaults, then a list of steps (pointer frames, drags, messages). Running
//! it drives a [`Runtime`] tick by tick and reports every event plus the final
//! layout. The `panelkit` binary is a thin wrapper around [`run`].
//!
//! ```yaml
//! roots: [hud]
//! panels:
//!   - { root: hud, id: inspector, size: { x: 300, y: 200 } }
//! steps:
//!   - drag: { from: { x: 960, y: 450 }, to: { x: 200, y: 100 }, steps: 4 }
//!   - message: { panel: { op: set_pinned, root: hud, panel: inspector, pinned: true } }
//! ```

use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::RuntimeConfig;
use crate::events::PanelEvent;
use crate::geometry::{Rect, Vec2};
use crate::input::{ButtonState, FrameInput, PointerState};
use crate::messages::Msg;
use crate::panel::{
    ContentContext, DragRegion, PanelContent, PanelId, PanelState, ResizeSides, DEFAULT_MIN_HEIGHT,
    DEFAULT_MIN_WIDTH,
};
use crate::root::RootId;
use crate::runtime::Runtime;
use crate::update::update;

const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

// ============================================================================
// Script format
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Replaces the user config when present
    #[serde(default)]
    pub config: Option<RuntimeConfig>,

    /// Host time between generated frames
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,

    /// Root ids, bottom to top
    #[serde(default)]
    pub roots: Vec<RootId>,

    #[serde(default)]
    pub panels: Vec<PanelSpec>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_frame_interval() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Left,
    Right,
    Bottom,
}

impl Side {
    fn flag(self) -> ResizeSides {
        match self {
            Side::Top => ResizeSides::TOP,
            Side::Left => ResizeSides::LEFT,
            Side::Right => ResizeSides::RIGHT,
            Side::Bottom => ResizeSides::BOTTOM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSpec {
    TitleBar,
    WholePanel,
    Area(Rect),
}

impl From<RegionSpec> for DragRegion {
    fn from(spec: RegionSpec) -> Self {
        match spec {
            RegionSpec::TitleBar => DragRegion::TitleBar,
            RegionSpec::WholePanel => DragRegion::WholePanel,
            RegionSpec::Area(rect) => DragRegion::Area(rect),
        }
    }
}

/// A panel described entirely by its declared defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSpec {
    pub root: RootId,
    pub id: PanelId,
    #[serde(default = "default_min_width")]
    pub min_width: f32,
    #[serde(default = "default_min_height")]
    pub min_height: f32,
    #[serde(default)]
    pub max_width: Option<f32>,
    #[serde(default)]
    pub max_height: Option<f32>,
    /// Point anchor at the root center unless given
    #[serde(default = "default_anchor")]
    pub anchor_min: Vec2,
    #[serde(default = "default_anchor")]
    pub anchor_max: Vec2,
    #[serde(default = "default_anchor")]
    pub pivot: Vec2,
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub size: Vec2,
    #[serde(default = "default_true")]
    pub can_drag: bool,
    #[serde(default = "default_sides")]
    pub resize: Vec<Side>,
    #[serde(default = "default_region")]
    pub drag_region: RegionSpec,
    /// Make `construct_content` fail, to exercise error reporting
    #[serde(default)]
    pub fail_construction: bool,
}

fn default_min_width() -> f32 {
    DEFAULT_MIN_WIDTH
}

fn default_min_height() -> f32 {
    DEFAULT_MIN_HEIGHT
}

fn default_anchor() -> Vec2 {
    Vec2::HALF
}

fn default_true() -> bool {
    true
}

fn default_sides() -> Vec<Side> {
    vec![Side::Top, Side::Left, Side::Right, Side::Bottom]
}

fn default_region() -> RegionSpec {
    RegionSpec::TitleBar
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// One tick with the given pointer sample (screen pixels)
    Frame {
        pointer: Vec2,
        #[serde(default)]
        button: ButtonState,
        /// Absolute host time; defaults to the previous frame plus the interval
        #[serde(default)]
        at_ms: Option<u64>,
    },
    /// Press at `from`, move in `steps` held frames to `to`, release
    Drag {
        from: Vec2,
        to: Vec2,
        #[serde(default = "default_drag_steps")]
        steps: u32,
    },
    /// Idle frames with the pointer parked
    Wait {
        frames: u32,
        #[serde(default)]
        pointer: Vec2,
    },
    Message(Msg),
}

fn default_drag_steps() -> u32 {
    4
}

impl Scenario {
    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(source).context("Failed to parse scenario")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_yaml(&source).with_context(|| format!("Invalid scenario {}", path.display()))
    }
}

// ============================================================================
// Scripted panel content
// ============================================================================

/// Panel content built from a [`PanelSpec`]; shows nothing
#[derive(Debug, Clone)]
pub struct ScriptedPanel {
    spec: PanelSpec,
}

impl ScriptedPanel {
    pub fn new(spec: PanelSpec) -> Self {
        Self { spec }
    }
}

impl PanelContent for ScriptedPanel {
    fn id(&self) -> PanelId {
        self.spec.id.clone()
    }

    fn min_width(&self) -> f32 {
        self.spec.min_width
    }

    fn min_height(&self) -> f32 {
        self.spec.min_height
    }

    fn max_width(&self) -> Option<f32> {
        self.spec.max_width
    }

    fn max_height(&self) -> Option<f32> {
        self.spec.max_height
    }

    fn default_anchor_min(&self) -> Vec2 {
        self.spec.anchor_min
    }

    fn default_anchor_max(&self) -> Vec2 {
        self.spec.anchor_max
    }

    fn default_pivot(&self) -> Vec2 {
        self.spec.pivot
    }

    fn default_position(&self) -> Vec2 {
        self.spec.position
    }

    fn default_size(&self) -> Vec2 {
        self.spec.size
    }

    fn can_drag(&self) -> bool {
        self.spec.can_drag
    }

    fn can_resize(&self) -> ResizeSides {
        self.spec
            .resize
            .iter()
            .fold(ResizeSides::empty(), |sides, side| sides | side.flag())
    }

    fn drag_region(&self) -> DragRegion {
        self.spec.drag_region.into()
    }

    fn construct_content(&mut self, ctx: &mut ContentContext<'_>) -> anyhow::Result<()> {
        if self.spec.fail_construction {
            anyhow::bail!("scripted construction failure for '{}'", ctx.panel);
        }
        tracing::debug!(root = %ctx.root, panel = %ctx.panel, "Scripted content constructed");
        Ok(())
    }
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoggedEvent {
    /// Frame index the event happened on; `None` during setup
    pub frame: Option<u64>,
    pub root: RootId,
    pub event: PanelEvent,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelLayout {
    pub id: PanelId,
    pub rect: Rect,
    pub enabled: bool,
    pub pinned: bool,
    pub state: PanelState,
    pub construction_failed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RootLayout {
    pub root: RootId,
    pub enabled: bool,
    /// Bottom to top
    pub panels: Vec<PanelLayout>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub frames: u64,
    pub events: Vec<LoggedEvent>,
    /// Rejected messages, with the frame they were sent after
    pub errors: Vec<String>,
    /// Bottom to top
    pub layout: Vec<RootLayout>,
}

impl ScenarioReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "frames: {}", self.frames);
        let _ = writeln!(out, "events:");
        for logged in &self.events {
            let frame = logged
                .frame
                .map_or_else(|| "setup".to_string(), |f| format!("#{}", f));
            let _ = writeln!(out, "  [{}] {}: {}", frame, logged.root, describe(&logged.event));
        }
        if !self.errors.is_empty() {
            let _ = writeln!(out, "errors:");
            for error in &self.errors {
                let _ = writeln!(out, "  {}", error);
            }
        }
        let _ = writeln!(out, "layout:");
        for root in &self.layout {
            let _ = writeln!(
                out,
                "  {}{}",
                root.root,
                if root.enabled { "" } else { " (disabled)" }
            );
            for panel in &root.panels {
                let r = panel.rect;
                let _ = writeln!(
                    out,
                    "    {:<16} {:>7.1},{:>7.1} {:>7.1}x{:<7.1} {:?}{}{}",
                    panel.id.as_str(),
                    r.x,
                    r.y,
                    r.width,
                    r.height,
                    panel.state,
                    if panel.pinned { " pinned" } else { "" },
                    if panel.construction_failed { " construction-failed" } else { "" },
                );
            }
        }
        out
    }
}

fn describe(event: &PanelEvent) -> String {
    match event {
        PanelEvent::FinishedDrag { panel, rect } => {
            format!("finished drag {} at {:.1},{:.1}", panel, rect.x, rect.y)
        }
        PanelEvent::FinishedResize { panel, rect } => {
            format!("finished resize {} to {:.1}x{:.1}", panel, rect.width, rect.height)
        }
        PanelEvent::PanelsReordered => "panels reordered".to_string(),
        PanelEvent::ClickedOutsidePanels => "clicked outside panels".to_string(),
        PanelEvent::ResizeHoverEnter { panel, sides } => {
            format!("hover enter {} ({})", panel, sides.describe())
        }
        PanelEvent::ResizeHoverExit { panel, sides } => {
            format!("hover exit {} ({})", panel, sides.describe())
        }
        PanelEvent::ActiveChanged { panel, active } => format!("{} active={}", panel, active),
        PanelEvent::Created { panel } => format!("created {}", panel),
        PanelEvent::Destroyed { panel } => format!("destroyed {}", panel),
    }
}

// ============================================================================
// Runner
// ============================================================================

struct Driver {
    runtime: Runtime,
    interval: Duration,
    time: Duration,
    frames: u64,
    events: Vec<LoggedEvent>,
    errors: Vec<String>,
}

impl Driver {
    fn collect(&mut self, frame: Option<u64>) {
        for event in self.runtime.drain_events() {
            self.events.push(LoggedEvent {
                frame,
                root: event.root,
                event: event.event,
            });
        }
    }

    fn frame(&mut self, pointer: Vec2, button: ButtonState, at: Option<Duration>) {
        self.time = match at {
            Some(at) => at.max(self.time),
            None if self.frames == 0 => self.time,
            None => self.time + self.interval,
        };
        self.runtime
            .tick(&FrameInput::new(self.time, PointerState::new(pointer, button)));
        let index = self.frames;
        self.frames += 1;
        self.collect(Some(index));
    }

    fn step(&mut self, step: &Step) {
        match step {
            Step::Frame {
                pointer,
                button,
                at_ms,
            } => self.frame(*pointer, *button, at_ms.map(Duration::from_millis)),
            Step::Drag { from, to, steps } => {
                let steps = (*steps).max(1);
                self.frame(*from, ButtonState::Pressed, None);
                for i in 1..=steps {
                    let t = i as f32 / steps as f32;
                    let at = Vec2::lerp(*from, *to, Vec2::new(t, t));
                    self.frame(at, ButtonState::Held, None);
                }
                self.frame(*to, ButtonState::Released, None);
            }
            Step::Wait { frames, pointer } => {
                for _ in 0..*frames {
                    self.frame(*pointer, ButtonState::Idle, None);
                }
            }
            Step::Message(msg) => {
                if let Err(err) = update(&mut self.runtime, msg.clone()) {
                    tracing::warn!("Scenario message rejected: {}", err);
                    self.errors.push(format!("after frame {}: {}", self.frames, err));
                }
                let frame = self.frames.checked_sub(1);
                self.collect(frame);
            }
        }
    }
}

/// Run a scenario to completion
pub fn run(scenario: &Scenario, config: &RuntimeConfig) -> anyhow::Result<ScenarioReport> {
    let mut runtime = Runtime::new(config);

    for root in &scenario.roots {
        runtime
            .create_root(root.clone())
            .with_context(|| format!("Failed to create root {}", root))?;
    }
    for spec in &scenario.panels {
        runtime
            .create_panel(&spec.root, Box::new(ScriptedPanel::new(spec.clone())))
            .with_context(|| format!("Failed to create panel {}", spec.id))?;
    }

    let mut driver = Driver {
        runtime,
        interval: Duration::from_millis(scenario.frame_interval_ms),
        time: Duration::ZERO,
        frames: 0,
        events: Vec::new(),
        errors: Vec::new(),
    };
    driver.collect(None);

    for step in &scenario.steps {
        driver.step(step);
    }

    let layout = driver
        .runtime
        .roots()
        .map(|root| RootLayout {
            root: root.id().clone(),
            enabled: root.is_enabled(),
            panels: root
                .manager()
                .panels()
                .map(|panel| PanelLayout {
                    id: panel.id().clone(),
                    rect: panel.rect(),
                    enabled: panel.is_enabled(),
                    pinned: panel.is_pinned(),
                    state: panel.state(),
                    construction_failed: panel.construction_failed(),
                })
                .collect(),
        })
        .collect();

    Ok(ScenarioReport {
        frames: driver.frames,
        events: driver.events,
        errors: driver.errors,
        layout,
    })
}
