//! panelkit - frame-driven panel runtime
//!
//! This crate manages movable, resizable, z-ordered panels on top of a host
//! rendering surface. The host calls [`Runtime::tick`] once per frame with a
//! pointer sample; the runtime runs deferred work and timers, resolves focus
//! and z-order, drives drag/resize interaction and queues events.
//!
//! Panel content is opaque: concrete panel types implement [`PanelContent`].

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod dragger;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod manager;
pub mod messages;
pub mod panel;
pub mod root;
pub mod runtime;
pub mod scenario;
pub mod scheduler;
pub mod scroll_pool;
pub mod update;

// Re-export commonly used types
pub use config::RuntimeConfig;
pub use dragger::{DragMode, InteractionSettings, PanelDragger};
pub use error::RuntimeError;
pub use events::{PanelEvent, RootEvent};
pub use geometry::{Rect, RectTransform, Screen, Vec2};
pub use input::{ButtonState, FrameInput, InputArbitration, PointerState};
pub use manager::PanelManager;
pub use messages::{Msg, PanelMsg, RootMsg, ScreenMsg};
pub use panel::{ContentContext, DragRegion, Panel, PanelContent, PanelId, PanelState, ResizeSides};
pub use root::{RootId, UiRoot};
pub use runtime::Runtime;
pub use scheduler::{CallbackId, FrameInfo, FrameScheduler, FrameTimer, Step, TimerDelay};
pub use scroll_pool::{CellDataSource, PoolCell, ScrollPool};
pub use update::update;
