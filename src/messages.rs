//! Message types for host requests
//!
//! Every request a host (or a scenario script) makes on the runtime can be
//! expressed as a [`Msg`] and applied with [`crate::update::update`].

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;
use crate::panel::PanelId;
use crate::root::RootId;

/// Per-panel requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PanelMsg {
    /// Activate (raise, report reorder) or deactivate (end interactions)
    SetActive {
        root: RootId,
        panel: PanelId,
        active: bool,
    },
    /// Change enabled state without touching z-order
    SetActiveOnly {
        root: RootId,
        panel: PanelId,
        active: bool,
    },
    Toggle { root: RootId, panel: PanelId },
    /// Pinned panels ignore drag and resize
    SetPinned {
        root: RootId,
        panel: PanelId,
        pinned: bool,
    },
    EnsureValidSize { root: RootId, panel: PanelId },
    EnsureValidPosition { root: RootId, panel: PanelId },
    /// Reapply declared default size and position
    ResetToDefault { root: RootId, panel: PanelId },
    BringToFront { root: RootId, panel: PanelId },
    Destroy { root: RootId, panel: PanelId },
}

/// UI root requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RootMsg {
    Create { root: RootId },
    Remove { root: RootId },
    SetEnabled { root: RootId, enabled: bool },
    BringToFront { root: RootId },
}

/// Host surface requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScreenMsg {
    SetUiScale { scale: f32 },
    SetReferenceResolution { resolution: Vec2 },
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Msg {
    Panel(PanelMsg),
    Root(RootMsg),
    Screen(ScreenMsg),
}

impl From<PanelMsg> for Msg {
    fn from(msg: PanelMsg) -> Self {
        Msg::Panel(msg)
    }
}

impl From<RootMsg> for Msg {
    fn from(msg: RootMsg) -> Self {
        Msg::Root(msg)
    }
}

impl From<ScreenMsg> for Msg {
    fn from(msg: ScreenMsg) -> Self {
        Msg::Screen(msg)
    }
}
