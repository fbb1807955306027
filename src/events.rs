//! Notifications the runtime queues for the host
//!
//! Events are collected per root during a tick (or a message) and drained by
//! the host with [`crate::Runtime::drain_events`].

use serde::Serialize;

use crate::geometry::Rect;
use crate::panel::{PanelId, ResizeSides};
use crate::root::RootId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelEvent {
    /// A drag ended; `rect` is the final root-space rectangle
    FinishedDrag { panel: PanelId, rect: Rect },
    /// A resize ended; `rect` is the final root-space rectangle
    FinishedResize { panel: PanelId, rect: Rect },
    /// Z-order of the root's panels changed (one event per change)
    PanelsReordered,
    /// A press in this root hit no enabled panel
    ClickedOutsidePanels,
    ResizeHoverEnter { panel: PanelId, sides: ResizeSides },
    ResizeHoverExit { panel: PanelId, sides: ResizeSides },
    ActiveChanged { panel: PanelId, active: bool },
    Created { panel: PanelId },
    Destroyed { panel: PanelId },
}

impl PanelEvent {
    /// Panel the event concerns, if any
    pub fn panel(&self) -> Option<&PanelId> {
        match self {
            PanelEvent::FinishedDrag { panel, .. }
            | PanelEvent::FinishedResize { panel, .. }
            | PanelEvent::ResizeHoverEnter { panel, .. }
            | PanelEvent::ResizeHoverExit { panel, .. }
            | PanelEvent::ActiveChanged { panel, .. }
            | PanelEvent::Created { panel }
            | PanelEvent::Destroyed { panel } => Some(panel),
            PanelEvent::PanelsReordered | PanelEvent::ClickedOutsidePanels => None,
        }
    }
}

/// An event tagged with the root it happened in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootEvent {
    pub root: RootId,
    pub event: PanelEvent,
}
