//! Update functions for host requests
//!
//! All request-driven state changes flow through [`update`]. Events produced
//! along the way land in the runtime's queue.

use crate::error::Result;
use crate::messages::{Msg, PanelMsg, RootMsg, ScreenMsg};
use crate::runtime::Runtime;

/// Main update function - dispatches to sub-handlers
pub fn update(runtime: &mut Runtime, msg: Msg) -> Result<()> {
    tracing::trace!(?msg, "update");
    match msg {
        Msg::Panel(m) => update_panel(runtime, m),
        Msg::Root(m) => update_root(runtime, m),
        Msg::Screen(m) => {
            update_screen(runtime, m);
            Ok(())
        }
    }
}

/// Handle per-panel messages
pub fn update_panel(runtime: &mut Runtime, msg: PanelMsg) -> Result<()> {
    match msg {
        PanelMsg::SetActive {
            root,
            panel,
            active,
        } => runtime
            .with_manager(&root, |m| m.set_active(&panel, active))
            .map(drop),

        PanelMsg::SetActiveOnly {
            root,
            panel,
            active,
        } => runtime
            .with_manager(&root, |m| m.set_active_only(&panel, active))
            .map(drop),

        PanelMsg::Toggle { root, panel } => runtime.with_manager(&root, |m| m.toggle(&panel)).map(drop),

        PanelMsg::SetPinned {
            root,
            panel,
            pinned,
        } => runtime
            .with_manager(&root, |m| m.set_pinned(&panel, pinned))
            .map(drop),

        PanelMsg::EnsureValidSize { root, panel } => runtime
            .with_manager(&root, |m| m.ensure_valid_size(&panel))
            .map(drop),

        PanelMsg::EnsureValidPosition { root, panel } => runtime
            .with_manager(&root, |m| m.ensure_valid_position(&panel))
            .map(drop),

        PanelMsg::ResetToDefault { root, panel } => {
            runtime.with_manager(&root, |m| m.reset_to_default(&panel))
        }

        PanelMsg::BringToFront { root, panel } => runtime
            .with_manager(&root, |m| m.bring_to_front(&panel))
            .map(drop),

        PanelMsg::Destroy { root, panel } => runtime.destroy_panel(&root, &panel),
    }
}

/// Handle UI root messages
pub fn update_root(runtime: &mut Runtime, msg: RootMsg) -> Result<()> {
    match msg {
        RootMsg::Create { root } => runtime.create_root(root),
        RootMsg::Remove { root } => runtime.remove_root(&root),
        RootMsg::SetEnabled { root, enabled } => runtime.set_root_enabled(&root, enabled).map(drop),
        RootMsg::BringToFront { root } => runtime.bring_root_to_front(&root).map(drop),
    }
}

/// Handle host surface messages
pub fn update_screen(runtime: &mut Runtime, msg: ScreenMsg) {
    match msg {
        ScreenMsg::SetUiScale { scale } => runtime.set_ui_scale(scale),
        ScreenMsg::SetReferenceResolution { resolution } => {
            runtime.set_reference_resolution(resolution)
        }
    }
}
