//! Caller errors on the runtime API
//!
//! Panel hooks and timer actions report failures through `anyhow` and are
//! logged, never returned. These errors are for requests that name something
//! that does not exist (or already exists).

use thiserror::Error;

use crate::panel::PanelId;
use crate::root::RootId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("unknown UI root: {root}")]
    UnknownRoot { root: RootId },

    #[error("unknown panel '{panel}' in UI root {root}")]
    UnknownPanel { root: RootId, panel: PanelId },

    #[error("panel '{panel}' already exists in UI root {root}")]
    DuplicatePanel { root: RootId, panel: PanelId },

    #[error("UI root {root} already exists")]
    DuplicateRoot { root: RootId },
}

impl RuntimeError {
    pub fn unknown_panel(root: &RootId, panel: &PanelId) -> Self {
        Self::UnknownPanel {
            root: root.clone(),
            panel: panel.clone(),
        }
    }
}
