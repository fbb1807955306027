//! UI roots: independent layers of panels
//!
//! Each root owns one [`PanelManager`]. Roots are z-ordered inside the
//! runtime (last = topmost) and disabled roots take no input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dragger::InteractionSettings;
use crate::geometry::Vec2;
use crate::manager::PanelManager;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootId(String);

impl RootId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RootId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RootId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct UiRoot {
    id: RootId,
    enabled: bool,
    manager: PanelManager,
}

impl UiRoot {
    pub(crate) fn new(id: RootId, root_size: Vec2, settings: InteractionSettings) -> Self {
        let manager = PanelManager::new(id.clone(), root_size, settings);
        Self {
            id,
            enabled: true,
            manager,
        }
    }

    pub fn id(&self) -> &RootId {
        &self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) -> bool {
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        true
    }

    pub fn manager(&self) -> &PanelManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut PanelManager {
        &mut self.manager
    }
}
