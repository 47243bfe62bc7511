use crate::config::default_autostart;

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Start a recording session as soon as the recorder boots.
    #[serde(default = "default_autostart")]
    pub autostart: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            autostart: default_autostart(),
        }
    }
}
