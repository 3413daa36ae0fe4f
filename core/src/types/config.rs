//! Global configuration and its reconfiguration merge.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Process-wide configuration. Set once at startup; changed afterwards only
/// through an explicit [`GlobalConfig::merge`] of a [`ConfigPatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    /// tmux window target for multiplexer dispatch (`send-keys -t <this>`).
    pub window_id: String,
    /// Global fallback for a slot's `pre` hook.
    pub default_pre: String,
    /// Global fallback for a slot's `post` hook.
    pub default_post: String,
}

impl Default for GlobalConfig {
    fn default() -> GlobalConfig {
        GlobalConfig {
            window_id: "{last}".into(),
            default_pre: String::new(),
            default_post: String::new(),
        }
    }
}

impl GlobalConfig {
    /// Merge a patch: fields present in the patch replace the corresponding
    /// field, absent fields keep their prior value.
    pub fn merge(&mut self, patch: ConfigPatch) {
        if let Some(w) = patch.window_id {
            self.window_id = w;
        }
        if let Some(pre) = patch.default_pre {
            self.default_pre = pre;
        }
        if let Some(post) = patch.default_post {
            self.default_post = post;
        }
    }
}

/// Partial configuration override, as read from `config.yaml` or built from
/// command-line flags. `None` means "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_pre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_post: Option<String>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.window_id.is_none() && self.default_pre.is_none() && self.default_post.is_none()
    }
}

/// Load a patch from a YAML config file.
pub fn load_patch(path: &Path) -> Result<ConfigPatch, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    parse_patch(&content)
}

/// Parse a patch from a YAML string.
pub fn parse_patch(content: &str) -> Result<ConfigPatch, String> {
    serde_yaml::from_str(content).map_err(|e| format!("invalid config: {}", e))
}
