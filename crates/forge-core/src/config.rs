use crate::error::{ForgeError, Result};
use crate::paths;
use crate::sidebar::{SidebarProvider, DEFAULT_COLLAPSE_BREAKPOINT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Widest display width anyone plausibly ships a layout for (8K).
const MAX_SANE_BREAKPOINT: u32 = 7680;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// LayoutConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Viewports narrower than this (in CSS pixels) mount with the sidebar
    /// collapsed. 0 disables auto-collapse.
    #[serde(default = "default_breakpoint")]
    pub collapse_breakpoint: u32,
}

fn default_breakpoint() -> u32 {
    DEFAULT_COLLAPSE_BREAKPOINT
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            collapse_breakpoint: default_breakpoint(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(ForgeError::ConfigNotFound);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load the project config, or defaults when none has been written.
    /// A config that exists but fails to parse is still an error.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(ForgeError::ConfigNotFound) => {
                tracing::debug!(root = %root.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn mount_sidebar(&self, viewport_width: Option<u32>) -> SidebarProvider {
        SidebarProvider::mount_with_breakpoint(viewport_width, self.layout.collapse_breakpoint)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("unsupported config version {}", self.version),
            });
        }

        let bp = self.layout.collapse_breakpoint;
        if bp == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "layout.collapse_breakpoint is 0: the sidebar never starts collapsed"
                    .to_string(),
            });
        } else if bp > MAX_SANE_BREAKPOINT {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "layout.collapse_breakpoint={bp} (>{MAX_SANE_BREAKPOINT} is unusual): \
                     the sidebar starts collapsed on every display"
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
