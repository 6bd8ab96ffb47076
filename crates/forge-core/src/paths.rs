use std::path::{Path, PathBuf};

pub const FORGE_DIR: &str = ".forge";
pub const CONFIG_FILE: &str = ".forge/config.yaml";

pub fn forge_dir(root: &Path) -> PathBuf {
    root.join(FORGE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
