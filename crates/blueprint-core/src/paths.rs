use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const BLUEPRINT_DIR: &str = ".blueprint";
pub const DATA_FILE: &str = ".blueprint/data.json";
pub const CONFIG_FILE: &str = ".blueprint/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn blueprint_dir(root: &Path) -> PathBuf {
    root.join(BLUEPRINT_DIR)
}

pub fn data_path(root: &Path) -> PathBuf {
    root.join(DATA_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
