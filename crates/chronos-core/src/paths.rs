use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CHRONOS_DIR: &str = ".chronos";
pub const CONFIG_FILE: &str = ".chronos/config.yaml";
pub const DEFAULT_DATABASE: &str = "timetable.db";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn chronos_dir(root: &Path) -> PathBuf {
    root.join(CHRONOS_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve the database file; relative names live under `.chronos/`.
pub fn database_path(root: &Path, database: &str) -> PathBuf {
    let p = Path::new(database);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        chronos_dir(root).join(p)
    }
}
