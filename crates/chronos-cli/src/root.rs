use std::path::{Path, PathBuf};

/// Resolve the chronos project root.
///
/// Priority:
/// 1. `--root` flag / `CHRONOS_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.chronos/`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_project_dir(&cwd).unwrap_or(cwd)
}

/// Nearest ancestor of `start` (inclusive) that contains `.chronos/`.
fn find_project_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(chronos_core::paths::CHRONOS_DIR).is_dir())
        .map(Path::to_path_buf)
}
