use blueprint_core::paths::BLUEPRINT_DIR;
use std::path::{Path, PathBuf};

/// Resolve the workspace root.
///
/// Priority:
/// 1. `--root` flag / `BLUEPRINT_ROOT` env var (passed in as `explicit`)
/// 2. The nearest ancestor of the working directory holding `.blueprint/`
/// 3. The working directory itself
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_workspace(&cwd).unwrap_or(cwd)
}

fn find_workspace(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(BLUEPRINT_DIR).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
    }

    #[test]
    fn finds_blueprint_dir_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(BLUEPRINT_DIR)).unwrap();
        let deep = dir.path().join("docs/specs");
        std::fs::create_dir_all(&deep).unwrap();
        assert_eq!(find_workspace(&deep).as_deref(), Some(dir.path()));
    }

    #[test]
    fn no_workspace_found() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("a/b");
        std::fs::create_dir_all(&deep).unwrap();
        // Only holds if no ancestor of the temp dir has .blueprint/.
        if dir.path().ancestors().all(|d| !d.join(BLUEPRINT_DIR).is_dir()) {
            assert!(find_workspace(&deep).is_none());
        }
    }
}
