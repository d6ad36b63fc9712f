use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const BIZPLAN_DIR: &str = ".bizplan";
pub const STORAGE_DIR: &str = ".bizplan/storage";
pub const CONFIG_FILE: &str = ".bizplan/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn bizplan_dir(root: &Path) -> PathBuf {
    root.join(BIZPLAN_DIR)
}

pub fn storage_dir(root: &Path) -> PathBuf {
    root.join(STORAGE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// File backing a single storage key, e.g. `.bizplan/storage/wizard-storage.json`.
pub fn storage_path(root: &Path, key: &str) -> PathBuf {
    storage_dir(root).join(format!("{key}.json"))
}

pub fn is_initialized(root: &Path) -> bool {
    config_path(root).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.bizplan/config.yaml")
        );
        assert_eq!(
            storage_path(root, "wizard-storage"),
            PathBuf::from("/tmp/proj/.bizplan/storage/wizard-storage.json")
        );
    }
}
