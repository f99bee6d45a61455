//! Path utilities for locating test data files.
//!
//! Real dataset files are large and not checked in. Tests that want them look
//! in `TEST_DATA_DIR` first, then the workspace `data/` and `testdata/` folders.

use std::path::PathBuf;

use community_store::DatasetPaths;

/// Returns the workspace root directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Searches for a test file.
///
/// Checked in order:
/// 1. `TEST_DATA_DIR` (if set)
/// 2. `data/` at the workspace root
/// 3. `testdata/` at the workspace root
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(test_data_dir) = std::env::var("TEST_DATA_DIR") {
        candidates.push(PathBuf::from(test_data_dir).join(name));
    }

    let root = workspace_root();
    candidates.extend([
        root.join("data").join(name),
        root.join("testdata").join(name),
    ]);

    candidates.into_iter().find(|path| path.exists())
}

/// Locate the full production dataset if all three files are present.
pub fn find_dataset() -> Option<DatasetPaths> {
    let defaults = DatasetPaths::default();
    let file = |p: &PathBuf| {
        p.file_name()
            .and_then(|n| n.to_str())
            .and_then(find_test_file)
    };
    Some(DatasetPaths {
        locations: file(&defaults.locations)?,
        summaries: file(&defaults.summaries)?,
        taxa: file(&defaults.taxa)?,
    })
}

/// Creates a temporary directory for test output, removed on drop.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_is_valid() {
        let root = workspace_root();
        assert!(
            root.join("Cargo.toml").exists(),
            "Workspace root should contain Cargo.toml: {:?}",
            root
        );
    }

    #[test]
    fn test_missing_file() {
        let missing = find_test_file("definitely-not-a-dataset-file.csv");
        assert!(missing.is_none());
    }
}
