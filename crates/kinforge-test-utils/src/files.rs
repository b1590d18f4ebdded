//! Fixture files on disk.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Writes `contents` to `file_name` inside a fresh directory under the
/// system temp dir and returns the file's path.
///
/// Each call gets its own directory, so tests running in parallel never
/// share files. Panics if the temp dir cannot be written.
pub fn write_fixture(file_name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "kinforge-{}-{}",
        std::process::id(),
        NEXT_DIR.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::create_dir_all(&dir).expect("create fixture dir");
    let path = dir.join(file_name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
