//! Serializer search-path configuration.
//!
//! The core never touches the filesystem; these paths are consumed by an
//! external reload collaborator that discovers serializer sources, declares
//! the variants it finds and then runs
//! [`bootstrap_all`](crate::bootstrap_all).

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use once_cell::sync::Lazy;

static SERIALIZER_PATHS: Lazy<RwLock<Vec<PathBuf>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// Append one directory to the ordered search-path list. Duplicates are
/// dropped.
pub fn add_serializer_path(path: impl AsRef<Path>) {
    let path = path.as_ref().to_path_buf();
    let mut paths = SERIALIZER_PATHS
        .write()
        .expect("serializer paths poisoned");
    if !paths.contains(&path) {
        paths.push(path);
    }
}

/// Replace the whole search-path list.
pub fn set_serializer_paths(paths: Vec<PathBuf>) {
    *SERIALIZER_PATHS
        .write()
        .expect("serializer paths poisoned") = paths;
}

/// The current ordered search paths.
pub fn serializer_paths() -> Vec<PathBuf> {
    SERIALIZER_PATHS
        .read()
        .expect("serializer paths poisoned")
        .clone()
}
