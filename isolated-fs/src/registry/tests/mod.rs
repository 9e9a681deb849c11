mod lifecycle;

use std::path::PathBuf;

// Absolute test entries for the current host.
pub(super) fn test_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("/a/b"),
        PathBuf::from("/c/d/e/f/g"),
        PathBuf::from("/h/"),
    ];
    if cfg!(windows) {
        paths.push(PathBuf::from("c:/foo/bar"));
        paths.push(PathBuf::from("x:\\foo\\baz"));
        paths.push(PathBuf::from("\\foo\\boom"));
    }
    paths
}

pub(super) fn basename(path: &std::path::Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}
