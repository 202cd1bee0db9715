use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates a views directory holding the given `(relative path, source)` pairs.
pub fn views_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, source) in files {
        write_template(dir.path(), name, source);
    }
    dir
}

pub fn write_template(root: &Path, name: &str, source: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, source).unwrap();
}
