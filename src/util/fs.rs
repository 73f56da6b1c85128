//! Filesystem and path utilities.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
///
/// Any existing file is truncated and replaced.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Resolve `path` against `base` and normalize it without touching the filesystem.
///
/// `.` components are dropped and `..` pops the previous component, so paths
/// that do not exist yet (build output directories, for instance) still resolve.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        lexical_normalize(path)
    } else {
        lexical_normalize(&base.join(path))
    }
}

/// Normalize `.` and `..` components lexically.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Get the path of `path` relative to `base`.
///
/// Both are normalized first. Paths outside `base` come back `..`-prefixed and
/// `base` itself comes back as `.`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    let base = lexical_normalize(base);
    let path = lexical_normalize(path);
    match pathdiff::diff_paths(&path, &base) {
        Some(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Some(rel) => rel,
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lexical_normalize() {
        assert_eq!(
            lexical_normalize(Path::new("/p/./src/../target/classes")),
            PathBuf::from("/p/target/classes")
        );
        assert_eq!(lexical_normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(lexical_normalize(Path::new("../a/../../b")), PathBuf::from("../../b"));
    }

    #[test]
    fn test_absolutize() {
        let base = Path::new("/work/app");
        assert_eq!(
            absolutize(base, Path::new("src/main/clojure")),
            PathBuf::from("/work/app/src/main/clojure")
        );
        assert_eq!(
            absolutize(base, Path::new("/repo/x.jar")),
            PathBuf::from("/repo/x.jar")
        );
        assert_eq!(
            absolutize(base, Path::new("../shared")),
            PathBuf::from("/work/shared")
        );
    }

    #[test]
    fn test_relative_path() {
        let base = Path::new("/work/app");
        assert_eq!(
            relative_path(base, Path::new("/work/app/target/classes")),
            PathBuf::from("target/classes")
        );
        assert_eq!(
            relative_path(base, Path::new("/repo/g/a.jar")),
            PathBuf::from("../../repo/g/a.jar")
        );
        assert_eq!(relative_path(base, Path::new("/work/app")), PathBuf::from("."));
    }

    #[test]
    fn test_write_string_overwrites() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("nested").join("out.txt");

        write_string(&file, "a much longer first version").unwrap();
        write_string(&file, "short").unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "short");
    }
}
