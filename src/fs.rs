use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Filesystem operations needed while assembling a full track path.
pub trait Directories {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents.
    fn create(&self, path: &Path) -> Result<()>;
}

/// `Directories` backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalDirectories;

impl Directories for LocalDirectories {
    fn exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }
}

/// Make `path` absolute against the current directory and fold away `.` and
/// `..` components without touching the filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("reading current directory")?
            .join(path)
    };

    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_folds_dot_components() {
        let p = absolutize(Path::new("/music/./a/../b")).unwrap();
        assert_eq!(p, PathBuf::from("/music/b"));
    }

    #[test]
    fn absolutize_relative_uses_current_dir() {
        let p = absolutize(Path::new("lib")).unwrap();
        assert!(p.is_absolute());
        assert!(p.ends_with("lib"));
    }
}
