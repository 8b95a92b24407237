use std::io;
use std::path::Path;

/// Whether `ensure_dir` had to create anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    AlreadyPresent,
}

/// Filesystem capability used by the precondition and venv steps.
///
/// Kept deliberately small: existence checks, idempotent directory creation,
/// and recursive removal (for the corrupt-venv rebuild) are the only
/// filesystem operations the pipeline performs.
pub trait Workspace: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` (and parents) if absent. Creating an already-existing
    /// directory is a no-op reported as `AlreadyPresent`.
    fn ensure_dir(&self, path: &Path) -> io::Result<EnsureOutcome>;

    fn remove_tree(&self, path: &Path) -> io::Result<()>;
}

/// The one real implementation, backed by `std::fs`.
pub struct DiskWorkspace;

impl Workspace for DiskWorkspace {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<EnsureOutcome> {
        if path.is_dir() {
            return Ok(EnsureOutcome::AlreadyPresent);
        }
        std::fs::create_dir_all(path)?;
        Ok(EnsureOutcome::Created)
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("logs");
        let ws = DiskWorkspace;

        assert_eq!(ws.ensure_dir(&target).unwrap(), EnsureOutcome::Created);
        assert_eq!(
            ws.ensure_dir(&target).unwrap(),
            EnsureOutcome::AlreadyPresent
        );
        assert!(ws.exists(&target));
    }

    #[test]
    fn remove_tree_deletes_nested_content() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("venv");
        std::fs::create_dir_all(root.join("bin")).unwrap();
        std::fs::write(root.join("bin").join("activate"), "").unwrap();

        let ws = DiskWorkspace;
        ws.remove_tree(&root).unwrap();
        assert!(!ws.exists(&root));
    }
}
