use std::path::Path;

use crate::error::Result;

/// Filesystem capability used during enumeration. Listing is read-only;
/// the one write, destination directory creation, is idempotent. Injected
/// so the engine can run against an in-memory tree in tests.
pub trait Library: Send + Sync {
    /// Names of the direct subdirectories of `dir`, unsorted.
    fn subdirs(&self, dir: &Path) -> Result<Vec<String>>;

    /// Names of the direct child files of `dir`, unsorted.
    fn files(&self, dir: &Path) -> Result<Vec<String>>;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Directory-exists is not an error; safe to call repeatedly.
    fn create_dir_all(&self, dir: &Path) -> Result<()>;
}
