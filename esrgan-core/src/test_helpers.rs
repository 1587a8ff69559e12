use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;
use crate::library::Library;

/// In-memory directory tree so enumeration tests never touch a real
/// filesystem. Adding a file registers every ancestor directory.
#[derive(Default)]
pub(crate) struct MemLibrary {
    dirs: BTreeSet<PathBuf>,
    files: BTreeSet<PathBuf>,
    pub created: Mutex<Vec<PathBuf>>,
}

impl MemLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&mut self, path: &str) {
        let path = PathBuf::from(path);
        self.register_ancestors(&path);
        self.dirs.insert(path);
    }

    pub fn add_file(&mut self, path: &str) {
        let path = PathBuf::from(path);
        self.register_ancestors(&path);
        self.files.insert(path);
    }

    fn register_ancestors(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }

    fn children(&self, tree: &BTreeSet<PathBuf>, dir: &Path) -> Vec<String> {
        tree.iter()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect()
    }
}

impl Library for MemLibrary {
    fn subdirs(&self, dir: &Path) -> Result<Vec<String>> {
        Ok(self.children(&self.dirs, dir))
    }

    fn files(&self, dir: &Path) -> Result<Vec<String>> {
        Ok(self.children(&self.files, dir))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        self.created.lock().unwrap().push(dir.to_path_buf());
        Ok(())
    }
}
