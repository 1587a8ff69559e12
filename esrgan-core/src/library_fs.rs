use std::path::Path;

use walkdir::WalkDir;

use crate::error::Result;
use crate::library::Library;

/// Production [`Library`] backed by the real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLibrary;

impl Library for FsLibrary {
    fn subdirs(&self, dir: &Path) -> Result<Vec<String>> {
        list(dir, true)
    }

    fn files(&self, dir: &Path) -> Result<Vec<String>> {
        list(dir, false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        Ok(std::fs::create_dir_all(dir)?)
    }
}

fn list(dir: &Path, dirs: bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_dir() == dirs {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}
