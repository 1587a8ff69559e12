use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EsrganError, Result};
use crate::library::Library;

/// Named root preset slot, `p1` through `p6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKey {
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
}

impl PresetKey {
    pub const ALL: [PresetKey; 6] = [
        PresetKey::P1,
        PresetKey::P2,
        PresetKey::P3,
        PresetKey::P4,
        PresetKey::P5,
        PresetKey::P6,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetKey::P1 => "p1",
            PresetKey::P2 => "p2",
            PresetKey::P3 => "p3",
            PresetKey::P4 => "p4",
            PresetKey::P5 => "p5",
            PresetKey::P6 => "p6",
        }
    }
}

impl fmt::Display for PresetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetKey {
    type Err = EsrganError;

    fn from_str(s: &str) -> Result<Self> {
        PresetKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                EsrganError::Validation(format!("unknown preset {s:?} (expected p1..p6)"))
            })
    }
}

/// Preset-name-to-path table, supplied by external configuration.
/// Slots may be left unconfigured.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Presets(pub BTreeMap<PresetKey, PathBuf>);

impl Presets {
    pub fn get(&self, key: PresetKey) -> Option<&Path> {
        self.0.get(&key).map(PathBuf::as_path)
    }
}

/// Where the library root comes from. The mutually exclusive
/// `--root`/`--root_preset` pair collapses into one tagged value, resolved
/// to a single existing directory before any downstream component runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RootSource {
    Literal(PathBuf),
    Preset(PresetKey),
}

impl RootSource {
    pub fn resolve(&self, presets: &Presets, lib: &dyn Library) -> Result<PathBuf> {
        let root = match self {
            RootSource::Literal(path) => path.clone(),
            RootSource::Preset(key) => presets
                .get(*key)
                .ok_or_else(|| {
                    EsrganError::Validation(format!("preset {key} is not configured"))
                })?
                .to_path_buf(),
        };
        if !lib.is_dir(&root) {
            return Err(EsrganError::Validation(format!(
                "root {} is not a readable directory",
                root.display()
            )));
        }
        Ok(root)
    }
}
