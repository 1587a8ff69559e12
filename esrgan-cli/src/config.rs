use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use esrgan_core::error::{EsrganError, Result};
use esrgan_core::presets::Presets;

/// Installation-side settings the engine must not hard-code: where output
/// goes, where the inference script lives, and the root preset table.
///
/// ```json
/// {
///   "output_root": "/mnt/raid1/AI_IMAGES",
///   "realesrgan_script": "/opt/Real-ESRGAN/inference_realesrgan.py",
///   "presets": { "p1": "/home/nikki/+Graphics/+Models" }
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub output_root: PathBuf,
    pub realesrgan_script: PathBuf,
    #[serde(default)]
    pub presets: Presets,
}

pub fn load(path: &Path) -> Result<AppConfig> {
    let raw = fs::read_to_string(path).map_err(|e| {
        EsrganError::Validation(format!("cannot read settings {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        EsrganError::Validation(format!("malformed settings {}: {e}", path.display()))
    })
}
