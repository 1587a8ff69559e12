use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use esrgan_core::ModelName;

/// Batch Real-ESRGAN restoration + upscale over a Root/Studio/Model/Set
/// image library.
#[derive(Parser, Debug)]
#[command(author, version, about = "ESRGAN image restoration + upscale", long_about = None)]
#[command(rename_all = "snake_case")]
#[command(group(ArgGroup::new("rootsrc").required(true).args(["root", "root_preset"])))]
#[command(group(ArgGroup::new("input").required(true).args(["path", "files"])))]
pub struct Cli {
    /// Base root directory in which all images reside
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Configured root directory preset
    #[arg(long, value_parser = ["p1", "p2", "p3", "p4", "p5", "p6"])]
    pub root_preset: Option<String>,

    /// Studio/Model path relative to the root directory
    #[arg(long = "Path", requires = "sets")]
    pub path: Option<String>,

    /// Individual images to process, relative to the root directory
    #[arg(long = "Files", num_args = 1..)]
    pub files: Option<Vec<String>>,

    /// Sets to process: '*', NNN, NNN-MMM or NNN- (repeatable)
    #[arg(long, num_args = 1.., requires = "path")]
    pub sets: Option<Vec<String>>,

    /// Optional output filename suffix (e.g. V1, V2); the leading '_' is
    /// added automatically
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Output image extension
    #[arg(long, default_value = "png", value_parser = ["png", "jpg"])]
    pub ext: String,

    /// Model name
    #[arg(long, default_value = "x4v3", value_parser = ModelName::CHOICES)]
    pub model: String,

    /// Describe the available models and exit
    #[arg(long)]
    pub model_help: bool,

    /// Use GFPGAN to enhance faces after upscaling
    #[arg(long)]
    pub face_enhance: bool,

    /// Tile size for image processing
    #[arg(long, default_value_t = 800)]
    pub tile: u32,

    /// Tile padding for image processing
    #[arg(long, default_value_t = 10)]
    pub tile_pad: u32,

    /// Output scale factor (1.0 = restore only)
    #[arg(long, default_value_t = 1.0)]
    pub outscale: f32,

    /// GPU ID to use for processing
    #[arg(long, default_value_t = 0)]
    pub gpu_id: u32,

    /// Settings file with the output root, script path and root presets
    #[arg(long, default_value = "esrgan.json")]
    pub config: PathBuf,

    /// Enumerate and print the job list without invoking the tool
    #[arg(long)]
    pub dry_run: bool,
}
