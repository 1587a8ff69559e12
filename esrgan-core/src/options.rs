use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EsrganError;
use crate::filename::ImageExt;

/// Real-ESRGAN model choice, passed through untouched to the runner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelName {
    #[default]
    X4v3,
    X4plus,
    NetX4plus,
    X2plus,
    X4plusAnime6B,
}

impl ModelName {
    pub const CHOICES: [&'static str; 5] =
        ["x4v3", "x4plus", "net_x4plus", "x2plus", "x4plus_anime_6B"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::X4v3 => "x4v3",
            ModelName::X4plus => "x4plus",
            ModelName::NetX4plus => "net_x4plus",
            ModelName::X2plus => "x2plus",
            ModelName::X4plusAnime6B => "x4plus_anime_6B",
        }
    }

    /// Published weight name the inference script expects for `-n`.
    pub fn weights_name(&self) -> &'static str {
        match self {
            ModelName::X4v3 => "realesr-general-x4v3",
            ModelName::X4plus => "RealESRGAN_x4plus",
            ModelName::NetX4plus => "RealESRNet_x4plus",
            ModelName::X2plus => "RealESRGAN_x2plus",
            ModelName::X4plusAnime6B => "RealESRGAN_x4plus_anime_6B",
        }
    }
}

impl FromStr for ModelName {
    type Err = EsrganError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x4v3" => Ok(ModelName::X4v3),
            "x4plus" => Ok(ModelName::X4plus),
            "net_x4plus" => Ok(ModelName::NetX4plus),
            "x2plus" => Ok(ModelName::X2plus),
            "x4plus_anime_6B" => Ok(ModelName::X4plusAnime6B),
            other => Err(EsrganError::Validation(format!(
                "unknown model {other:?} (expected one of {})",
                ModelName::CHOICES.join(", ")
            ))),
        }
    }
}

/// Output filename rewrite applied uniformly to every job of a run.
/// The suffix must not carry its leading underscore; the resolver injects it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub suffix: Option<String>,
    pub ext: ImageExt,
}

/// Upscaler knobs forwarded verbatim to the external tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpscaleOptions {
    pub model: ModelName,
    pub tile: u32,
    pub tile_pad: u32,
    pub outscale: f32,
    pub gpu_id: u32,
    pub face_enhance: bool,
}

impl Default for UpscaleOptions {
    fn default() -> Self {
        UpscaleOptions {
            model: ModelName::default(),
            tile: 800,
            tile_pad: 10,
            outscale: 1.0,
            gpu_id: 0,
            face_enhance: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_names_round_trip() {
        for choice in ModelName::CHOICES {
            assert_eq!(choice.parse::<ModelName>().unwrap().as_str(), choice);
        }
    }

    #[test]
    fn unknown_model_is_a_validation_error() {
        assert!(matches!(
            "x8giga".parse::<ModelName>(),
            Err(EsrganError::Validation(_))
        ));
    }

    #[test]
    fn weights_names_match_the_published_models() {
        assert_eq!(ModelName::X4v3.weights_name(), "realesr-general-x4v3");
        assert_eq!(
            ModelName::X4plusAnime6B.weights_name(),
            "RealESRGAN_x4plus_anime_6B"
        );
    }
}
