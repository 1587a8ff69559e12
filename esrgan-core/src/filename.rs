use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Set and image numbers are three zero-padded digits, `001` through `999`.
pub const NUMBER_MIN: u16 = 1;
pub const NUMBER_MAX: u16 = 999;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExt {
    #[default]
    Png,
    Jpg,
}

impl ImageExt {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageExt::Png => "png",
            ImageExt::Jpg => "jpg",
        }
    }

    /// Case-insensitive; `jpeg` folds to `jpg`.
    pub fn from_ext(ext: &str) -> Option<ImageExt> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageExt::Png),
            "jpg" | "jpeg" => Some(ImageExt::Jpg),
            _ => None,
        }
    }
}

impl fmt::Display for ImageExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a filename was rejected. Never fatal: the file is skipped from
/// enumeration and recorded in the run report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("does not match Model-SSS-NNN[_suffix].ext")]
    Pattern,

    #[error("{0:?} is not a three-digit group in 001-999")]
    Digits(String),

    #[error("unrecognized extension {0:?}")]
    Extension(String),
}

/// A filename decomposed against the library convention
/// `Model-SetNumber-ImageNumber[_Suffix].ext`. `-` is the reserved field
/// separator, so model names containing `-` are not representable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageName {
    pub model: String,
    pub set: u16,
    pub image: u16,
    pub suffix: Option<String>,
    pub ext: ImageExt,
}

impl ImageName {
    pub fn parse(name: &str) -> std::result::Result<ImageName, ParseError> {
        let (stem, ext) = name.rsplit_once('.').ok_or(ParseError::Pattern)?;
        let ext = ImageExt::from_ext(ext).ok_or_else(|| ParseError::Extension(ext.to_string()))?;

        let mut fields = stem.split('-');
        let (model, set, rest) = match (fields.next(), fields.next(), fields.next(), fields.next())
        {
            (Some(model), Some(set), Some(rest), None) if !model.is_empty() => (model, set, rest),
            _ => return Err(ParseError::Pattern),
        };

        let (image, suffix) = match rest.split_once('_') {
            Some((_, "")) => return Err(ParseError::Pattern),
            Some((image, suffix)) => (image, Some(suffix.to_string())),
            None => (rest, None),
        };

        Ok(ImageName {
            model: model.to_string(),
            set: three_digits(set).ok_or_else(|| ParseError::Digits(set.to_string()))?,
            image: three_digits(image).ok_or_else(|| ParseError::Digits(image.to_string()))?,
            suffix,
            ext,
        })
    }

    /// Canonical filename; the inverse of [`ImageName::parse`] for inputs
    /// with a lowercase extension.
    pub fn file_name(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!(
                "{}-{:03}-{:03}_{}.{}",
                self.model, self.set, self.image, suffix, self.ext
            ),
            None => format!("{}-{:03}-{:03}.{}", self.model, self.set, self.image, self.ext),
        }
    }
}

/// Exactly three ASCII digits, value within `001..=999`.
pub(crate) fn three_digits(s: &str) -> Option<u16> {
    if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|n| *n >= NUMBER_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_name() {
        let parsed = ImageName::parse("Nikki-001-042.jpg").unwrap();
        assert_eq!(parsed.model, "Nikki");
        assert_eq!(parsed.set, 1);
        assert_eq!(parsed.image, 42);
        assert_eq!(parsed.suffix, None);
        assert_eq!(parsed.ext, ImageExt::Jpg);
    }

    #[test]
    fn parses_suffixed_name() {
        let parsed = ImageName::parse("Nikki-012-003_X4V3.png").unwrap();
        assert_eq!(parsed.suffix.as_deref(), Some("X4V3"));
        assert_eq!(parsed.ext, ImageExt::Png);
    }

    #[test]
    fn round_trips_canonical_names() {
        for name in ["Nikki-001-001.jpg", "Ava-999-999_V2.png", "B_side-010-020.png"] {
            assert_eq!(ImageName::parse(name).unwrap().file_name(), name);
        }
    }

    #[test]
    fn folds_extension_case_and_jpeg() {
        assert_eq!(ImageName::parse("Nikki-001-001.JPG").unwrap().ext, ImageExt::Jpg);
        assert_eq!(ImageName::parse("Nikki-001-001.jpeg").unwrap().ext, ImageExt::Jpg);
        assert_eq!(ImageName::parse("Nikki-001-001.PNG").unwrap().ext, ImageExt::Png);
    }

    #[test]
    fn rejects_bad_digit_groups() {
        assert_eq!(
            ImageName::parse("Nikki-01-001.jpg"),
            Err(ParseError::Digits("01".into()))
        );
        assert_eq!(
            ImageName::parse("Nikki-001-1234.jpg"),
            Err(ParseError::Digits("1234".into()))
        );
        assert_eq!(
            ImageName::parse("Nikki-000-001.jpg"),
            Err(ParseError::Digits("000".into()))
        );
    }

    #[test]
    fn rejects_unknown_extension() {
        assert_eq!(
            ImageName::parse("Nikki-001-001.gif"),
            Err(ParseError::Extension("gif".into()))
        );
    }

    #[test]
    fn rejects_malformed_patterns() {
        // model containing '-' yields four fields
        assert_eq!(ImageName::parse("Ni-kki-001-001.jpg"), Err(ParseError::Pattern));
        assert_eq!(ImageName::parse("Nikki-001.jpg"), Err(ParseError::Pattern));
        assert_eq!(ImageName::parse("-001-001.jpg"), Err(ParseError::Pattern));
        assert_eq!(ImageName::parse("Nikki-001-001_.jpg"), Err(ParseError::Pattern));
        assert_eq!(ImageName::parse("noextension"), Err(ParseError::Pattern));
    }
}
