use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{EsrganError, Result};
use crate::filename::ImageName;
use crate::library::Library;
use crate::options::OutputSpec;
use crate::report::Skip;

/// Destination filename for one parsed source: suffix and extension are
/// substituted from the output spec, everything else carries over.
pub fn dest_name(src: &ImageName, spec: &OutputSpec) -> String {
    ImageName {
        suffix: spec.suffix.clone(),
        ext: spec.ext,
        ..src.clone()
    }
    .file_name()
}

/// Input/destination pair for one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedImage {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Enumerate the parsable images of one set directory (direct children
/// only) and map each to its mirrored destination, in ascending
/// (image number, filename) order. The destination set directory is
/// created here.
///
/// Returns `None` when the set directory does not exist; the skip is
/// recorded and the set is left out of the run.
pub fn resolve_set(
    lib: &dyn Library,
    root: &Path,
    rel_path: &str,
    set: u16,
    output_root: &Path,
    spec: &OutputSpec,
    skips: &mut Vec<Skip>,
) -> Result<Option<Vec<ResolvedImage>>> {
    let set_dir = root.join(rel_path).join(format!("{set:03}"));
    if !lib.is_dir(&set_dir) {
        warn!("set {set:03}: {} does not exist, skipping", set_dir.display());
        skips.push(Skip::MissingSet { set });
        return Ok(None);
    }

    let out_dir = output_root.join(rel_path).join(format!("{set:03}"));
    lib.create_dir_all(&out_dir)?;

    let mut images = Vec::new();
    for name in lib.files(&set_dir)? {
        match ImageName::parse(&name) {
            Ok(parsed) => images.push((parsed.image, name, parsed)),
            Err(reason) => {
                warn!("set {set:03}: skipping {name:?}: {reason}");
                skips.push(Skip::BadFilename { set, name, reason });
            }
        }
    }
    images.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    Ok(Some(
        images
            .into_iter()
            .map(|(_, name, parsed)| ResolvedImage {
                input: set_dir.join(name),
                output: out_dir.join(dest_name(&parsed, spec)),
            })
            .collect(),
    ))
}

/// Single-file mode: one image path relative to the root, mapped to its
/// mirrored destination. The file was named explicitly, so a missing or
/// unparsable entry is fatal rather than a recorded skip.
pub fn resolve_file(
    lib: &dyn Library,
    root: &Path,
    rel_file: &str,
    output_root: &Path,
    spec: &OutputSpec,
) -> Result<ResolvedImage> {
    let input = root.join(rel_file);
    if !lib.is_file(&input) {
        return Err(EsrganError::Validation(format!(
            "{} is not a file under the root",
            input.display()
        )));
    }

    let rel = Path::new(rel_file);
    let name = rel
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| EsrganError::Validation(format!("{rel_file:?} has no filename")))?;
    let parsed = ImageName::parse(name)
        .map_err(|e| EsrganError::Validation(format!("{name:?}: {e}")))?;

    let out_dir = match rel.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => output_root.join(parent),
        _ => output_root.to_path_buf(),
    };
    lib.create_dir_all(&out_dir)?;

    Ok(ResolvedImage {
        input,
        output: out_dir.join(dest_name(&parsed, spec)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filename::ImageExt;
    use crate::test_helpers::MemLibrary;

    fn spec(suffix: Option<&str>, ext: ImageExt) -> OutputSpec {
        OutputSpec {
            suffix: suffix.map(String::from),
            ext,
        }
    }

    #[test]
    fn destination_with_suffix_and_extension_substituted() {
        let parsed = ImageName::parse("Nikki-001-001.jpg").unwrap();
        assert_eq!(
            dest_name(&parsed, &spec(Some("X4V3"), ImageExt::Jpg)),
            "Nikki-001-001_X4V3.jpg"
        );
        assert_eq!(
            dest_name(&parsed, &spec(None, ImageExt::Png)),
            "Nikki-001-001.png"
        );
    }

    #[test]
    fn source_suffix_is_replaced_not_stacked() {
        let parsed = ImageName::parse("Nikki-001-001_raw.jpg").unwrap();
        assert_eq!(
            dest_name(&parsed, &spec(Some("V2"), ImageExt::Png)),
            "Nikki-001-001_V2.png"
        );
    }

    #[test]
    fn mirrors_the_studio_tree_under_the_output_root() {
        let mut lib = MemLibrary::new();
        lib.add_file("/R/Nikki Studios/Nikki/001/Nikki-001-001.jpg");

        let mut skips = Vec::new();
        let resolved = resolve_set(
            &lib,
            Path::new("/R"),
            "Nikki Studios/Nikki",
            1,
            Path::new("/O"),
            &spec(Some("X4V3"), ImageExt::Jpg),
            &mut skips,
        )
        .unwrap()
        .unwrap();

        assert!(skips.is_empty());
        assert_eq!(resolved.len(), 1);
        assert_eq!(
            resolved[0].input,
            PathBuf::from("/R/Nikki Studios/Nikki/001/Nikki-001-001.jpg")
        );
        assert_eq!(
            resolved[0].output,
            PathBuf::from("/O/Nikki Studios/Nikki/001/Nikki-001-001_X4V3.jpg")
        );
        assert!(
            lib.created
                .lock()
                .unwrap()
                .contains(&PathBuf::from("/O/Nikki Studios/Nikki/001"))
        );
    }

    #[test]
    fn emits_ascending_image_number_order() {
        let mut lib = MemLibrary::new();
        for name in ["Ava-002-030.png", "Ava-002-001.png", "Ava-002-120.png"] {
            lib.add_file(&format!("/R/S/Ava/002/{name}"));
        }

        let mut skips = Vec::new();
        let resolved = resolve_set(
            &lib,
            Path::new("/R"),
            "S/Ava",
            2,
            Path::new("/O"),
            &spec(None, ImageExt::Png),
            &mut skips,
        )
        .unwrap()
        .unwrap();

        let inputs: Vec<_> = resolved
            .iter()
            .map(|r| r.input.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(inputs, vec!["Ava-002-001.png", "Ava-002-030.png", "Ava-002-120.png"]);
    }

    #[test]
    fn missing_set_directory_is_skipped_not_fatal() {
        let mut lib = MemLibrary::new();
        lib.add_dir("/R/S/Ava");

        let mut skips = Vec::new();
        let resolved = resolve_set(
            &lib,
            Path::new("/R"),
            "S/Ava",
            9,
            Path::new("/O"),
            &spec(None, ImageExt::Png),
            &mut skips,
        )
        .unwrap();

        assert!(resolved.is_none());
        assert_eq!(skips, vec![Skip::MissingSet { set: 9 }]);
    }

    #[test]
    fn unparsable_files_are_recorded_and_the_rest_resolve() {
        let mut lib = MemLibrary::new();
        lib.add_file("/R/S/Ava/001/Ava-001-001.png");
        lib.add_file("/R/S/Ava/001/cover.txt");
        lib.add_file("/R/S/Ava/001/Ava-001-02.png");

        let mut skips = Vec::new();
        let resolved = resolve_set(
            &lib,
            Path::new("/R"),
            "S/Ava",
            1,
            Path::new("/O"),
            &spec(None, ImageExt::Png),
            &mut skips,
        )
        .unwrap()
        .unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(skips.len(), 2);
    }

    #[test]
    fn resolve_file_mirrors_the_relative_parent() {
        let mut lib = MemLibrary::new();
        lib.add_file("/R/S/Ava/003/Ava-003-007.jpg");

        let resolved = resolve_file(
            &lib,
            Path::new("/R"),
            "S/Ava/003/Ava-003-007.jpg",
            Path::new("/O"),
            &spec(None, ImageExt::Png),
        )
        .unwrap();

        assert_eq!(resolved.output, PathBuf::from("/O/S/Ava/003/Ava-003-007.png"));
    }

    #[test]
    fn resolve_file_rejects_missing_or_unparsable_entries() {
        let mut lib = MemLibrary::new();
        lib.add_file("/R/notes.txt");

        let missing = resolve_file(
            &lib,
            Path::new("/R"),
            "S/Ava/001/Ava-001-001.jpg",
            Path::new("/O"),
            &OutputSpec::default(),
        );
        assert!(matches!(missing, Err(EsrganError::Validation(_))));

        let unparsable = resolve_file(
            &lib,
            Path::new("/R"),
            "notes.txt",
            Path::new("/O"),
            &OutputSpec::default(),
        );
        assert!(matches!(unparsable, Err(EsrganError::Validation(_))));
    }
}
