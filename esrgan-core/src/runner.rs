use std::path::{Path, PathBuf};

use crate::enumerate::Job;
use crate::options::OutputSpec;

/// One external tool invocation: the Real-ESRGAN inference script applied
/// to a single job. Pure description; spawning is the caller's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// The script writes `<stem>[_suffix].<ext>` into `-o <dir>` itself, so
/// the suffix and extension flags must agree with the destination the
/// resolver computed.
pub fn build_invocation(script: &Path, job: &Job, spec: &OutputSpec) -> Invocation {
    let out_dir = job.output.parent().unwrap_or_else(|| Path::new("."));
    let opts = &job.options;

    let mut args = vec![
        script.display().to_string(),
        "-n".into(),
        opts.model.weights_name().into(),
        "-i".into(),
        job.input.display().to_string(),
        "-o".into(),
        out_dir.display().to_string(),
        "--outscale".into(),
        opts.outscale.to_string(),
        "--gpu-id".into(),
        opts.gpu_id.to_string(),
        "--ext".into(),
        spec.ext.as_str().into(),
        "--tile".into(),
        opts.tile.to_string(),
        "--tile_pad".into(),
        opts.tile_pad.to_string(),
    ];
    if let Some(suffix) = &spec.suffix {
        args.push("--suffix".into());
        args.push(suffix.clone());
    }
    if opts.face_enhance {
        args.push("--face_enhance".into());
    }

    Invocation {
        program: PathBuf::from("python"),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filename::ImageExt;
    use crate::options::{ModelName, UpscaleOptions};

    fn job() -> Job {
        Job {
            input: PathBuf::from("/R/S/Nikki/001/Nikki-001-001.jpg"),
            output: PathBuf::from("/O/S/Nikki/001/Nikki-001-001_V2.jpg"),
            options: UpscaleOptions {
                model: ModelName::X4plus,
                face_enhance: true,
                ..UpscaleOptions::default()
            },
        }
    }

    #[test]
    fn argument_vector_matches_the_tool_cli() {
        let spec = OutputSpec {
            suffix: Some("V2".into()),
            ext: ImageExt::Jpg,
        };
        let inv = build_invocation(Path::new("/opt/realesrgan/inference.py"), &job(), &spec);

        assert_eq!(inv.program, PathBuf::from("python"));
        assert_eq!(
            inv.args,
            vec![
                "/opt/realesrgan/inference.py",
                "-n",
                "RealESRGAN_x4plus",
                "-i",
                "/R/S/Nikki/001/Nikki-001-001.jpg",
                "-o",
                "/O/S/Nikki/001",
                "--outscale",
                "1",
                "--gpu-id",
                "0",
                "--ext",
                "jpg",
                "--tile",
                "800",
                "--tile_pad",
                "10",
                "--suffix",
                "V2",
                "--face_enhance",
            ]
        );
    }

    #[test]
    fn suffix_and_face_enhance_flags_are_conditional() {
        let mut job = job();
        job.options.face_enhance = false;
        let inv = build_invocation(Path::new("inference.py"), &job, &OutputSpec::default());

        assert!(!inv.args.contains(&"--suffix".to_string()));
        assert!(!inv.args.contains(&"--face_enhance".to_string()));
        assert_eq!(inv.args[inv.args.len() - 2..], ["--tile_pad", "10"]);
    }
}
