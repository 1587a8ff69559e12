use std::path::Path;
use std::process::Command;

use log::info;

use esrgan_core::enumerate::{RunConfig, RunPlan, Selection, enumerate_jobs};
use esrgan_core::error::{EsrganError, Result};
use esrgan_core::library_fs::FsLibrary;
use esrgan_core::options::{ModelName, OutputSpec, UpscaleOptions};
use esrgan_core::presets::RootSource;
use esrgan_core::runner::build_invocation;
use esrgan_core::sets::parse_tokens;
use esrgan_core::{ImageExt, Job};

use crate::config::AppConfig;
use crate::presentation::cli::Cli;

pub fn handle_run(cli: &Cli, cfg: &AppConfig) -> Result<()> {
    let run = run_config(cli, cfg)?;
    let lib = FsLibrary;
    let plan = enumerate_jobs(&run, &lib, &cfg.presets)?;

    print_report(&plan);
    if cli.dry_run {
        for job in &plan.jobs {
            println!("{} -> {}", job.input.display(), job.output.display());
        }
        return Ok(());
    }

    execute(&plan.jobs, &run.output, &cfg.realesrgan_script)
}

/// Map the parsed arguments onto the engine's run configuration. The
/// mutually exclusive pairs are already enforced by the arg groups; this
/// validates the values themselves.
pub fn run_config(cli: &Cli, cfg: &AppConfig) -> Result<RunConfig> {
    let root = match (&cli.root, &cli.root_preset) {
        (Some(path), None) => RootSource::Literal(path.clone()),
        (None, Some(key)) => RootSource::Preset(key.parse()?),
        _ => {
            return Err(EsrganError::Validation(
                "exactly one of --root or --root_preset is required".into(),
            ));
        }
    };

    let selection = match (&cli.path, &cli.files) {
        (Some(rel_path), None) => Selection::Sets {
            rel_path: rel_path.clone(),
            tokens: parse_tokens(cli.sets.as_deref().unwrap_or_default())?,
        },
        (None, Some(files)) => Selection::Files(files.clone()),
        _ => {
            return Err(EsrganError::Validation(
                "exactly one of --Path or --Files is required".into(),
            ));
        }
    };

    if !(cli.outscale > 0.0) {
        return Err(EsrganError::Validation(format!(
            "--outscale must be positive, got {}",
            cli.outscale
        )));
    }

    Ok(RunConfig {
        root,
        selection,
        output_root: cfg.output_root.clone(),
        output: OutputSpec {
            suffix: parse_suffix(&cli.suffix)?,
            ext: ImageExt::from_ext(&cli.ext)
                .ok_or_else(|| EsrganError::Validation(format!("unknown extension {:?}", cli.ext)))?,
        },
        upscale: UpscaleOptions {
            model: cli.model.parse::<ModelName>()?,
            tile: cli.tile,
            tile_pad: cli.tile_pad,
            outscale: cli.outscale,
            gpu_id: cli.gpu_id,
            face_enhance: cli.face_enhance,
        },
    })
}

/// The resolver injects the underscore and `-` is the reserved filename
/// separator, so neither belongs in a user suffix.
fn parse_suffix(suffix: &str) -> Result<Option<String>> {
    if suffix.is_empty() {
        return Ok(None);
    }
    if suffix.starts_with('_') || suffix.contains('-') || suffix.contains('/') {
        return Err(EsrganError::Validation(format!(
            "suffix {suffix:?} must not start with '_' or contain '-' or '/'"
        )));
    }
    Ok(Some(suffix.to_string()))
}

fn print_report(plan: &RunPlan) {
    println!("{} jobs enumerated, {}", plan.jobs.len(), plan.report.summary());
    for skip in &plan.report.skips {
        println!("  {skip}");
    }
}

/// Run the jobs strictly sequentially, one tool process at a time. A job
/// whose destination already exists is skipped, so an interrupted run can
/// be resumed by re-running the same command.
fn execute(jobs: &[Job], spec: &OutputSpec, script: &Path) -> Result<()> {
    for job in jobs {
        if job.output.exists() {
            info!("{} already exists, skipping", job.output.display());
            continue;
        }

        info!("processing {} -> {}", job.input.display(), job.output.display());
        let inv = build_invocation(script, job, spec);
        let status = Command::new(&inv.program).args(&inv.args).status()?;
        if !status.success() {
            return Err(EsrganError::Runner(format!(
                "{} exited with {status} on {}",
                inv.program.display(),
                job.input.display()
            )));
        }
    }
    Ok(())
}

pub fn print_model_help() {
    println!(
        "\
x4v3             small and fast, good all-rounder for fine detail and natural textures
x4plus           larger model, more detail recovery, noticeably slower
net_x4plus       less aggressive sharpening, closer to the original
x2plus           2x upscale, gentler enhancement with less artifact risk
x4plus_anime_6B  optimized for line art and flat colors"
    );
}
