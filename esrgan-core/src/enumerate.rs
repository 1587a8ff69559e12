use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{EsrganError, Result};
use crate::library::Library;
use crate::options::{OutputSpec, UpscaleOptions};
use crate::presets::{Presets, RootSource};
use crate::report::{RunReport, Skip};
use crate::resolve::{resolve_file, resolve_set};
use crate::sets::{self, SetToken};

/// What the run processes: a whole `Studio/Model` subtree filtered by set
/// tokens, or individual files named relative to the root. The mutually
/// exclusive `--Path`/`--Files` pair collapses into this tagged value.
#[derive(Clone, Debug)]
pub enum Selection {
    Sets { rel_path: String, tokens: Vec<SetToken> },
    Files(Vec<String>),
}

/// Everything one run needs, resolved from CLI or GUI options.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub root: RootSource,
    pub selection: Selection,
    pub output_root: PathBuf,
    pub output: OutputSpec,
    pub upscale: UpscaleOptions,
}

/// One unit of upscaling work. Created here, consumed exactly once by the
/// runner, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: UpscaleOptions,
}

/// Ordered job list plus the skip report for one enumeration pass.
/// Re-deriving it from the same inputs yields an identical plan.
#[derive(Clone, Debug)]
pub struct RunPlan {
    pub jobs: Vec<Job>,
    pub report: RunReport,
}

/// Top-level entry point: resolve the root, expand the selection and
/// produce the full ordered job list. No upscaling happens here; the only
/// side effect is destination directory creation.
pub fn enumerate_jobs(cfg: &RunConfig, lib: &dyn Library, presets: &Presets) -> Result<RunPlan> {
    let root = cfg.root.resolve(presets, lib)?;

    let mut report = RunReport::default();
    let mut jobs = Vec::new();

    match &cfg.selection {
        Selection::Sets { rel_path, tokens } => {
            if rel_path.is_empty() {
                return Err(EsrganError::Validation(
                    "relative Studio/Model path must not be empty".into(),
                ));
            }
            let model_dir = root.join(rel_path);
            if !lib.is_dir(&model_dir) {
                return Err(EsrganError::Validation(format!(
                    "{} does not exist under the root",
                    model_dir.display()
                )));
            }

            let existing = sets::discover(lib, &model_dir)?;
            let selected = sets::expand(tokens, &existing);
            if selected.is_empty() {
                warn!(
                    "no sets under {} match the selection",
                    model_dir.display()
                );
            }

            for set in selected {
                if let Some(resolved) = resolve_set(
                    lib,
                    &root,
                    rel_path,
                    set,
                    &cfg.output_root,
                    &cfg.output,
                    &mut report.skips,
                )? {
                    debug!("set {set:03}: {} images", resolved.len());
                    report.sets_processed.push(set);
                    jobs.extend(resolved.into_iter().map(|r| Job {
                        input: r.input,
                        output: r.output,
                        options: cfg.upscale.clone(),
                    }));
                }
            }
        }
        Selection::Files(files) => {
            if files.is_empty() {
                return Err(EsrganError::Validation(
                    "at least one file is required".into(),
                ));
            }
            for rel_file in files {
                let r = resolve_file(lib, &root, rel_file, &cfg.output_root, &cfg.output)?;
                jobs.push(Job {
                    input: r.input,
                    output: r.output,
                    options: cfg.upscale.clone(),
                });
            }
        }
    }

    flag_collisions(&jobs, &mut report.skips);
    info!("enumerated {} jobs ({})", jobs.len(), report.summary());
    Ok(RunPlan { jobs, report })
}

/// Distinct sources resolving to one destination are kept (the later job
/// overwrites) but flagged.
fn flag_collisions(jobs: &[Job], skips: &mut Vec<Skip>) {
    let mut seen: BTreeMap<&Path, &Path> = BTreeMap::new();
    for job in jobs {
        if let Some(first) = seen.insert(job.output.as_path(), job.input.as_path()) {
            if first != job.input.as_path() {
                let skip = Skip::Collision {
                    dest: job.output.clone(),
                    first: first.to_path_buf(),
                    second: job.input.clone(),
                };
                warn!("{skip}");
                skips.push(skip);
            }
        }
    }
}
