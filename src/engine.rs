//! Build engine boundary.
//!
//! The [`BuildEngine`] trait is the seam between job planning and actual
//! bundling. The driver decides *what* to build; an engine turns one
//! [`JobDescriptor`] into an emitted file. Keeping the seam a trait lets the
//! orchestration tests run against a recording mock engine without ever
//! spawning a bundler.
//!
//! ## Production engine
//!
//! [`BundlerCommand`] shells out to the project's bundler wrapper (stock
//! config: `node build/bundle.js`), passing one flag set per job:
//!
//! ```text
//! node build/bundle.js --entry src/index.simple.js \
//!     --out dist/chart-en.simple.min.js --name chart \
//!     --minify --lang-resource lang/en.js --external chart
//! ```
//!
//! The wrapper owns module resolution, transforms, and minification; a
//! non-zero exit status aborts the run with the wrapper's stderr attached.
//!
//! ## Batch execution
//!
//! [`build_jobs`] runs a job list on the rayon pool. Jobs are independent,
//! so the execution order among them is unspecified; the first failure stops
//! the batch (no partial-success accounting). Progress is reported through
//! an optional channel of [`BuildEvent`]s, printed by a dedicated thread in
//! `main` so parallel workers never interleave half-written lines.

use crate::job::JobDescriptor;
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use std::sync::mpsc::Sender;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to launch bundler `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("bundler failed for `{job}`: {detail}")]
    CommandFailed { job: String, detail: String },
}

/// Progress notification for one job in a batch.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    Started { job: String },
    Finished { job: String, elapsed_ms: u128 },
}

/// Trait for build engines.
///
/// `Sync` so a single engine can be shared across rayon workers.
pub trait BuildEngine: Sync {
    /// Produce the artifact described by `job`. Blocks until done.
    fn build(&self, job: &JobDescriptor) -> Result<(), EngineError>;
}

/// Production engine: one bundler process per job.
pub struct BundlerCommand {
    program: String,
    base_args: Vec<String>,
    project_root: PathBuf,
}

impl BundlerCommand {
    /// `program`/`base_args` come from `[bundler]` config; all job paths are
    /// resolved relative to `project_root`.
    pub fn new(
        program: impl Into<String>,
        base_args: Vec<String>,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            base_args,
            project_root: project_root.into(),
        }
    }

    fn job_args(&self, job: &JobDescriptor) -> Vec<String> {
        let mut args = self.base_args.clone();
        args.push("--entry".into());
        args.push(job.entry.to_string_lossy().into_owned());
        args.push("--out".into());
        args.push(job.output.to_string_lossy().into_owned());
        args.push("--name".into());
        args.push(job.module_name.clone());
        if job.min {
            args.push("--minify".into());
        }
        if let Some(resource) = &job.lang_resource {
            args.push("--lang-resource".into());
            args.push(resource.to_string_lossy().into_owned());
        }
        for external in &job.externals {
            args.push("--external".into());
            args.push(external.clone());
        }
        args
    }
}

impl BuildEngine for BundlerCommand {
    fn build(&self, job: &JobDescriptor) -> Result<(), EngineError> {
        // The bundler is not required to create output directories.
        if let Some(parent) = job.output.parent() {
            std::fs::create_dir_all(self.project_root.join(parent))?;
        }

        let output = Command::new(&self.program)
            .args(self.job_args(job))
            .current_dir(&self.project_root)
            .output()
            .map_err(|source| EngineError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::CommandFailed {
                job: job.name.clone(),
                detail: format!("exit {}: {}", output.status, stderr.trim()),
            });
        }
        Ok(())
    }
}

/// Run a batch of jobs on the rayon pool; first failure aborts the batch.
///
/// Returns the number of jobs in the batch on success. Events are best-effort:
/// a dropped receiver never fails the build.
pub fn build_jobs(
    engine: &impl BuildEngine,
    jobs: &[JobDescriptor],
    events: Option<Sender<BuildEvent>>,
) -> Result<usize, EngineError> {
    jobs.par_iter().try_for_each(|job| {
        if let Some(tx) = &events {
            let _ = tx.send(BuildEvent::Started {
                job: job.name.clone(),
            });
        }
        let started = Instant::now();
        engine.build(job)?;
        if let Some(tx) = &events {
            let _ = tx.send(BuildEvent::Finished {
                job: job.name.clone(),
                elapsed_ms: started.elapsed().as_millis(),
            });
        }
        Ok::<(), EngineError>(())
    })?;
    Ok(jobs.len())
}
