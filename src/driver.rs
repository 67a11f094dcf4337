//! Top-level orchestration: from parsed flags to a finished run.
//!
//! Planning and execution are split so the decision logic stays a pure,
//! directly testable function:
//!
//! ```text
//! RawOptions ──plan()──> RunPlan ──run()──> RunSummary
//! ```
//!
//! Execution per plan:
//!
//! - **Watch** — one job from the flags, handed to the continuous watch loop.
//!   No dist wipe, no staging; the call blocks until interrupted.
//! - **Single** — one job from the flags, built once, then publish staging.
//!   Never wipes dist: sibling artifacts from a previous full build survive.
//! - **All** — wipe dist first (strictly before any job runs), realize the
//!   fixed 16-job matrix, build it, then publish staging.
//!
//! Collaborator failures (factory, engine, filesystem) propagate unchanged;
//! nothing is caught, retried, or partially accounted.

use crate::config::ProjectConfig;
use crate::engine::{self, BuildEngine, BuildEvent, EngineError};
use crate::job::{self, JobDescriptor, JobError};
use crate::matrix;
use crate::options::{self, BuildMode, NormalizedOptions, RawOptions};
use crate::stage::{self, StageError, StageStats};
use crate::watch::{self, WatchError, WatchIgnore};
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Job(#[from] JobError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error(transparent)]
    Watch(#[from] WatchError),
}

/// What this invocation will do, with the options it will do it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPlan {
    /// Continuously rebuild the single described bundle.
    Watch(NormalizedOptions),
    /// Build the single described bundle once, then stage for publish.
    Single(NormalizedOptions),
    /// Wipe dist, build the fixed 16-job matrix, then stage for publish.
    All,
}

/// Compose mode selection and normalization. Pure.
pub fn plan(raw: &RawOptions) -> RunPlan {
    match options::select_mode(raw) {
        BuildMode::WatchSingle => RunPlan::Watch(options::normalize(raw)),
        BuildMode::BuildExplicitSingle => RunPlan::Single(options::normalize(raw)),
        BuildMode::BuildAll => RunPlan::All,
    }
}

/// What a finished (non-watch) run produced, for CLI reporting.
#[derive(Debug)]
pub struct RunSummary {
    /// Jobs handed to the engine, in plan order.
    pub jobs: Vec<JobDescriptor>,
    /// Staging result; present in every non-watch run.
    pub staged: StageStats,
}

/// Execute a plan. Watch plans block forever and only return on error.
pub fn run(
    plan: RunPlan,
    config: &ProjectConfig,
    project_root: &Path,
    engine: &impl BuildEngine,
    events: Option<Sender<BuildEvent>>,
) -> Result<RunSummary, DriverError> {
    match plan {
        RunPlan::Watch(opts) => {
            let job = job::from_options(&opts, config)?;
            let ignore = WatchIgnore::new(&config.dist_dir, &config.staging_dir);
            match watch::watch(project_root, &job, engine, &ignore) {
                Ok(never) => match never {},
                Err(err) => Err(err.into()),
            }
        }
        RunPlan::Single(opts) => {
            let jobs = vec![job::from_options(&opts, config)?];
            engine::build_jobs(engine, &jobs, events)?;
            let staged = publish(config, project_root)?;
            Ok(RunSummary { jobs, staged })
        }
        RunPlan::All => {
            // Dist wipe must complete before any job writes into it.
            stage::clear_dist(&project_root.join(&config.dist_dir))
                .map_err(StageError::from)?;
            let jobs: Vec<JobDescriptor> = matrix::full_matrix()
                .iter()
                .map(|spec| job::from_spec(spec, config))
                .collect();
            engine::build_jobs(engine, &jobs, events)?;
            let staged = publish(config, project_root)?;
            Ok(RunSummary { jobs, staged })
        }
    }
}

fn publish(config: &ProjectConfig, project_root: &Path) -> Result<StageStats, StageError> {
    stage::stage_publish(
        &project_root.join(&config.src_dir),
        &project_root.join(&config.staging_dir),
    )
}
