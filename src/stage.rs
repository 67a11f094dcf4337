//! Destructive filesystem steps: dist wipe and publish staging.
//!
//! Two directories are wholly owned by the build driver and unconditionally
//! replaced, never merged:
//!
//! - `dist/` — wiped at the start of a full-matrix run, before any job
//!   executes, so stale artifacts from removed variants cannot survive.
//!   Single-job runs never wipe it: sibling artifacts from a previous full
//!   build must stay intact.
//! - `lib/` (staging) — wiped and repopulated from `src/` after every
//!   non-watch run. This is the pre-publish copy consumed by downstream
//!   packaging.
//!
//! Both operations return `Result` so the orchestrator sequences them
//! deterministically; nothing here is fire-and-forget.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source tree not found: {0}")]
    MissingSource(PathBuf),
}

/// What `stage_publish` copied, for CLI reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    pub files: usize,
    pub dirs: usize,
}

impl std::fmt::Display for StageStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} files in {} directories", self.files, self.dirs)
    }
}

/// Remove the dist tree if present. Absent dist is not an error.
pub fn clear_dist(dist: &Path) -> std::io::Result<()> {
    if dist.exists() {
        fs::remove_dir_all(dist)?;
    }
    Ok(())
}

/// Replace the staging directory with a fresh copy of the source tree.
///
/// Wipe happens before copy; on failure the staging dir may be missing or
/// partial, and the next run replaces it wholesale anyway.
pub fn stage_publish(src: &Path, staging: &Path) -> Result<StageStats, StageError> {
    if !src.is_dir() {
        return Err(StageError::MissingSource(src.to_path_buf()));
    }
    if staging.exists() {
        fs::remove_dir_all(staging)?;
    }
    fs::create_dir_all(staging)?;
    let mut stats = StageStats { files: 0, dirs: 1 };
    copy_dir_recursive(src, staging, &mut stats)?;
    Ok(stats)
}

fn copy_dir_recursive(src: &Path, dst: &Path, stats: &mut StageStats) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            stats.dirs += 1;
            copy_dir_recursive(&src_path, &dst_path, stats)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            stats.files += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn clear_dist_removes_the_tree() {
        let tmp = TempDir::new().unwrap();
        let dist = tmp.path().join("dist");
        write(&dist.join("extension/geomap.js"), "x");
        clear_dist(&dist).unwrap();
        assert!(!dist.exists());
    }

    #[test]
    fn clear_dist_tolerates_absence() {
        let tmp = TempDir::new().unwrap();
        clear_dist(&tmp.path().join("dist")).unwrap();
    }

    #[test]
    fn staging_copies_the_whole_tree() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        write(&src.join("index.js"), "export {};");
        write(&src.join("chart/line.js"), "line");
        write(&src.join("chart/bar.js"), "bar");

        let staging = tmp.path().join("lib");
        let stats = stage_publish(&src, &staging).unwrap();

        assert_eq!(stats.files, 3);
        assert_eq!(stats.dirs, 2);
        assert_eq!(
            fs::read_to_string(staging.join("chart/line.js")).unwrap(),
            "line"
        );
    }

    #[test]
    fn staging_fully_replaces_prior_content() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        write(&src.join("index.js"), "new");

        let staging = tmp.path().join("lib");
        write(&staging.join("stale.js"), "old");
        write(&staging.join("index.js"), "old");

        stage_publish(&src, &staging).unwrap();

        assert!(!staging.join("stale.js").exists(), "wipe, not merge");
        assert_eq!(fs::read_to_string(staging.join("index.js")).unwrap(), "new");
    }

    #[test]
    fn missing_source_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = stage_publish(&tmp.path().join("src"), &tmp.path().join("lib")).unwrap_err();
        assert!(matches!(err, StageError::MissingSource(_)));
    }
}
