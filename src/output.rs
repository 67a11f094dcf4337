//! CLI output formatting.
//!
//! Each piece of run output has a pure `format_*` function (returns owned
//! strings, no I/O) and a `print_*` wrapper that writes to stdout, so tests
//! can assert on exact output without capturing the stream.
//!
//! Job display is identity-first: the artifact name leads, the filesystem
//! path follows as context.
//!
//! ```text
//! Jobs (16)
//! 001 chart → dist/chart.js
//! 002 chart.simple → dist/chart.simple.js
//! ...
//! 013 geomap → dist/extension/geomap.js
//! ```

use crate::driver::RunSummary;
use crate::engine::BuildEvent;
use crate::job::JobDescriptor;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// One line per job: index, artifact name, output path.
pub fn format_plan(jobs: &[JobDescriptor]) -> Vec<String> {
    let mut lines = vec![format!("Jobs ({})", jobs.len())];
    for (i, job) in jobs.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            job.name,
            job.output.display()
        ));
    }
    lines
}

/// Progress line for one build event.
pub fn format_build_event(event: &BuildEvent) -> String {
    match event {
        BuildEvent::Started { job } => format!("building {job}"),
        BuildEvent::Finished { job, elapsed_ms } => format!("{job} done ({elapsed_ms} ms)"),
    }
}

/// Closing lines for a finished non-watch run.
pub fn format_summary(summary: &RunSummary, staging_dir: &str) -> Vec<String> {
    let bundles = if summary.jobs.len() == 1 {
        "bundle".to_string()
    } else {
        "bundles".to_string()
    };
    vec![
        format!("Built {} {bundles}", summary.jobs.len()),
        format!("Staged {} → {staging_dir}/", summary.staged),
    ]
}

pub fn print_plan(jobs: &[JobDescriptor]) {
    for line in format_plan(jobs) {
        println!("{line}");
    }
}

pub fn print_summary(summary: &RunSummary, staging_dir: &str) {
    for line in format_summary(summary, staging_dir) {
        println!("{line}");
    }
}
