//! Job descriptor factory.
//!
//! Turns matrix-level job identities ([`JobSpec`]) or normalized CLI options
//! into fully parameterized [`JobDescriptor`]s: entry module, output path
//! under `dist/`, externals, and the language resource to inject. The factory
//! computes paths only — it never touches the filesystem, so a descriptor for
//! a missing entry module is perfectly constructible and fails later, in the
//! bundler.
//!
//! ## Artifact naming
//!
//! Chart bundles follow `{name}{-lang}{.flavor}{.min}.js`:
//!
//! ```text
//! chart.js                   min=false  lang=None  flavor=full
//! chart.simple.js            min=false  lang=None  flavor=simple
//! chart-en.common.min.js     min=true   lang=en    flavor=common
//! ```
//!
//! Extensions live under `dist/extension/` as `{ext}{.min}.js` and declare
//! the main bundle as an external — they augment a loaded chart library
//! rather than embedding one.

use crate::config::ProjectConfig;
use crate::matrix::{BundleFlavor, Extension, JobSpec};
use crate::options::NormalizedOptions;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobError {
    #[error("unknown bundle type {0:?} (expected \"\", \"simple\" or \"common\")")]
    UnknownBundleKind(String),
}

/// A fully parameterized description of one artifact to produce.
///
/// Created fresh per job, never mutated, consumed exactly once by the build
/// engine. All paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDescriptor {
    /// Artifact identity, also the output file stem: `chart-en.simple.min`.
    pub name: String,
    /// Global/module name the bundle registers under: `chart`, `geomap`.
    pub module_name: String,
    /// Entry module handed to the bundler.
    pub entry: PathBuf,
    /// Output bundle path under the dist directory.
    pub output: PathBuf,
    /// Minify the output.
    pub min: bool,
    /// Language code of this variant, if any.
    pub lang: Option<String>,
    /// Language resource module injected into the bundle (`lang/en.js`).
    pub lang_resource: Option<PathBuf>,
    /// Module names resolved at load time instead of being bundled.
    pub externals: Vec<String>,
}

/// Build the chart-bundle descriptor for an explicit single run (`--lang`,
/// `--min`, `--type`). Rejects unknown `--type` values.
pub fn from_options(
    opts: &NormalizedOptions,
    config: &ProjectConfig,
) -> Result<JobDescriptor, JobError> {
    let flavor = BundleFlavor::from_kind(&opts.kind)
        .ok_or_else(|| JobError::UnknownBundleKind(opts.kind.clone()))?;
    Ok(chart_job(opts.min, opts.lang.as_deref(), flavor, config))
}

/// Realize one matrix entry. Infallible: matrix specs carry typed flavors.
pub fn from_spec(spec: &JobSpec, config: &ProjectConfig) -> JobDescriptor {
    match spec {
        JobSpec::Chart { min, lang, flavor } => chart_job(*min, *lang, *flavor, config),
        JobSpec::Extension { ext, min } => extension_job(*ext, *min, config),
    }
}

fn chart_job(
    min: bool,
    lang: Option<&str>,
    flavor: BundleFlavor,
    config: &ProjectConfig,
) -> JobDescriptor {
    let lang_suffix = lang.map(|l| format!("-{l}")).unwrap_or_default();
    let min_suffix = if min { ".min" } else { "" };
    let name = format!(
        "{}{lang_suffix}{}{min_suffix}",
        config.bundle_name,
        flavor.file_suffix()
    );
    let entry = match flavor {
        BundleFlavor::Full => &config.entries.full,
        BundleFlavor::Simple => &config.entries.simple,
        BundleFlavor::Common => &config.entries.common,
    };
    JobDescriptor {
        output: PathBuf::from(&config.dist_dir).join(format!("{name}.js")),
        name,
        module_name: config.bundle_name.clone(),
        entry: PathBuf::from(entry),
        min,
        lang: lang.map(str::to_owned),
        lang_resource: lang.map(|l| PathBuf::from(&config.lang_dir).join(format!("{l}.js"))),
        externals: Vec::new(),
    }
}

fn extension_job(ext: Extension, min: bool, config: &ProjectConfig) -> JobDescriptor {
    let min_suffix = if min { ".min" } else { "" };
    let name = format!("{}{min_suffix}", ext.name());
    let entry = match ext {
        Extension::GeoMap => &config.extensions.geomap.entry,
        Extension::DataTool => &config.extensions.datatool.entry,
    };
    JobDescriptor {
        output: PathBuf::from(&config.dist_dir)
            .join("extension")
            .join(format!("{name}.js")),
        name,
        // Extensions register under their own global, not the chart's.
        module_name: ext.name().to_string(),
        entry: PathBuf::from(entry),
        min,
        lang: None,
        lang_resource: None,
        // Extensions run against an already-loaded chart library.
        externals: vec![config.bundle_name.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn opts(lang: Option<&str>, min: bool, kind: &str) -> NormalizedOptions {
        NormalizedOptions {
            lang: lang.map(str::to_owned),
            min,
            kind: kind.to_string(),
        }
    }

    #[test]
    fn default_options_build_the_standard_bundle() {
        let job = from_options(&opts(None, false, ""), &ProjectConfig::default()).unwrap();
        assert_eq!(job.name, "chart");
        assert_eq!(job.module_name, "chart");
        assert_eq!(job.entry, Path::new("src/index.js"));
        assert_eq!(job.output, Path::new("dist/chart.js"));
        assert!(!job.min);
        assert_eq!(job.lang, None);
        assert_eq!(job.lang_resource, None);
        assert!(job.externals.is_empty());
    }

    #[test]
    fn all_suffixes_compose_in_order() {
        let job =
            from_options(&opts(Some("en"), true, "common"), &ProjectConfig::default()).unwrap();
        assert_eq!(job.name, "chart-en.common.min");
        assert_eq!(job.output, Path::new("dist/chart-en.common.min.js"));
        assert_eq!(job.entry, Path::new("src/index.common.js"));
        assert_eq!(job.lang_resource.as_deref(), Some(Path::new("lang/en.js")));
    }

    #[test]
    fn simple_flavor_picks_its_entry() {
        let job = from_options(&opts(None, false, "simple"), &ProjectConfig::default()).unwrap();
        assert_eq!(job.name, "chart.simple");
        assert_eq!(job.entry, Path::new("src/index.simple.js"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = from_options(&opts(None, false, "exotic"), &ProjectConfig::default());
        assert!(matches!(err, Err(JobError::UnknownBundleKind(k)) if k == "exotic"));
    }

    #[test]
    fn bundle_name_override_flows_into_artifacts() {
        let config = ProjectConfig {
            bundle_name: "mychart".to_string(),
            ..Default::default()
        };
        let job = from_options(&opts(None, true, ""), &config).unwrap();
        assert_eq!(job.output, Path::new("dist/mychart.min.js"));
        assert_eq!(job.module_name, "mychart");
    }

    #[test]
    fn extension_jobs_are_external_to_the_main_bundle() {
        let config = ProjectConfig::default();
        let spec = JobSpec::Extension {
            ext: Extension::GeoMap,
            min: true,
        };
        let job = from_spec(&spec, &config);
        assert_eq!(job.name, "geomap.min");
        assert_eq!(job.module_name, "geomap");
        assert_eq!(job.output, Path::new("dist/extension/geomap.min.js"));
        assert_eq!(job.entry, Path::new("extension/geomap/index.js"));
        assert_eq!(job.externals, vec!["chart".to_string()]);
        assert_eq!(job.lang, None);
    }

    #[test]
    fn datatool_plain_variant() {
        let spec = JobSpec::Extension {
            ext: Extension::DataTool,
            min: false,
        };
        let job = from_spec(&spec, &ProjectConfig::default());
        assert_eq!(job.output, Path::new("dist/extension/datatool.js"));
        assert!(!job.min);
    }

    #[test]
    fn matrix_realizes_to_unique_outputs() {
        let config = ProjectConfig::default();
        let jobs: Vec<_> = crate::matrix::full_matrix()
            .iter()
            .map(|spec| from_spec(spec, &config))
            .collect();
        assert_eq!(jobs.len(), 16);
        let mut outputs: Vec<_> = jobs.iter().map(|j| j.output.clone()).collect();
        outputs.sort();
        outputs.dedup();
        assert_eq!(outputs.len(), 16, "every job must emit a distinct file");
    }
}
