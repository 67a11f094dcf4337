//! The fixed 16-job build matrix for a full-distribution run.
//!
//! A no-flag invocation builds every shipping artifact of the library. The
//! set is fixed by design, not derived from runtime input:
//!
//! ```text
//! 12 chart bundles   = {plain, min} × {default lang, en} × {full, simple, common}
//!  4 extension jobs  = {geomap, datatool} × {plain, min}
//! ```
//!
//! The matrix is declared as const tables rather than nested conditionals so
//! its contents and ordering are directly visible and snapshot-testable.
//! Ordering is outer-axis-major (variant), flavor-minor, extensions last —
//! it matters only for predictable logs, never for correctness (jobs are
//! independent).

/// Chart bundle flavor, controlling which internal modules are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFlavor {
    /// Everything — the standard distribution bundle.
    Full,
    /// Minimal chart set.
    Simple,
    /// Common chart set, between full and simple.
    Common,
}

impl BundleFlavor {
    /// Parse the `--type` flag value. `""` selects the standard flavor.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "" => Some(Self::Full),
            "simple" => Some(Self::Simple),
            "common" => Some(Self::Common),
            _ => None,
        }
    }

    /// Suffix used in output filenames: `chart.simple.min.js`.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Full => "",
            Self::Simple => ".simple",
            Self::Common => ".common",
        }
    }
}

/// Auxiliary whole-artifact build targets outside the chart flavor axis.
///
/// Built in exactly two variants each (plain and minified); no lang axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// Geographic map integration layer.
    GeoMap,
    /// Standalone data import/export tool.
    DataTool,
}

impl Extension {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GeoMap => "geomap",
            Self::DataTool => "datatool",
        }
    }
}

/// Matrix-level identity of one build job. Pure data — the job factory turns
/// a spec into a full descriptor with paths and externals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSpec {
    Chart {
        min: bool,
        lang: Option<&'static str>,
        flavor: BundleFlavor,
    },
    Extension {
        ext: Extension,
        min: bool,
    },
}

/// Outer axis: (min, lang) variants, in emission order.
const VARIANTS: [(bool, Option<&str>); 4] =
    [(false, None), (true, None), (false, Some("en")), (true, Some("en"))];

/// Inner axis: bundle flavors, in emission order.
const FLAVORS: [BundleFlavor; 3] = [BundleFlavor::Full, BundleFlavor::Simple, BundleFlavor::Common];

/// Extension jobs appended after the chart matrix, in emission order.
const EXTENSIONS: [Extension; 2] = [Extension::GeoMap, Extension::DataTool];

/// Enumerate all 16 jobs of a full-distribution build, in fixed order.
///
/// Pure and idempotent: two calls yield structurally identical lists.
pub fn full_matrix() -> Vec<JobSpec> {
    let charts = VARIANTS.iter().flat_map(|&(min, lang)| {
        FLAVORS
            .iter()
            .map(move |&flavor| JobSpec::Chart { min, lang, flavor })
    });
    let extensions = EXTENSIONS
        .iter()
        .flat_map(|&ext| [false, true].map(|min| JobSpec::Extension { ext, min }));
    charts.chain(extensions).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_has_sixteen_jobs() {
        assert_eq!(full_matrix().len(), 16);
    }

    #[test]
    fn matrix_is_idempotent() {
        assert_eq!(full_matrix(), full_matrix());
    }

    #[test]
    fn chart_jobs_come_first_variant_major_flavor_minor() {
        let jobs = full_matrix();
        let expected: Vec<(bool, Option<&str>, BundleFlavor)> = vec![
            (false, None, BundleFlavor::Full),
            (false, None, BundleFlavor::Simple),
            (false, None, BundleFlavor::Common),
            (true, None, BundleFlavor::Full),
            (true, None, BundleFlavor::Simple),
            (true, None, BundleFlavor::Common),
            (false, Some("en"), BundleFlavor::Full),
            (false, Some("en"), BundleFlavor::Simple),
            (false, Some("en"), BundleFlavor::Common),
            (true, Some("en"), BundleFlavor::Full),
            (true, Some("en"), BundleFlavor::Simple),
            (true, Some("en"), BundleFlavor::Common),
        ];
        for (job, want) in jobs.iter().zip(&expected) {
            match job {
                JobSpec::Chart { min, lang, flavor } => {
                    assert_eq!((*min, *lang, *flavor), *want);
                }
                other => panic!("expected chart job, got {other:?}"),
            }
        }
    }

    #[test]
    fn extension_jobs_close_the_matrix_plain_before_min() {
        let jobs = full_matrix();
        let tail: Vec<_> = jobs[12..].to_vec();
        assert_eq!(
            tail,
            vec![
                JobSpec::Extension {
                    ext: Extension::GeoMap,
                    min: false
                },
                JobSpec::Extension {
                    ext: Extension::GeoMap,
                    min: true
                },
                JobSpec::Extension {
                    ext: Extension::DataTool,
                    min: false
                },
                JobSpec::Extension {
                    ext: Extension::DataTool,
                    min: true
                },
            ]
        );
    }

    #[test]
    fn chart_combinations_are_unique() {
        let jobs = full_matrix();
        let mut seen = Vec::new();
        for job in &jobs[..12] {
            assert!(!seen.contains(job), "duplicate combination: {job:?}");
            seen.push(job.clone());
        }
    }

    #[test]
    fn flavor_round_trips_the_type_flag() {
        assert_eq!(BundleFlavor::from_kind(""), Some(BundleFlavor::Full));
        assert_eq!(BundleFlavor::from_kind("simple"), Some(BundleFlavor::Simple));
        assert_eq!(BundleFlavor::from_kind("common"), Some(BundleFlavor::Common));
        assert_eq!(BundleFlavor::from_kind("exotic"), None);
    }
}
