//! CLI option normalization and build-mode selection.
//!
//! The build driver's behavior hinges on which flags were *supplied*, not on
//! their values: running with no flags at all means "build the whole
//! distribution matrix", while any explicit flag narrows the run to a single
//! bundle. [`RawOptions`] therefore preserves presence information exactly as
//! parsed — `Option` for value flags, `bool` for presence flags (a clap
//! `SetTrue` flag is true iff it appeared on the command line).
//!
//! ## Mode selection
//!
//! ```text
//! --watch present                    → WatchSingle   (always wins)
//! no flags at all                    → BuildAll      (full 16-job matrix)
//! anything else                      → BuildExplicitSingle
//! ```
//!
//! `--watch` together with `--lang`/`--min`/`--type` is accepted: the extra
//! flags shape the single watched bundle. `--type ""` is a valid explicit
//! request for the standard flavor and still counts as "a flag was given".

/// CLI flags as parsed, presence preserved.
///
/// `watch` and `min` are presence flags; `lang` and `kind` carry a value when
/// present. `kind` is the `--type` flag (renamed — `type` is a keyword).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    pub watch: bool,
    pub lang: Option<String>,
    pub min: bool,
    pub kind: Option<String>,
}

/// Canonical options with defaults applied. Every field has a concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOptions {
    /// Language override; `None` means the default language build.
    pub lang: Option<String>,
    /// Minify the output bundle.
    pub min: bool,
    /// Bundle flavor name; `""` means the standard flavor.
    pub kind: String,
}

/// What this invocation does, decided purely from flag presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Continuously rebuild one bundle on source changes. Never returns.
    WatchSingle,
    /// Build the one bundle described by the flags, then stage for publish.
    BuildExplicitSingle,
    /// No flags given: wipe dist, build all 16 jobs, then stage for publish.
    BuildAll,
}

/// Apply defaults to raw flags. Total — never fails, no side effects.
///
/// Unrecognized flag combinations are deliberately legal here (e.g. `--lang`
/// with `--type`); the job factory decides how to honor them.
pub fn normalize(raw: &RawOptions) -> NormalizedOptions {
    NormalizedOptions {
        lang: raw.lang.clone(),
        min: raw.min,
        kind: raw.kind.clone().unwrap_or_default(),
    }
}

/// Decide the build mode from flag presence. First match wins.
pub fn select_mode(raw: &RawOptions) -> BuildMode {
    if raw.watch {
        BuildMode::WatchSingle
    } else if raw.lang.is_none() && !raw.min && raw.kind.is_none() {
        BuildMode::BuildAll
    } else {
        BuildMode::BuildExplicitSingle
    }
}
