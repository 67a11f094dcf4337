//! # distforge
//!
//! Build-matrix driver for a charting library's distribution bundles. Given
//! a handful of CLI toggles, it decides deterministically *what* to build —
//! which combinations of language, minification and bundle flavor — and
//! drives an external bundler over that job list, finishing with a
//! publish-staging step. Bundling itself (module resolution, transforms,
//! minification) lives behind a trait boundary and is not this crate's
//! concern.
//!
//! # Architecture: Plan, Then Execute
//!
//! ```text
//! CLI flags → RawOptions → RunPlan ─┬─ Watch   → one job, rebuild loop (blocks)
//!                                   ├─ Single  → one job, build once, stage
//!                                   └─ All     → wipe dist, 16 jobs, stage
//! ```
//!
//! The split exists for three reasons:
//!
//! - **Determinism**: the full matrix is fixed data, so a no-flag run always
//!   produces the same 16 jobs in the same order.
//! - **Testability**: planning is pure; execution runs against a mock engine
//!   in tests, so end-to-end scenarios never spawn a bundler.
//! - **Safety**: destructive steps (dist wipe, staging wipe+copy) are
//!   explicit sequenced operations, not side effects buried in build code.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`options`] | Raw flag presence → normalized options and build mode |
//! | [`matrix`] | The fixed 16-job matrix: 12 chart variants + 4 extension jobs |
//! | [`job`] | Descriptor factory — entry, output path, externals, lang resource |
//! | [`engine`] | `BuildEngine` trait, bundler-process engine, rayon batch runner |
//! | [`driver`] | Orchestration: plan from flags, execute with wipe/stage sequencing |
//! | [`watch`] | Continuous single-job rebuild loop on filesystem notifications |
//! | [`stage`] | Destructive filesystem steps: dist wipe, publish staging copy |
//! | [`config`] | Optional `build.toml`: paths, entries, bundler command, workers |
//! | [`output`] | CLI output formatting — pure `format_*` plus `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Presence-Based Mode Selection
//!
//! "Build everything" is the behavior of supplying *no* flags, so modes are
//! decided from flag presence, never flag values. `Option` fields keep
//! absent distinguishable from present-with-empty-value (`--type ""` is an
//! explicit request for the standard flavor, not a full-matrix run).
//!
//! ## The Matrix Is Data
//!
//! The 16-job set lives in const tables ([`matrix`]), not nested
//! conditionals. Adding a language or flavor is a table edit, and tests
//! compare the whole list structurally.
//!
//! ## Engine Behind a Trait
//!
//! The production engine shells out to the project's bundler wrapper, one
//! process per job on a rayon pool. Everything above the [`engine::BuildEngine`]
//! trait is bundler-agnostic, and the driver's end-to-end tests swap in a
//! recording mock.
//!
//! ## Failures Abort the Run
//!
//! The core has almost no failure surface of its own — normalization and
//! matrix generation are total. Collaborator failures (bundler exit status,
//! filesystem errors) propagate to the process boundary unchanged; there is
//! no partial-success accounting across the matrix.

pub mod config;
pub mod driver;
pub mod engine;
pub mod job;
pub mod matrix;
pub mod options;
pub mod output;
pub mod stage;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_helpers;
