//! Project configuration module.
//!
//! Handles loading and validating the optional `build.toml` at the project
//! root. All options have stock defaults matching the conventional layout of
//! the chart library repository, so most projects need no config file at all.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! bundle_name = "chart"        # Base name of the main bundle artifacts
//! src_dir = "src"              # Canonical ES module sources
//! dist_dir = "dist"            # Built bundles land here
//! staging_dir = "lib"          # Pre-publish copy of src (wiped every run)
//! lang_dir = "lang"            # Language resources, one <code>.js per language
//!
//! [entries]
//! full = "src/index.js"        # Entry module per bundle flavor
//! simple = "src/index.simple.js"
//! common = "src/index.common.js"
//!
//! [extensions.geomap]
//! entry = "extension/geomap/index.js"
//!
//! [extensions.datatool]
//! entry = "extension/datatool/index.js"
//!
//! [bundler]
//! command = "node"             # Bundler binary invoked per job
//! args = ["build/bundle.js"]   # Extra args prepended to every invocation
//!
//! [build]
//! max_workers = 4              # Max parallel bundler processes (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only rename the shipped bundle
//! bundle_name = "mychart"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `build.toml`.
///
/// All fields have stock defaults. User config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Base name of the main bundle artifacts (`chart` → `chart.min.js`).
    pub bundle_name: String,
    /// Canonical source tree, staged to `staging_dir` before publish.
    pub src_dir: String,
    /// Output directory for built bundles. Wiped on full-matrix runs.
    pub dist_dir: String,
    /// Pre-publish staging directory. Wiped and repopulated every non-watch run.
    pub staging_dir: String,
    /// Directory holding language resources (`lang/en.js`).
    pub lang_dir: String,
    /// Entry modules per bundle flavor.
    pub entries: EntriesConfig,
    /// Extension artifact entry points.
    pub extensions: ExtensionsConfig,
    /// Bundler invocation settings.
    pub bundler: BundlerConfig,
    /// Parallel build settings.
    pub build: BuildConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            bundle_name: "chart".to_string(),
            src_dir: "src".to_string(),
            dist_dir: "dist".to_string(),
            staging_dir: "lib".to_string(),
            lang_dir: "lang".to_string(),
            entries: EntriesConfig::default(),
            extensions: ExtensionsConfig::default(),
            bundler: BundlerConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bundle_name.is_empty() {
            return Err(ConfigError::Validation(
                "bundle_name must not be empty".into(),
            ));
        }
        for (key, value) in [
            ("src_dir", &self.src_dir),
            ("dist_dir", &self.dist_dir),
            ("staging_dir", &self.staging_dir),
            ("lang_dir", &self.lang_dir),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.src_dir == self.staging_dir {
            return Err(ConfigError::Validation(
                "src_dir and staging_dir must differ (staging is wiped every run)".into(),
            ));
        }
        if self.bundler.command.is_empty() {
            return Err(ConfigError::Validation(
                "bundler.command must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Entry modules per bundle flavor, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntriesConfig {
    pub full: String,
    pub simple: String,
    pub common: String,
}

impl Default for EntriesConfig {
    fn default() -> Self {
        Self {
            full: "src/index.js".to_string(),
            simple: "src/index.simple.js".to_string(),
            common: "src/index.common.js".to_string(),
        }
    }
}

/// Entry points for the two extension artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionsConfig {
    pub geomap: ExtensionEntry,
    pub datatool: ExtensionEntry,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            geomap: ExtensionEntry {
                entry: "extension/geomap/index.js".to_string(),
            },
            datatool: ExtensionEntry {
                entry: "extension/datatool/index.js".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionEntry {
    pub entry: String,
}

/// How to invoke the external bundler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundlerConfig {
    /// Bundler binary. Looked up on PATH unless an absolute path is given.
    pub command: String,
    /// Extra arguments prepended to every invocation.
    pub args: Vec<String>,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            command: "node".to_string(),
            args: vec!["build/bundle.js".to_string()],
        }
    }
}

/// Parallel build settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Maximum number of parallel bundler processes.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(config: &BuildConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load `build.toml` from the project root, falling back to stock defaults
/// when the file is absent. A present-but-invalid file is an error, never a
/// silent fallback.
pub fn load(project_root: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = project_root.join("build.toml");
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        ProjectConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A documented stock `build.toml` with every option at its default.
pub fn stock_config_toml() -> String {
    let defaults = ProjectConfig::default();
    let body = toml::to_string_pretty(&defaults).unwrap_or_default();
    format!(
        "# distforge project configuration.\n\
         # All options are optional; this file lists every default.\n\n{body}"
    )
}
