//! Shared test utilities for the distforge test suite.
//!
//! Builds throwaway chart-library project trees in temp directories so
//! driver and staging tests exercise real filesystem behavior without
//! depending on checked-in fixtures.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a minimal chart-library project in a temp directory:
/// flavor entry modules, one lang resource, both extension entries.
///
/// Tests get an isolated tree they can mutate freely.
pub fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(root, "src/index.js", "export * from './all.js';\n");
    write_file(root, "src/index.simple.js", "export * from './core.js';\n");
    write_file(root, "src/index.common.js", "export * from './common.js';\n");
    write_file(root, "src/all.js", "export const charts = [];\n");
    write_file(root, "lang/en.js", "export default { legend: 'Legend' };\n");
    write_file(root, "extension/geomap/index.js", "export function attach() {}\n");
    write_file(root, "extension/datatool/index.js", "export function parse() {}\n");
    tmp
}

/// Write a file under `root`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
