//! Shared test utilities for confstore CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Clear `CONFSTORE_*` variables so the host environment cannot leak in.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.

use assert_cmd::Command;
use std::path::Path;

const CONFSTORE_ENV_VARS: &[&str] = &[
    "CONFSTORE_FORMAT",
    "CONFSTORE_EXPAND_ENV",
    "CONFSTORE_TRIM_BOM",
    "CONFSTORE_ROOT",
    "CONFSTORE_METHOD",
    "CONFSTORE_MAX_BODY_SIZE",
    "CONFSTORE_TIMEOUT",
    "RUST_LOG",
];

/// Returns a hermetic `confstore` command for integration testing.
pub fn confstore_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("confstore");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    for var in CONFSTORE_ENV_VARS {
        cmd.env_remove(var);
    }

    cmd
}

/// Write `contents` to `name` inside `dir` and return the full path as a string.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> String {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}
