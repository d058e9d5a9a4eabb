//! Run command - launch compiled test binaries and combine exit statuses

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Launch every binary in order, streaming its output through, and
/// return how many exited unsuccessfully. Failing to launch a binary at
/// all (missing file, not executable) is an error, not a test failure.
pub fn run(files: &[PathBuf], no_color: bool) -> Result<usize> {
    let mut failures = 0;
    for file in files {
        if !run_file(file, no_color)? {
            failures += 1;
        }
    }
    Ok(failures)
}

fn run_file(file: &Path, no_color: bool) -> Result<bool> {
    let mut command = Command::new(file);
    if no_color {
        // The harness's reporter checks NO_COLOR via the colored crate.
        command.env("NO_COLOR", "1");
    }
    let status = command
        .status()
        .with_context(|| format!("failed to launch test binary: {}", file.display()))?;
    Ok(status.success())
}
