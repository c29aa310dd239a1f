// src/paths.rs
// Single source of truth for where MotionLab writes files of its own.

use std::path::PathBuf;

/// `<temp>/motionlab.log`. Only used when there is no console to log to.
#[cfg_attr(not(all(windows, not(debug_assertions))), allow(dead_code))]
pub fn log_file() -> PathBuf {
    std::env::temp_dir().join("motionlab.log")
}
