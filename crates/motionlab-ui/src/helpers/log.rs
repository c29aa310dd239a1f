// crates/motionlab-ui/src/helpers/log.rs
//
// Logging setup for the whole process. Every crate logs through the `log`
// facade; this is the only place a backend is installed.
//
// In release builds with `windows_subsystem = "windows"` (double-click launch)
// there is no console attached, so stderr output is silently discarded.
// Those builds append to a file in the temp directory instead.
//
// File: %TEMP%\motionlab.log (append-only, shared across sessions)
//
// Filter defaults to `info`; override with RUST_LOG as usual:
//   RUST_LOG=motionlab_net=debug motionlab

use env_logger::{Builder, Env};

pub fn init_logging() {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    #[cfg(all(windows, not(debug_assertions)))]
    {
        let path = crate::paths::log_file();
        // On failure there is nowhere to report it; stderr stays the target.
        if let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }

    // A second init (e.g. from a test harness) is harmless.
    let _ = builder.try_init();
}
