pub mod app;
pub mod core;
pub mod queue;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Version string with build metadata, shown by `--version`
pub fn long_version() -> String {
    format!(
        "{} (built {}, commit {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_TIME,
        GIT_HASH
    )
}
