//! Build metadata embedded by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `reelcast <version> (<date>, <commit>)`
pub fn version_line() -> String {
    format!(
        "reelcast {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
