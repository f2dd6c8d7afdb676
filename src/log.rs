// src/log.rs
//
// Logging macros used throughout the scrapers. They forward to `tracing`,
// so whichever subscriber the caller installs decides where lines go.
// The CLI installs a fmt subscriber via `init`.

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Install a stderr subscriber. `verbose` counts `-v` flags; `quiet` keeps errors only.
/// `RUST_LOG` overrides both when set.
#[cfg(feature = "cli")]
pub fn init(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let fallback = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tm_scrape=info,warn"),
            1 => EnvFilter::new("tm_scrape=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or(fallback);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
