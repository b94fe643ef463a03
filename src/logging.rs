use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the stderr subscriber for the binaries.
/// RUST_LOG wins when set, otherwise info (debug with verbose).
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // a second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}
