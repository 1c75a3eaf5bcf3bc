use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing to stderr.
///
/// Default level is `warn` (`debug` for this crate when `verbose`); `RUST_LOG`
/// overrides both. Calling this more than once is a no-op.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "warn,spotlight=debug,spotlight_cli=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
