use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Quiet, human-readable logging for test runs. Opt into more detail with
/// `RUST_LOG=debug cargo test`.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer().with_target(false).with_test_writer().compact();

    // Several test binaries share the process in some harnesses; a second
    // init is a no-op.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
