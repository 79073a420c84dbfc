use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Fallback filter when `RUST_LOG` is unset. The orchestrator itself logs
/// at info; sqlx's per-query logging and sea-orm internals are kept at
/// warn because the saga steps already log the interesting state changes.
const DEFAULT_DIRECTIVES: &str = "info,sqlx::query=warn,sea_orm=warn";

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json()
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
