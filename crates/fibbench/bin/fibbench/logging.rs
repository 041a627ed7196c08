use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Diagnostics go to stderr so stdout carries only the report.
/// Level defaults to `warn`; override with `RUST_LOG`.
pub fn init_logging() {
    let offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let time_format =
        time::format_description::parse("[year]-[month]-[day]T[hour]:[minute]:[second]")
            .unwrap_or_default();
    let timer = fmt::time::OffsetTime::new(offset, time_format);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
