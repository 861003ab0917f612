use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, filter::Directive, fmt, prelude::*};

fn quiet(directive: &str) -> Option<Directive> {
    directive.parse().ok()
}

/// Installs the global subscriber: pretty console output filtered by
/// `RUST_LOG`, an optional daily JSON log file, and the OTLP log bridge.
pub fn init_logger(
    sdk_logger_provider: SdkLoggerProvider,
    component: &str,
    is_dev: bool,
    enable_file: bool,
) {
    let file_layer = if enable_file {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{component}.log"));
        let (file_writer, guard) = non_blocking(file_appender);
        // The writer flushes on drop; it has to live as long as the process.
        std::mem::forget(guard);

        Some(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new("info")),
        )
    } else {
        None
    };

    let default_console = if is_dev { "debug" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_console));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(is_dev)
        .with_filter(console_filter);

    let otel_filter = ["hyper=off", "opentelemetry=off", "tonic=off", "h2=off", "sqlx=warn"]
        .into_iter()
        .filter_map(quiet)
        .fold(EnvFilter::new("info"), EnvFilter::add_directive);

    let otel_layer = OpenTelemetryTracingBridge::new(&sdk_logger_provider).with_filter(otel_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .init();
}
