//! Tracing subscriber setup

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use authsvc_shared::{LogFormat, LoggingConfig};

/// Crates whose logs follow `LoggingConfig::level`
const SERVICE_TARGETS: [&str; 4] = [
    "authsvc_api",
    "authsvc_core",
    "authsvc_infra",
    "authsvc_shared",
];

/// Filter from `RUST_LOG` when set, otherwise from the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    SERVICE_TARGETS.iter().fold(
        EnvFilter::new("warn").add_directive(
            "tracing_actix_web=info"
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        ),
        |filter, target| {
            filter.add_directive(
                format!("{}={}", target, config.level)
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            )
        },
    )
}

/// Install the global subscriber
///
/// Fails if a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));
    let location = config.source_location;

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(location)
                    .with_line_number(location)
                    .with_target(true)
                    .with_writer(io::stdout),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(location)
                    .with_line_number(location)
                    .with_target(true)
                    .with_writer(io::stdout),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_file(location)
                    .with_line_number(location)
                    .with_target(false)
                    .with_writer(io::stdout),
            )
            .try_init(),
    }
}
