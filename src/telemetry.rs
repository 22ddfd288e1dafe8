use std::sync::Once;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

static INIT: Once = Once::new();

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn setup_telemetry(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let stdout_layer = match format {
            LogFormat::Pretty => fmt::Layer::new()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .boxed(),
            LogFormat::Json => fmt::Layer::new()
                .json()
                .with_current_span(false)
                .with_writer(std::io::stdout)
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(stdout_layer.with_filter(env_filter))
            .init();
    });
}
