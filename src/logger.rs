use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

static INIT: Once = Once::new();

/// Installs the global tracing subscriber. Later calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let is_debug = env_filter.to_string().contains("debug") ||
                       std::env::var("RUST_LOG").unwrap_or_default().contains("debug");

        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_timer(fmt::time::uptime())
            .with_span_events(if is_debug {
                FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            });

        // another subscriber may already be installed by the host application
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
