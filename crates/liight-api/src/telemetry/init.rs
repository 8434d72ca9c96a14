use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "liight=debug,tower_http=debug";

/// Install the global tracing subscriber.
///
/// Console output is compact; `json` switches to one JSON object per line for
/// log shippers. Filtering follows `RUST_LOG` when set.
pub fn init_telemetry(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let (console_fmt, json_fmt) = if json {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        let console = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        (Some(console), None)
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console_fmt)
        .with(json_fmt)
        .try_init();

    match installed {
        Ok(()) => tracing::info!(json, "Tracing initialized"),
        Err(_) => tracing::debug!("Tracing subscriber already installed"),
    }
}
