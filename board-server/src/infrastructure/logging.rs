use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "info,board_server=debug,actix_web=info,sqlx=warn";

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
///
/// actix-web's `Logger` middleware emits `log` records; the subscriber's
/// log bridge turns them into tracing events.
pub fn init_logging(default_filter: &str) -> anyhow::Result<()> {
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("Logging initialized with default filter {:?}", default_filter);
    Ok(())
}
