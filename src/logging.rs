use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "ombros",
    "ombros_advisory",
    "ombros_sarima",
    "ombros_series",
    "ombros_spi",
    "ombros_stats",
    "tower_http",
];

/// Initialize tracing for the server process.
///
/// Defaults every workspace crate to `info`; the `RUST_LOG` env var
/// overrides the default filter entirely if set.
pub fn init() {
    let default_filter: String = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}=info"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
