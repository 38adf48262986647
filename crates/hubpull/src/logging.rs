use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "hubpull=info,hubpull_fetch=info";

/// Install the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn default_filter(verbose: u8) -> String {
    match verbose {
        0 => DEFAULT_FILTER.to_string(),
        1 => "hubpull=debug,hubpull_fetch=debug,hubpull_fs=debug".to_string(),
        _ => "debug".to_string(),
    }
}
