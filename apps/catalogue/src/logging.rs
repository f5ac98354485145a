//! Tracing setup. Logs always go to stderr so stdout stays parseable.

use catalogue_config::types::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Level for a `-v` count; `None` when no flag was given
fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Filter precedence: `RUST_LOG`, then `-v`, then the configured level.
fn filter(verbose: u8, cfg: Option<&LoggingConfig>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = verbosity_level(verbose)
        .or_else(|| cfg.map(|c| c.level.as_str()))
        .unwrap_or("warn");
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: u8, cfg: Option<&LoggingConfig>) {
    let filter = filter(verbose, cfg);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if cfg.is_some_and(|c| c.json) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        tracing::debug!("Tracing already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some("info"));
        assert_eq!(verbosity_level(2), Some("debug"));
        assert_eq!(verbosity_level(7), Some("trace"));
    }
}
