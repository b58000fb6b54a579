//! Logging init: structured events to stderr so stdout stays clean for output.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,prodtable=debug"
    } else {
        "warn,prodtable=info"
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "warn,prodtable=info");
        assert_eq!(default_filter(true), "warn,prodtable=debug");
    }
}
