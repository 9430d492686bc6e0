use tracing_subscriber::EnvFilter;

/// Crates whose events the `-v` flags turn up.
const LOG_TARGETS: &[&str] = &["langcheck", "langcheck_cli"];

/// Filter directive for a verbosity level: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
#[must_use]
pub fn filter_directive(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. `RUST_LOG` wins over `-v` when set.
///
/// Logs go to stderr so stdout stays clean for reports.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose)));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_levels() {
        assert_eq!(filter_directive(0), "langcheck=warn,langcheck_cli=warn");
        assert_eq!(filter_directive(2), "langcheck=debug,langcheck_cli=debug");
        assert_eq!(filter_directive(9), "langcheck=trace,langcheck_cli=trace");
    }
}
