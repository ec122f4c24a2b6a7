//! Diagnostic logging on stderr.
//!
//! `RUST_LOG` wins when set; otherwise the level comes from the number of
//! `-v` flags. Command output goes to stdout or a file and never mixes with
//! log lines.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const CRATES: [&str; 3] = ["dicetally", "dicetally_core", "dicetally_stats"];

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_directives(verbose: u8) -> String {
    let level = level_for(verbose);
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber. Call once, before any logging.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal());

    // A subscriber installed earlier (e.g. by a test harness) is kept.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(0),
            "dicetally=warn,dicetally_core=warn,dicetally_stats=warn"
        );
        assert!(default_directives(2).starts_with("dicetally=debug"));
        assert_eq!(level_for(9), "trace");
    }
}
