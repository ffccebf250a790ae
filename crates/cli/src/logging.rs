//! One-time `env_logger` setup for the binary.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "tessel_core=trace,warn"). When unset, `RUST_LOG` is consulted, then the
/// verbosity flag.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub verbose: bool,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    pub fn from_env(verbose: bool) -> Self {
        Self {
            env_filter: std::env::var("RUST_LOG").ok(),
            verbose,
            write_style: env_logger::WriteStyle::Auto,
        }
    }

    /// The filter string the logger will be built with.
    pub fn filter(&self) -> String {
        match &self.env_filter {
            Some(filter) if !filter.trim().is_empty() => filter.clone(),
            _ if self.verbose => "debug".to_string(),
            _ => "warn".to_string(),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter();
        let result = env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .try_init();
        if result.is_ok() {
            log::debug!("logging initialized with filter '{filter}'");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(env_filter: Option<&str>, verbose: bool) -> LoggingConfig {
        LoggingConfig {
            env_filter: env_filter.map(str::to_string),
            verbose,
            write_style: env_logger::WriteStyle::Never,
        }
    }

    #[test]
    fn quiet_by_default() {
        assert_eq!(config(None, false).filter(), "warn");
    }

    #[test]
    fn verbose_raises_to_debug() {
        assert_eq!(config(None, true).filter(), "debug");
    }

    #[test]
    fn rust_log_wins_over_verbose() {
        assert_eq!(
            config(Some("tessel_core=trace"), true).filter(),
            "tessel_core=trace"
        );
    }

    #[test]
    fn blank_rust_log_is_ignored() {
        assert_eq!(config(Some("  "), false).filter(), "warn");
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(config(None, false));
        init_logging(config(None, true));
    }
}
