//! Logging setup for CLI runs

use tracing_subscriber::EnvFilter;

/// Log level for CLI output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Warnings such as ill-defined metrics
    Normal,
    /// Debug detail on file loading and label resolution
    Verbose,
}

impl LogLevel {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Filter directive used when `RUST_LOG` is unset
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn",
            LogLevel::Verbose => "debug",
        }
    }
}

/// Install a stderr `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the level. Calling this twice is a no-op.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_quiet_wins() {
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Quiet);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Verbose);
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Normal);
    }

    #[test]
    fn test_directive() {
        assert_eq!(LogLevel::Quiet.directive(), "error");
        assert_eq!(LogLevel::Normal.directive(), "warn");
        assert_eq!(LogLevel::Verbose.directive(), "debug");
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing(LogLevel::Quiet);
        init_tracing(LogLevel::Verbose);
    }
}
