// Logging and verbosity control

use tracing_subscriber::EnvFilter;

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Warnings and errors only
    Quiet,
    /// Standard output
    Normal,
    /// Debug output
    Verbose,
}

impl VerbosityLevel {
    /// Resolve from CLI flags; `quiet` wins over `verbose`
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            VerbosityLevel::Quiet
        } else if verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Default filter directive for this level
    pub fn directive(&self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "warn",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

/// Initialize tracing on stderr; `RUST_LOG` overrides the flag level
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = VerbosityLevel::from_flags(verbose, quiet);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(VerbosityLevel::from_flags(false, false), VerbosityLevel::Normal);
        assert_eq!(VerbosityLevel::from_flags(true, false), VerbosityLevel::Verbose);
        assert_eq!(VerbosityLevel::from_flags(true, true), VerbosityLevel::Quiet);
    }

    #[test]
    fn test_directives() {
        assert_eq!(VerbosityLevel::Quiet.directive(), "warn");
        assert_eq!(VerbosityLevel::Normal.directive(), "info");
        assert_eq!(VerbosityLevel::Verbose.directive(), "debug");
    }
}
