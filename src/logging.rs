//! Diagnostics on stderr through the `log` facade
//!
//! Unresolved packages and invalid index versions are logged at `warn`;
//! per-lookup traces at `debug`.

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Level for the given verbosity flags
pub fn level_filter(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the terminal logger; a logger installed earlier is kept
pub fn init(verbose: bool, quiet: bool) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();

    let _ = TermLogger::init(
        level_filter(verbose, quiet),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter(false, false), LevelFilter::Warn);
        assert_eq!(level_filter(true, false), LevelFilter::Debug);
        assert_eq!(level_filter(false, true), LevelFilter::Error);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false, false);
        init(true, false);
    }
}
