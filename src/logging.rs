//! Logger setup driven by the verbosity flags

use crate::cli::Args;
use log::LevelFilter;
use std::io::Write;

/// Level implied by `--verbose` / `--quiet`, before `RUST_LOG` is applied
#[must_use]
pub fn level_for(args: &Args) -> LevelFilter {
    if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived level.
pub fn init(args: &Args) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(args))
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .try_init();
}
