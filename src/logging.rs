//! Logging setup on top of the `log` facade and `env_logger`.
//!
//! Levels used across the crate:
//!
//! - `warn!`  - an annotated declaration failed to expand
//! - `info!`  - per-file progress in the CLI
//! - `debug!` - each macro invocation and per-file expansion summary
//! - `trace!` - parser output sizes
//!
//! `RUST_LOG` takes precedence over the level chosen on the command line:
//!
//! ```bash
//! RUST_LOG=paramtest::macros=debug paramtest expand Tests/
//! ```

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Maps the number of `-v` flags to a level filter.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes logging with `level` as the default filter.
///
/// `RUST_LOG`, when set, overrides `level`. Only the first call has an effect.
pub fn init_with_level(level: LevelFilter) {
    INIT.call_once(|| {
        Builder::from_env(Env::default().default_filter_or(level.to_string()))
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{:5}] {} - {}",
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .init();
    });
}

/// Test-friendly initialization; safe to call from every test.
pub fn init_test() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .is_test(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn init_test_is_idempotent() {
        init_test();
        init_test();
        log::warn!("expansion warning from a test");
    }
}
