use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// `RUST_LOG` still applies to individual modules; `level` sets the baseline.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
