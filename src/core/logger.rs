/// Log to stderr so stdout carries only table rows. `RUST_LOG` overrides the
/// default `warn` level.
pub fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .init();
}
