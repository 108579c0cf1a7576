//! Logger setup for hosts embedding the tracker.

use log::info;

/// Install `env_logger` with the given filter (e.g. "info", "food_tracker_backend=debug").
///
/// `RUST_LOG`-style directives are accepted. Returns false when a logger was
/// already installed, which is not an error.
pub fn init_logging(filter: &str) -> bool {
    let installed = env_logger::Builder::new()
        .parse_filters(filter)
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if installed {
        info!("Logging initialized with filter '{}'", filter);
    }
    installed
}
