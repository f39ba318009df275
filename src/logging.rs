use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Install the stderr log subscriber once. Warnings and errors are always
/// shown; `verbose` adds debug output.
pub fn init_logging(verbose: bool) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
