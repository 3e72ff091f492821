use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global subscriber. Diagnostics go to stderr so stdout stays
/// reserved for command output.
pub fn init(level: &str) {
    let level = Level::from_str(level.trim()).unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok(); // already set in tests
}
