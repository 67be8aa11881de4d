use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber: JSON lines on stdout, filtered through the
/// `RUST_LOG` environment variable.
///
/// Uses `try_init`, so an already-installed subscriber (tests, embedded
/// services) is left in place rather than panicking.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_tolerate_repeated_initialization() {
        init_tracing();
        init_tracing();
    }
}
