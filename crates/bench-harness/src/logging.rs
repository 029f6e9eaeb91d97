//! Diagnostic logging on stderr; stdout carries only the report.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::HarnessError;

/// Directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`HarnessError::Logger`] if a global subscriber is already set.
pub fn setup_logger() -> Result<(), HarnessError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::setup_logger;
    use crate::HarnessError;

    #[test]
    fn second_install_is_reported_not_fatal() {
        // Another test may have installed a subscriber first; either way the
        // second call must fail cleanly.
        let _ = setup_logger();

        let error = setup_logger().expect_err("global subscriber is already set");

        assert!(matches!(error, HarnessError::Logger(_)));
    }
}
