//! Test utilities shared by the rest-client crates.
//!
//! Provides a wiremock server with the REST routes client tests talk to,
//! proptest strategies for URLs and headers, and assertion helpers.

pub mod assertions;
pub mod mocks;
pub mod strategies;

use once_cell::sync::Lazy;
use rest_client_log::LogConfig;

/// Initialize the test harness with tracing support
pub fn init() {
    static INIT: Lazy<()> = Lazy::new(|| {
        // A subscriber installed by another harness wins.
        let _ = rest_client_log::init(LogConfig::for_tests());
        tracing::debug!("test logging initialized");
    });

    Lazy::force(&INIT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
