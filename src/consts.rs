pub mod cli_consts {
    //! Dashboard Client Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard client,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// Maximum number of buffered events between workers and the session loop
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client configuration
    pub mod http {
        use std::time::Duration;

        /// Connect and request timeout (seconds)
        pub const TIMEOUT_SECS: u64 = 10;

        pub const fn timeout() -> Duration {
            Duration::from_secs(TIMEOUT_SECS)
        }
    }

    /// Chart refresh configuration
    pub mod refresh {
        use std::time::Duration;

        /// Interval between chart refresh ticks (milliseconds)
        pub const INTERVAL_MS: u64 = 5 * 60 * 1000;

        /// Accepted range for a configured refresh interval (seconds)
        pub const MIN_INTERVAL_SECS: u64 = 1;
        pub const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

        /// Endpoint template prefix for chart datasets
        pub const CHART_DATA_ENDPOINT: &str = "api/chart-data";

        pub const fn interval() -> Duration {
            Duration::from_millis(INTERVAL_MS)
        }
    }

    // =============================================================================
    // SEARCH CONFIGURATION
    // =============================================================================

    pub mod search {
        use std::time::Duration;

        /// Quiet period before a search input is applied (milliseconds)
        pub const DEBOUNCE_MS: u64 = 300;

        /// Longest configurable debounce (milliseconds)
        pub const MAX_DEBOUNCE_MS: u64 = 10_000;

        /// Row selector used when an input doesn't name its own target
        pub const DEFAULT_ROW_SELECTOR: &str = "tbody tr";

        pub const fn debounce() -> Duration {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }

    // =============================================================================
    // EXPORT CONFIGURATION
    // =============================================================================

    pub mod export {
        /// Prefix of every exported artifact's file name
        pub const FILENAME_PREFIX: &str = "telegram_bot_data";

        pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";
        pub const JSON_MIME_TYPE: &str = "application/json;charset=utf-8";
    }
}
