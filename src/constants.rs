//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Environment variable holding the base URL of the contact API
pub const ENV_API_URL: &str = "GAZETTE_API_URL";

/// Environment variable overriding the portfolio data file
pub const ENV_DATA_PATH: &str = "GAZETTE_DATA";

/// Environment variable overriding the page transition window
pub const ENV_TRANSITION_MS: &str = "GAZETTE_TRANSITION_MS";

/// Path appended to the API base URL for contact deliveries
pub const CONTACT_ENDPOINT: &str = "/api/contact";

/// Directory under $HOME holding user data
pub const CONFIG_DIR_NAME: &str = ".gazette";

/// Portfolio data file name inside the config directory
pub const DATA_FILE_NAME: &str = "portfolio.yaml";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "gazette.log";

/// How long a page transition stays pending
pub const DEFAULT_TRANSITION_MS: u64 = 180;

/// Latency of the simulated delivery channel
pub const SIMULATED_LATENCY_MS: u64 = 700;

/// HTTP client timeout for deliveries
pub const DELIVERY_TIMEOUT_SECS: u64 = 30;

/// First edition of the paper; edition numbers count weeks from here
pub const FIRST_EDITION: (i32, u32, u32) = (2018, 6, 1);

/// Application name
pub const APP_NAME: &str = "The Daily Portfolio";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
