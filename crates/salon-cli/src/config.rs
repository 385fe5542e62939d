//! Runtime settings for the `salon` binary, read from the environment.

use std::env;

/// Filter used when neither `RUST_LOG` nor `SALON_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Fallback `tracing` filter directive (`SALON_LOG`).
    pub log_filter: String,
}

impl CliConfig {
    /// Load settings, reading a `.env` file first if one exists. Variables the
    /// `.env` file sets (including `SALON_DATA`) become visible to the parser.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        let log_filter = env::var("SALON_LOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self { log_filter }
    }
}
