//! Environment configuration.

use std::env;

pub const DEBUG_VAR: &str = "SCREEN_DIGEST_DEBUG";
pub const LOG_FILE_VAR: &str = "SCREEN_DIGEST_LOG_FILE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Log pruning and numbering statistics for every render. Only `1` turns it on.
    pub debug: bool,
    /// Where binaries built on this crate write their log, instead of stderr.
    pub log_file: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source, e.g. a map in tests or a
    /// config file an embedding application already parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let debug = lookup(DEBUG_VAR).is_some_and(|value| value == "1");
        let log_file = lookup(LOG_FILE_VAR).filter(|path| !path.trim().is_empty());
        Self { debug, log_file }
    }
}
