//! Render/debug logging helpers.
//!
//! Statistics are only emitted when `SCREEN_DIGEST_DEBUG=1`; parse failures are always
//! reported. Subscribers are installed by the binary, never by this crate.

use once_cell::sync::Lazy;

use crate::config::EnvConfig;
use crate::core::error::TreeError;
use crate::core::prune::PruneStats;

static ENV_CONFIG: Lazy<EnvConfig> = Lazy::new(EnvConfig::from_env);

/// Process-wide configuration, read once on first use.
pub fn env_config() -> &'static EnvConfig {
    &ENV_CONFIG
}

pub fn debug_enabled() -> bool {
    env_config().debug
}

pub fn log_prune_stats(stats: PruneStats, interactive: usize) {
    tracing::debug!(
        original = stats.original,
        kept = stats.kept,
        interactive,
        "pruned accessibility tree"
    );
}

pub fn log_parse_failure(operation: &'static str, error: &TreeError) {
    tracing::warn!(operation, error = %error, "discarding unparsable accessibility dump");
}
