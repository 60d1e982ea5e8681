//! Pipeline entry points.

pub mod engine;

pub use engine::{digest, legacy_filter, legacy_filter_within, try_digest, Digest, Engine};
