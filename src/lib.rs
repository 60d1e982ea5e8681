//! Compression and diffing of accessibility-tree dumps for automation agents.
//!
//! Invariant: element numbers are allocated fresh on every render and only resolve
//! against the render that produced them.
//!
//! # Public API Overview
//! - [`digest`] turns a raw dump, a [`Screen`], and optionally the identity keys of the
//!   previous cycle into a [`Digest`]: compact tab-indented text plus an [`IndexMap`]
//!   from element numbers to bounds.
//! - [`Engine`] keeps the newest digest so [`Engine::resolve_center`] can turn a number
//!   the model chose into a tap point.
//! - [`legacy_filter`] re-emits the pruned tree as XML with all original attributes.
//! - Lower-level passes ([`build_tree`], [`prune_tree`], [`CompactRenderer`],
//!   [`write_xml`]) are exported for callers composing their own pipeline.

pub mod config;
pub mod logging;

pub mod core;
pub mod render;
pub mod runtime;

/// Tree model and geometry.
pub use crate::core::bounds::{Bounds, ParseBoundsError, Point, Screen};
pub use crate::core::node::{Attributes, Node};

/// Build and prune passes.
pub use crate::core::builder::build_tree;
pub use crate::core::error::TreeError;
pub use crate::core::prune::{prune, prune_tree, PruneStats};

/// Renderers and the element table.
pub use crate::render::compact::{flag_summary, CompactOutput, CompactRenderer};
pub use crate::render::index_map::{IndexEntry, IndexMap, IndexedElement};
pub use crate::render::xml::write_xml;

/// Pipeline entry points.
pub use crate::runtime::engine::{
    digest, legacy_filter, legacy_filter_within, try_digest, Digest, Engine,
};

/// Environment configuration.
pub use crate::config::EnvConfig;
