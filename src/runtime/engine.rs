//! Perception pipeline entry points.
//!
//! [`digest`] is the pure transformation: dump text in, compact text plus element
//! table out. [`Engine`] wraps it for callers that render and later resolve taps
//! against the newest render.

use std::collections::HashSet;

use crate::core::bounds::{Point, Screen};
use crate::core::builder::build_tree;
use crate::core::error::TreeError;
use crate::core::node::Node;
use crate::core::prune::{prune_tree, PruneStats};
use crate::logging::{debug_enabled, log_parse_failure, log_prune_stats};
use crate::render::compact::CompactRenderer;
use crate::render::index_map::IndexMap;
use crate::render::xml::write_xml;

/// Result of one perception cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Digest {
    text: String,
    index: IndexMap,
    identity_keys: HashSet<String>,
    stats: PruneStats,
}

impl Digest {
    /// Compact rendering, one line per emitted node.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn index(&self) -> &IndexMap {
        &self.index
    }

    pub fn resolve_center(&self, index: usize) -> Option<Point> {
        self.index.resolve_center(index)
    }

    /// Keys of every important node that survived pruning; pass these as the previous
    /// keys of the next cycle to mark what appeared since.
    pub fn identity_keys(&self) -> &HashSet<String> {
        &self.identity_keys
    }

    pub fn stats(&self) -> PruneStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.index.is_empty()
    }

    pub fn into_parts(self) -> (String, IndexMap) {
        (self.text, self.index)
    }
}

/// Builds, prunes against `screen`, and renders `input`.
///
/// Important nodes whose identity key is missing from `previous_keys` are marked as new.
/// `None` is the same as an empty snapshot, so everything important is marked.
/// Unparsable input yields an empty digest.
pub fn digest(input: &str, previous_keys: Option<&HashSet<String>>, screen: Screen) -> Digest {
    match try_digest(input, previous_keys, screen) {
        Ok(digest) => digest,
        Err(error) => {
            log_parse_failure("digest", &error);
            Digest::default()
        }
    }
}

/// Like [`digest`], but reports why the dump could not be read.
pub fn try_digest(
    input: &str,
    previous_keys: Option<&HashSet<String>>,
    screen: Screen,
) -> Result<Digest, TreeError> {
    let root = build_tree(input)?;
    let (root, stats) = prune_tree(root, Some(screen));

    let output = CompactRenderer::new(previous_keys).render(root.children());
    if debug_enabled() {
        log_prune_stats(stats, output.index.len());
    }

    Ok(Digest {
        text: output.text,
        index: output.index,
        identity_keys: collect_identity_keys(&root),
        stats,
    })
}

/// Re-emits the pruned dump as XML, keeping every attribute of the surviving nodes.
///
/// No screen is known here, so only informativeness decides what survives.
pub fn legacy_filter(input: &str) -> String {
    filter_xml(input, None)
}

/// [`legacy_filter`] that also drops nodes outside `screen`.
pub fn legacy_filter_within(input: &str, screen: Screen) -> String {
    filter_xml(input, Some(screen))
}

fn filter_xml(input: &str, screen: Option<Screen>) -> String {
    match build_tree(input) {
        Ok(root) => write_xml(&prune_tree(root, screen).0),
        Err(error) => {
            log_parse_failure("legacy_filter", &error);
            String::new()
        }
    }
}

fn collect_identity_keys(root: &Node) -> HashSet<String> {
    root.walk()
        .skip(1)
        .map(Node::attributes)
        .filter(|attributes| attributes.is_semantically_important())
        .map(|attributes| attributes.identity_key())
        .collect()
}

/// Holds the newest [`Digest`] so element numbers can be resolved after rendering.
///
/// Each render replaces the previous digest wholesale; numbers from an older render are
/// never resolved against a newer tree's geometry unless the newer render allocated
/// them too. Not meant for concurrent use: render and resolve from one owner.
#[derive(Debug, Default)]
pub struct Engine {
    latest: Option<Digest>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        input: &str,
        previous_keys: Option<&HashSet<String>>,
        screen: Screen,
    ) -> &Digest {
        self.latest = None;
        self.latest.insert(digest(input, previous_keys, screen))
    }

    /// Renders with the identity keys of this engine's previous render as the previous
    /// snapshot. The first call has no snapshot and marks every important node.
    pub fn render_diffed(&mut self, input: &str, screen: Screen) -> &Digest {
        let previous = self.latest.take();
        let previous_keys = previous.as_ref().map(Digest::identity_keys);
        self.latest.insert(digest(input, previous_keys, screen))
    }

    pub fn resolve_center(&self, index: usize) -> Option<Point> {
        self.latest.as_ref()?.resolve_center(index)
    }

    pub fn latest(&self) -> Option<&Digest> {
        self.latest.as_ref()
    }

    pub fn index(&self) -> Option<&IndexMap> {
        self.latest.as_ref().map(Digest::index)
    }
}
