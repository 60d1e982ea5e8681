//! Bottom-up pruning with child promotion.

use super::bounds::Screen;
use super::node::Node;

/// Node counts before and after a pruning pass, container excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    pub original: usize,
    pub kept: usize,
}

/// Prunes everything below `root` and returns it with the surviving nodes.
///
/// The root itself is a container and is never tested. With `screen` set, nodes that
/// cover no on-screen pixel are dropped and their surviving children take their place.
pub fn prune_tree(mut root: Node, screen: Option<Screen>) -> (Node, PruneStats) {
    let original = root.subtree_len() - 1;
    let mut kept = Vec::new();
    for child in root.take_children() {
        prune_into(child, screen, &mut kept);
    }
    root.set_children(kept);
    let kept = root.subtree_len() - 1;
    (root, PruneStats { original, kept })
}

/// Returns what should stand at `node`'s position: `[node]` if it stays, otherwise its
/// pruned children (possibly none).
pub fn prune(node: Node, screen: Option<Screen>) -> Vec<Node> {
    let mut out = Vec::new();
    prune_into(node, screen, &mut out);
    out
}

enum Frame {
    Enter(Node),
    /// Children of the node are the entries of `out` from this offset on.
    Exit(Node, usize),
}

// Post-order over an explicit stack. Each node's pruned children accumulate at the tail
// of `out` before its `Exit` frame decides whether they stay under it or are promoted.
fn prune_into(node: Node, screen: Option<Screen>, out: &mut Vec<Node>) {
    let mut frames = vec![Frame::Enter(node)];
    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(mut node) => {
                let children = node.take_children();
                frames.push(Frame::Exit(node, out.len()));
                frames.extend(children.into_iter().rev().map(Frame::Enter));
            }
            Frame::Exit(mut node, start) => {
                let children = out.split_off(start);
                if keeps(&node, &children, screen) {
                    node.set_children(children);
                    out.push(node);
                } else {
                    out.extend(children);
                }
            }
        }
    }
}

fn keeps(node: &Node, children: &[Node], screen: Option<Screen>) -> bool {
    let attributes = node.attributes();
    if screen.is_some_and(|screen| !attributes.is_visible_in(screen)) {
        return false;
    }
    attributes.is_semantically_important() || attributes.is_interactive() || !children.is_empty()
}
