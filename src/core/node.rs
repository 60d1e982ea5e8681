//! Accessibility tree nodes and the predicates the pipeline classifies them by.

use std::sync::Arc;

use super::bounds::{Bounds, Screen};

pub const ATTR_TEXT: &str = "text";
pub const ATTR_CONTENT_DESC: &str = "content-desc";
pub const ATTR_RESOURCE_ID: &str = "resource-id";
pub const ATTR_CLASS: &str = "class";
pub const ATTR_BOUNDS: &str = "bounds";
pub const ATTR_ENABLED: &str = "enabled";
pub const ATTR_PASSWORD: &str = "password";

/// Boolean attributes in the order they are listed in an attribute summary.
pub const BOOLEAN_ATTRIBUTES: [&str; 10] = [
    "checkable",
    "checked",
    "clickable",
    "enabled",
    "focusable",
    "focused",
    "scrollable",
    "long-clickable",
    "selected",
    ATTR_PASSWORD,
];

/// Any one of these set to `true` makes an enabled node actionable.
const ACTION_ATTRIBUTES: [&str; 5] = [
    "clickable",
    "long-clickable",
    "checkable",
    "scrollable",
    "focusable",
];

const EDITABLE_CLASS_SUFFIX: &str = "EditText";

/// Separator between the fields of an identity key.
pub const IDENTITY_KEY_SEPARATOR: char = '|';

/// Immutable attribute snapshot of a node, in document order.
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    entries: Arc<[(String, String)]>,
}

impl Attributes {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Value of `name`, or `""` when absent.
    pub fn get(&self, name: &str) -> &str {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Strict boolean: only the literal `true` counts.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == "true"
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn text(&self) -> &str {
        self.get(ATTR_TEXT)
    }

    pub fn content_desc(&self) -> &str {
        self.get(ATTR_CONTENT_DESC)
    }

    pub fn resource_id(&self) -> &str {
        self.get(ATTR_RESOURCE_ID)
    }

    pub fn class(&self) -> &str {
        self.get(ATTR_CLASS)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::parse(self.get(ATTR_BOUNDS))
    }

    /// The text a user would read for this node: `text`, falling back to
    /// `content-desc` when `text` is blank.
    pub fn visible_text(&self) -> &str {
        let text = self.text();
        if is_blank(text) {
            self.content_desc()
        } else {
            text
        }
    }

    /// Class name without its namespace, e.g. `Button` for `android.widget.Button`.
    pub fn short_class(&self) -> &str {
        let class = self.class();
        class.rsplit('.').next().unwrap_or(class)
    }

    pub fn is_semantically_important(&self) -> bool {
        !is_blank(self.resource_id()) || !is_blank(self.text()) || !is_blank(self.content_desc())
    }

    pub fn is_interactive(&self) -> bool {
        if self.get(ATTR_ENABLED) == "false" {
            return false;
        }
        ACTION_ATTRIBUTES.iter().any(|name| self.flag(name))
            || self.is_editable()
            || self.flag(ATTR_PASSWORD)
    }

    pub fn is_editable(&self) -> bool {
        self.short_class().ends_with(EDITABLE_CLASS_SUFFIX)
    }

    /// Absent or unparsable bounds count as not visible.
    pub fn is_visible_in(&self, screen: Screen) -> bool {
        self.bounds()
            .is_some_and(|bounds| bounds.is_visible_in(screen))
    }

    /// `<visible-text>|<resource-id>|<class>`, used to probe previous snapshots.
    pub fn identity_key(&self) -> String {
        let mut key = String::with_capacity(64);
        key.push_str(self.visible_text());
        key.push(IDENTITY_KEY_SEPARATOR);
        key.push_str(self.resource_id());
        key.push(IDENTITY_KEY_SEPARATOR);
        key.push_str(self.class());
        key
    }

    /// Names of the boolean attributes set to `true`, in summary order.
    pub fn true_flags(&self) -> impl Iterator<Item = &'static str> + '_ {
        BOOLEAN_ATTRIBUTES
            .iter()
            .copied()
            .filter(move |name| self.flag(name))
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<(String, String)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One element of the accessibility tree.
///
/// Nodes own their children and there is no parent link. Every pass over a tree keeps
/// its ancestry on an explicit stack, so nesting depth is bounded by memory alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: String,
    attributes: Attributes,
    children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    pub(crate) fn set_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        self.walk().count()
    }

    /// Pre-order walk over this subtree, starting with `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

impl Drop for Node {
    // Drop glue alone would recurse once per nesting level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator returned by [`Node::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{Attributes, Node};

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn absent_attributes_read_as_empty_and_false() {
        let a = attrs(&[]);
        assert_eq!(a.text(), "");
        assert!(!a.flag("clickable"));
        assert_eq!(a.bounds(), None);
        assert!(!a.is_semantically_important());
    }

    #[test]
    fn interactivity_requires_enabled() {
        assert!(attrs(&[("clickable", "true")]).is_interactive());
        assert!(attrs(&[("long-clickable", "true"), ("enabled", "true")]).is_interactive());
        assert!(!attrs(&[("clickable", "true"), ("enabled", "false")]).is_interactive());
        assert!(!attrs(&[("clickable", "TRUE")]).is_interactive());
        assert!(!attrs(&[("checked", "true"), ("selected", "true")]).is_interactive());
    }

    #[test]
    fn edit_text_and_password_fields_are_interactive() {
        assert!(attrs(&[("class", "android.widget.EditText")]).is_interactive());
        assert!(attrs(&[("class", "com.acme.SearchEditText")]).is_interactive());
        assert!(attrs(&[("password", "true")]).is_interactive());
        assert!(!attrs(&[("class", "android.widget.EditText"), ("enabled", "false")])
            .is_interactive());
    }

    #[test]
    fn blank_text_falls_back_to_content_desc() {
        let a = attrs(&[("text", "  "), ("content-desc", "Back")]);
        assert_eq!(a.visible_text(), "Back");
        assert!(a.is_semantically_important());
    }

    #[test]
    fn identity_key_joins_text_id_and_full_class() {
        let a = attrs(&[
            ("text", "Login"),
            ("resource-id", "btn_login"),
            ("class", "android.widget.Button"),
        ]);
        assert_eq!(a.identity_key(), "Login|btn_login|android.widget.Button");
        assert_eq!(attrs(&[]).identity_key(), "||");
    }

    #[test]
    fn short_class_strips_namespace() {
        assert_eq!(attrs(&[("class", "android.widget.Button")]).short_class(), "Button");
        assert_eq!(attrs(&[("class", "View")]).short_class(), "View");
        assert_eq!(attrs(&[]).short_class(), "");
    }

    #[test]
    fn walk_is_pre_order() {
        let leaf = |text: &str| Node::new("node", attrs(&[("text", text)]));
        let tree = Node::new("hierarchy", attrs(&[])).with_children(vec![
            leaf("a").with_children(vec![leaf("b"), leaf("c")]),
            leaf("d"),
        ]);
        let order: Vec<&str> = tree.walk().map(|n| n.attributes().text()).collect();
        assert_eq!(order, vec!["", "a", "b", "c", "d"]);
        assert_eq!(tree.subtree_len(), 5);
    }

    #[test]
    fn very_deep_chains_count_and_drop() {
        let mut chain = Node::new("node", attrs(&[("text", "leaf")]));
        for _ in 0..200_000 {
            chain = Node::new("node", attrs(&[])).with_children(vec![chain]);
        }
        assert_eq!(chain.subtree_len(), 200_001);
        assert_eq!(chain.walk().last().map(|n| n.attributes().text()), Some("leaf"));
        drop(chain);
    }
}
