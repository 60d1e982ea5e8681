//! Compact line-per-node rendering with diff markers and element numbering.

use std::collections::HashSet;

use crate::core::node::{is_blank, Attributes, Node};
use crate::render::index_map::IndexMap;

const INDENT: char = '\t';
const NEW_MARKER: &str = "* ";

/// Output of one compact render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactOutput {
    pub text: String,
    pub index: IndexMap,
}

/// Renders pruned nodes into tab-indented lines.
///
/// Interactive nodes are numbered in pre-order starting at 1. Important nodes whose
/// identity key is not in `previous_keys` get a `* ` prefix; `None` counts as empty.
#[derive(Debug)]
pub struct CompactRenderer<'a> {
    previous_keys: Option<&'a HashSet<String>>,
    lines: Vec<String>,
    index: IndexMap,
}

impl<'a> CompactRenderer<'a> {
    pub fn new(previous_keys: Option<&'a HashSet<String>>) -> Self {
        Self {
            previous_keys,
            lines: Vec::new(),
            index: IndexMap::new(),
        }
    }

    pub fn render(mut self, nodes: &[Node]) -> CompactOutput {
        let mut pending: Vec<(&Node, usize)> = nodes.iter().rev().map(|node| (node, 0)).collect();
        while let Some((node, depth)) = pending.pop() {
            self.emit(node, depth);
            pending.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        }
        CompactOutput {
            text: self.lines.join("\n"),
            index: self.index,
        }
    }

    fn emit(&mut self, node: &Node, depth: usize) {
        let attributes = node.attributes();
        let marker = if self.is_new(attributes) { NEW_MARKER } else { "" };

        if attributes.is_interactive() {
            let index = self.index.allocate(attributes.clone());
            let line = format!(
                "{marker}[{index}] text:\"{}\" <{}> <{}> <{}>",
                single_line(attributes.visible_text()),
                attributes.resource_id(),
                flag_summary(attributes),
                attributes.short_class(),
            );
            self.push_line(depth, line);
        } else if !is_blank(attributes.visible_text()) {
            let line = format!("{marker}{}", single_line(attributes.visible_text()));
            self.push_line(depth, line);
        }
    }

    /// No previous snapshot reads as an empty one: every important node is new.
    fn is_new(&self, attributes: &Attributes) -> bool {
        attributes.is_semantically_important()
            && !self
                .previous_keys
                .is_some_and(|keys| keys.contains(&attributes.identity_key()))
    }

    fn push_line(&mut self, depth: usize, line: String) {
        let mut indented = String::with_capacity(depth + line.len());
        indented.extend(std::iter::repeat(INDENT).take(depth));
        indented.push_str(&line);
        self.lines.push(indented);
    }
}

/// `This element is clickable, long clickable.` or empty when no flag is set.
pub fn flag_summary(attributes: &Attributes) -> String {
    let flags: Vec<String> = attributes
        .true_flags()
        .map(|name| name.replace('-', " "))
        .collect();
    if flags.is_empty() {
        String::new()
    } else {
        format!("This element is {}.", flags.join(", "))
    }
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::{flag_summary, CompactRenderer};
    use crate::core::node::{Attributes, Node};

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn node(pairs: &[(&str, &str)], children: Vec<Node>) -> Node {
        Node::new("node", attrs(pairs)).with_children(children)
    }

    fn login_button() -> Node {
        node(
            &[
                ("text", "Login"),
                ("resource-id", "btn_login"),
                ("class", "android.widget.Button"),
                ("clickable", "true"),
                ("enabled", "true"),
                ("bounds", "[10,20][30,60]"),
            ],
            vec![],
        )
    }

    #[test]
    fn interactive_line_format() {
        let output = CompactRenderer::new(None).render(&[login_button()]);
        assert_eq!(
            output.text,
            "* [1] text:\"Login\" <btn_login> <This element is clickable, enabled.> <Button>"
        );
        assert_eq!(output.index.len(), 1);
    }

    #[test]
    fn summary_replaces_hyphens_and_keeps_fixed_order() {
        let a = attrs(&[
            ("password", "true"),
            ("long-clickable", "true"),
            ("checkable", "true"),
        ]);
        assert_eq!(
            flag_summary(&a),
            "This element is checkable, long clickable, password."
        );
        assert_eq!(flag_summary(&attrs(&[("clickable", "false")])), "");
    }

    #[test]
    fn text_lines_and_silent_wrappers_indent_by_depth() {
        let tree = node(
            &[],
            vec![node(
                &[("text", "Title\nsecond line")],
                vec![node(&[("clickable", "true")], vec![])],
            )],
        );
        let output = CompactRenderer::new(None).render(&[tree]);
        assert_eq!(
            output.text,
            "\t* Title second line\n\t\t[1] text:\"\" <> <This element is clickable.> <>"
        );
    }

    #[test]
    fn marker_follows_previous_keys() {
        let previous: HashSet<String> =
            HashSet::from(["Login|btn_login|android.widget.Button".to_string()]);
        let unchanged = CompactRenderer::new(Some(&previous)).render(&[login_button()]);
        assert!(unchanged.text.starts_with("[1]"));

        let renamed = node(
            &[
                ("text", "Log In"),
                ("resource-id", "btn_login"),
                ("class", "android.widget.Button"),
                ("clickable", "true"),
            ],
            vec![],
        );
        let changed = CompactRenderer::new(Some(&previous)).render(&[renamed.clone()]);
        assert!(changed.text.starts_with("* [1] text:\"Log In\""));

        let empty = HashSet::new();
        let first_cycle = CompactRenderer::new(Some(&empty)).render(&[renamed.clone()]);
        let no_snapshot = CompactRenderer::new(None).render(&[renamed]);
        assert_eq!(no_snapshot.text, first_cycle.text);
        assert!(no_snapshot.text.starts_with("* [1]"));
    }

    #[test]
    fn unimportant_nodes_are_never_marked() {
        let previous = HashSet::new();
        let output = CompactRenderer::new(Some(&previous))
            .render(&[node(&[("clickable", "true")], vec![]), node(&[("text", "hi")], vec![])]);
        assert_eq!(
            output.text,
            "[1] text:\"\" <> <This element is clickable.> <>\n* hi"
        );
    }

    #[test]
    fn indices_follow_pre_order() {
        let tree = node(
            &[("scrollable", "true")],
            vec![node(&[("focusable", "true"), ("text", "inner")], vec![])],
        );
        let output = CompactRenderer::new(None).render(&[tree, login_button()]);
        let numbered: Vec<&str> = output
            .index
            .iter()
            .map(|(_, element)| element.attributes().visible_text())
            .collect();
        assert_eq!(numbered, vec!["", "inner", "Login"]);
    }

    #[test]
    fn deep_nesting_renders_with_one_tab_per_level() {
        let mut chain = node(&[("text", "bottom")], vec![]);
        for _ in 0..50_000 {
            chain = node(&[], vec![chain]);
        }
        let output = CompactRenderer::new(None).render(&[chain]);
        assert_eq!(output.text.len(), 50_000 + "* bottom".len());
        assert!(output.text.ends_with("\t* bottom"));
    }
}
