//! Structural XML re-emission of a pruned tree.

use crate::core::node::Node;

const INDENT: &str = "  ";

/// Writes `root` and its subtree with two-space indentation, attributes in document
/// order, and self-closing tags for childless elements.
pub fn write_xml(root: &Node) -> String {
    enum Step<'a> {
        Open(&'a Node, usize),
        Close(&'a Node, usize),
    }

    let mut out = String::new();
    let mut steps = vec![Step::Open(root, 0)];
    while let Some(step) = steps.pop() {
        match step {
            Step::Open(node, depth) => {
                open_element(node, depth, &mut out);
                if node.children().is_empty() {
                    out.push_str(" />");
                } else {
                    out.push('>');
                    steps.push(Step::Close(node, depth));
                    steps.extend(
                        node.children()
                            .iter()
                            .rev()
                            .map(|child| Step::Open(child, depth + 1)),
                    );
                }
            }
            Step::Close(node, depth) => {
                newline_and_indent(depth, &mut out);
                out.push_str("</");
                out.push_str(node.tag());
                out.push('>');
            }
        }
    }
    out
}

fn open_element(node: &Node, depth: usize, out: &mut String) {
    if depth > 0 {
        newline_and_indent(depth, out);
    }
    out.push('<');
    out.push_str(node.tag());
    for (name, value) in node.attributes().iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
}

fn newline_and_indent(depth: usize, out: &mut String) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
