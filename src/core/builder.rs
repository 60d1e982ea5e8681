//! Streaming tree builder over accessibility dumps.
//!
//! The dump is read as a flat sequence of start/end events. Open elements live on a
//! stack; an element is attached to its parent when it closes, so children always land
//! in document order and no node ever needs a link back to its parent.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::error::{to_offset, TreeError};
use super::node::{Attributes, Node};

const NBSP: char = '\u{a0}';

/// Builds the tree for `input`, returning its root element (normally `hierarchy`).
pub fn build_tree(input: &str) -> Result<Node, TreeError> {
    let normalized = normalize(input);
    let mut reader = Reader::from_str(&normalized);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let position = to_offset(reader.buffer_position());
        let event = reader
            .read_event()
            .map_err(|source| TreeError::syntax(reader.error_position(), source))?;

        match event {
            Event::Start(start) => {
                let node = open_node(&reader, &start, position, root.is_some())?;
                stack.push(node);
            }
            Event::Empty(start) => {
                let node = open_node(&reader, &start, position, root.is_some())?;
                close_node(node, &mut stack, &mut root);
            }
            Event::End(end) => {
                let node = stack.pop().ok_or_else(|| TreeError::UnexpectedEnd {
                    element: String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                    position,
                })?;
                close_node(node, &mut stack, &mut root);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(TreeError::Unclosed { open: stack.len() });
    }
    root.ok_or(TreeError::Empty)
}

/// Dumps carry U+00A0 inside text; it is plain whitespace to every consumer downstream.
fn normalize(input: &str) -> std::borrow::Cow<'_, str> {
    if input.contains(NBSP) {
        input.replace(NBSP, " ").into()
    } else {
        input.into()
    }
}

fn open_node(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
    position: usize,
    has_root: bool,
) -> Result<Node, TreeError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    if has_root {
        return Err(TreeError::MultipleRoots {
            element: tag,
            position,
        });
    }

    let mut entries = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|source| TreeError::Attribute {
            element: tag.clone(),
            position,
            source,
        })?;
        let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .decode_and_unescape_value(reader.decoder())
            .map_err(|source| TreeError::AttributeValue {
                element: tag.clone(),
                name: name.clone(),
                source,
            })?
            .into_owned();
        entries.push((name, value));
    }

    Ok(Node::new(tag, Attributes::new(entries)))
}

fn close_node(node: Node, stack: &mut [Node], root: &mut Option<Node>) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(node),
        None => *root = Some(node),
    }
}
