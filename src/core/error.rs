use thiserror::Error;

/// Why a dump could not be turned into a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("malformed dump at byte {position}: {source}")]
    Syntax {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute on <{element}> at byte {position}: {source}")]
    Attribute {
        element: String,
        position: usize,
        #[source]
        source: quick_xml::events::attributes::AttrError,
    },

    #[error("attribute '{name}' on <{element}> has an undecodable value: {source}")]
    AttributeValue {
        element: String,
        name: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("end tag </{element}> at byte {position} has no open element")]
    UnexpectedEnd { element: String, position: usize },

    #[error("{open} element(s) left unclosed at end of dump")]
    Unclosed { open: usize },

    #[error("second root element <{element}> at byte {position}")]
    MultipleRoots { element: String, position: usize },

    #[error("dump contains no elements")]
    Empty,
}

impl TreeError {
    #[must_use]
    pub fn syntax(position: impl TryInto<usize>, source: quick_xml::Error) -> Self {
        Self::Syntax {
            position: to_offset(position),
            source,
        }
    }
}

pub(crate) fn to_offset(position: impl TryInto<usize>) -> usize {
    position.try_into().unwrap_or(usize::MAX)
}
