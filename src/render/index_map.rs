//! Index table mapping emitted element numbers back to screen geometry.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::bounds::{Bounds, Point};
use crate::core::node::Attributes;

/// Snapshot of an interactive node as it was when its index was allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedElement {
    attributes: Attributes,
    bounds: Option<Bounds>,
}

impl IndexedElement {
    pub fn new(attributes: Attributes) -> Self {
        let bounds = attributes.bounds();
        Self { attributes, bounds }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn center(&self) -> Option<Point> {
        self.bounds.map(|bounds| bounds.center())
    }
}

/// Serializable row of an [`IndexMap`], handed to actuators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub index: usize,
    pub text: String,
    pub resource_id: String,
    pub class: String,
    pub bounds: Option<Bounds>,
    pub center: Option<Point>,
}

/// 1-based element numbers from one render, in allocation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexMap {
    elements: BTreeMap<usize, IndexedElement>,
}

impl IndexMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `attributes` under the next free number and returns it.
    pub fn allocate(&mut self, attributes: Attributes) -> usize {
        let index = self.elements.len() + 1;
        self.elements.insert(index, IndexedElement::new(attributes));
        index
    }

    pub fn get(&self, index: usize) -> Option<&IndexedElement> {
        self.elements.get(&index)
    }

    /// Tap point for `index`: the center of its bounds.
    pub fn resolve_center(&self, index: usize) -> Option<Point> {
        self.get(index)?.center()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &IndexedElement)> {
        self.elements.iter().map(|(index, element)| (*index, element))
    }

    pub fn entries(&self) -> Vec<IndexEntry> {
        self.iter()
            .map(|(index, element)| {
                let attributes = element.attributes();
                IndexEntry {
                    index,
                    text: attributes.visible_text().to_string(),
                    resource_id: attributes.resource_id().to_string(),
                    class: attributes.class().to_string(),
                    bounds: element.bounds(),
                    center: element.center(),
                }
            })
            .collect()
    }
}
