//! Per-pass span table.

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::ir::{Entity, Location, NodeKey, Span};

/// The text spans recorded for the nodes of one rendered tree.
///
/// Keys are node addresses, so the table borrows the tree (`'t`) to keep it alive and unmoved
/// for as long as lookups are possible.
#[derive(Debug, Clone)]
pub struct SpanTable<'t> {
    spans: HashMap<NodeKey, Span>,
    _tree: PhantomData<&'t ()>,
}

impl<'t> SpanTable<'t> {
    pub(crate) fn new(spans: HashMap<NodeKey, Span>) -> Self {
        Self {
            spans,
            _tree: PhantomData,
        }
    }

    /// The span `node` produced, if it was rendered (and not as a synthetic node).
    pub fn get<T: Entity>(&self, node: &T) -> Option<Span> {
        self.spans.get(&node.key()).copied()
    }

    pub fn start_of<T: Entity>(&self, node: &T) -> Option<Location> {
        self.get(node).map(|span| span.start)
    }

    pub fn end_of<T: Entity>(&self, node: &T) -> Option<Location> {
        self.get(node).map(|span| span.end)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
