//! In-memory index of the document corpus.
//!
//! The [`Index`] is built once from the loaded documents and is read-only
//! afterwards. Reference graphs are derived from it on demand, one per
//! [`ReferenceKind`].

use std::collections::{BTreeMap, btree_map::Entry};

use petgraph::graphmap::DiGraphMap;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{Document, ReferenceKind};

/// Directed reference graph. Edges point from the referencing document to the
/// referenced one.
///
/// Nodes borrow their ids from the [`Index`]. Ids that are referenced but not
/// present in the corpus are nodes without outgoing edges.
pub type ReferenceGraph<'a> = DiGraphMap<&'a str, ()>;

/// Documents keyed by `docId`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    documents: BTreeMap<String, Document>,
}

/// Errors that can occur when building an [`Index`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// Two documents in the collection share the same identifier.
    #[error("document id {0} is duplicated")]
    Duplicate(String),
}

impl Index {
    /// Builds the index from a collection of documents.
    ///
    /// The order of the input is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Duplicate`] on the first `docId` that occurs more
    /// than once.
    #[instrument(level = "debug", skip(documents))]
    pub fn build<I>(documents: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut index = BTreeMap::new();

        for document in documents {
            match index.entry(document.doc_id.clone()) {
                Entry::Occupied(entry) => return Err(IndexError::Duplicate(entry.key().clone())),
                Entry::Vacant(entry) => {
                    entry.insert(document);
                }
            }
        }

        tracing::debug!("indexed {} documents", index.len());
        Ok(Self { documents: index })
    }

    /// Looks up a document by id.
    #[must_use]
    pub fn get(&self, doc_id: &str) -> Option<&Document> {
        self.documents.get(doc_id)
    }

    /// Whether a document with this id is present.
    #[must_use]
    pub fn contains(&self, doc_id: &str) -> bool {
        self.documents.contains_key(doc_id)
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterates documents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> + '_ {
        self.documents.values()
    }

    /// Builds the reference graph for one reference kind.
    #[must_use]
    pub fn graph(&self, kind: ReferenceKind) -> ReferenceGraph<'_> {
        let mut graph = ReferenceGraph::with_capacity(self.len(), self.len() * 2);

        for (doc_id, document) in &self.documents {
            graph.add_node(doc_id.as_str());
            for reference in document.references(kind) {
                // add_edge creates the target node when it is outside the corpus
                graph.add_edge(doc_id.as_str(), reference.as_str(), ());
            }
        }

        graph
    }
}
