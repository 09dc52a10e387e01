//! Reference dependencies for a corpus of documents.
//!
//! Documents declare normative and bibliographic references to each other by
//! identifier. This crate indexes a corpus and computes, for one document, the
//! transitive closure of the documents it depends on (or that depend on it).

pub mod domain;
pub use domain::{
    ClosureError, Config, DependentFilter, DisplayRecord, Document, Index, IndexError, Qualifier,
    ReferenceKind,
};

/// Loading the document collection from disk.
pub mod storage;
pub use storage::{LoadError, load_documents};
