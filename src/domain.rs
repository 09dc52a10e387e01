//! Domain models for document dependency analysis.
//!
//! This module contains the document types, the identifier-keyed index and
//! the closure computations over it.

/// Transitive dependency and dependent closures.
pub mod closure;
pub use closure::{ClosureError, DependentFilter, annotate, dependencies, dependents};

mod config;
pub use config::Config;

/// Document records and display types.
pub mod document;
pub use document::{DisplayRecord, Document, Qualifier, ReferenceKind, References, Status};

/// The identifier-keyed document index.
pub mod index;
pub use index::{Index, IndexError, ReferenceGraph};
