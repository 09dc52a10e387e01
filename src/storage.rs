mod loader;

pub use loader::{LoadError, load_documents, read_documents};
