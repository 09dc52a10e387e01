//! Loading the document collection from JSON.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::domain::Document;

/// Errors that can occur while loading the document collection.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file is missing or could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// The path that was opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The content is not a JSON array of documents.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// The path that was parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Loads every document from a JSON file containing an array of document
/// records.
///
/// # Errors
///
/// Returns [`LoadError::Read`] if the file cannot be opened or read, and
/// [`LoadError::Parse`] if the content is not a valid document array.
#[instrument(level = "debug")]
pub fn load_documents(path: &Path) -> Result<Vec<Document>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let documents = read_documents(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            LoadError::Read {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            LoadError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    tracing::debug!("loaded {} documents from {}", documents.len(), path.display());
    Ok(documents)
}

/// Reads a JSON array of document records.
///
/// # Errors
///
/// Returns an error if the reader fails or the content is not a valid document
/// array.
pub fn read_documents<R: Read>(reader: R) -> Result<Vec<Document>, serde_json::Error> {
    serde_json::from_reader(reader)
}
