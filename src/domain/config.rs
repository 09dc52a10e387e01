use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::ReferenceKind;

/// Configuration for dependency queries.
///
/// Every setting can be overridden on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Path of the JSON document collection.
    ///
    /// Relative paths are resolved against the working directory.
    documents: PathBuf,

    /// The reference kind followed when neither `--normative` nor
    /// `--bibliographic` is given.
    default_kind: ReferenceKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            documents: default_documents(),
            default_kind: ReferenceKind::Normative,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Returns the path of the document collection.
    #[must_use]
    pub fn documents(&self) -> &Path {
        &self.documents
    }

    /// Returns the default reference kind.
    #[must_use]
    pub const fn default_kind(&self) -> ReferenceKind {
        self.default_kind
    }
}

fn default_documents() -> PathBuf {
    PathBuf::from("data/documents.json")
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_documents")]
        documents: PathBuf,

        #[serde(default)]
        default_kind: ReferenceKind,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                documents,
                default_kind,
            } => Self {
                documents,
                default_kind,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            documents: config.documents,
            default_kind: config.default_kind,
        }
    }
}
