//! Documents as they are declared in the corpus.
//!
//! Only the fields the dependency tools read are modelled. Everything else in
//! a document record is ignored on deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single entry in the document corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier of the document.
    pub doc_id: String,

    /// Short human-readable label, e.g. `ST 2067-2`.
    #[serde(default)]
    pub doc_label: String,

    /// Human-readable title.
    #[serde(default)]
    pub doc_title: String,

    /// Publication status flags.
    #[serde(default)]
    pub status: Status,

    /// Outgoing references, if the document declares any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<References>,

    /// The group (committee) that publishes the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Document {
    /// The ids this document references through references of the given
    /// kind.
    ///
    /// A document with no `references` block, or with no list for `kind`, has
    /// no outgoing references.
    #[must_use]
    pub fn references(&self, kind: ReferenceKind) -> &[String] {
        self.references
            .as_ref()
            .and_then(|refs| match kind {
                ReferenceKind::Normative => refs.normative.as_deref(),
                ReferenceKind::Bibliographic => refs.bibliographic.as_deref(),
            })
            .unwrap_or_default()
    }

    /// The display qualifier derived from the status flags.
    ///
    /// Supersession takes precedence over withdrawal.
    #[must_use]
    pub const fn qualifier(&self) -> Option<Qualifier> {
        if self.status.superseded {
            Some(Qualifier::Superseded)
        } else if self.status.withdrawn {
            Some(Qualifier::Withdrawn)
        } else {
            None
        }
    }
}

/// Status flags of a document. Absent flags are `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// The document has been replaced by a newer one.
    #[serde(default)]
    pub superseded: bool,

    /// The document has been retracted.
    #[serde(default)]
    pub withdrawn: bool,
}

/// The reference lists of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    /// Normative references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normative: Option<Vec<String>>,

    /// Bibliographic (informative) references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bibliographic: Option<Vec<String>>,
}

/// Selects which reference list is followed during a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Follow `references.normative`.
    #[default]
    Normative,
    /// Follow `references.bibliographic`.
    Bibliographic,
}

impl ReferenceKind {
    /// Both kinds, normative first.
    pub const ALL: [Self; 2] = [Self::Normative, Self::Bibliographic];
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normative => f.write_str("normative"),
            Self::Bibliographic => f.write_str("bibliographic"),
        }
    }
}

/// Status annotation shown next to a document in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Qualifier {
    /// `[S]`
    #[serde(rename = "S")]
    Superseded,
    /// `[W]`
    #[serde(rename = "W")]
    Withdrawn,
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Superseded => f.write_str("[S]"),
            Self::Withdrawn => f.write_str("[W]"),
        }
    }
}

/// A borrowed, resolved view of a document ready for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord<'a> {
    /// The document's identifier.
    pub doc_id: &'a str,
    /// The document's label.
    pub doc_label: &'a str,
    /// The document's title.
    pub doc_title: &'a str,
    /// Superseded/withdrawn annotation, if any.
    pub qualifier: Option<Qualifier>,
}

impl<'a> From<&'a Document> for DisplayRecord<'a> {
    fn from(document: &'a Document) -> Self {
        Self {
            doc_id: &document.doc_id,
            doc_label: &document.doc_label,
            doc_title: &document.doc_title,
            qualifier: document.qualifier(),
        }
    }
}

impl fmt::Display for DisplayRecord<'_> {
    /// `<docId> (<docLabel>, <docTitle>) <qualifier>`, without a trailing space
    /// when there is no qualifier.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.doc_id, self.doc_label, self.doc_title)?;
        if let Some(qualifier) = self.qualifier {
            write!(f, " {qualifier}")?;
        }
        Ok(())
    }
}
