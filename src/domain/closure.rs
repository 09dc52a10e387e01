//! Transitive reference closures over an [`Index`].
//!
//! Both directions walk the [`ReferenceGraph`] with an explicit stack and a
//! visited set, so cyclic and deeply chained corpora terminate without
//! recursion.

use std::collections::BTreeSet;

use petgraph::Direction;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{DisplayRecord, Document, Index, ReferenceKind, index::ReferenceGraph};

/// Errors raised while computing or resolving a closure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClosureError {
    /// The id is not present in the index.
    #[error("document {0} not found")]
    NotFound(String),
}

/// Restricts which documents a [`dependents`] walk reports and passes through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependentFilter {
    /// Only admit documents published by this group.
    pub group: Option<String>,
    /// Exclude superseded documents.
    pub skip_superseded: bool,
}

impl DependentFilter {
    /// Whether the document passes the filter.
    #[must_use]
    pub fn admits(&self, document: &Document) -> bool {
        if self.skip_superseded && document.status.superseded {
            return false;
        }
        self.group
            .as_deref()
            .is_none_or(|group| document.group.as_deref() == Some(group))
    }
}

/// Every id reachable from `root` through one or more references of `kind`.
///
/// The root is only part of the result if a reference cycle leads back to it.
/// Referenced ids that are not in the corpus are included as leaves; resolving
/// them with [`annotate`] fails.
///
/// # Errors
///
/// Returns [`ClosureError::NotFound`] if `root` is not in the index.
#[instrument(level = "debug", skip(index))]
pub fn dependencies<'a>(
    index: &'a Index,
    root: &str,
    kind: ReferenceKind,
) -> Result<BTreeSet<&'a str>, ClosureError> {
    let root = corpus_id(index, root)?;
    let graph = index.graph(kind);

    let found = walk(&graph, root, Direction::Outgoing, |_| true);

    if found.contains(&root) {
        tracing::warn!("{root} depends on itself through a {kind} reference cycle");
    }
    tracing::debug!("{} dependencies found", found.len());

    Ok(found)
}

/// Every document that reaches `target` through one or more references of
/// `kind`.
///
/// Documents rejected by `filter` are neither reported nor walked through.
///
/// # Errors
///
/// Returns [`ClosureError::NotFound`] if `target` is not in the index.
#[instrument(level = "debug", skip(index))]
pub fn dependents<'a>(
    index: &'a Index,
    target: &str,
    kind: ReferenceKind,
    filter: &DependentFilter,
) -> Result<BTreeSet<&'a str>, ClosureError> {
    let target = corpus_id(index, target)?;
    let graph = index.graph(kind);

    let found = walk(&graph, target, Direction::Incoming, |id| {
        index.get(id).is_some_and(|document| filter.admits(document))
    });

    tracing::debug!("{} dependents found", found.len());
    Ok(found)
}

/// Resolves ids to display records, sorted ascending by id.
///
/// # Errors
///
/// Returns [`ClosureError::NotFound`] for the first id (in sorted order) that
/// is not in the index. No records are returned in that case.
pub fn annotate<'a, I, S>(index: &'a Index, ids: I) -> Result<Vec<DisplayRecord<'a>>, ClosureError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ids: Vec<S> = ids.into_iter().collect();
    ids.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
    ids.dedup_by(|a, b| a.as_ref() == b.as_ref());

    ids.iter()
        .map(|id| {
            let id = id.as_ref();
            index
                .get(id)
                .map(DisplayRecord::from)
                .ok_or_else(|| ClosureError::NotFound(id.to_string()))
        })
        .collect()
}

/// The index's own copy of an id, which must belong to the corpus.
fn corpus_id<'a>(index: &'a Index, id: &str) -> Result<&'a str, ClosureError> {
    index
        .get(id)
        .map(|document| document.doc_id.as_str())
        .ok_or_else(|| ClosureError::NotFound(id.to_string()))
}

fn walk<'a, F>(
    graph: &ReferenceGraph<'a>,
    start: &'a str,
    direction: Direction,
    mut admit: F,
) -> BTreeSet<&'a str>
where
    F: FnMut(&'a str) -> bool,
{
    let mut found = BTreeSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        for next in graph.neighbors_directed(current, direction) {
            if found.contains(&next) || !admit(next) {
                continue;
            }
            found.insert(next);
            stack.push(next);
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{Qualifier, References, Status};

    fn doc(id: &str, normative: &[&str], bibliographic: &[&str]) -> Document {
        let list = |ids: &[&str]| -> Option<Vec<String>> {
            Some(ids.iter().map(ToString::to_string).collect())
        };
        Document {
            doc_id: id.to_string(),
            doc_label: format!("Label {id}"),
            doc_title: format!("Title {id}"),
            status: Status::default(),
            references: Some(References {
                normative: list(normative),
                bibliographic: list(bibliographic),
            }),
            group: None,
        }
    }

    fn bare(id: &str) -> Document {
        Document {
            references: None,
            ..doc(id, &[], &[])
        }
    }

    fn index(documents: impl IntoIterator<Item = Document>) -> Index {
        Index::build(documents).unwrap()
    }

    fn ids<'a>(set: &BTreeSet<&'a str>) -> Vec<&'a str> {
        set.iter().copied().collect()
    }

    #[test]
    fn acyclic_closure_excludes_root() {
        let index = index([doc("A", &["B", "C"], &[]), doc("B", &["C"], &[]), doc("C", &[], &[])]);

        let deps = dependencies(&index, "A", ReferenceKind::Normative).unwrap();

        assert_eq!(ids(&deps), ["B", "C"]);
    }

    #[test]
    fn cycle_terminates_and_includes_root() {
        let index = index([doc("A", &["B"], &[]), doc("B", &["A"], &[])]);

        let deps = dependencies(&index, "A", ReferenceKind::Normative).unwrap();

        assert_eq!(ids(&deps), ["A", "B"]);
    }

    #[test]
    fn self_reference_is_kept() {
        let index = index([doc("A", &["A"], &[])]);

        let deps = dependencies(&index, "A", ReferenceKind::Normative).unwrap();

        assert_eq!(ids(&deps), ["A"]);
    }

    #[test]
    fn longer_cycle_lists_each_node_once() {
        let index = index([
            doc("A", &["B"], &[]),
            doc("B", &["C"], &[]),
            doc("C", &["D", "B"], &[]),
            doc("D", &["B"], &[]),
        ]);

        let deps = dependencies(&index, "A", ReferenceKind::Normative).unwrap();

        assert_eq!(ids(&deps), ["B", "C", "D"]);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let n = 50_000;
        let documents = (0..n).map(|i| {
            let next = format!("D{:06}", i + 1);
            if i + 1 < n {
                doc(&format!("D{i:06}"), &[next.as_str()], &[])
            } else {
                doc(&format!("D{i:06}"), &[], &[])
            }
        });
        let index = index(documents);

        let deps = dependencies(&index, "D000000", ReferenceKind::Normative).unwrap();

        assert_eq!(deps.len(), n - 1);
    }

    #[test_case(ReferenceKind::Normative, &["B"]; "normative")]
    #[test_case(ReferenceKind::Bibliographic, &["C", "D"]; "bibliographic")]
    fn kind_selects_reference_list(kind: ReferenceKind, expected: &[&str]) {
        let index = index([
            doc("A", &["B"], &["C"]),
            doc("B", &[], &[]),
            doc("C", &[], &["D"]),
            doc("D", &[], &[]),
        ]);

        let deps = dependencies(&index, "A", kind).unwrap();

        assert_eq!(ids(&deps), expected);
    }

    #[test]
    fn document_without_references_has_empty_closure() {
        let index = index([bare("A")]);

        for kind in ReferenceKind::ALL {
            assert!(dependencies(&index, "A", kind).unwrap().is_empty());
        }
    }

    #[test]
    fn missing_root_is_not_found() {
        let index = index([bare("A")]);

        let result = dependencies(&index, "Z", ReferenceKind::Normative);

        assert_eq!(result, Err(ClosureError::NotFound("Z".to_string())));
    }

    #[test]
    fn out_of_corpus_reference_is_reported_by_annotate() {
        let index = index([doc("A", &["B", "EXT"], &[]), doc("B", &[], &[])]);

        let deps = dependencies(&index, "A", ReferenceKind::Normative).unwrap();
        assert_eq!(ids(&deps), ["B", "EXT"]);

        let result = annotate(&index, deps);
        assert_eq!(result, Err(ClosureError::NotFound("EXT".to_string())));
    }

    #[test]
    fn annotate_sorts_and_qualifies() {
        let mut superseded = bare("C");
        superseded.status = Status {
            superseded: true,
            withdrawn: true,
        };
        let mut withdrawn = bare("A");
        withdrawn.status.withdrawn = true;
        let index = index([superseded, withdrawn, bare("B")]);

        let records = annotate(&index, ["C", "A", "B", "A"]).unwrap();

        let lines: Vec<_> = records.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "A (Label A, Title A) [W]",
                "B (Label B, Title B)",
                "C (Label C, Title C) [S]",
            ]
        );
        assert_eq!(records[2].qualifier, Some(Qualifier::Superseded));
    }

    #[test]
    fn annotate_is_idempotent() {
        let index = index([bare("A"), bare("B")]);

        let first = annotate(&index, ["B", "A"]).unwrap();
        let second = annotate(&index, ["A", "B"]).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn dependents_follow_incoming_references() {
        let index = index([
            doc("A", &["B"], &[]),
            doc("B", &["C"], &[]),
            doc("C", &[], &[]),
            doc("D", &["C"], &[]),
            doc("E", &[], &["C"]),
        ]);

        let found =
            dependents(&index, "C", ReferenceKind::Normative, &DependentFilter::default()).unwrap();

        assert_eq!(ids(&found), ["A", "B", "D"]);
    }

    #[test]
    fn dependents_skip_superseded_documents_and_their_dependents() {
        let mut b = doc("B", &["C"], &[]);
        b.status.superseded = true;
        let index = index([doc("A", &["B"], &[]), b, doc("C", &[], &[]), doc("D", &["C"], &[])]);
        let filter = DependentFilter {
            skip_superseded: true,
            ..DependentFilter::default()
        };

        let found = dependents(&index, "C", ReferenceKind::Normative, &filter).unwrap();

        assert_eq!(ids(&found), ["D"]);
    }

    #[test]
    fn dependents_restricted_to_group() {
        let mut a = doc("A", &["C"], &[]);
        a.group = Some("27C".to_string());
        let mut b = doc("B", &["C"], &[]);
        b.group = Some("35PM".to_string());
        let index = index([a, b, doc("C", &[], &[])]);
        let filter = DependentFilter {
            group: Some("27C".to_string()),
            ..DependentFilter::default()
        };

        let found = dependents(&index, "C", ReferenceKind::Normative, &filter).unwrap();

        assert_eq!(ids(&found), ["A"]);
    }

    #[test]
    fn dependents_of_missing_target_is_not_found() {
        let index = index([bare("A")]);

        let result = dependents(&index, "Z", ReferenceKind::Normative, &DependentFilter::default());

        assert_eq!(result, Err(ClosureError::NotFound("Z".to_string())));
    }
}
