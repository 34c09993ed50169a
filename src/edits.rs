//! Planning helpers for relationship edits.
//!
//! The layout and kinship code take a snapshot as given. These functions let
//! an editor work out, before writing, which stored edges a new relation
//! replaces and which further edges it logically implies.

use serde::{Deserialize, Serialize};

use crate::graph::EdgeKind;
use crate::model::{Relationship, RelationshipKind};

/// What the target becomes for the member being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationIntent {
    Parent,
    Child,
    Spouse,
    Sibling,
}

impl RelationIntent {
    /// The edge to store for "`target` is my <intent>".
    pub fn relationship(self, member: &str, target: &str) -> Relationship {
        match self {
            RelationIntent::Parent => Relationship::parent_child(target, member),
            RelationIntent::Child => Relationship::parent_child(member, target),
            RelationIntent::Spouse => Relationship::spouse(member, target),
            RelationIntent::Sibling => Relationship::sibling(member, target),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RelationIntent::Parent => "Elternteil",
            RelationIntent::Child => "Kind",
            RelationIntent::Spouse => "Partner",
            RelationIntent::Sibling => "Geschwister",
        }
    }
}

impl From<EdgeKind> for RelationIntent {
    fn from(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Parent => RelationIntent::Parent,
            EdgeKind::Child => RelationIntent::Child,
            EdgeKind::Spouse => RelationIntent::Spouse,
            EdgeKind::Sibling => RelationIntent::Sibling,
        }
    }
}

/// Stored edges between `member` and `target` that a new `intent` edge
/// replaces.
///
/// Two people can hold only one of parent, child, spouse or sibling towards
/// each other, so every existing edge between them either repeats the new
/// relation or contradicts it.
pub fn conflicting_relationships<'r>(
    existing: &'r [Relationship],
    member: &str,
    target: &str,
    intent: RelationIntent,
) -> Vec<&'r Relationship> {
    existing
        .iter()
        .filter(|rel| rel.involves(member, target))
        .inspect(|rel| {
            let current = rel.view_from(member).map(|(kind, _)| RelationIntent::from(kind));
            tracing::debug!(member, target, ?current, ?intent, "replacing relationship");
        })
        .collect()
}

fn same_edge(a: &Relationship, b: &Relationship) -> bool {
    if a.kind != b.kind {
        return false;
    }
    match a.kind {
        RelationshipKind::ParentChild => a.from_id == b.from_id && a.to_id == b.to_id,
        _ => a.involves(&b.from_id, &b.to_id),
    }
}

fn parents_of<'r>(rels: &'r [Relationship], id: &str) -> impl Iterator<Item = &'r str> {
    let id = id.to_string();
    rels.iter()
        .filter(move |r| r.kind == RelationshipKind::ParentChild && r.to_id == id)
        .map(|r| r.from_id.as_str())
}

fn children_of<'r>(rels: &'r [Relationship], id: &str) -> impl Iterator<Item = &'r str> {
    let id = id.to_string();
    rels.iter()
        .filter(move |r| r.kind == RelationshipKind::ParentChild && r.from_id == id)
        .map(|r| r.to_id.as_str())
}

fn siblings_of<'r>(rels: &'r [Relationship], id: &str) -> impl Iterator<Item = &'r str> {
    let id = id.to_string();
    rels.iter()
        .filter(|r| r.kind == RelationshipKind::Sibling)
        .filter_map(move |r| r.view_from(&id).map(|(_, other)| other))
}

/// Edges that follow from adding `intent` between `member` and `target`
/// and are not stored yet.
///
/// - sibling: each gets the other's parents
/// - parent/child: the child becomes a sibling of the parent's other
///   children, and the parent gains the child's siblings as children
/// - spouse: each gets the other's children
pub fn implied_relationships(
    existing: &[Relationship],
    member: &str,
    target: &str,
    intent: RelationIntent,
) -> Vec<Relationship> {
    let mut implied: Vec<Relationship> = Vec::new();
    match intent {
        RelationIntent::Sibling => {
            for parent in parents_of(existing, member) {
                implied.push(Relationship::parent_child(parent, target));
            }
            for parent in parents_of(existing, target) {
                implied.push(Relationship::parent_child(parent, member));
            }
        }
        RelationIntent::Child | RelationIntent::Parent => {
            let (parent, child) = if intent == RelationIntent::Child {
                (member, target)
            } else {
                (target, member)
            };
            for other in children_of(existing, parent).filter(|c| *c != child) {
                implied.push(Relationship::sibling(child, other));
            }
            for sibling in siblings_of(existing, child) {
                implied.push(Relationship::parent_child(parent, sibling));
            }
        }
        RelationIntent::Spouse => {
            for child in children_of(existing, member) {
                implied.push(Relationship::parent_child(target, child));
            }
            for child in children_of(existing, target) {
                implied.push(Relationship::parent_child(member, child));
            }
        }
    }

    let added = intent.relationship(member, target);
    let mut out: Vec<Relationship> = Vec::new();
    for rel in implied {
        if rel.from_id == rel.to_id
            || same_edge(&rel, &added)
            || existing.iter().any(|e| same_edge(e, &rel))
            || out.iter().any(|e| same_edge(e, &rel))
        {
            continue;
        }
        out.push(rel);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intent_direction() {
        assert_eq!(
            RelationIntent::Parent.relationship("kid", "mum"),
            Relationship::parent_child("mum", "kid")
        );
        assert_eq!(
            RelationIntent::Child.relationship("mum", "kid"),
            Relationship::parent_child("mum", "kid")
        );
        assert_eq!(RelationIntent::Sibling.label(), "Geschwister");
    }

    #[test]
    fn any_existing_edge_between_pair_conflicts() {
        let existing = vec![
            Relationship::sibling("a", "b"),
            Relationship::parent_child("b", "a"),
            Relationship::spouse("a", "c"),
        ];
        let conflicts = conflicting_relationships(&existing, "a", "b", RelationIntent::Spouse);
        assert_eq!(conflicts.len(), 2);
        let conflicts = conflicting_relationships(&existing, "c", "a", RelationIntent::Spouse);
        assert_eq!(conflicts, vec![&existing[2]]);
        assert!(conflicting_relationships(&existing, "b", "c", RelationIntent::Sibling).is_empty());
    }

    #[test]
    fn new_sibling_inherits_parents() {
        let existing = vec![Relationship::parent_child("mum", "a"), Relationship::parent_child("dad", "a")];
        let implied = implied_relationships(&existing, "a", "b", RelationIntent::Sibling);
        assert_eq!(
            implied,
            vec![Relationship::parent_child("mum", "b"), Relationship::parent_child("dad", "b")]
        );
    }

    #[test]
    fn new_child_links_siblings_both_ways() {
        let existing = vec![
            Relationship::parent_child("mum", "older"),
            Relationship::sibling("new", "half"),
        ];
        let implied = implied_relationships(&existing, "mum", "new", RelationIntent::Child);
        assert_eq!(
            implied,
            vec![Relationship::sibling("new", "older"), Relationship::parent_child("mum", "half")]
        );
        let from_child_side = implied_relationships(&existing, "new", "mum", RelationIntent::Parent);
        assert_eq!(from_child_side, implied);
    }

    #[test]
    fn spouses_share_children_without_duplicates() {
        let existing = vec![
            Relationship::parent_child("a", "kid"),
            Relationship::parent_child("b", "kid"),
            Relationship::parent_child("b", "step"),
        ];
        let implied = implied_relationships(&existing, "a", "b", RelationIntent::Spouse);
        assert_eq!(implied, vec![Relationship::parent_child("a", "step")]);
    }
}
