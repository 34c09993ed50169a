use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{Gender, Person, Relationship, RelationshipKind, UNKNOWN_BIRTH_KEY};

/// How a neighbour relates to the person we are looking from.
///
/// `Parent` means "the neighbour is my parent", so walking a `Parent` edge
/// moves one generation up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Parent,
    Child,
    Spouse,
    Sibling,
}

impl EdgeKind {
    pub fn is_blood(self) -> bool {
        !matches!(self, EdgeKind::Spouse)
    }
}

/// Undirected adjacency over a snapshot of persons and relationships.
///
/// Adjacency lists keep relationship input order; path search and generation
/// assignment depend on it for their tie-breaking. Edges naming an unknown
/// person, self loops and exact duplicates are skipped.
#[derive(Debug, Default)]
pub struct FamilyGraph<'a> {
    persons: HashMap<&'a str, &'a Person>,
    order: Vec<&'a str>,
    parents: HashMap<&'a str, Vec<&'a str>>,
    children: HashMap<&'a str, Vec<&'a str>>,
    spouses: HashMap<&'a str, Vec<&'a str>>,
    siblings: HashMap<&'a str, Vec<&'a str>>,
    spouse_pairs: Vec<(&'a str, &'a str)>,
    sibling_pairs: Vec<(&'a str, &'a str, &'a Relationship)>,
    parent_rels: Vec<&'a Relationship>,
}

impl<'a> FamilyGraph<'a> {
    pub fn build(members: &'a [Person], relationships: &'a [Relationship]) -> Self {
        let mut graph = FamilyGraph::default();
        for person in members {
            if graph.persons.insert(person.id.as_str(), person).is_none() {
                graph.order.push(person.id.as_str());
            }
        }

        for rel in relationships {
            let (from, to) = (rel.from_id.as_str(), rel.to_id.as_str());
            if from == to || !graph.contains(from) || !graph.contains(to) {
                tracing::trace!(from, to, "skipping relationship");
                continue;
            }
            match rel.kind {
                RelationshipKind::ParentChild => {
                    if push_unique(graph.children.entry(from).or_default(), to) {
                        push_unique(graph.parents.entry(to).or_default(), from);
                        graph.parent_rels.push(rel);
                    }
                }
                RelationshipKind::Spouse => {
                    if push_unique(graph.spouses.entry(from).or_default(), to) {
                        push_unique(graph.spouses.entry(to).or_default(), from);
                        graph.spouse_pairs.push((from, to));
                    }
                }
                RelationshipKind::Sibling => {
                    if push_unique(graph.siblings.entry(from).or_default(), to) {
                        push_unique(graph.siblings.entry(to).or_default(), from);
                        graph.sibling_pairs.push((from, to, rel));
                    }
                }
            }
        }
        graph
    }

    pub fn contains(&self, id: &str) -> bool {
        self.persons.contains_key(id)
    }

    pub fn person(&self, id: &str) -> Option<&'a Person> {
        self.persons.get(id).copied()
    }

    /// Person ids in input order.
    pub fn ids(&self) -> &[&'a str] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn parents_of(&self, id: &str) -> &[&'a str] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn children_of(&self, id: &str) -> &[&'a str] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn spouses_of(&self, id: &str) -> &[&'a str] {
        self.spouses.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn siblings_of(&self, id: &str) -> &[&'a str] {
        self.siblings.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_parents(&self, id: &str) -> bool {
        !self.parents_of(id).is_empty()
    }

    /// Neighbours in traversal order: parents, children, spouses, siblings.
    pub fn links(&self, id: &str) -> impl Iterator<Item = (EdgeKind, &'a str)> + '_ {
        let parents = self.parents_of(id).iter().map(|n| (EdgeKind::Parent, *n));
        let children = self.children_of(id).iter().map(|n| (EdgeKind::Child, *n));
        let spouses = self.spouses_of(id).iter().map(|n| (EdgeKind::Spouse, *n));
        let siblings = self.siblings_of(id).iter().map(|n| (EdgeKind::Sibling, *n));
        parents.chain(children).chain(spouses).chain(siblings)
    }

    pub fn degree(&self, id: &str) -> usize {
        self.parents_of(id).len()
            + self.children_of(id).len()
            + self.spouses_of(id).len()
            + self.siblings_of(id).len()
    }

    /// Spouse pairs as stored (`from`, `to`), one entry per unordered pair.
    pub fn spouse_pairs(&self) -> &[(&'a str, &'a str)] {
        &self.spouse_pairs
    }

    pub fn parent_relationships(&self) -> &[&'a Relationship] {
        &self.parent_rels
    }

    pub fn sibling_pairs(&self) -> &[(&'a str, &'a str, &'a Relationship)] {
        &self.sibling_pairs
    }

    pub fn share_parent(&self, a: &str, b: &str) -> bool {
        let theirs = self.parents_of(b);
        self.parents_of(a).iter().any(|p| theirs.contains(p))
    }

    pub fn gender(&self, id: &str) -> Gender {
        self.person(id).map(|p| p.gender).unwrap_or_default()
    }

    pub fn birth_year(&self, id: &str) -> Option<i32> {
        self.person(id).and_then(Person::birth_year)
    }

    pub fn birth_sort_key(&self, id: &str) -> &'a str {
        self.person(id).map(Person::birth_sort_key).unwrap_or(UNKNOWN_BIRTH_KEY)
    }

    /// Number of distinct descendants reachable through child edges.
    pub fn descendant_count(&self, id: &str) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = self.children_of(id).to_vec();
        while let Some(next) = stack.pop() {
            if next == id || !seen.insert(next) {
                continue;
            }
            stack.extend(self.children_of(next).iter().copied());
        }
        seen.len()
    }
}

fn push_unique<'a>(list: &mut Vec<&'a str>, id: &'a str) -> bool {
    if list.contains(&id) {
        false
    } else {
        list.push(id);
        true
    }
}
