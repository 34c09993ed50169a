mod ancestor;
mod dna;
mod path;
pub(crate) mod terms;

pub use ancestor::*;
pub use dna::estimate_shared_dna;
pub use path::*;

use crate::graph::{EdgeKind, FamilyGraph};
use crate::model::Gender;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Everything the detail view shows about how `to` relates to `from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDescription {
    pub term: String,
    pub degree: Option<u32>,
    #[serde(rename = "sharedDNA")]
    pub shared_dna: Option<f64>,
    pub path: Option<Vec<PathStep>>,
    pub path_length: Option<usize>,
    pub common_ancestor_id: Option<String>,
}

impl RelationshipDescription {
    fn unrelated() -> Self {
        Self {
            term: terms::NO_CONNECTION.to_string(),
            degree: None,
            shared_dna: None,
            path: None,
            path_length: None,
            common_ancestor_id: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.path.is_some()
    }

    pub fn by_marriage(&self) -> bool {
        self.term.ends_with(terms::BY_MARRIAGE)
    }
}

/// German kinship term, degree, DNA estimate and path from `from` to `to`.
///
/// The term describes `to` as seen from `from` and is gendered by `to`.
pub fn describe_relationship(graph: &FamilyGraph<'_>, from: &str, to: &str) -> RelationshipDescription {
    if from == to {
        return RelationshipDescription {
            term: terms::SELF_TERM.to_string(),
            degree: Some(0),
            shared_dna: Some(100.0),
            path: Some(vec![PathStep {
                id: from.to_string(),
                edge: None,
            }]),
            path_length: Some(0),
            common_ancestor_id: Some(from.to_string()),
        };
    }
    let Some(path) = find_path(graph, from, to) else {
        return RelationshipDescription::unrelated();
    };

    let kinds = path::edge_kinds(&path);
    let common = find_common_ancestor(graph, from, to);
    let gender = graph.gender(to);
    let (term, degree) = classify(graph, &path, &kinds, common.as_ref(), gender);
    let shared_dna = estimate_shared_dna(&path, common.as_ref());
    tracing::trace!(from, to, %term, hops = kinds.len(), "kinship resolved");

    RelationshipDescription {
        term,
        degree,
        shared_dna: Some(shared_dna),
        path_length: Some(kinds.len()),
        path: Some(path),
        common_ancestor_id: common.map(|c| c.id),
    }
}

fn classify(
    graph: &FamilyGraph<'_>,
    path: &[PathStep],
    kinds: &[EdgeKind],
    common: Option<&CommonAncestor>,
    gender: Gender,
) -> (String, Option<u32>) {
    use EdgeKind::*;

    match kinds {
        [Spouse] => return (terms::spouse(gender), Some(0)),
        [Spouse, Sibling] | [Sibling, Spouse] => return (terms::sibling_in_law(gender), Some(1)),
        [Spouse, Parent] => return (terms::parent_in_law(gender), Some(1)),
        [Parent, Spouse] => return (terms::step_parent(gender), Some(1)),
        [Child, Spouse] => return (terms::child_in_law(gender), Some(1)),
        [Spouse, Child] => return (terms::step_child(gender), Some(1)),
        [Sibling] => return (terms::sibling(gender), Some(1)),
        _ => {}
    }

    let married = kinds.contains(&Spouse);
    if let Some(common) = common {
        let (mut term, degree) = terms::blood_term(common.steps_a, common.steps_b, gender);
        if married {
            term.push_str(terms::BY_MARRIAGE);
        }
        return (term, Some(degree));
    }

    if married {
        return marriage_line(graph, path, kinds, gender).unwrap_or_else(|| {
            let mut term = terms::distant(kinds.len());
            term.push_str(terms::BY_MARRIAGE);
            (term, None)
        });
    }
    if let Some((a, b)) = dna::virtual_steps(kinds) {
        let (term, degree) = terms::blood_term(a, b, gender);
        return (term, Some(degree));
    }
    (terms::distant(kinds.len()), None)
}

/// A path with exactly one spouse hop at either end: describe the blood
/// relation along the partner's line, then mark it as by marriage.
fn marriage_line(
    graph: &FamilyGraph<'_>,
    path: &[PathStep],
    kinds: &[EdgeKind],
    gender: Gender,
) -> Option<(String, Option<u32>)> {
    if kinds.iter().filter(|k| **k == EdgeKind::Spouse).count() != 1 || kinds.len() < 2 {
        return None;
    }
    let last = path.len() - 1;
    let (a, b, blood) = if kinds[0] == EdgeKind::Spouse {
        (&path[1].id, &path[last].id, &kinds[1..])
    } else if kinds[kinds.len() - 1] == EdgeKind::Spouse {
        (&path[0].id, &path[last - 1].id, &kinds[..kinds.len() - 1])
    } else {
        return None;
    };

    let (steps_a, steps_b) = match find_common_ancestor(graph, a, b) {
        Some(common) => (common.steps_a, common.steps_b),
        None => dna::virtual_steps(blood)?,
    };
    let (mut term, degree) = terms::blood_term(steps_a, steps_b, gender);
    term.push_str(terms::BY_MARRIAGE);
    Some((term, Some(degree)))
}
