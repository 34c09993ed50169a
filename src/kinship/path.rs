use super::*;

/// One hop of a kinship path. The first step has no edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    pub id: String,
    pub edge: Option<EdgeKind>,
}

impl PathStep {
    fn start(id: &str) -> Self {
        Self {
            id: id.to_string(),
            edge: None,
        }
    }
}

/// Shortest path by edge count between two persons.
///
/// Breadth-first over all four edge types. Neighbours are expanded in the
/// order parents, children, spouses, siblings; the first discovery wins, so
/// the result is deterministic for a given snapshot.
pub fn find_path(graph: &FamilyGraph<'_>, from: &str, to: &str) -> Option<Vec<PathStep>> {
    if from == to {
        return Some(vec![PathStep::start(from)]);
    }
    if !graph.contains(from) || !graph.contains(to) {
        return None;
    }

    let mut came_from: HashMap<&str, (&str, EdgeKind)> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for (kind, next) in graph.links(current) {
            if !visited.insert(next) {
                continue;
            }
            came_from.insert(next, (current, kind));
            if next == to {
                return Some(unwind(&came_from, from, to));
            }
            queue.push_back(next);
        }
    }
    None
}

fn unwind(came_from: &HashMap<&str, (&str, EdgeKind)>, from: &str, to: &str) -> Vec<PathStep> {
    let mut steps = Vec::new();
    let mut cursor = to;
    while cursor != from {
        let Some(&(prev, kind)) = came_from.get(cursor) else {
            break;
        };
        steps.push(PathStep {
            id: cursor.to_string(),
            edge: Some(kind),
        });
        cursor = prev;
    }
    steps.push(PathStep::start(from));
    steps.reverse();
    steps
}

pub fn path_node_ids(path: &[PathStep]) -> Vec<String> {
    path.iter().map(|step| step.id.clone()).collect()
}

/// Consecutive pairs along the path, for edge highlighting.
pub fn path_edge_pairs(path: &[PathStep]) -> Vec<(String, String)> {
    path.windows(2)
        .map(|pair| (pair[0].id.clone(), pair[1].id.clone()))
        .collect()
}

pub(super) fn edge_kinds(path: &[PathStep]) -> Vec<EdgeKind> {
    path.iter().skip(1).filter_map(|step| step.edge).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Relationship};

    fn members(ids: &[&str]) -> Vec<Person> {
        ids.iter().map(|id| Person::new(*id, *id, "")).collect()
    }

    #[test]
    fn trivial_path_to_self() {
        let people = members(&["a"]);
        let graph = FamilyGraph::build(&people, &[]);
        let path = find_path(&graph, "a", "a").unwrap();
        assert_eq!(path, vec![PathStep { id: "a".into(), edge: None }]);
    }

    #[test]
    fn sibling_edge_shortcuts_shared_parent() {
        let people = members(&["p", "a", "b"]);
        let rels = vec![
            Relationship::parent_child("p", "a"),
            Relationship::parent_child("p", "b"),
            Relationship::sibling("a", "b"),
        ];
        let graph = FamilyGraph::build(&people, &rels);
        let path = find_path(&graph, "a", "b").unwrap();
        assert_eq!(edge_kinds(&path), vec![EdgeKind::Sibling]);

        let rels = vec![
            Relationship::parent_child("p", "a"),
            Relationship::parent_child("p", "b"),
        ];
        let graph = FamilyGraph::build(&people, &rels);
        let path = find_path(&graph, "a", "b").unwrap();
        assert_eq!(path_node_ids(&path), vec!["a", "p", "b"]);
        assert_eq!(edge_kinds(&path), vec![EdgeKind::Parent, EdgeKind::Child]);
    }

    #[test]
    fn no_path_between_components() {
        let people = members(&["a", "b"]);
        let graph = FamilyGraph::build(&people, &[]);
        assert!(find_path(&graph, "a", "b").is_none());
        assert!(find_path(&graph, "a", "missing").is_none());
    }

    #[test]
    fn edge_pairs_follow_path() {
        let path = vec![
            PathStep { id: "a".into(), edge: None },
            PathStep { id: "b".into(), edge: Some(EdgeKind::Spouse) },
            PathStep { id: "c".into(), edge: Some(EdgeKind::Child) },
        ];
        assert_eq!(
            path_edge_pairs(&path),
            vec![("a".to_string(), "b".to_string()), ("b".to_string(), "c".to_string())]
        );
    }
}
