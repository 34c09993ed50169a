use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonAncestor {
    pub id: String,
    /// Generations from the first person up to the ancestor.
    pub steps_a: u32,
    /// Generations from the second person up to the ancestor.
    pub steps_b: u32,
}

/// Every ancestor of `id` (including `id` itself at distance 0) with its
/// upward distance, in breadth-first discovery order.
pub(super) fn ancestor_distances<'a>(graph: &FamilyGraph<'a>, id: &'a str) -> Vec<(&'a str, u32)> {
    let mut order = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(id);
    queue.push_back((id, 0u32));
    while let Some((current, dist)) = queue.pop_front() {
        order.push((current, dist));
        for &parent in graph.parents_of(current) {
            if seen.insert(parent) {
                queue.push_back((parent, dist + 1));
            }
        }
    }
    order
}

/// Nearest ancestor shared by both persons, minimising `steps_a + steps_b`.
///
/// Ties keep the first candidate in the first person's breadth-first order.
/// A person counts as their own ancestor at distance 0, so a direct line
/// yields one side with zero steps.
pub fn find_common_ancestor(graph: &FamilyGraph<'_>, a: &str, b: &str) -> Option<CommonAncestor> {
    let a = graph.person(a)?.id.as_str();
    let b = graph.person(b)?.id.as_str();
    let theirs: HashMap<&str, u32> = ancestor_distances(graph, b).into_iter().collect();

    let mut best: Option<CommonAncestor> = None;
    for (id, steps_a) in ancestor_distances(graph, a) {
        let Some(&steps_b) = theirs.get(id) else {
            continue;
        };
        let better = best
            .as_ref()
            .is_none_or(|current| steps_a + steps_b < current.steps_a + current.steps_b);
        if better {
            best = Some(CommonAncestor {
                id: id.to_string(),
                steps_a,
                steps_b,
            });
        }
    }
    best
}
