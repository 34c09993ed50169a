use super::*;
use crate::kinship::PathStep;

/// Rendered nodes and edges that trace a kinship path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub node_ids: Vec<String>,
    pub edge_ids: Vec<String>,
}

fn connects(edge: &EdgeLayout, a: &str, b: &str) -> bool {
    (edge.from == a && edge.to == b) || (edge.from == b && edge.to == a)
}

fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|x| x == id) {
        list.push(id.to_string());
    }
}

/// Maps each hop of `path` onto the layout's edges: the direct edge if one
/// exists, otherwise the two edges meeting at a shared couple midpoint.
pub fn highlight_path(layout: &FamilyLayout, path: &[PathStep]) -> Highlight {
    let mut highlight = Highlight::default();
    for step in path {
        push_unique(&mut highlight.node_ids, &step.id);
    }

    for pair in path.windows(2) {
        let (a, b) = (pair[0].id.as_str(), pair[1].id.as_str());
        if let Some(edge) = layout.edges.iter().find(|e| connects(e, a, b)) {
            push_unique(&mut highlight.edge_ids, &edge.id);
            continue;
        }
        let via = layout
            .nodes
            .values()
            .filter(|n| n.kind == NodeKind::CoupleMidpoint)
            .find_map(|mid| {
                let first = layout.edges.iter().find(|e| connects(e, a, &mid.id))?;
                let second = layout.edges.iter().find(|e| connects(e, &mid.id, b))?;
                Some((mid, first, second))
            });
        match via {
            Some((mid, first, second)) => {
                push_unique(&mut highlight.node_ids, &mid.id);
                push_unique(&mut highlight.edge_ids, &first.id);
                push_unique(&mut highlight.edge_ids, &second.id);
            }
            None => tracing::debug!(a, b, "no rendered edge for path hop"),
        }
    }
    highlight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::graph::FamilyGraph;
    use crate::kinship::find_path;
    use crate::layout::compute_layout;
    use crate::model::{Person, Relationship};

    #[test]
    fn hops_through_couple_midpoint() {
        let people: Vec<Person> = ["dad", "mum", "kid", "aunt"]
            .iter()
            .map(|id| Person::new(*id, *id, ""))
            .collect();
        let rels = vec![
            Relationship::spouse("dad", "mum"),
            Relationship::parent_child("dad", "kid"),
            Relationship::parent_child("mum", "kid"),
            Relationship::sibling("dad", "aunt"),
        ];
        let graph = FamilyGraph::build(&people, &rels);
        let layout = compute_layout(&graph, LayoutMode::Generational, &LayoutConfig::default());

        let path = find_path(&graph, "kid", "aunt").unwrap();
        let highlight = highlight_path(&layout, &path);
        assert_eq!(highlight.node_ids, vec!["kid", "dad", "aunt", "couple-dad-mum"]);
        assert_eq!(
            highlight.edge_ids,
            vec![
                "e-family-couple-dad-mum-kid",
                "e-spouse-dad-couple-dad-mum",
                "e-dad-aunt",
            ]
        );
    }

    #[test]
    fn empty_path_highlights_nothing() {
        let layout = FamilyLayout::default();
        assert_eq!(highlight_path(&layout, &[]), Highlight::default());
    }
}
