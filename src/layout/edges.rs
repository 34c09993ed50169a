use super::*;

fn straight(from: Point, to: Point) -> Vec<(f32, f32)> {
    vec![(from.x, from.y), (to.x, to.y)]
}

/// Down from the parent side, across at the turn line, down to the child.
fn taxi(from: Point, to: Point, turn: f32) -> Vec<(f32, f32)> {
    let turn_y = from.y + turn;
    vec![(from.x, from.y), (from.x, turn_y), (to.x, turn_y), (to.x, to.y)]
}

/// Builds the rendered edge list.
///
/// Spouse edges are split in two halves through the couple midpoint.
/// Parent/child edges start at the midpoint of the couple whose children
/// include the child, else at the parent's first couple, else at the parent
/// itself; one edge per (couple, child). Sibling edges are only drawn when
/// the two share no parent, since the family edges already connect them.
pub(super) fn build_edges(
    graph: &FamilyGraph<'_>,
    plan: &UnitPlan<'_>,
    positions: &HashMap<String, Point>,
    config: &LayoutConfig,
) -> Vec<EdgeLayout> {
    let at = |id: &str| positions.get(id).copied().unwrap_or(Point { x: 0.0, y: 0.0 });
    let mut edges = Vec::new();

    for couple in &plan.couples {
        let (from, to) = couple.stored;
        edges.push(EdgeLayout {
            id: format!("e-spouse-{from}-{}", couple.id),
            from: from.to_string(),
            to: couple.id.clone(),
            kind: LayoutEdgeKind::Spouse,
            points: straight(at(from), at(&couple.id)),
        });
        edges.push(EdgeLayout {
            id: format!("e-spouse-{}-{to}", couple.id),
            from: couple.id.clone(),
            to: to.to_string(),
            kind: LayoutEdgeKind::Spouse,
            points: straight(at(&couple.id), at(to)),
        });
    }

    let mut family_edges: HashSet<String> = HashSet::new();
    for rel in graph.parent_relationships() {
        let (parent, child) = (rel.from_id.as_str(), rel.to_id.as_str());
        let couples = plan.couples_of.get(parent).map(Vec::as_slice).unwrap_or(&[]);
        let couple = couples
            .iter()
            .find(|&&c| plan.couples[c].children.iter().any(|k| *k == child))
            .or_else(|| couples.first())
            .map(|&c| &plan.couples[c]);

        match couple {
            Some(couple) => {
                let id = format!("e-family-{}-{child}", couple.id);
                if !family_edges.insert(id.clone()) {
                    continue;
                }
                edges.push(EdgeLayout {
                    id,
                    from: couple.id.clone(),
                    to: child.to_string(),
                    kind: LayoutEdgeKind::ParentChild,
                    points: taxi(at(&couple.id), at(child), config.edge_turn),
                });
            }
            None => edges.push(EdgeLayout {
                id: format!("e-{}", rel.edge_id()),
                from: parent.to_string(),
                to: child.to_string(),
                kind: LayoutEdgeKind::ParentChild,
                points: taxi(at(parent), at(child), config.edge_turn),
            }),
        }
    }

    for &(a, b, rel) in graph.sibling_pairs() {
        if graph.share_parent(a, b) {
            continue;
        }
        edges.push(EdgeLayout {
            id: format!("e-{}", rel.edge_id()),
            from: a.to_string(),
            to: b.to_string(),
            kind: LayoutEdgeKind::Sibling,
            points: straight(at(a), at(b)),
        });
    }

    edges
}
