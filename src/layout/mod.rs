mod assign;
mod edges;
pub(crate) mod generations;
mod highlight;
mod overlap;
mod temporal;
pub(crate) mod types;
mod units;
mod width;
pub use highlight::*;
pub use types::*;
use assign::*;
use edges::*;
use generations::*;
use overlap::*;
use temporal::*;
use units::*;
use width::*;

use crate::config::LayoutConfig;
use crate::graph::FamilyGraph;
use crate::model::Person;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Lays out a family graph.
///
/// Generations, units and subtree widths are derived first; units are then
/// placed bottom-up, overlaps in each row pushed apart and the whole tree
/// centred on x = 0. Temporal mode keeps those X coordinates, moves every
/// person to its birth-year row and runs the overlap pass again with a
/// node-height tolerance.
pub fn compute_layout(graph: &FamilyGraph<'_>, mode: LayoutMode, config: &LayoutConfig) -> FamilyLayout {
    let generations = assign_generations(graph);
    let plan = plan_units(graph, &generations);
    let widths = measure_widths(&plan, config);
    let geometry: Vec<UnitGeometry<'_>> = (0..plan.units.len())
        .map(|unit| unit_geometry(&plan, &widths, config, unit))
        .collect();

    let mut anchors = place_units(&plan, &geometry, &widths, config);
    let row_y = |unit: usize| plan.units[unit].generation as f32 * config.generation_gap;

    let mut slots: Vec<Slot> = (0..plan.units.len())
        .map(|unit| slot_for(unit, anchors[unit], &geometry[unit], row_y(unit)))
        .collect();
    resolve_overlaps(&mut slots, RowMatch::Exact, config.min_gap, 1);
    apply_shifts(&mut anchors, &slots);
    center_horizontally(&mut anchors, &geometry);

    let person_y: HashMap<&str, f32> = match mode {
        LayoutMode::Generational => (0..plan.units.len())
            .flat_map(|unit| geometry[unit].persons.iter().map(move |(id, _)| (*id, row_y(unit))))
            .collect(),
        LayoutMode::Temporal => {
            let rows = temporal_rows(graph, &generations, config);
            let mut slots: Vec<Slot> = (0..plan.units.len())
                .map(|unit| {
                    let persons = &geometry[unit].persons;
                    let y = persons.iter().map(|(id, _)| rows.get(id).copied().unwrap_or(0.0)).sum::<f32>()
                        / persons.len().max(1) as f32;
                    slot_for(unit, anchors[unit], &geometry[unit], y)
                })
                .collect();
            resolve_overlaps(
                &mut slots,
                RowMatch::Within(config.node_height),
                config.min_gap,
                config.overlap_passes,
            );
            apply_shifts(&mut anchors, &slots);
            rows
        }
    };

    let mut layout = FamilyLayout {
        mode,
        ..FamilyLayout::default()
    };
    let mut positions: HashMap<String, Point> = HashMap::new();

    for (unit, geo) in geometry.iter().enumerate() {
        for (id, offset) in &geo.persons {
            let point = Point {
                x: anchors[unit] + offset,
                y: person_y.get(id).copied().unwrap_or(0.0),
            };
            positions.insert(id.to_string(), point);
            let person = graph.person(id);
            layout.nodes.insert(
                id.to_string(),
                NodeLayout {
                    id: id.to_string(),
                    kind: NodeKind::Person,
                    label: person.map(Person::display_name).unwrap_or_else(|| id.to_string()),
                    x: point.x,
                    y: point.y,
                    width: config.node_width,
                    height: config.node_height,
                    generation: generations.get(id).copied(),
                },
            );
        }
    }

    let mut midpoint_x: HashMap<usize, f32> = HashMap::new();
    for (unit, geo) in geometry.iter().enumerate() {
        for (couple, offset) in &geo.midpoints {
            midpoint_x.insert(*couple, anchors[unit] + offset);
        }
    }
    for (idx, couple) in plan.couples.iter().enumerate() {
        let origin = Point { x: 0.0, y: 0.0 };
        let left = positions.get(couple.left).copied().unwrap_or(origin);
        let right = positions.get(couple.right).copied().unwrap_or(origin);
        let point = Point {
            x: midpoint_x.get(&idx).copied().unwrap_or((left.x + right.x) / 2.0),
            y: (left.y + right.y) / 2.0,
        };
        positions.insert(couple.id.clone(), point);
        layout.nodes.insert(
            couple.id.clone(),
            NodeLayout {
                id: couple.id.clone(),
                kind: NodeKind::CoupleMidpoint,
                label: String::new(),
                x: point.x,
                y: point.y,
                width: config.couple_node_size,
                height: config.couple_node_size,
                generation: generations.get(couple.left).copied(),
            },
        );
    }

    layout.edges = build_edges(graph, &plan, &positions, config);
    layout.units = plan
        .units
        .iter()
        .enumerate()
        .map(|(idx, unit)| UnitLayout {
            id: unit.id.clone(),
            kind: unit.kind(),
            members: plan.members(idx).into_iter().map(str::to_string).collect(),
            generation: unit.generation,
            width: widths.unit[idx],
            x: anchors[idx],
        })
        .collect();

    let persons: Vec<&NodeLayout> = layout.persons().collect();
    if !persons.is_empty() {
        let min_x = persons.iter().map(|n| n.left()).fold(f32::INFINITY, f32::min);
        let max_x = persons.iter().map(|n| n.right()).fold(f32::NEG_INFINITY, f32::max);
        let min_y = persons.iter().map(|n| n.y - n.height / 2.0).fold(f32::INFINITY, f32::min);
        let max_y = persons.iter().map(|n| n.y + n.height / 2.0).fold(f32::NEG_INFINITY, f32::max);
        layout.width = max_x - min_x;
        layout.height = max_y - min_y;
    }

    tracing::trace!(
        persons = graph.len(),
        units = plan.units.len(),
        couples = plan.couples.len(),
        ?mode,
        "layout computed"
    );
    layout
}

fn slot_for(unit: usize, anchor: f32, geometry: &UnitGeometry<'_>, y: f32) -> Slot {
    Slot {
        unit,
        left: anchor + geometry.left,
        right: anchor + geometry.right,
        y,
        shift: 0.0,
    }
}

fn apply_shifts(anchors: &mut [f32], slots: &[Slot]) {
    for slot in slots {
        anchors[slot.unit] += slot.shift;
    }
}

fn center_horizontally(anchors: &mut [f32], geometry: &[UnitGeometry<'_>]) {
    if anchors.is_empty() {
        return;
    }
    let min = anchors
        .iter()
        .zip(geometry)
        .map(|(x, g)| x + g.left)
        .fold(f32::INFINITY, f32::min);
    let max = anchors
        .iter()
        .zip(geometry)
        .map(|(x, g)| x + g.right)
        .fold(f32::NEG_INFINITY, f32::max);
    let dx = -(min + max) / 2.0;
    for x in anchors.iter_mut() {
        *x += dx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Relationship};

    fn scenario() -> (Vec<Person>, Vec<Relationship>) {
        let people = vec![
            Person::new("adolf", "Adolf", "Kunz").with_gender(Gender::Male).with_birth_date("1900"),
            Person::new("elisabeth", "Elisabeth", "Kunz").with_gender(Gender::Female).with_birth_date("1905"),
            Person::new("werner", "Werner", "Kunz").with_gender(Gender::Male).with_birth_date("1931"),
        ];
        let rels = vec![
            Relationship::spouse("adolf", "elisabeth"),
            Relationship::parent_child("adolf", "werner"),
            Relationship::parent_child("elisabeth", "werner"),
        ];
        (people, rels)
    }

    #[test]
    fn couple_above_child() {
        let (people, rels) = scenario();
        let graph = FamilyGraph::build(&people, &rels);
        let layout = compute_layout(&graph, LayoutMode::Generational, &LayoutConfig::default());
        let pos = layout.node_positions();
        let mid = pos["couple-adolf-elisabeth"];
        assert_eq!(mid.x, pos["werner"].x);
        assert_eq!(pos["adolf"].y, 0.0);
        assert_eq!(pos["werner"].y, 140.0);
        assert_eq!(pos["elisabeth"].x - pos["adolf"].x, 200.0);
        assert_eq!(layout.units.len(), 2);
        let family = layout.edge("e-family-couple-adolf-elisabeth-werner").unwrap();
        assert_eq!(family.points.len(), 4);
        assert_eq!(family.points[1].1, 40.0);
    }

    #[test]
    fn centred_on_zero() {
        let (people, rels) = scenario();
        let graph = FamilyGraph::build(&people, &rels);
        let layout = compute_layout(&graph, LayoutMode::Generational, &LayoutConfig::default());
        let min = layout.persons().map(|n| n.left()).fold(f32::INFINITY, f32::min);
        let max = layout.persons().map(|n| n.right()).fold(f32::NEG_INFINITY, f32::max);
        assert!((min + max).abs() < 1e-3);
        assert_eq!(layout.width, 370.0);
        assert_eq!(layout.height, 140.0 + 62.0);
    }

    #[test]
    fn temporal_keeps_x_and_uses_years() {
        let (people, rels) = scenario();
        let graph = FamilyGraph::build(&people, &rels);
        let config = LayoutConfig::default();
        let generational = compute_layout(&graph, LayoutMode::Generational, &config).node_positions();
        let temporal = compute_layout(&graph, LayoutMode::Temporal, &config).node_positions();
        for id in ["adolf", "elisabeth", "werner"] {
            assert_eq!(generational[id].x, temporal[id].x);
        }
        assert_eq!(temporal["adolf"].y, 0.0);
        assert_eq!(temporal["elisabeth"].y, 25.0);
        assert_eq!(temporal["werner"].y, 155.0);
        assert_eq!(temporal["couple-adolf-elisabeth"].y, 12.5);
    }

    #[test]
    fn empty_graph() {
        let graph = FamilyGraph::build(&[], &[]);
        let layout = compute_layout(&graph, LayoutMode::Temporal, &LayoutConfig::default());
        assert!(layout.nodes.is_empty());
        assert!(layout.edges.is_empty());
        assert_eq!(layout.width, 0.0);
    }

    #[test]
    fn sibling_edges_only_without_shared_parent() {
        let people: Vec<Person> = ["p", "a", "b", "c"].iter().map(|id| Person::new(*id, "", "")).collect();
        let rels = vec![
            Relationship::parent_child("p", "a"),
            Relationship::parent_child("p", "b"),
            Relationship::sibling("a", "b"),
            Relationship::sibling("b", "c"),
        ];
        let graph = FamilyGraph::build(&people, &rels);
        let layout = compute_layout(&graph, LayoutMode::Generational, &LayoutConfig::default());
        let siblings: Vec<_> = layout
            .edges
            .iter()
            .filter(|e| e.kind == LayoutEdgeKind::Sibling)
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(siblings, vec![("b", "c")]);
        assert!(layout.edge("e-p-a").is_some());
    }
}
