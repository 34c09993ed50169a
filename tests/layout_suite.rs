use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use stammbaum::layout::{FamilyLayout, LayoutEdgeKind, NodeKind, NodeLayout};
use stammbaum::{FamilySnapshot, LayoutConfig, LayoutMode, RelationshipKind, compute_layout};

fn load_fixture(rel: &str) -> FamilySnapshot {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    assert!(path.exists(), "fixture missing: {rel}");
    FamilySnapshot::load(&path).expect("fixture parse failed")
}

fn layout_fixture(rel: &str, mode: LayoutMode) -> (FamilySnapshot, FamilyLayout) {
    let snapshot = load_fixture(rel);
    let layout = compute_layout(
        &snapshot.members,
        &snapshot.relationships,
        mode,
        &LayoutConfig::default(),
    );
    (snapshot, layout)
}

fn assert_no_row_overlap(layout: &FamilyLayout, fixture: &str) {
    let config = LayoutConfig::default();
    let gap = config.min_gap.min(config.spouse_gap);
    let mut rows: BTreeMap<i64, Vec<&NodeLayout>> = BTreeMap::new();
    for node in layout.persons() {
        rows.entry((node.y * 100.0).round() as i64).or_default().push(node);
    }
    for nodes in rows.values_mut() {
        nodes.sort_by(|a, b| a.x.total_cmp(&b.x));
        for pair in nodes.windows(2) {
            let space = pair[1].left() - pair[0].right();
            assert!(
                space >= gap - 0.01,
                "{fixture}: {} and {} overlap ({space})",
                pair[0].id,
                pair[1].id
            );
        }
    }
}

fn assert_centred(layout: &FamilyLayout, fixture: &str) {
    let min = layout.persons().map(|n| n.left()).fold(f32::INFINITY, f32::min);
    let max = layout.persons().map(|n| n.right()).fold(f32::NEG_INFINITY, f32::max);
    assert!((min + max).abs() < 0.01, "{fixture}: not centred ({min}..{max})");
    assert!((layout.width - (max - min)).abs() < 0.01, "{fixture}: width mismatch");
}

fn assert_every_member_placed(snapshot: &FamilySnapshot, layout: &FamilyLayout, fixture: &str) {
    for member in &snapshot.members {
        let node = layout
            .nodes
            .get(&member.id)
            .unwrap_or_else(|| panic!("{fixture}: {} has no node", member.id));
        assert_eq!(node.kind, NodeKind::Person);
        assert!(node.x.is_finite() && node.y.is_finite(), "{fixture}: {} not finite", member.id);
    }
}

#[test]
fn layout_all_fixtures() {
    // Keep this list explicit so new families must be added intentionally.
    let fixtures = [
        "kunz.json",
        "multi_marriage.json",
        "disconnected.json",
        "siblings.json",
    ];

    for rel in fixtures {
        let (snapshot, layout) = layout_fixture(rel, LayoutMode::Generational);
        assert_every_member_placed(&snapshot, &layout, rel);
        assert_no_row_overlap(&layout, rel);
        assert_centred(&layout, rel);

        let units: usize = layout.units.iter().map(|u| u.members.len()).sum();
        assert_eq!(units, snapshot.members.len(), "{rel}: every person belongs to one unit");

        let (_, temporal) = layout_fixture(rel, LayoutMode::Temporal);
        assert_every_member_placed(&snapshot, &temporal, rel);
        assert_eq!(temporal.nodes.len(), layout.nodes.len(), "{rel}: node sets differ by mode");
    }
}

#[test]
fn children_sit_below_parents() {
    for rel in ["kunz.json", "multi_marriage.json", "siblings.json"] {
        let (snapshot, layout) = layout_fixture(rel, LayoutMode::Generational);
        for r in snapshot
            .relationships
            .iter()
            .filter(|r| r.kind == RelationshipKind::ParentChild)
        {
            let parent = &layout.nodes[&r.from_id];
            let child = &layout.nodes[&r.to_id];
            assert_eq!(child.y - parent.y, 140.0, "{rel}: {} -> {}", r.from_id, r.to_id);
        }
    }
}

#[test]
fn couples_share_a_row_and_midpoint() {
    let (snapshot, layout) = layout_fixture("kunz.json", LayoutMode::Generational);
    let spouses = snapshot
        .relationships
        .iter()
        .filter(|r| r.kind == RelationshipKind::Spouse)
        .count();
    let midpoints: Vec<&NodeLayout> = layout
        .nodes
        .values()
        .filter(|n| n.kind == NodeKind::CoupleMidpoint)
        .collect();
    assert_eq!(midpoints.len(), spouses);

    let adolf = &layout.nodes["adolf"];
    let elisabeth = &layout.nodes["elisabeth"];
    assert_eq!(adolf.y, elisabeth.y);
    assert!(((adolf.x - elisabeth.x).abs() - 200.0).abs() < 0.01);
    let midpoint = &layout.nodes["couple-adolf-elisabeth"];
    assert!((midpoint.x - (adolf.x + elisabeth.x) / 2.0).abs() < 0.01);

    // Married-in partners stand beside the child of the family.
    assert!(layout.nodes.contains_key("couple-werner-ilse"));
    assert!(layout.nodes.contains_key("couple-gisela-horst"));
}

#[test]
fn family_edges_leave_from_couple_midpoints() {
    let (_, layout) = layout_fixture("kunz.json", LayoutMode::Generational);
    for child in ["werner", "gisela"] {
        let id = format!("e-family-couple-adolf-elisabeth-{child}");
        let edge = layout.edge(&id).unwrap_or_else(|| panic!("missing {id}"));
        assert_eq!(edge.kind, LayoutEdgeKind::ParentChild);
        assert_eq!(edge.from, "couple-adolf-elisabeth");
        assert_eq!(edge.to, child);
    }
    let spouse_halves = layout
        .edges
        .iter()
        .filter(|e| e.kind == LayoutEdgeKind::Spouse)
        .count();
    assert_eq!(spouse_halves, 6);
    let ids: HashSet<&str> = layout.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), layout.edges.len(), "edge ids are unique");
}

#[test]
fn multi_marriage_keeps_one_unit() {
    let (_, layout) = layout_fixture("multi_marriage.json", LayoutMode::Generational);
    let unit = layout
        .units
        .iter()
        .find(|u| u.members.iter().any(|m| m == "karl"))
        .expect("karl's unit");
    assert_eq!(unit.id, "multi-karl");
    assert_eq!(unit.members.len(), 4);

    let karl = layout.nodes["karl"].x;
    for wife in ["anna", "berta", "clara"] {
        let node = &layout.nodes[wife];
        assert_eq!(node.y, 0.0);
        assert!((node.x - karl).abs() >= 200.0 - 0.01, "{wife} too close to karl");
    }
    // First marriage to the right, second to the left, third to the right again.
    assert!(layout.nodes["anna"].x > karl);
    assert!(layout.nodes["berta"].x < karl);
    assert!(layout.nodes["clara"].x > layout.nodes["anna"].x);
}

#[test]
fn temporal_mode_follows_birth_years() {
    let config = LayoutConfig::default();
    let (_, generational) = layout_fixture("kunz.json", LayoutMode::Generational);
    let (_, temporal) = layout_fixture("kunz.json", LayoutMode::Temporal);

    // Axis starts at the decade of the earliest birth year (1900).
    assert_eq!(temporal.nodes["adolf"].y, 0.0);
    assert_eq!(temporal.nodes["werner"].y, 31.0 * config.year_scale);
    assert_eq!(temporal.nodes["sabine"].y, 63.0 * config.year_scale);

    // Generations are far apart in time, so nothing collides and X is kept.
    for node in generational.persons() {
        let moved = (temporal.nodes[&node.id].x - node.x).abs();
        assert!(moved < 0.01, "{} moved by {moved}", node.id);
    }
}

#[test]
fn temporal_mode_estimates_missing_years() {
    let (_, layout) = layout_fixture("siblings.json", LayoutMode::Temporal);
    // Jan is the only dated person of his generation, so his siblings share his row.
    let jan = layout.nodes["jan"].y;
    assert_eq!(layout.nodes["uwe"].y, jan);
    assert_eq!(layout.nodes["eva"].y, jan);
    // Nobody of the grandchild generation is dated: earliest year plus two spans.
    assert_eq!(layout.nodes["lena"].y, (1938 + 50 - 1930) as f32 * 5.0);
}

#[test]
fn sibling_edges_without_shared_parent() {
    let (_, layout) = layout_fixture("siblings.json", LayoutMode::Generational);
    let siblings: Vec<(&str, &str)> = layout
        .edges
        .iter()
        .filter(|e| e.kind == LayoutEdgeKind::Sibling)
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect();
    assert_eq!(siblings, vec![("jan", "uwe"), ("uwe", "eva")]);
    assert_eq!(layout.nodes["uwe"].y, layout.nodes["jan"].y);
}

#[test]
fn hide_unconnected_drops_loners() {
    let snapshot = load_fixture("disconnected.json");
    let config = LayoutConfig {
        hide_unconnected: true,
        ..LayoutConfig::default()
    };
    let layout = compute_layout(
        &snapshot.members,
        &snapshot.relationships,
        LayoutMode::Generational,
        &config,
    );
    assert!(!layout.nodes.contains_key("frieda"));
    assert!(layout.nodes.contains_key("rudi"));

    let (_, shown) = layout_fixture("disconnected.json", LayoutMode::Generational);
    assert!(shown.nodes.contains_key("frieda"));
}

#[test]
fn layout_is_deterministic() {
    for rel in ["kunz.json", "multi_marriage.json", "disconnected.json"] {
        let (_, first) = layout_fixture(rel, LayoutMode::Temporal);
        let (_, second) = layout_fixture(rel, LayoutMode::Temporal);
        assert_eq!(first, second, "{rel}");
    }
}
