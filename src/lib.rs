#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod edits;
pub mod graph;
pub mod kinship;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod source;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use edits::{RelationIntent, conflicting_relationships, implied_relationships};
pub use graph::{EdgeKind, FamilyGraph};
pub use kinship::{CommonAncestor, PathStep, RelationshipDescription, path_edge_pairs, path_node_ids};
pub use layout::{FamilyLayout, Highlight, LayoutMode, Point, highlight_path};
pub use model::{Gender, Person, Relationship, RelationshipKind};
pub use source::{FamilySnapshot, FamilySource, SourceError};

use std::borrow::Cow;

/// Positions every person and couple midpoint of a snapshot.
pub fn compute_layout(
    members: &[Person],
    relationships: &[Relationship],
    mode: LayoutMode,
    config: &LayoutConfig,
) -> FamilyLayout {
    let members = visible_members(members, relationships, config);
    let graph = FamilyGraph::build(&members, relationships);
    layout::compute_layout(&graph, mode, config)
}

fn visible_members<'m>(
    members: &'m [Person],
    relationships: &[Relationship],
    config: &LayoutConfig,
) -> Cow<'m, [Person]> {
    if !config.hide_unconnected {
        return Cow::Borrowed(members);
    }
    let graph = FamilyGraph::build(members, relationships);
    Cow::Owned(
        members
            .iter()
            .filter(|p| graph.degree(&p.id) > 0)
            .cloned()
            .collect(),
    )
}

/// Shortest connection between two persons, `None` when unrelated.
pub fn find_path(
    from: &str,
    to: &str,
    members: &[Person],
    relationships: &[Relationship],
) -> Option<Vec<PathStep>> {
    let graph = FamilyGraph::build(members, relationships);
    kinship::find_path(&graph, from, to)
}

/// German kinship term, degree, DNA estimate and path describing `to` from `from`.
pub fn describe_relationship(
    from: &str,
    to: &str,
    members: &[Person],
    relationships: &[Relationship],
) -> RelationshipDescription {
    let graph = FamilyGraph::build(members, relationships);
    kinship::describe_relationship(&graph, from, to)
}
