use crate::layout::{FamilyLayout, LayoutEdgeKind, NodeKind, UnitKind};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub mode: String,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub units: Vec<UnitDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub generation: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub from: String,
    pub to: String,
    pub kind: LayoutEdgeKind,
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct UnitDump {
    pub id: String,
    pub kind: UnitKind,
    pub members: Vec<String>,
    pub generation: u32,
    pub width: f32,
    pub x: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &FamilyLayout) -> Self {
        let nodes = layout
            .nodes
            .values()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: node.kind,
                label: node.label.clone(),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                generation: node.generation,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                from: edge.from.clone(),
                to: edge.to.clone(),
                kind: edge.kind,
                points: edge.points.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        let units = layout
            .units
            .iter()
            .map(|unit| UnitDump {
                id: unit.id.clone(),
                kind: unit.kind,
                members: unit.members.clone(),
                generation: unit.generation,
                width: unit.width,
                x: unit.x,
            })
            .collect();

        LayoutDump {
            mode: format!("{:?}", layout.mode).to_lowercase(),
            width: layout.width,
            height: layout.height,
            nodes,
            edges,
            units,
        }
    }
}

pub fn write_layout_dump(path: Option<&Path>, layout: &FamilyLayout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
