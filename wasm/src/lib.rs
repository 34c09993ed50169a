use serde::Deserialize;
use stammbaum::{FamilyLayout, FamilySnapshot, Highlight, LayoutConfig, LayoutMode, highlight_path};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOptions {
    mode: Option<LayoutMode>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    year_scale: Option<f32>,
    hide_unconnected: Option<bool>,
}

fn build_layout_config(options: &LayoutOptions) -> LayoutConfig {
    let mut config = LayoutConfig::default();
    if let Some(width) = options.node_width {
        config.node_width = width;
    }
    if let Some(height) = options.node_height {
        config.node_height = height;
    }
    if let Some(scale) = options.year_scale {
        config.year_scale = scale;
    }
    if let Some(hide) = options.hide_unconnected {
        config.hide_unconnected = hide;
    }
    config
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn parse_snapshot(snapshot_json: &str) -> Result<FamilySnapshot, String> {
    FamilySnapshot::from_json_str(snapshot_json).map_err(|error| error.to_string())
}

fn parse_options(options_json: Option<String>) -> Result<LayoutOptions, String> {
    match options_json {
        Some(raw) => serde_json::from_str::<LayoutOptions>(&raw).map_err(|error| error.to_string()),
        None => Ok(LayoutOptions::default()),
    }
}

fn layout_snapshot(snapshot: &FamilySnapshot, options: &LayoutOptions) -> FamilyLayout {
    stammbaum::compute_layout(
        &snapshot.members,
        &snapshot.relationships,
        options.mode.unwrap_or_default(),
        &build_layout_config(options),
    )
}

fn layout_json(snapshot_json: &str, options_json: Option<String>) -> Result<String, String> {
    let options = parse_options(options_json)?;
    let snapshot = parse_snapshot(snapshot_json)?;
    let layout = layout_snapshot(&snapshot, &options);
    serde_json::to_string(&layout).map_err(|error| error.to_string())
}

fn highlight_json(
    snapshot_json: &str,
    options_json: Option<String>,
    from: &str,
    to: &str,
) -> Result<String, String> {
    let options = parse_options(options_json)?;
    let snapshot = parse_snapshot(snapshot_json)?;
    let highlight = match stammbaum::find_path(from, to, &snapshot.members, &snapshot.relationships) {
        Some(path) => highlight_path(&layout_snapshot(&snapshot, &options), &path),
        None => Highlight::default(),
    };
    serde_json::to_string(&highlight).map_err(|error| error.to_string())
}

fn describe_json(snapshot_json: &str, from: &str, to: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let description = stammbaum::describe_relationship(from, to, &snapshot.members, &snapshot.relationships);
    serde_json::to_string(&description).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn compute_layout_json(snapshot_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_json(snapshot_json, options_json).map_err(to_js)
}

#[wasm_bindgen]
pub fn describe_relationship_json(snapshot_json: &str, from: &str, to: &str) -> Result<String, JsValue> {
    describe_json(snapshot_json, from, to).map_err(to_js)
}

#[wasm_bindgen]
pub fn find_path_json(snapshot_json: &str, from: &str, to: &str) -> Result<String, JsValue> {
    let snapshot = parse_snapshot(snapshot_json).map_err(to_js)?;
    let path = stammbaum::find_path(from, to, &snapshot.members, &snapshot.relationships);
    serde_json::to_string(&path).map_err(to_js)
}

/// Node and edge ids of the rendered layout that trace the path between two persons.
#[wasm_bindgen]
pub fn highlight_path_json(
    snapshot_json: &str,
    options_json: Option<String>,
    from: &str,
    to: &str,
) -> Result<String, JsValue> {
    highlight_json(snapshot_json, options_json, from, to).map_err(to_js)
}
