use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Horizontal gap between the two partners of a couple.
    pub spouse_gap: f32,
    /// Horizontal gap between neighbouring units in a generation row.
    pub sibling_gap: f32,
    /// Vertical distance between generation rows.
    pub generation_gap: f32,
    pub couple_node_size: f32,
    /// Vertical pixels per calendar year in temporal mode.
    pub year_scale: f32,
    /// Minimum horizontal gap the overlap pass enforces between units.
    pub min_gap: f32,
    pub overlap_passes: usize,
    pub fallback_years_per_generation: i32,
    /// Base year for generation estimates when no birth year is known at all.
    pub fallback_base_year: i32,
    /// Axis origin when no birth year is known at all.
    pub empty_base_year: i32,
    /// Distance below a couple midpoint where parent/child edges turn sideways.
    pub edge_turn: f32,
    /// Drop members without any relationship before layout.
    pub hide_unconnected: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 170.0,
            node_height: 62.0,
            spouse_gap: 30.0,
            sibling_gap: 50.0,
            generation_gap: 140.0,
            couple_node_size: 1.0,
            year_scale: 5.0,
            min_gap: 20.0,
            overlap_passes: 5,
            fallback_years_per_generation: 25,
            fallback_base_year: 1950,
            empty_base_year: 1920,
            edge_turn: 40.0,
            hide_unconnected: false,
        }
    }
}

impl LayoutConfig {
    /// Footprint of a two-person couple.
    pub fn couple_width(&self) -> f32 {
        self.node_width * 2.0 + self.spouse_gap
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub layout: LayoutConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    node_width: Option<f32>,
    node_height: Option<f32>,
    spouse_gap: Option<f32>,
    sibling_gap: Option<f32>,
    generation_gap: Option<f32>,
    couple_node_size: Option<f32>,
    year_scale: Option<f32>,
    min_gap: Option<f32>,
    overlap_passes: Option<usize>,
    fallback_years_per_generation: Option<i32>,
    fallback_base_year: Option<i32>,
    empty_base_year: Option<i32>,
    edge_turn: Option<f32>,
    hide_unconnected: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing config {}", path.display()))
}

/// Parses a JSON (or JSON5) config document over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|_| json_err)?,
    };

    let mut config = Config::default();
    if let Some(layout) = parsed.layout {
        apply_layout_overrides(&mut config.layout, layout);
    }
    Ok(config)
}

fn apply_layout_overrides(config: &mut LayoutConfig, file: LayoutConfigFile) {
    if let Some(v) = file.node_width {
        config.node_width = v;
    }
    if let Some(v) = file.node_height {
        config.node_height = v;
    }
    if let Some(v) = file.spouse_gap {
        config.spouse_gap = v;
    }
    if let Some(v) = file.sibling_gap {
        config.sibling_gap = v;
    }
    if let Some(v) = file.generation_gap {
        config.generation_gap = v;
    }
    if let Some(v) = file.couple_node_size {
        config.couple_node_size = v;
    }
    if let Some(v) = file.year_scale {
        config.year_scale = v;
    }
    if let Some(v) = file.min_gap {
        config.min_gap = v;
    }
    if let Some(v) = file.overlap_passes {
        config.overlap_passes = v;
    }
    if let Some(v) = file.fallback_years_per_generation {
        config.fallback_years_per_generation = v;
    }
    if let Some(v) = file.fallback_base_year {
        config.fallback_base_year = v;
    }
    if let Some(v) = file.empty_base_year {
        config.empty_base_year = v;
    }
    if let Some(v) = file.edge_turn {
        config.edge_turn = v;
    }
    if let Some(v) = file.hide_unconnected {
        config.hide_unconnected = v;
    }
}
