use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use eframe::egui::Color32;
use serde::Deserialize;

/// Which node pairs get an edge drawn between them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Every pair of nodes, faded out by distance.
    Proximity,
    /// Only explicit connections.
    #[default]
    Connections,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgeFalloff {
    pub max_alpha: f32,
    pub max_width: f32,
    pub drop_distance: f32,
}

impl Default for EdgeFalloff {
    fn default() -> Self {
        Self {
            max_alpha: 100.0,
            max_width: 3.0,
            drop_distance: 330.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl From<Rgb> for Color32 {
    fn from(Rgb([r, g, b]): Rgb) -> Self {
        Color32::from_rgb(r, g, b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub backdrop: Rgb,
    pub edge: Rgb,
    pub selected_edge: Rgb,
    pub node: Rgb,
    pub hover: Rgb,
    pub selected: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            backdrop: Rgb([0, 0, 0]),
            edge: Rgb([0, 255, 255]),
            selected_edge: Rgb([255, 165, 0]),
            node: Rgb([47, 79, 79]),
            hover: Rgb([0, 128, 0]),
            selected: Rgb([50, 205, 50]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub node_radius: f32,
    pub edge_mode: EdgeMode,
    pub falloff: EdgeFalloff,
    pub palette: Palette,
    /// Speed of freshly placed nodes when physics is on, in pixels per second.
    pub launch_speed: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            node_radius: 20.0,
            edge_mode: EdgeMode::default(),
            falloff: EdgeFalloff::default(),
            palette: Palette::default(),
            launch_speed: 120.0,
        }
    }
}

impl VisualConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("config is not valid JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.node_radius.is_nan() || self.node_radius <= 0.0 {
            bail!("node_radius must be positive, got {}", self.node_radius);
        }
        if self.falloff.drop_distance.is_nan() || self.falloff.drop_distance <= 0.0 {
            bail!(
                "falloff.drop_distance must be positive, got {}",
                self.falloff.drop_distance
            );
        }
        if self.falloff.max_alpha < 0.0 || self.falloff.max_alpha > 255.0 {
            bail!(
                "falloff.max_alpha must be within 0..=255, got {}",
                self.falloff.max_alpha
            );
        }
        if self.falloff.max_width < 0.0 {
            bail!(
                "falloff.max_width must not be negative, got {}",
                self.falloff.max_width
            );
        }
        if self.launch_speed < 0.0 {
            bail!("launch_speed must not be negative, got {}", self.launch_speed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(VisualConfig::from_json("{}").unwrap(), VisualConfig::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = VisualConfig::from_json(
            r#"{ "edge_mode": "proximity", "falloff": { "drop_distance": 200 } }"#,
        )
        .unwrap();
        assert_eq!(config.edge_mode, EdgeMode::Proximity);
        assert_eq!(config.falloff.drop_distance, 200.0);
        assert_eq!(config.falloff.max_alpha, 100.0);
        assert_eq!(config.node_radius, 20.0);
    }

    #[test]
    fn palette_colors_parse_as_triples() {
        let config =
            VisualConfig::from_json(r#"{ "palette": { "edge": [1, 2, 3] } }"#).unwrap();
        assert_eq!(Color32::from(config.palette.edge), Color32::from_rgb(1, 2, 3));
        assert_eq!(config.palette.backdrop, Rgb([0, 0, 0]));
    }

    #[test]
    fn zero_drop_distance_is_rejected() {
        let error = VisualConfig::from_json(r#"{ "falloff": { "drop_distance": 0 } }"#)
            .unwrap_err()
            .to_string();
        assert!(error.contains("drop_distance"));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(VisualConfig::from_json("{ nope").is_err());
    }
}
