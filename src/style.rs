use eframe::egui::Color32;

use crate::config::{EdgeFalloff, Palette};
use crate::graph::Node;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStroke {
    pub color: Color32,
    pub alpha: f32,
    pub width: f32,
}

impl EdgeStroke {
    /// Edges fade out completely; zero or negative weight is never drawn.
    pub fn is_drawn(&self) -> bool {
        self.alpha > 0.0 && self.width > 0.0
    }
}

/// Linear alpha and width falloff over `falloff.drop_distance`.
pub fn edge_style(
    distance: f32,
    base: Color32,
    selected_override: Color32,
    either_selected: bool,
    falloff: &EdgeFalloff,
) -> EdgeStroke {
    let alpha_gradient = falloff.max_alpha / falloff.drop_distance;
    let width_gradient = falloff.max_width / falloff.drop_distance;

    EdgeStroke {
        color: if either_selected {
            selected_override
        } else {
            base
        },
        alpha: (falloff.max_alpha - distance * alpha_gradient).max(0.0),
        width: (falloff.max_width - distance * width_gradient).max(0.0),
    }
}

pub fn node_color(node: &Node, palette: &Palette) -> Color32 {
    if node.is_selected() {
        palette.selected.into()
    } else if node.is_hovered() {
        palette.hover.into()
    } else {
        palette.node.into()
    }
}
