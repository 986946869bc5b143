//! Draw procedures for each layer and the repaint decisions that drive them.
//!
//! Full and incremental repaints share the procedures below: a region repaint
//! is the full-layer procedure run under a clip, so both paths produce the same
//! pixels.

use eframe::egui::{Color32, Rect};

use crate::config::{EdgeMode, VisualConfig};
use crate::geometry::{disk_bounds, distance, segment_bounds};
use crate::graph::{Graph, Node, NodeId};
use crate::layers::{Compositor, Layer};
use crate::raster::Raster;
use crate::style::{EdgeStroke, edge_style, node_color};

/// One unit of repaint work decided by the interaction layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Repaint {
    /// Clear the layer and redraw everything on it.
    Full(Layer),
    /// Clear and redraw only the pixels inside `region`.
    Region { layer: Layer, region: Rect },
    /// Draw one node on top of the node layer without clearing. Only valid for
    /// the most recently placed node, which is last in paint order anyway.
    NodeOverlay(NodeId),
}

impl Repaint {
    pub fn layer(&self) -> Layer {
        match self {
            Repaint::Full(layer) | Repaint::Region { layer, .. } => *layer,
            Repaint::NodeOverlay(_) => Layer::Nodes,
        }
    }

    pub fn full_scene() -> Vec<Repaint> {
        Layer::ALL.into_iter().map(Repaint::Full).collect()
    }

    /// Edges and nodes, for structural changes that the backdrop does not see.
    pub fn graph_layers() -> Vec<Repaint> {
        vec![Repaint::Full(Layer::Edges), Repaint::Full(Layer::Nodes)]
    }
}

/// Drops work already covered by a full repaint of the same layer.
pub fn coalesce(repaints: Vec<Repaint>) -> Vec<Repaint> {
    let full: Vec<Layer> = repaints
        .iter()
        .filter_map(|repaint| match repaint {
            Repaint::Full(layer) => Some(*layer),
            _ => None,
        })
        .collect();

    let mut kept: Vec<Repaint> = Vec::with_capacity(repaints.len());
    for repaint in repaints {
        let covered = match repaint {
            Repaint::Full(_) => kept.contains(&repaint),
            _ => full.contains(&repaint.layer()),
        };
        if !covered {
            kept.push(repaint);
        }
    }
    kept
}

pub struct ScenePainter<'a> {
    graph: &'a Graph,
    config: &'a VisualConfig,
}

impl<'a> ScenePainter<'a> {
    pub fn new(graph: &'a Graph, config: &'a VisualConfig) -> Self {
        Self { graph, config }
    }

    pub fn apply(&self, compositor: &mut Compositor, repaint: Repaint) {
        match repaint {
            Repaint::Full(layer) => {
                compositor.redraw_layer_cleared(layer, |raster| self.draw_layer(layer, raster))
            }
            Repaint::Region { layer, region } => {
                compositor.redraw_region(layer, region, |raster| self.draw_layer(layer, raster))
            }
            Repaint::NodeOverlay(id) => {
                if let Some(node) = self.graph.node(id) {
                    compositor.redraw_layer(Layer::Nodes, |raster| self.draw_node(raster, node));
                }
            }
        }
    }

    pub fn draw_layer(&self, layer: Layer, raster: &mut Raster) {
        match layer {
            Layer::Backdrop => raster.clear(self.config.palette.backdrop.into()),
            Layer::Edges => self.draw_edges(raster),
            Layer::Nodes => self.draw_nodes(raster),
        }
    }

    pub fn draw_edges(&self, raster: &mut Raster) {
        self.for_each_edge(|a, b| {
            let stroke = self.stroke(a, b);
            if stroke.is_drawn() {
                raster.draw_line(a.position, b.position, stroke.color, stroke.alpha, stroke.width);
            }
        });
    }

    pub fn draw_nodes(&self, raster: &mut Raster) {
        for node in self.graph.nodes() {
            self.draw_node(raster, node);
        }
    }

    pub fn draw_node(&self, raster: &mut Raster, node: &Node) {
        raster.fill_circle(
            node.position,
            self.config.node_radius,
            node_color(node, &self.config.palette),
        );
    }

    pub fn stroke(&self, a: &Node, b: &Node) -> EdgeStroke {
        let palette = &self.config.palette;
        edge_style(
            distance(a.position, b.position),
            Color32::from(palette.edge),
            Color32::from(palette.selected_edge),
            a.is_selected() || b.is_selected(),
            &self.config.falloff,
        )
    }

    /// Pixels covered by the node's disk.
    pub fn node_region(&self, id: NodeId) -> Option<Rect> {
        let node = self.graph.node(id)?;
        Some(disk_bounds(node.position, self.config.node_radius + 1.0))
    }

    /// Union of the bounds of every drawn edge incident to `id`.
    pub fn incident_edge_region(&self, id: NodeId) -> Option<Rect> {
        let node = self.graph.node(id)?;
        let mut region: Option<Rect> = None;
        self.for_each_incident(node, |other| {
            let stroke = self.stroke(node, other);
            if stroke.is_drawn() {
                let bounds = segment_bounds(node.position, other.position, stroke.width);
                region = Some(region.map_or(bounds, |region| region.union(bounds)));
            }
        });
        region
    }

    /// Repaints for a node whose own look changed: its disk on the node layer
    /// and its incident edges on the edge layer.
    pub fn single_node(&self, id: NodeId) -> Vec<Repaint> {
        let mut repaints = Vec::with_capacity(2);
        if let Some(region) = self.incident_edge_region(id) {
            repaints.push(Repaint::Region {
                layer: Layer::Edges,
                region,
            });
        }
        if let Some(region) = self.node_region(id) {
            repaints.push(Repaint::Region {
                layer: Layer::Nodes,
                region,
            });
        }
        repaints
    }

    fn for_each_edge(&self, mut visit: impl FnMut(&Node, &Node)) {
        match self.config.edge_mode {
            EdgeMode::Proximity => {
                let nodes: Vec<&Node> = self.graph.nodes().collect();
                for (index, a) in nodes.iter().enumerate() {
                    for b in &nodes[index + 1..] {
                        visit(a, b);
                    }
                }
            }
            EdgeMode::Connections => {
                for connection in self.graph.connections() {
                    let (a, b) = connection.endpoints();
                    if let (Some(a), Some(b)) = (self.graph.node(a), self.graph.node(b)) {
                        visit(a, b);
                    }
                }
            }
        }
    }

    fn for_each_incident(&self, node: &Node, mut visit: impl FnMut(&Node)) {
        match self.config.edge_mode {
            EdgeMode::Proximity => {
                for other in self.graph.nodes().filter(|other| other.id != node.id) {
                    visit(other);
                }
            }
            EdgeMode::Connections => {
                for connection in self.graph.neighbors(node.id) {
                    if let Some(other) = connection.other(node.id).and_then(|id| self.graph.node(id))
                    {
                        visit(other);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn proximity() -> VisualConfig {
        VisualConfig {
            edge_mode: EdgeMode::Proximity,
            ..VisualConfig::default()
        }
    }

    fn drawn_edges(graph: &Graph, config: &VisualConfig) -> Vec<(NodeId, NodeId)> {
        let painter = ScenePainter::new(graph, config);
        let mut drawn = Vec::new();
        painter.for_each_edge(|a, b| {
            if painter.stroke(a, b).is_drawn() {
                drawn.push((a.id, b.id));
            }
        });
        drawn
    }

    #[test]
    fn proximity_edges_fade_past_drop_distance() {
        let config = proximity();
        let mut graph = Graph::new();
        let a = graph.add_node(pos2(0.0, 0.0));
        let b = graph.add_node(pos2(100.0, 0.0));
        graph.add_node(pos2(500.0, 500.0));

        assert_eq!(drawn_edges(&graph, &config), vec![(a, b)]);

        let painter = ScenePainter::new(&graph, &config);
        let near = painter.stroke(graph.node(a).unwrap(), graph.node(b).unwrap());
        assert!(near.alpha > 0.0 && near.width > 0.0);
    }

    #[test]
    fn connection_mode_draws_only_connections() {
        let config = VisualConfig::default();
        let mut graph = Graph::new();
        let a = graph.add_node(pos2(0.0, 0.0));
        let b = graph.add_node(pos2(50.0, 0.0));
        let c = graph.add_node(pos2(0.0, 50.0));
        graph.connect(c, a).unwrap();

        assert_eq!(drawn_edges(&graph, &config), vec![(a, c)]);
        let painter = ScenePainter::new(&graph, &config);
        assert!(painter.incident_edge_region(b).is_none());
        assert!(painter.incident_edge_region(a).is_some());
    }

    #[test]
    fn incident_region_covers_edge_and_ignores_faded_ones() {
        let config = proximity();
        let mut graph = Graph::new();
        let a = graph.add_node(pos2(100.0, 100.0));
        graph.add_node(pos2(200.0, 150.0));
        graph.add_node(pos2(900.0, 900.0));

        let painter = ScenePainter::new(&graph, &config);
        let region = painter.incident_edge_region(a).unwrap();
        assert!(region.contains(pos2(100.0, 100.0)));
        assert!(region.contains(pos2(200.0, 150.0)));
        assert!(region.max.x < 300.0 && region.max.y < 300.0);
    }

    #[test]
    fn coalesce_drops_work_covered_by_full_repaints() {
        let region = Rect::from_min_max(pos2(0.0, 0.0), pos2(4.0, 4.0));
        let repaints = vec![
            Repaint::Region {
                layer: Layer::Nodes,
                region,
            },
            Repaint::Region {
                layer: Layer::Edges,
                region,
            },
            Repaint::Full(Layer::Nodes),
            Repaint::NodeOverlay(NodeId(1)),
            Repaint::Full(Layer::Nodes),
        ];
        assert_eq!(
            coalesce(repaints),
            vec![
                Repaint::Region {
                    layer: Layer::Edges,
                    region
                },
                Repaint::Full(Layer::Nodes),
            ]
        );
    }

    #[test]
    fn backdrop_uses_palette() {
        let config = VisualConfig::default();
        let graph = Graph::new();
        let mut compositor = Compositor::new();
        compositor.resize(4, 4).unwrap();
        let painter = ScenePainter::new(&graph, &config);
        painter.apply(&mut compositor, Repaint::Full(Layer::Backdrop));
        assert_eq!(
            compositor.frame().pixels[0],
            Color32::from(config.palette.backdrop)
        );
    }
}
