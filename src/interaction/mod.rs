//! Hover/selection state transitions and the repaint each one requires.

mod commands;

use eframe::egui::Vec2;
use tracing::{debug, warn};

use crate::config::VisualConfig;
use crate::error::Error;
use crate::geometry::{Point, distance};
use crate::graph::{Graph, NodeId, SelectionState};
use crate::layers::Layer;
use crate::physics;
use crate::render::{Repaint, ScenePainter};
use crate::util::stable_direction;

pub use commands::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

struct Drag {
    node: NodeId,
    grab_offset: Vec2,
}

/// Owns the graph and turns input into graph mutations plus repaint decisions.
pub struct Interaction {
    graph: Graph,
    config: VisualConfig,
    physics_enabled: bool,
    physics_paused: bool,
    pointer: Option<Point>,
    drag: Option<Drag>,
}

impl Interaction {
    pub fn new(config: VisualConfig, physics_enabled: bool) -> Self {
        Self {
            graph: Graph::new(),
            config,
            physics_enabled,
            physics_paused: false,
            pointer: None,
            drag: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &VisualConfig {
        &self.config
    }

    pub fn painter(&self) -> ScenePainter<'_> {
        ScenePainter::new(&self.graph, &self.config)
    }

    pub fn physics_running(&self) -> bool {
        self.physics_enabled && !self.physics_paused
    }

    /// Recomputes hover for every node. Only nodes whose hover flipped and that
    /// are not selected need repainting, since selection hides hover.
    pub fn pointer_moved(&mut self, pointer: Option<Point>) -> Vec<Repaint> {
        self.pointer = pointer;
        let changed = self.refresh_hover();
        let painter = self.painter();
        changed
            .into_iter()
            .filter(|id| {
                self.graph
                    .node(*id)
                    .is_some_and(|node| !node.is_selected())
            })
            .flat_map(|id| painter.single_node(id))
            .collect()
    }

    pub fn click(&mut self, position: Point, button: PointerButton) -> Vec<Repaint> {
        self.pointer = Some(position);
        let hits = self.graph.hit_test(position, self.config.node_radius);
        match (button, hits.last()) {
            (_, None) => self.place_node(position),
            (PointerButton::Primary, Some(&topmost)) => self.toggle_selection(topmost),
            (PointerButton::Secondary, Some(_)) => self.remove_nodes(&hits),
        }
    }

    /// Places a node and repaints only what it adds: its disk on top of the
    /// node layer and the region covered by its new edges.
    pub fn place_node(&mut self, position: Point) -> Vec<Repaint> {
        let id = if self.physics_enabled {
            let index = self.graph.len() as u64;
            let velocity = stable_direction(position_key(position), index)
                * self.config.launch_speed;
            self.graph.add_node_with_velocity(position, velocity)
        } else {
            self.graph.add_node(position)
        };
        let changed = self.refresh_hover();

        let painter = self.painter();
        let mut repaints = Vec::with_capacity(2);
        if let Some(region) = painter.incident_edge_region(id) {
            repaints.push(Repaint::Region {
                layer: Layer::Edges,
                region,
            });
        }
        // The overlay draws the new node in its current hover state.
        repaints.push(Repaint::NodeOverlay(id));
        repaints.extend(
            changed
                .into_iter()
                .filter(|&other| other != id)
                .filter(|&other| self.graph.node(other).is_some_and(|node| !node.is_selected()))
                .flat_map(|other| painter.single_node(other)),
        );
        repaints
    }

    pub fn toggle_selection(&mut self, id: NodeId) -> Vec<Repaint> {
        match self.graph.toggle_selection(id) {
            Ok(state) => {
                debug!(%id, selected = state == SelectionState::Selected, "selection toggled");
                self.painter().single_node(id)
            }
            Err(error) => {
                warn!(%error, "selection toggle ignored");
                Vec::new()
            }
        }
    }

    /// Removes every id, skipping ones already gone earlier in the batch.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> Vec<Repaint> {
        let mut removed = 0usize;
        for &id in ids {
            match self.graph.remove_node(id) {
                Ok(_) => removed += 1,
                Err(Error::NotFound(missing)) => {
                    debug!(id = %missing, "node already removed in this batch");
                }
                Err(error) => warn!(%error, "node removal failed"),
            }
            if self.drag.as_ref().is_some_and(|drag| drag.node == id) {
                self.drag = None;
            }
        }

        if removed == 0 {
            return Vec::new();
        }
        Repaint::graph_layers()
    }

    pub fn drag_started(&mut self, position: Point) {
        let hits = self.graph.hit_test(position, self.config.node_radius);
        self.drag = hits.last().and_then(|&id| {
            let node = self.graph.node(id)?;
            Some(Drag {
                node: id,
                grab_offset: node.position - position,
            })
        });
    }

    pub fn dragged(&mut self, position: Point) -> Vec<Repaint> {
        self.pointer = Some(position);
        let Some(drag) = &self.drag else {
            return Vec::new();
        };
        let target = position + drag.grab_offset;
        if let Err(error) = self.graph.move_node(drag.node, target) {
            warn!(%error, "dragged node vanished");
            self.drag = None;
            return Vec::new();
        }
        Repaint::graph_layers()
    }

    pub fn drag_ended(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Advances physics one step. Everything may have moved, so both graph
    /// layers are repainted in full.
    pub fn tick(&mut self, dt: f32, extent: Vec2) -> Vec<Repaint> {
        if !self.physics_running() {
            return Vec::new();
        }
        if !physics::step(&mut self.graph, dt, extent) {
            return Vec::new();
        }
        self.refresh_hover();
        Repaint::graph_layers()
    }

    fn refresh_hover(&mut self) -> Vec<NodeId> {
        let radius = self.config.node_radius;
        let hovered: Vec<(NodeId, bool)> = self
            .graph
            .nodes()
            .map(|node| {
                let hovered = self
                    .pointer
                    .is_some_and(|pointer| distance(pointer, node.position) <= radius);
                (node.id, hovered)
            })
            .collect();

        hovered
            .into_iter()
            .filter(|&(id, hovered)| self.graph.set_hover(id, hovered).unwrap_or(false))
            .map(|(id, _)| id)
            .collect()
    }
}

fn position_key(position: Point) -> (u32, u32) {
    (position.x.to_bits(), position.y.to_bits())
}
