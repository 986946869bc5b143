//! Id-indexed node store and the unordered connection set.

mod connection;
mod node;

use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Vec2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{Point, distance};

pub use connection::Connection;
pub use node::{HoverState, Node, NodeId, SelectionState};

#[derive(Debug)]
pub struct Graph {
    next_id: u64,
    nodes: BTreeMap<NodeId, Node>,
    connections: BTreeSet<Connection>,
    selection_order: Vec<NodeId>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            nodes: BTreeMap::new(),
            connections: BTreeSet::new(),
            selection_order: Vec::new(),
        }
    }

    pub fn add_node(&mut self, position: Point) -> NodeId {
        self.add_node_with_velocity(position, Vec2::ZERO)
    }

    pub fn add_node_with_velocity(&mut self, position: Point, velocity: Vec2) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, position, velocity));
        debug!(%id, x = position.x, y = position.y, "node added");
        id
    }

    /// Removes the node together with its selection entry and every incident
    /// connection.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        let node = self.nodes.remove(&id).ok_or(Error::NotFound(id))?;
        self.selection_order.retain(|selected| *selected != id);
        let before = self.connections.len();
        self.connections.retain(|connection| !connection.touches(id));
        debug!(
            %id,
            dropped_connections = before - self.connections.len(),
            "node removed"
        );
        Ok(node)
    }

    /// Returns `Ok(false)` when the pair is already connected.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        if a == b {
            return Err(Error::SelfLoop(a));
        }
        self.require(a)?;
        self.require(b)?;
        Ok(self.connections.insert(Connection::new(a, b)))
    }

    pub fn disconnect(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        self.require(a)?;
        self.require(b)?;
        Ok(self.connections.remove(&Connection::new(a, b)))
    }

    pub fn neighbors(&self, id: NodeId) -> Vec<Connection> {
        self.connections
            .iter()
            .copied()
            .filter(|connection| connection.touches(id))
            .collect()
    }

    /// Sets the hover flag and reports whether it changed since the last
    /// committed hover state.
    pub fn set_hover(&mut self, id: NodeId, hovered: bool) -> Result<bool> {
        let node = self.nodes.get_mut(&id).ok_or(Error::NotFound(id))?;
        node.hover = if hovered {
            HoverState::Hover
        } else {
            HoverState::None
        };
        Ok(node.commit_hover())
    }

    pub fn toggle_selection(&mut self, id: NodeId) -> Result<SelectionState> {
        let node = self.nodes.get_mut(&id).ok_or(Error::NotFound(id))?;
        node.selection = match node.selection {
            SelectionState::None => {
                self.selection_order.push(id);
                SelectionState::Selected
            }
            SelectionState::Selected => {
                self.selection_order.retain(|selected| *selected != id);
                SelectionState::None
            }
        };
        Ok(node.selection)
    }

    pub fn clear_selection(&mut self) -> Vec<NodeId> {
        let cleared = std::mem::take(&mut self.selection_order);
        for id in &cleared {
            if let Some(node) = self.nodes.get_mut(id) {
                node.selection = SelectionState::None;
            }
        }
        cleared
    }

    pub fn move_node(&mut self, id: NodeId, position: Point) -> Result<()> {
        let node = self.nodes.get_mut(&id).ok_or(Error::NotFound(id))?;
        node.position = position;
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in ascending id order, which is also their paint order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        self.connections.iter().copied()
    }

    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.connections.contains(&Connection::new(a, b))
    }

    pub fn selection_order(&self) -> &[NodeId] {
        &self.selection_order
    }

    pub fn primary(&self) -> Option<NodeId> {
        self.selection_order.first().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Ids of every node whose disk of `radius` contains `point`, ascending.
    pub fn hit_test(&self, point: Point, radius: f32) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| distance(node.position, point) <= radius)
            .map(|node| node.id)
            .collect()
    }

    fn require(&self, id: NodeId) -> Result<()> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::NotFound(id))
        }
    }
}
