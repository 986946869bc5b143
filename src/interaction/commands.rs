use tracing::{debug, info, warn};

use super::Interaction;
use crate::graph::NodeId;
use crate::render::Repaint;

/// Keyboard-level commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Connect every selected pair, then clear the selection.
    BindPairwise,
    /// Connect the primary (first selected) node to every other selected node,
    /// then clear the selection.
    BindToPrimary,
    ClearSelection,
    RemoveSelected,
    TogglePhysics,
}

impl Interaction {
    pub fn command(&mut self, command: Command) -> Vec<Repaint> {
        debug!(?command, "command");
        match command {
            Command::BindPairwise => self.bind_pairwise(),
            Command::BindToPrimary => self.bind_to_primary(),
            Command::ClearSelection => self.clear_selection(),
            Command::RemoveSelected => {
                let selected = self.graph.selection_order().to_vec();
                self.remove_nodes(&selected)
            }
            Command::TogglePhysics => {
                self.physics_paused = !self.physics_paused;
                info!(running = self.physics_running(), "physics toggled");
                Vec::new()
            }
        }
    }

    /// New edges can span the whole canvas, so both graph layers are repainted
    /// in full rather than by region.
    pub fn bind_pairwise(&mut self) -> Vec<Repaint> {
        let selected = self.graph.selection_order().to_vec();
        let mut pairs = Vec::new();
        for (index, &a) in selected.iter().enumerate() {
            for &b in &selected[index + 1..] {
                pairs.push((a, b));
            }
        }
        self.bind(&pairs)
    }

    pub fn bind_to_primary(&mut self) -> Vec<Repaint> {
        let selected = self.graph.selection_order();
        let pairs: Vec<(NodeId, NodeId)> = match selected.split_first() {
            Some((&primary, rest)) => rest.iter().map(|&other| (primary, other)).collect(),
            None => Vec::new(),
        };
        self.bind(&pairs)
    }

    pub fn clear_selection(&mut self) -> Vec<Repaint> {
        if self.graph.clear_selection().is_empty() {
            return Vec::new();
        }
        Repaint::graph_layers()
    }

    fn bind(&mut self, pairs: &[(NodeId, NodeId)]) -> Vec<Repaint> {
        let mut created = 0usize;
        for &(a, b) in pairs {
            match self.graph.connect(a, b) {
                Ok(true) => created += 1,
                Ok(false) => {}
                Err(error) => warn!(%error, "bind skipped a pair"),
            }
        }
        debug!(requested = pairs.len(), created, "selection bound");
        self.clear_selection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisualConfig;
    use crate::graph::{Connection, SelectionState};
    use eframe::egui::pos2;

    fn selected_three() -> (Interaction, [NodeId; 3]) {
        let mut interaction = Interaction::new(VisualConfig::default(), false);
        for x in [50.0, 150.0, 250.0] {
            interaction.place_node(pos2(x, 50.0));
        }
        let ids = [NodeId(1), NodeId(2), NodeId(3)];
        for id in ids {
            interaction.toggle_selection(id);
        }
        (interaction, ids)
    }

    fn connections(interaction: &Interaction) -> Vec<Connection> {
        interaction.graph().connections().collect()
    }

    #[test]
    fn bind_pairwise_connects_every_pair_and_clears_selection() {
        let (mut interaction, [a, b, c]) = selected_three();
        let repaints = interaction.command(Command::BindPairwise);

        assert_eq!(
            connections(&interaction),
            vec![
                Connection::new(a, b),
                Connection::new(a, c),
                Connection::new(b, c)
            ]
        );
        assert!(interaction.graph().selection_order().is_empty());
        assert!(
            interaction
                .graph()
                .nodes()
                .all(|node| node.selection == SelectionState::None)
        );
        assert_eq!(repaints, Repaint::graph_layers());
    }

    #[test]
    fn bind_to_primary_uses_first_selected() {
        let (mut interaction, [a, b, c]) = selected_three();
        interaction.command(Command::BindToPrimary);

        assert_eq!(
            connections(&interaction),
            vec![Connection::new(a, b), Connection::new(a, c)]
        );
        assert!(!interaction.graph().is_connected(b, c));
        assert!(interaction.graph().selection_order().is_empty());
    }

    #[test]
    fn primary_follows_selection_order_not_id() {
        let mut interaction = Interaction::new(VisualConfig::default(), false);
        for x in [50.0, 150.0, 250.0] {
            interaction.place_node(pos2(x, 50.0));
        }
        for id in [NodeId(3), NodeId(1), NodeId(2)] {
            interaction.toggle_selection(id);
        }
        interaction.bind_to_primary();
        assert!(interaction.graph().is_connected(NodeId(3), NodeId(1)));
        assert!(interaction.graph().is_connected(NodeId(3), NodeId(2)));
        assert!(!interaction.graph().is_connected(NodeId(1), NodeId(2)));
    }

    #[test]
    fn binding_existing_pairs_is_not_an_error() {
        let (mut interaction, [a, b, _]) = selected_three();
        interaction.graph.connect(a, b).unwrap();
        interaction.bind_pairwise();
        assert_eq!(interaction.graph().connection_count(), 3);
    }

    #[test]
    fn empty_selection_binds_nothing() {
        let mut interaction = Interaction::new(VisualConfig::default(), false);
        assert!(interaction.command(Command::BindPairwise).is_empty());
        assert!(interaction.command(Command::BindToPrimary).is_empty());
    }

    #[test]
    fn remove_selected_drops_only_selected_nodes() {
        let (mut interaction, [a, b, c]) = selected_three();
        interaction.toggle_selection(b);
        interaction.command(Command::RemoveSelected);
        assert!(!interaction.graph().contains(a));
        assert!(interaction.graph().contains(b));
        assert!(!interaction.graph().contains(c));
    }

    #[test]
    fn toggle_physics_pauses_ticks() {
        let mut interaction = Interaction::new(VisualConfig::default(), true);
        interaction.place_node(pos2(100.0, 100.0));
        interaction.command(Command::TogglePhysics);
        assert!(!interaction.physics_running());
        assert!(
            interaction
                .tick(0.01, eframe::egui::vec2(800.0, 600.0))
                .is_empty()
        );
    }
}
