use std::fmt;

use eframe::egui::Vec2;

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    None,
    Hover,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    None,
    Selected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    pub velocity: Vec2,
    pub hover: HoverState,
    pub previous_hover: HoverState,
    pub selection: SelectionState,
}

impl Node {
    pub(super) fn new(id: NodeId, position: Point, velocity: Vec2) -> Self {
        Self {
            id,
            position,
            velocity,
            hover: HoverState::None,
            previous_hover: HoverState::None,
            selection: SelectionState::None,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selection == SelectionState::Selected
    }

    pub fn is_hovered(&self) -> bool {
        self.hover == HoverState::Hover
    }

    /// Commits the current hover state, returning whether it differed from the
    /// previously committed one.
    pub(super) fn commit_hover(&mut self) -> bool {
        if self.hover != self.previous_hover {
            self.previous_hover = self.hover;
            true
        } else {
            false
        }
    }
}
