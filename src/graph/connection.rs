use super::NodeId;

/// Unordered node pair. The constructor normalizes endpoint order so derived
/// equality and hashing are order independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Connection {
    low: NodeId,
    high: NodeId,
}

impl Connection {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn endpoints(self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    pub fn touches(self, id: NodeId) -> bool {
        self.low == id || self.high == id
    }

    /// Endpoint opposite to `id`, if `id` is one of them.
    pub fn other(self, id: NodeId) -> Option<NodeId> {
        if self.low == id {
            Some(self.high)
        } else if self.high == id {
            Some(self.low)
        } else {
            None
        }
    }
}
