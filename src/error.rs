use thiserror::Error;

use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The node was removed or never existed.
    #[error("node {0} not found")]
    NotFound(NodeId),

    #[error("cannot connect node {0} to itself")]
    SelfLoop(NodeId),

    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
