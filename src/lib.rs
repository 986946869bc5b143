//! Interactive node graph canvas.
//!
//! Nodes are placed on a 2D canvas and joined by edges whose alpha and width
//! fall off linearly with distance. Rendering goes through three persistent
//! layers (backdrop, edges, nodes) so that pointer interaction can repaint a
//! bounded region instead of the whole scene, while producing the same pixels
//! a full repaint would.

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod layers;
pub mod physics;
pub mod raster;
pub mod render;
pub mod style;
pub mod util;
pub mod visualizer;

pub use config::{EdgeMode, VisualConfig};
pub use error::{Error, Result};
pub use interaction::{Command, PointerButton};
pub use visualizer::{InputEvent, Visualizer};
