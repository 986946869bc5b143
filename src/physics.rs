use eframe::egui::Vec2;

use crate::graph::Graph;

/// Advances every node by `velocity * dt`, reflecting off the box
/// `[0, extent.x] x [0, extent.y]` one axis at a time without energy loss.
/// Returns whether any node moved.
pub fn step(graph: &mut Graph, dt: f32, extent: Vec2) -> bool {
    let mut any_motion = false;
    for node in graph.nodes_mut() {
        if node.velocity == Vec2::ZERO {
            continue;
        }
        node.position += node.velocity * dt;

        let (x, vx) = reflect(node.position.x, node.velocity.x, extent.x);
        let (y, vy) = reflect(node.position.y, node.velocity.y, extent.y);
        node.position.x = x;
        node.position.y = y;
        node.velocity.x = vx;
        node.velocity.y = vy;
        any_motion = true;
    }
    any_motion
}

fn reflect(coordinate: f32, velocity: f32, extent: f32) -> (f32, f32) {
    if coordinate < 0.0 {
        (0.0, -velocity)
    } else if coordinate > extent {
        (extent, -velocity)
    } else {
        (coordinate, velocity)
    }
}
