use eframe::egui::{ColorImage, vec2};
use tracing::{debug, info};

use crate::config::VisualConfig;
use crate::error::Result;
use crate::geometry::Point;
use crate::graph::Graph;
use crate::interaction::{Command, Interaction, PointerButton};
use crate::layers::Compositor;
use crate::render::{Repaint, coalesce};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// `None` when the pointer left the canvas.
    PointerMoved(Option<Point>),
    Click { position: Point, button: PointerButton },
    DragStarted(Point),
    Dragged(Point),
    DragEnded,
    Command(Command),
    Resized { width: usize, height: usize },
}

/// Event-facing entry point: routes input through the interaction state and
/// executes the resulting repaints on the compositor.
pub struct Visualizer {
    interaction: Interaction,
    compositor: Compositor,
}

impl Visualizer {
    pub fn new(config: VisualConfig, physics: bool) -> Self {
        Self {
            interaction: Interaction::new(config, physics),
            compositor: Compositor::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        self.interaction.graph()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn frame(&self) -> &ColorImage {
        self.compositor.frame()
    }

    pub fn revision(&self) -> u64 {
        self.compositor.revision()
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<()> {
        let repaints = match event {
            InputEvent::PointerMoved(pointer) => self.interaction.pointer_moved(pointer),
            InputEvent::Click { position, button } => self.interaction.click(position, button),
            InputEvent::DragStarted(position) => {
                self.interaction.drag_started(position);
                Vec::new()
            }
            InputEvent::Dragged(position) => self.interaction.dragged(position),
            InputEvent::DragEnded => {
                self.interaction.drag_ended();
                Vec::new()
            }
            InputEvent::Command(command) => self.interaction.command(command),
            InputEvent::Resized { width, height } => return self.resize(width, height),
        };
        self.execute(repaints);
        Ok(())
    }

    /// Reallocates the layers and regenerates all of them before returning.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        if self.compositor.is_allocated() && self.compositor.size() == [width, height] {
            return Ok(());
        }
        self.compositor.resize(width, height)?;
        info!(width, height, "canvas resized");
        self.repaint_all();
        Ok(())
    }

    pub fn repaint_all(&mut self) {
        self.execute(Repaint::full_scene());
    }

    /// One physics step of `dt` seconds inside the current canvas bounds.
    /// Returns whether anything was repainted. Does nothing before the first
    /// resize, since there are no bounds to move within yet.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.compositor.is_allocated() {
            return false;
        }
        let [width, height] = self.compositor.size();
        let repaints = self
            .interaction
            .tick(dt, vec2(width as f32, height as f32));
        let repainted = !repaints.is_empty();
        self.execute(repaints);
        repainted
    }

    fn execute(&mut self, repaints: Vec<Repaint>) {
        if repaints.is_empty() || !self.compositor.is_allocated() {
            return;
        }
        let repaints = coalesce(repaints);
        debug!(count = repaints.len(), "executing repaints");
        let painter = self.interaction.painter();
        for repaint in repaints {
            painter.apply(&mut self.compositor, repaint);
        }
    }
}
