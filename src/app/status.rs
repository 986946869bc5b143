use std::collections::VecDeque;

use eframe::egui::Context;
use node_maker::Visualizer;

const FPS_SAMPLE_WINDOW: usize = 180;

#[derive(Default)]
pub(super) struct FrameStats {
    current: f32,
    samples: VecDeque<f32>,
}

impl FrameStats {
    pub(super) fn update(&mut self, ctx: &Context) {
        let dt = ctx.input(|input| input.stable_dt);
        self.record(dt);
    }

    fn record(&mut self, dt: f32) {
        if dt <= f32::EPSILON {
            return;
        }

        self.current = (1.0 / dt).clamp(0.0, 1000.0);
        self.samples.push_back(self.current);
        while self.samples.len() > FPS_SAMPLE_WINDOW {
            self.samples.pop_front();
        }
    }

    fn average(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f32>() / self.samples.len() as f32)
    }
}

pub(super) fn status_text(visualizer: &Visualizer, stats: &FrameStats) -> String {
    let graph = visualizer.graph();
    let interaction = visualizer.interaction();
    let mut parts = vec![
        format!("{} nodes / {} connections", graph.len(), graph.connection_count()),
        format!("{} selected", graph.selection_order().len()),
        format!("edges: {:?}", interaction.config().edge_mode),
    ];

    if interaction.physics_running() {
        parts.push("physics on".to_owned());
    }

    parts.push(format!("FPS {:.0}", stats.current));
    if let Some(avg) = stats.average() {
        parts.push(format!("avg {:.1}", avg));
    }

    parts.join(" | ")
}
