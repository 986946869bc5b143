use std::time::Duration;

use eframe::egui::{
    self, Color32, Context, Pos2, Rect, Sense, TextureHandle, TextureOptions, Ui, pos2,
};
use node_maker::{InputEvent, VisualConfig, Visualizer};
use tracing::warn;

mod clock;
mod input;
mod status;

use clock::{TICK_SECONDS, TickClock};
use status::{FrameStats, status_text};

const TEXTURE_NAME: &str = "node-maker-canvas";

pub struct NodeMakerApp {
    visualizer: Visualizer,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    clock: TickClock,
    last_pointer: Option<Pos2>,
    stats: FrameStats,
}

impl NodeMakerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: VisualConfig, physics: bool) -> Self {
        Self {
            visualizer: Visualizer::new(config, physics),
            texture: None,
            uploaded_revision: None,
            clock: TickClock::default(),
            last_pointer: None,
            stats: FrameStats::default(),
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        if let Err(error) = self.visualizer.handle(event) {
            warn!(%error, ?event, "input event rejected");
        }
    }

    fn show_canvas(&mut self, ui: &mut Ui) {
        let (canvas, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        let width = canvas.width().floor() as usize;
        let height = canvas.height().floor() as usize;
        if width > 0 && height > 0 {
            self.dispatch(InputEvent::Resized { width, height });
        }

        for event in input::collect_events(ui, &response, canvas, &mut self.last_pointer) {
            self.dispatch(event);
        }

        self.advance_physics(ui.ctx());
        self.upload_frame(ui.ctx());

        if let Some(texture) = &self.texture {
            let size = texture.size_vec2();
            let image_rect = Rect::from_min_size(canvas.min, size);
            ui.painter().with_clip_rect(canvas).image(
                texture.id(),
                image_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }

    fn advance_physics(&mut self, ctx: &Context) {
        if !self.visualizer.interaction().physics_running() {
            self.clock.reset();
            return;
        }
        let minimized = ctx.input(|input| input.viewport().minimized.unwrap_or(false));
        if minimized {
            self.clock.reset();
            ctx.request_repaint_after(Duration::from_millis(100));
            return;
        }

        let steps = self.clock.advance(ctx.input(|input| input.stable_dt));
        for _ in 0..steps {
            self.visualizer.tick(TICK_SECONDS);
        }
        ctx.request_repaint_after(Duration::from_secs_f32(TICK_SECONDS));
    }

    fn upload_frame(&mut self, ctx: &Context) {
        if !self.visualizer.compositor().is_allocated() {
            return;
        }
        let revision = self.visualizer.revision();
        if self.uploaded_revision == Some(revision) {
            return;
        }

        let frame = self.visualizer.frame().clone();
        match &mut self.texture {
            Some(texture) => texture.set(frame, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture(TEXTURE_NAME, frame, TextureOptions::NEAREST));
            }
        }
        self.uploaded_revision = Some(revision);
    }
}

impl eframe::App for NodeMakerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.stats.update(ctx);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(status_text(&self.visualizer, &self.stats));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak("click: place/select | right click: remove | A/B: bind | Esc: clear");
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.show_canvas(ui));
    }
}
