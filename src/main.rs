mod app;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use node_maker::{EdgeMode, VisualConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Initial window width in points.
    #[arg(long, default_value_t = 1024.0)]
    width: f32,

    /// Initial window height in points.
    #[arg(long, default_value_t = 768.0)]
    height: f32,

    /// Launch placed nodes and let them bounce around the canvas.
    #[arg(long)]
    physics: bool,

    /// Which node pairs get edges; overrides the config file.
    #[arg(long, value_enum)]
    edges: Option<EdgeMode>,

    /// JSON file with visual tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let mut config = match &args.config {
        Some(path) => VisualConfig::load(path)?,
        None => VisualConfig::default(),
    };
    if let Some(edge_mode) = args.edges {
        config.edge_mode = edge_mode;
    }
    info!(edge_mode = ?config.edge_mode, physics = args.physics, "starting");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    let physics = args.physics;
    eframe::run_native(
        "node-maker",
        options,
        Box::new(move |cc| Ok(Box::new(app::NodeMakerApp::new(cc, config, physics)))),
    )
    .map_err(|error| anyhow!("window loop failed: {error}"))
}
