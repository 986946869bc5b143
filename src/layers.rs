use eframe::egui::{Color32, ColorImage, Rect};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geometry::PixelRect;
use crate::raster::Raster;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Backdrop,
    Edges,
    Nodes,
}

impl Layer {
    /// Back-to-front composition order.
    pub const ALL: [Layer; 3] = [Layer::Backdrop, Layer::Edges, Layer::Nodes];

    fn index(self) -> usize {
        match self {
            Layer::Backdrop => 0,
            Layer::Edges => 1,
            Layer::Nodes => 2,
        }
    }
}

/// Owns one raster per [`Layer`] and the frame they are composited into.
///
/// Every visible change goes through one of the `redraw_*` methods, each of
/// which recomposites the whole frame and bumps [`Compositor::revision`].
pub struct Compositor {
    layers: [Raster; 3],
    frame: ColorImage,
    revision: u64,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Starts with zero-sized layers; call [`Compositor::resize`] before use.
    pub fn new() -> Self {
        Self {
            layers: [Raster::new(0, 0), Raster::new(0, 0), Raster::new(0, 0)],
            frame: ColorImage::filled([0, 0], Color32::TRANSPARENT),
            revision: 0,
        }
    }

    /// Reallocates every layer and the frame, discarding their contents.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        self.layers = [
            Raster::new(width, height),
            Raster::new(width, height),
            Raster::new(width, height),
        ];
        self.frame = ColorImage::filled([width, height], Color32::TRANSPARENT);
        info!(width, height, "layers reallocated");
        Ok(())
    }

    pub fn size(&self) -> [usize; 2] {
        self.frame.size
    }

    pub fn is_allocated(&self) -> bool {
        self.frame.size[0] > 0 && self.frame.size[1] > 0
    }

    /// Draws on top of the layer's current contents.
    pub fn redraw_layer(&mut self, layer: Layer, draw: impl FnOnce(&mut Raster)) {
        draw(&mut self.layers[layer.index()]);
        self.publish();
    }

    /// Clears the layer to transparent first.
    pub fn redraw_layer_cleared(&mut self, layer: Layer, draw: impl FnOnce(&mut Raster)) {
        let raster = &mut self.layers[layer.index()];
        raster.set_clip(None);
        raster.clear(Color32::TRANSPARENT);
        draw(raster);
        self.publish();
    }

    /// Clears `region` and runs `draw` clipped to it, leaving the rest of the
    /// layer untouched. Passing the full-layer draw procedure reproduces the
    /// full redraw exactly inside the region.
    pub fn redraw_region(&mut self, layer: Layer, region: Rect, draw: impl FnOnce(&mut Raster)) {
        let raster = &mut self.layers[layer.index()];
        let clip = PixelRect::covering(region).intersect(raster.bounds());
        if clip.is_empty() {
            return;
        }
        debug!(
            ?layer,
            x = clip.x0,
            y = clip.y0,
            width = clip.width(),
            height = clip.height(),
            "region redraw"
        );
        raster.set_clip(Some(clip));
        raster.clear(Color32::TRANSPARENT);
        draw(raster);
        raster.set_clip(None);
        self.publish();
    }

    pub fn layer(&self, layer: Layer) -> &Raster {
        &self.layers[layer.index()]
    }

    pub fn frame(&self) -> &ColorImage {
        &self.frame
    }

    /// Incremented every time a new frame is published.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn publish(&mut self) {
        self.frame.pixels.fill(Color32::TRANSPARENT);
        for layer in Layer::ALL {
            self.layers[layer.index()].composite_onto(&mut self.frame);
        }
        self.revision += 1;
    }
}
