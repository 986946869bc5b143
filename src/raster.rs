//! CPU drawing surface backing each layer.
//!
//! Pixels are premultiplied `Color32` values and all drawing is plain integer
//! "over" blending, so the same sequence of draw calls always produces the same
//! bytes. Every primitive honours the clip rectangle; bounded-region redraws
//! rely on that to reproduce exactly what a full redraw puts inside the region.

use eframe::egui::{Color32, ColorImage};

use crate::geometry::{PixelRect, Point};

pub struct Raster {
    image: ColorImage,
    clip: PixelRect,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: ColorImage::filled([width, height], Color32::TRANSPARENT),
            clip: PixelRect::from_size(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.image.size[0]
    }

    pub fn height(&self) -> usize {
        self.image.size[1]
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::from_size(self.width(), self.height())
    }

    pub fn clip(&self) -> PixelRect {
        self.clip
    }

    /// Restricts drawing to `clip`; `None` restores the whole raster.
    pub fn set_clip(&mut self, clip: Option<PixelRect>) {
        let bounds = self.bounds();
        self.clip = clip.map_or(bounds, |clip| clip.intersect(bounds));
    }

    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color32 {
        self.image.pixels[y * self.width() + x]
    }

    /// Overwrites every pixel inside the clip with `color`.
    pub fn clear(&mut self, color: Color32) {
        let clip = self.clip;
        if clip.is_empty() {
            return;
        }
        let width = self.width();
        for y in clip.y0..clip.y1 {
            let row = y as usize * width;
            self.image.pixels[row + clip.x0 as usize..row + clip.x1 as usize].fill(color);
        }
    }

    /// Strokes a round-capped line. `alpha` is on the 0..=255 scale and widths
    /// under one pixel are drawn one pixel wide.
    pub fn draw_line(&mut self, start: Point, end: Point, color: Color32, alpha: f32, width: f32) {
        let alpha = alpha.round().clamp(0.0, 255.0) as u8;
        if alpha == 0 || width <= 0.0 {
            return;
        }
        let source = with_alpha(color, alpha);
        let half_width = (width * 0.5).max(PixelRect::MIN_HALF_WIDTH);
        self.fill_capsule(start, end, half_width, source);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color32) {
        if radius <= 0.0 {
            return;
        }
        self.fill_capsule(center, center, radius, color);
    }

    /// Blends this raster over `target`, which must have the same size.
    pub fn composite_onto(&self, target: &mut ColorImage) {
        debug_assert_eq!(target.size, self.image.size);
        for (destination, source) in target.pixels.iter_mut().zip(&self.image.pixels) {
            *destination = blend_over(*destination, *source);
        }
    }

    fn fill_capsule(&mut self, a: Point, b: Point, half_width: f32, color: Color32) {
        let clip = self.clip;
        if clip.is_empty() || color.a() == 0 {
            return;
        }

        let row_start = ((a.y.min(b.y) - half_width).floor() as i32).max(clip.y0);
        let row_end = ((a.y.max(b.y) + half_width).ceil() as i32).min(clip.y1);
        let width = self.width();

        for y in row_start..row_end {
            let Some((lo, hi)) = capsule_span(a, b, half_width, y as f32 + 0.5) else {
                continue;
            };
            let x_start = ((lo - 0.5).ceil() as i32).max(clip.x0);
            let x_end = ((hi - 0.5).floor() as i32 + 1).min(clip.x1);
            let row = y as usize * width;
            for x in x_start..x_end {
                let pixel = &mut self.image.pixels[row + x as usize];
                *pixel = blend_over(*pixel, color);
            }
        }
    }
}

/// Premultiplies an opaque `color` by `alpha`.
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    let scale = |channel: u8| ((channel as u16 * alpha as u16 + 127) / 255) as u8;
    Color32::from_rgba_premultiplied(scale(color.r()), scale(color.g()), scale(color.b()), alpha)
}

/// Premultiplied source-over.
pub fn blend_over(destination: Color32, source: Color32) -> Color32 {
    match source.a() {
        255 => source,
        0 => destination,
        alpha => {
            let inverse = 255 - alpha as u16;
            let channel = |source: u8, destination: u8| -> u8 {
                let kept = (destination as u16 * inverse + 127) / 255;
                (source as u16 + kept).min(255) as u8
            };
            Color32::from_rgba_premultiplied(
                channel(source.r(), destination.r()),
                channel(source.g(), destination.g()),
                channel(source.b(), destination.b()),
                channel(alpha, destination.a()),
            )
        }
    }
}

fn hull(span: Option<(f32, f32)>, lo: f32, hi: f32) -> Option<(f32, f32)> {
    if lo > hi {
        return span;
    }
    Some(match span {
        Some((current_lo, current_hi)) => (current_lo.min(lo), current_hi.max(hi)),
        None => (lo, hi),
    })
}

/// Horizontal extent of the capsule around segment `a`-`b` on the row whose
/// center is at `row_y`. The capsule is convex, so the extent is one interval:
/// the hull of the two end disks and the swept rectangle.
fn capsule_span(a: Point, b: Point, half_width: f32, row_y: f32) -> Option<(f32, f32)> {
    let mut span = None;

    for cap in [a, b] {
        let dy = row_y - cap.y;
        let remaining = half_width * half_width - dy * dy;
        if remaining >= 0.0 {
            let reach = remaining.sqrt();
            span = hull(span, cap.x - reach, cap.x + reach);
        }
    }

    let d = b - a;
    let length_sq = d.length_sq();
    if length_sq <= f32::EPSILON {
        return span;
    }
    let length = length_sq.sqrt();
    let offset_y = row_y - a.y;
    let mut lo = f32::NEG_INFINITY;
    let mut hi = f32::INFINITY;

    // Projection onto the segment within [0, length_sq].
    if d.x.abs() > f32::EPSILON {
        let x0 = a.x - offset_y * d.y / d.x;
        let x1 = a.x + (length_sq - offset_y * d.y) / d.x;
        lo = lo.max(x0.min(x1));
        hi = hi.min(x0.max(x1));
    } else if !(0.0..=length_sq).contains(&(offset_y * d.y)) {
        return span;
    }

    // Perpendicular distance within the half width.
    let reach = half_width * length;
    if d.y.abs() > f32::EPSILON {
        let x0 = a.x + (offset_y * d.x - reach) / d.y;
        let x1 = a.x + (offset_y * d.x + reach) / d.y;
        lo = lo.max(x0.min(x1));
        hi = hi.min(x0.max(x1));
    } else if (offset_y * d.x).abs() > reach {
        return span;
    }

    hull(span, lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn painted(raster: &Raster) -> usize {
        raster
            .image()
            .pixels
            .iter()
            .filter(|pixel| pixel.a() > 0)
            .count()
    }

    #[test]
    fn circle_covers_pixel_centers_inside_radius() {
        let mut raster = Raster::new(20, 20);
        raster.fill_circle(pos2(10.0, 10.0), 3.0, Color32::WHITE);
        assert_eq!(raster.pixel(10, 10), Color32::WHITE);
        assert_eq!(raster.pixel(7, 10), Color32::WHITE);
        assert_eq!(raster.pixel(6, 10), Color32::TRANSPARENT);
        assert_eq!(raster.pixel(10, 13), Color32::TRANSPARENT);
        assert_eq!(raster.pixel(10, 12), Color32::WHITE);
    }

    #[test]
    fn horizontal_line_has_requested_thickness() {
        let mut raster = Raster::new(40, 20);
        raster.draw_line(pos2(5.0, 10.0), pos2(30.0, 10.0), Color32::WHITE, 255.0, 4.0);
        for y in 8..12 {
            assert_eq!(raster.pixel(15, y), Color32::WHITE, "row {y}");
        }
        assert_eq!(raster.pixel(15, 7), Color32::TRANSPARENT);
        assert_eq!(raster.pixel(15, 12), Color32::TRANSPARENT);
    }

    #[test]
    fn diagonal_line_is_continuous() {
        let mut raster = Raster::new(32, 32);
        raster.draw_line(pos2(2.0, 2.0), pos2(29.0, 29.0), Color32::WHITE, 255.0, 1.0);
        for i in 3..28 {
            assert!(raster.pixel(i, i).a() > 0, "gap at {i}");
        }
        assert_eq!(raster.pixel(28, 3), Color32::TRANSPARENT);
    }

    #[test]
    fn lines_blend_each_pixel_once() {
        let mut raster = Raster::new(20, 20);
        raster.draw_line(pos2(2.0, 10.0), pos2(18.0, 10.0), Color32::WHITE, 100.0, 3.0);
        assert_eq!(raster.pixel(10, 10).a(), 100);
    }

    #[test]
    fn zero_alpha_or_width_draws_nothing() {
        let mut raster = Raster::new(20, 20);
        raster.draw_line(pos2(0.0, 0.0), pos2(19.0, 19.0), Color32::WHITE, 0.0, 3.0);
        raster.draw_line(pos2(0.0, 0.0), pos2(19.0, 19.0), Color32::WHITE, 100.0, 0.0);
        assert_eq!(painted(&raster), 0);
    }

    #[test]
    fn clip_limits_drawing_and_clearing() {
        let mut raster = Raster::new(20, 20);
        raster.clear(Color32::RED);
        raster.set_clip(Some(PixelRect {
            x0: 5,
            y0: 5,
            x1: 10,
            y1: 10,
        }));
        raster.clear(Color32::TRANSPARENT);
        raster.fill_circle(pos2(10.0, 10.0), 8.0, Color32::BLUE);
        raster.set_clip(None);

        assert_eq!(raster.pixel(7, 7), Color32::BLUE);
        assert_eq!(raster.pixel(12, 12), Color32::RED);
        assert_eq!(raster.pixel(0, 0), Color32::RED);
    }

    #[test]
    fn clip_is_clamped_to_bounds() {
        let mut raster = Raster::new(10, 10);
        raster.set_clip(Some(PixelRect {
            x0: -5,
            y0: -5,
            x1: 50,
            y1: 4,
        }));
        assert_eq!(
            raster.clip(),
            PixelRect {
                x0: 0,
                y0: 0,
                x1: 10,
                y1: 4
            }
        );
        raster.clear(Color32::WHITE);
        assert_eq!(painted(&raster), 40);
    }

    #[test]
    fn over_blending_matches_reference() {
        let back = Color32::from_rgb(0, 0, 0);
        let front = with_alpha(Color32::from_rgb(0, 255, 255), 100);
        assert_eq!(front.g(), 100);
        let blended = blend_over(back, front);
        assert_eq!(blended.a(), 255);
        assert_eq!(blended.r(), 0);
        assert_eq!(blended.g(), 100);
        assert_eq!(blend_over(back, Color32::TRANSPARENT), back);
        assert_eq!(blend_over(back, Color32::WHITE), Color32::WHITE);
    }

    #[test]
    fn composite_stacks_layers() {
        let mut bottom = Raster::new(4, 4);
        bottom.clear(Color32::BLACK);
        let mut top = Raster::new(4, 4);
        top.fill_circle(pos2(0.5, 0.5), 0.5, Color32::WHITE);

        let mut frame = ColorImage::filled([4, 4], Color32::TRANSPARENT);
        bottom.composite_onto(&mut frame);
        top.composite_onto(&mut frame);
        assert_eq!(frame.pixels[0], Color32::WHITE);
        assert_eq!(frame.pixels[5], Color32::BLACK);
    }
}
