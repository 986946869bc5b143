use eframe::egui::{Pos2, Rect, Vec2, vec2};

pub type Point = Pos2;

pub fn distance(a: Point, b: Point) -> f32 {
    (a - b).length()
}

pub fn disk_bounds(center: Point, radius: f32) -> Rect {
    Rect::from_center_size(center, Vec2::splat(radius * 2.0))
}

/// Bounds of every pixel a stroke of `width` between `start` and `end` can touch.
pub fn segment_bounds(start: Point, end: Point, width: f32) -> Rect {
    let pad = (width * 0.5).max(PixelRect::MIN_HALF_WIDTH) + 1.0;
    Rect::from_two_pos(start, end).expand2(vec2(pad, pad))
}

/// Half-open integer pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    /// Thinner strokes are widened to one pixel so faint edges stay visible.
    pub const MIN_HALF_WIDTH: f32 = 0.5;

    pub fn from_size(width: usize, height: usize) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width as i32,
            y1: height as i32,
        }
    }

    /// Smallest pixel rect covering `rect`.
    pub fn covering(rect: Rect) -> Self {
        Self {
            x0: rect.min.x.floor() as i32,
            y0: rect.min.y.floor() as i32,
            x1: rect.max.x.ceil() as i32,
            y1: rect.max.y.ceil() as i32,
        }
    }

    pub fn intersect(self, other: Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    pub fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub fn width(self) -> usize {
        (self.x1 - self.x0).max(0) as usize
    }

    pub fn height(self) -> usize {
        (self.y1 - self.y0).max(0) as usize
    }
}
