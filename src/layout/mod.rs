pub mod squarify;

pub use squarify::Squarified;

/// A positioned rectangle in pixel space, as handed out by the layout.
/// The label engine only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TileRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Copy with NaN coordinates zeroed and negative/NaN extents clamped to 0.
    pub fn sanitized(&self) -> Self {
        let coord = |v: f32| if v.is_nan() { 0.0 } else { v };
        let extent = |v: f32| if v.is_nan() { 0.0 } else { v.max(0.0) };
        Self {
            x: coord(self.x),
            y: coord(self.y),
            width: extent(self.width),
            height: extent(self.height),
        }
    }

    /// Shrink by `pad` on every side, never below zero size.
    pub fn inset(&self, pad: f32) -> Self {
        let pad = pad.max(0.0);
        Self {
            x: self.x + pad,
            y: self.y + pad,
            width: (self.width - 2.0 * pad).max(0.0),
            height: (self.height - 2.0 * pad).max(0.0),
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Rectangle-layout collaborator: one rectangle per size, in input order.
///
/// The label engine never calls back into a layout; it only consumes the
/// rectangles, so any squarification strategy can sit behind this trait.
pub trait TileLayout {
    fn layout(&self, sizes: &[f64], bounds: TileRect) -> Vec<TileRect>;
}
