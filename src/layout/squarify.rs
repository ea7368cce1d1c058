use super::{TileLayout, TileRect};
use crate::config::TreemapConfig;

/// Squarified treemap layout with a configurable target aspect ratio.
///
/// Stand-in for the charting library's layout so the binaries can produce real
/// rectangles; `ratio > 1` favours wider-than-tall tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Squarified {
    pub aspect_ratio: f64,
}

impl Default for Squarified {
    fn default() -> Self {
        Self { aspect_ratio: 3.0 }
    }
}

impl Squarified {
    pub fn from_config(config: &TreemapConfig) -> Self {
        Self {
            aspect_ratio: config.aspect_ratio,
        }
    }
}

impl TileLayout for Squarified {
    fn layout(&self, sizes: &[f64], bounds: TileRect) -> Vec<TileRect> {
        let bounds = bounds.sanitized();
        let mut out = vec![TileRect::new(bounds.x, bounds.y, 0.0, 0.0); sizes.len()];

        let weights: Vec<f64> = sizes
            .iter()
            .map(|&s| if s.is_finite() && s > 0.0 { s } else { 0.0 })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 || bounds.is_empty() {
            return out;
        }

        // Collect + sort by size descending (stable on ties), zero sizes stay collapsed
        let mut order: Vec<usize> = (0..weights.len()).filter(|&i| weights[i] > 0.0).collect();
        order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));

        let scale = (bounds.width as f64 * bounds.height as f64) / total;
        let areas: Vec<f64> = order.iter().map(|&i| weights[i] * scale).collect();

        let ratio = if self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0 {
            self.aspect_ratio
        } else {
            1.0
        };
        let positioned = squarify(
            &areas,
            bounds.x as f64,
            bounds.y as f64,
            bounds.width as f64,
            bounds.height as f64,
            ratio,
        );

        for (&slot, pos) in order.iter().zip(positioned) {
            out[slot] = TileRect::new(pos.x as f32, pos.y as f32, pos.w as f32, pos.h as f32);
        }

        tracing::debug!(
            "Squarified {} tiles ({} non-empty) into {:.0}x{:.0}",
            sizes.len(),
            order.len(),
            bounds.width,
            bounds.height
        );
        out
    }
}

#[derive(Debug, Clone, Copy)]
struct Positioned {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Lay out descending `areas` row by row; emits exactly one rect per area.
fn squarify(areas: &[f64], mut x: f64, mut y: f64, mut w: f64, mut h: f64, ratio: f64) -> Vec<Positioned> {
    let mut result = Vec::with_capacity(areas.len());
    let mut start = 0;

    while start < areas.len() {
        // Leftover space exhausted by float drift: collapse the rest
        if w <= 1e-9 || h <= 1e-9 {
            result.extend(areas[start..].iter().map(|_| Positioned { x, y, w: 0.0, h: 0.0 }));
            break;
        }

        let side = w.min(h);

        // Grow the row while the worst aspect ratio keeps improving
        let mut end = start + 1;
        let mut row_sum = areas[start];
        let mut best = worst_aspect_ratio(&areas[start..end], row_sum, side, ratio);
        while end < areas.len() {
            let sum = row_sum + areas[end];
            let score = worst_aspect_ratio(&areas[start..=end], sum, side, ratio);
            if score > best {
                break;
            }
            best = score;
            row_sum = sum;
            end += 1;
        }

        // The row spans the short side; its thickness eats into the long side.
        let thickness = (row_sum / side).min(w.max(h));
        let column = w >= h;

        let mut offset = 0.0;
        for &area in &areas[start..end] {
            let length = if thickness > 0.0 { area / thickness } else { 0.0 };
            let pos = if column {
                Positioned { x, y: y + offset, w: thickness, h: length }
            } else {
                Positioned { x: x + offset, y, w: length, h: thickness }
            };
            result.push(pos);
            offset += length;
        }

        if column {
            x += thickness;
            w = (w - thickness).max(0.0);
        } else {
            y += thickness;
            h = (h - thickness).max(0.0);
        }
        start = end;
    }

    result
}

fn worst_aspect_ratio(row: &[f64], sum: f64, side: f64, ratio: f64) -> f64 {
    if row.is_empty() || sum <= 0.0 || side <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let max_r = row.iter().copied().fold(0.0, f64::max);
    let min_r = row.iter().copied().fold(f64::INFINITY, f64::min);
    let a = (side_sq * max_r * ratio) / sum_sq;
    let b = sum_sq / (side_sq * min_r * ratio);
    a.max(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> TileRect {
        TileRect::new(0.0, 0.0, 1920.0, 1080.0)
    }

    #[test]
    fn single_item_fills_viewport_without_axis_swap() {
        let rects = Squarified::default().layout(&[42.0], bounds());
        assert_eq!(rects.len(), 1);
        let r = rects[0];
        assert!((r.width - 1920.0).abs() < 1e-3);
        assert!((r.height - 1080.0).abs() < 1e-3);
    }

    #[test]
    fn layout_preserves_area_for_simple_case() {
        let rects = Squarified::default().layout(&[400.0, 300.0, 200.0, 100.0], TileRect::new(0.0, 0.0, 50.0, 20.0));
        let total_out: f32 = rects.iter().map(|r| r.area()).sum();
        assert!((total_out - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn output_follows_input_order() {
        let rects = Squarified::default().layout(&[1.0, 4.0, 2.0], bounds());
        assert!(rects[1].area() > rects[2].area());
        assert!(rects[2].area() > rects[0].area());
    }

    #[test]
    fn zero_and_invalid_sizes_collapse() {
        let rects = Squarified::default().layout(&[0.0, 5.0, f64::NAN, -3.0], bounds());
        assert_eq!(rects.len(), 4);
        assert!(rects[0].is_empty());
        assert!(rects[2].is_empty());
        assert!(rects[3].is_empty());
        assert!((rects[1].area() - 1920.0 * 1080.0).abs() < 1.0);
    }

    #[test]
    fn tiles_stay_inside_bounds() {
        let b = TileRect::new(12.0, 12.0, 600.0, 276.0);
        let sizes = [900.0, 610.0, 450.0, 300.0, 220.0, 180.0, 90.0, 40.0, 12.0, 3.0];
        for r in Squarified::default().layout(&sizes, b) {
            assert!(r.x >= b.x - 1e-3 && r.y >= b.y - 1e-3);
            assert!(r.x + r.width <= b.x + b.width + 1e-2);
            assert!(r.y + r.height <= b.y + b.height + 1e-2);
        }
    }

    #[test]
    fn empty_bounds_yield_empty_tiles() {
        let rects = Squarified::default().layout(&[1.0, 2.0], TileRect::new(0.0, 0.0, 0.0, 100.0));
        assert!(rects.iter().all(TileRect::is_empty));
    }
}
