use std::fmt;

use crate::layout::TileRect;

/// Structured clip key: the tile rectangle rounded to whole pixels.
///
/// Tiles whose rounded geometry matches share a key (and a clip region);
/// any difference in the four integers gives a different key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipKey {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl ClipKey {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: round_px(x),
            y: round_px(y),
            width: round_px(width),
            height: round_px(height),
        }
    }

    pub fn from_rect(rect: &TileRect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }

    /// The rounded geometry itself, as the clip rectangle every sharer uses.
    pub fn rect(&self) -> TileRect {
        TileRect::new(self.x as f32, self.y as f32, self.width as f32, self.height as f32)
    }

    /// Document-unique id under `prefix`, built from integers only.
    pub fn id(&self, prefix: &str) -> String {
        format!("{prefix}-{self}")
    }
}

impl fmt::Display for ClipKey {
    /// Negative components are written as `n<abs>` so `-` stays a pure separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in [self.x, self.y, self.width, self.height] {
            if !first {
                f.write_str("-")?;
            }
            first = false;
            if v < 0 {
                write!(f, "n{}", v.unsigned_abs())?;
            } else {
                write!(f, "{v}")?;
            }
        }
        Ok(())
    }
}

/// Round half up, matching how browsers round pixel geometry. NaN maps to 0.
fn round_px(v: f32) -> i64 {
    if v.is_nan() {
        return 0;
    }
    (v as f64 + 0.5).floor() as i64
}

/// Clip region confining every text layer of one tile to that tile.
///
/// `rect` is the whole-pixel geometry of `key`, so tiles sharing an id also
/// share an identical region.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRegion {
    pub key: ClipKey,
    pub id: String,
    pub rect: TileRect,
    pub corner_radius: f32,
}

impl ClipRegion {
    pub fn for_tile(rect: &TileRect, corner_radius: f32, prefix: &str) -> Self {
        let key = ClipKey::from_rect(rect);
        Self {
            id: key.id(prefix),
            key,
            rect: key.rect(),
            corner_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_geometry_shares_an_id() {
        let a = ClipKey::new(10.2, 5.1, 80.4, 40.9);
        let b = ClipKey::new(10.4, 4.8, 80.1, 41.2);
        assert_eq!(a, b);
        assert_eq!(a.id("clip"), "clip-10-5-80-41");
        assert_eq!(a.id("clip"), b.id("clip"));
    }

    #[test]
    fn any_rounded_difference_changes_the_id() {
        let a = ClipKey::new(10.0, 5.0, 80.0, 41.0);
        let b = ClipKey::new(10.0, 5.0, 81.0, 41.0);
        assert_ne!(a.id("clip"), b.id("clip"));
    }

    #[test]
    fn negative_components_are_unambiguous() {
        let a = ClipKey::new(-1.0, 2.0, 3.0, 4.0);
        let b = ClipKey::new(1.0, -2.0, 3.0, 4.0);
        assert_eq!(a.id("c"), "c-n1-2-3-4");
        assert_ne!(a.id("c"), b.id("c"));
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(ClipKey::new(0.5, -0.5, 2.5, f32::NAN), ClipKey { x: 1, y: 0, width: 3, height: 0 });
    }

    #[test]
    fn region_uses_rounded_geometry() {
        let a = ClipRegion::for_tile(&TileRect::new(10.2, 5.1, 80.4, 40.9), 6.0, "treemapClip");
        let b = ClipRegion::for_tile(&TileRect::new(10.4, 4.8, 80.1, 41.2), 6.0, "treemapClip");
        assert_eq!(a.rect, TileRect::new(10.0, 5.0, 80.0, 41.0));
        assert_eq!(a.id, "treemapClip-10-5-80-41");
        assert_eq!(a, b);
    }
}
