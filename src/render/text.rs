use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings};

/// Estimates rendered text width without a live text-layout context.
///
/// Fit and truncation only talk to this trait, so a platform with real glyph
/// metrics can swap in an exact measure without touching either algorithm.
pub trait TextMeasure: Send + Sync {
    /// Width in px of `text` set at `font_size`.
    fn estimate_width(&self, text: &str, font_size: f32) -> f32;

    /// Number of leading characters of `text` whose width fits in `available`.
    fn max_chars(&self, text: &str, font_size: f32, available: f32) -> usize {
        let mut count = 0;
        for (idx, ch) in text.char_indices() {
            if self.estimate_width(&text[..idx + ch.len_utf8()], font_size) > available {
                break;
            }
            count += 1;
        }
        count
    }
}

/// Fixed per-character approximation: `chars * coefficient * font_size`.
///
/// The coefficient is tuned empirically for one font family and is treated as
/// configuration, not something derived from font data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientMeasure {
    pub coefficient: f32,
}

impl CoefficientMeasure {
    pub const fn new(coefficient: f32) -> Self {
        Self { coefficient }
    }
}

impl Default for CoefficientMeasure {
    fn default() -> Self {
        Self::new(0.65)
    }
}

impl TextMeasure for CoefficientMeasure {
    fn estimate_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * self.coefficient * font_size
    }

    /// Slot count `floor(available / (coefficient * font_size))`, independent of
    /// the text itself.
    fn max_chars(&self, _text: &str, font_size: f32, available: f32) -> usize {
        let slot = self.coefficient * font_size;
        if slot.is_nan() || slot <= 0.0 || available.is_nan() || available <= 0.0 {
            return 0;
        }
        (available / slot).floor() as usize
    }
}

/// Exact advance widths read from a TrueType/OpenType font.
pub struct FontMeasure {
    font: Font,
}

impl FontMeasure {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow!("font parse failed: {e}"))?;
        Ok(Self { font })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        let measure = Self::from_bytes(data).with_context(|| format!("loading font {}", path.display()))?;
        tracing::info!("Loaded measurement font from {}", path.display());
        Ok(measure)
    }

    /// Try the usual system font locations and keep the first that parses.
    pub fn load_system_font() -> Result<Self> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if let Ok(windir) = std::env::var("WINDIR") {
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\arial.ttf")));
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\segoeui.ttf")));
        }

        candidates.push(PathBuf::from("/System/Library/Fonts/Helvetica.ttc"));
        candidates.push(PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/dejavu/DejaVuSans.ttf"));

        for path in candidates {
            let Ok(data) = std::fs::read(&path) else {
                continue;
            };
            if let Ok(measure) = Self::from_bytes(data) {
                tracing::info!("Loaded measurement font from {}", path.display());
                return Ok(measure);
            }
        }

        Err(anyhow!("unable to load a system font from known locations"))
    }
}

impl FontMeasure {
    fn advance(&self, ch: char, font_size: f32) -> f32 {
        self.font.metrics(ch, font_size).advance_width
    }
}

impl TextMeasure for FontMeasure {
    fn estimate_width(&self, text: &str, font_size: f32) -> f32 {
        let mut width = 0.0;
        for ch in text.chars() {
            width += self.advance(ch, font_size);
        }
        width
    }

    /// Single pass over the advances; agrees with the prefix scan of
    /// `estimate_width` since both sum in the same order.
    fn max_chars(&self, text: &str, font_size: f32, available: f32) -> usize {
        let mut width = 0.0;
        let mut count = 0;
        for ch in text.chars() {
            width += self.advance(ch, font_size);
            if width > available {
                break;
            }
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every glyph is exactly `font_size` wide; exercises the provided `max_chars`.
    struct Monospace;

    impl TextMeasure for Monospace {
        fn estimate_width(&self, text: &str, font_size: f32) -> f32 {
            text.chars().count() as f32 * font_size
        }
    }

    #[test]
    fn coefficient_width_scales_with_chars_and_size() {
        let m = CoefficientMeasure::default();
        let w = m.estimate_width("Outerwear", 14.0);
        assert!((w - 81.9).abs() < 1e-3);
        assert_eq!(m.estimate_width("", 14.0), 0.0);
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let m = CoefficientMeasure::new(1.0);
        assert_eq!(m.estimate_width("Skönhet", 10.0), 70.0);
    }

    #[test]
    fn coefficient_max_chars_is_closed_form() {
        let m = CoefficientMeasure::default();
        assert_eq!(m.max_chars("anything", 10.0, 100.0), 15);
        assert_eq!(m.max_chars("anything", 10.0, 0.0), 0);
        assert_eq!(m.max_chars("anything", 10.0, f32::NAN), 0);
    }

    const FIXTURE: &[u8] = include_bytes!("../../tests/fixtures/DejaVuSans-ExtraLight.ttf");

    fn dejavu() -> FontMeasure {
        FontMeasure::from_bytes(FIXTURE.to_vec()).unwrap()
    }

    /// Reference count using only `estimate_width` on growing prefixes.
    fn prefix_scan(m: &dyn TextMeasure, text: &str, font_size: f32, available: f32) -> usize {
        text.char_indices()
            .take_while(|(idx, ch)| m.estimate_width(&text[..idx + ch.len_utf8()], font_size) <= available)
            .count()
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        assert!(FontMeasure::from_bytes(vec![0; 16]).is_err());
        assert!(FontMeasure::from_path(Path::new("/nonexistent/font.ttf")).is_err());
    }

    #[test]
    fn font_widths_are_proportional() {
        let m = dejavu();
        let narrow = m.estimate_width("iiii", 14.0);
        let wide = m.estimate_width("MMMM", 14.0);
        assert!(narrow > 0.0);
        assert!(wide > narrow);
        assert_eq!(m.estimate_width("", 14.0), 0.0);
        assert!((m.estimate_width("Shoes", 20.0) - 2.0 * m.estimate_width("Shoes", 10.0)).abs() < 0.5);
    }

    #[test]
    fn font_max_chars_matches_prefix_scan() {
        let m = dejavu();
        let label = "Accessories and Small Leather Goods";
        for available in [0.0, 3.0, 17.5, 40.0, 99.9, 150.0, 1000.0] {
            for font_size in [10.0, 12.0, 14.0] {
                assert_eq!(
                    m.max_chars(label, font_size, available),
                    prefix_scan(&m, label, font_size, available),
                    "available {available} at {font_size}px"
                );
            }
        }
        assert_eq!(m.max_chars(label, 10.0, 1000.0), label.chars().count());
    }

    #[test]
    fn font_truncation_fits_or_empties() {
        use crate::render::truncate::TruncationPolicy;

        let m = dejavu();
        let policy = TruncationPolicy::default();
        let label = "Extremely Long Category Name For Testing";
        for available in [0.0, 4.0, 12.0, 30.0, 100.0, 180.0] {
            let out = policy.truncate(&m, label, 10.0, available);
            assert!(out.truncated);
            assert!(
                out.text.is_empty() || m.estimate_width(&out.text, 10.0) <= available,
                "{:?} overflows {available}",
                out.text
            );
            if !out.text.is_empty() {
                assert!(out.text.ends_with('…'));
            }
        }
        let roomy = policy.truncate(&m, label, 10.0, 1000.0);
        assert_eq!(roomy.text, label);
        assert!(!roomy.truncated);
    }

    #[test]
    fn provided_max_chars_scans_prefixes() {
        assert_eq!(Monospace.max_chars("abcdef", 10.0, 35.0), 3);
        assert_eq!(Monospace.max_chars("abc", 10.0, 500.0), 3);
        assert_eq!(Monospace.max_chars("åäö", 10.0, 20.0), 2);
    }
}
