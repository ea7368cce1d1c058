use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::render::colors::Rgba;
use crate::render::fit::MAX_FONT_SIZE;

/// Default category palette (ten pastel tones, cycled by node index).
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#aec7e8", "#ffbb78", "#98df8a", "#ff9896", "#c5b0d5",
    "#c49c94", "#f7b6d2", "#c7c7c7", "#dbdb8d", "#9edae5",
];

/// Configuration for the treemap label engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TreemapConfig {
    /// Font size tried first for every tile title (px)
    pub preferred_font_size: f32,
    /// Floor for the font-size search; truncation takes over below it (px)
    pub min_font_size: f32,
    /// Average glyph width as a fraction of font size
    pub measure_coefficient: f32,
    /// Inner padding between tile edge and text (px)
    pub tile_padding: f32,
    /// Extra leading added to the font size to get the line height (px)
    pub line_gap: f32,
    /// Corner radius shared by the tile background and its clip path (px)
    pub tile_corner_radius: f32,
    /// Ordered tile colours, `#rrggbb` or `#rrggbbaa`
    pub palette: Vec<String>,
    /// Truncation yielding this many character slots or fewer renders no title
    pub empty_label_max_chars: usize,
    /// Namespace for clip ids. Every chart in one SVG document needs its own,
    /// either set here or derived with `LabelEngine::for_chart`; charts left
    /// on the default `"clip"` produce clashing ids.
    pub clip_prefix: String,
    /// Target width/height ratio for squarified rows
    pub aspect_ratio: f64,
    /// Padding between chart border and the tile area (px)
    pub container_padding: f32,
    /// Tighter container padding for dense dashboards
    pub compact: bool,
    /// Corner radius of the chart container and its "No data" placeholder (px)
    pub container_radius: f32,
    pub font_family: String,
    pub text_color: String,
    pub tile_stroke: String,
    /// Opacity of the secondary value line
    pub value_opacity: f32,
    pub empty_background: String,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            preferred_font_size: 14.0,
            min_font_size: 10.0,
            measure_coefficient: 0.65,
            tile_padding: 6.0,
            line_gap: 2.0,
            tile_corner_radius: 6.0,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            empty_label_max_chars: 1,
            clip_prefix: "clip".to_string(),
            aspect_ratio: 3.0, // wider-than-tall tiles
            container_padding: 12.0,
            compact: false,
            container_radius: 8.0,
            font_family: "Helvetica Neue".to_string(),
            text_color: "#1f2937".to_string(),
            tile_stroke: "#E5E7EA".to_string(),
            value_opacity: 0.9,
            empty_background: "#fafafa".to_string(),
        }
    }
}

impl TreemapConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: TreemapConfig = toml::from_str(src).context("invalid treemap config")?;
        Ok(config.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("loading config {}", path.display()))
    }

    /// Effective container padding (compact mode trims 6px, never below 6px).
    pub fn effective_container_padding(&self) -> f32 {
        if self.compact {
            (self.container_padding - 6.0).max(6.0)
        } else {
            self.container_padding
        }
    }

    /// Replace out-of-domain values so the engine only ever sees sane numbers.
    pub fn sanitized(mut self) -> Self {
        let defaults = TreemapConfig::default();

        sanitize_positive(&mut self.min_font_size, defaults.min_font_size, "min_font_size");
        sanitize_positive(
            &mut self.preferred_font_size,
            defaults.preferred_font_size,
            "preferred_font_size",
        );
        sanitize_positive(
            &mut self.measure_coefficient,
            defaults.measure_coefficient,
            "measure_coefficient",
        );
        sanitize_non_negative(&mut self.tile_padding, defaults.tile_padding, "tile_padding");
        sanitize_non_negative(&mut self.line_gap, defaults.line_gap, "line_gap");
        sanitize_non_negative(
            &mut self.tile_corner_radius,
            defaults.tile_corner_radius,
            "tile_corner_radius",
        );
        sanitize_non_negative(
            &mut self.container_padding,
            defaults.container_padding,
            "container_padding",
        );
        sanitize_non_negative(
            &mut self.container_radius,
            defaults.container_radius,
            "container_radius",
        );

        for (value, name) in [
            (&mut self.min_font_size, "min_font_size"),
            (&mut self.preferred_font_size, "preferred_font_size"),
        ] {
            if *value > MAX_FONT_SIZE {
                tracing::warn!("{} = {} too large, capping at {}", name, value, MAX_FONT_SIZE);
                *value = MAX_FONT_SIZE;
            }
        }

        if self.preferred_font_size < self.min_font_size {
            tracing::warn!(
                "preferred_font_size {} below min_font_size {}, raising it to the floor",
                self.preferred_font_size,
                self.min_font_size
            );
            self.preferred_font_size = self.min_font_size;
        }

        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            tracing::warn!("aspect_ratio {} out of range, using default", self.aspect_ratio);
            self.aspect_ratio = defaults.aspect_ratio;
        }

        if !self.value_opacity.is_finite() {
            self.value_opacity = defaults.value_opacity;
        }
        self.value_opacity = self.value_opacity.clamp(0.0, 1.0);

        let valid: Vec<String> = self
            .palette
            .iter()
            .filter(|c| Rgba::from_hex(c).is_some())
            .cloned()
            .collect();
        if valid.len() != self.palette.len() {
            tracing::warn!(
                "dropped {} unparseable palette entries",
                self.palette.len() - valid.len()
            );
        }
        self.palette = if valid.is_empty() {
            tracing::warn!("palette empty, falling back to default palette");
            defaults.palette
        } else {
            valid
        };

        for (value, fallback) in [
            (&mut self.text_color, defaults.text_color),
            (&mut self.tile_stroke, defaults.tile_stroke),
            (&mut self.empty_background, defaults.empty_background),
        ] {
            if Rgba::from_hex(value.as_str()).is_none() {
                tracing::warn!("colour {:?} unparseable, using {}", value, fallback);
                *value = fallback;
            }
        }

        // Clip ids end up as XML ids
        self.clip_prefix.retain(is_id_char);
        if self.clip_prefix.is_empty() {
            self.clip_prefix = defaults.clip_prefix;
        }

        self
    }
}

/// Characters allowed in clip-id namespaces.
pub(crate) fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn sanitize_positive(value: &mut f32, fallback: f32, name: &str) {
    if !value.is_finite() || *value <= 0.0 {
        tracing::warn!("{} = {} out of range, using {}", name, value, fallback);
        *value = fallback;
    }
}

fn sanitize_non_negative(value: &mut f32, fallback: f32, name: &str) {
    if !value.is_finite() || *value < 0.0 {
        tracing::warn!("{} = {} out of range, using {}", name, value, fallback);
        *value = fallback;
    }
}
