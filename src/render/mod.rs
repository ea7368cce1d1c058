pub mod clip;
pub mod colors;
pub mod fit;
pub mod lines;
pub mod svg;
pub mod text;
pub mod tile;
pub mod truncate;

use std::sync::Arc;

use rayon::prelude::*;

use crate::config::{is_id_char, TreemapConfig};
use crate::data::{adapt_rows, CategoryNode, CategoryRow};
use crate::layout::{TileLayout, TileRect};
use colors::{Palette, Rgba};
use fit::FitResult;
use text::{CoefficientMeasure, TextMeasure};
use tile::TileOutput;
use truncate::TruncationPolicy;

/// Placeholder text shown instead of tiles when a selection has no rows.
pub const NO_DATA_MESSAGE: &str = "No data";

/// One rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Nothing to lay out; the surface shows the "No data" placeholder.
    Empty { bounds: TileRect },
    Tiles { bounds: TileRect, tiles: Vec<TileOutput> },
}

impl Frame {
    pub fn bounds(&self) -> TileRect {
        match self {
            Frame::Empty { bounds } | Frame::Tiles { bounds, .. } => *bounds,
        }
    }

    pub fn tiles(&self) -> &[TileOutput] {
        match self {
            Frame::Empty { .. } => &[],
            Frame::Tiles { tiles, .. } => tiles,
        }
    }
}

/// Holds the immutable configuration every tile is rendered against.
///
/// Cheap to share across threads; no state changes after construction, so
/// tiles can be rendered in any order.
#[derive(Clone)]
pub struct LabelEngine {
    config: TreemapConfig,
    palette: Palette,
    policy: TruncationPolicy,
    measure: Arc<dyn TextMeasure>,
    stroke: Rgba,
    text_color: Rgba,
}

impl LabelEngine {
    /// Engine using the fixed-coefficient width estimate from `config`.
    pub fn new(config: TreemapConfig) -> Self {
        let config = config.sanitized();
        let measure = Arc::new(CoefficientMeasure::new(config.measure_coefficient));
        Self::from_sanitized(config, measure)
    }

    /// Engine with a caller-supplied text measure (e.g. exact font metrics).
    pub fn with_measure(config: TreemapConfig, measure: Arc<dyn TextMeasure>) -> Self {
        Self::from_sanitized(config.sanitized(), measure)
    }

    fn from_sanitized(config: TreemapConfig, measure: Arc<dyn TextMeasure>) -> Self {
        let palette = Palette::from_config(&config);
        let stroke = Rgba::from_hex(&config.tile_stroke).unwrap_or(Rgba::new(0.9, 0.9, 0.92));
        let text_color = Rgba::from_hex(&config.text_color).unwrap_or(Rgba::new(0.12, 0.16, 0.22));
        Self {
            policy: TruncationPolicy::new(config.empty_label_max_chars),
            config,
            palette,
            measure,
            stroke,
            text_color,
        }
    }

    /// Copy of this engine whose clip ids live under `{clip_prefix}-{chart}`,
    /// for placing several charts in one document. Characters outside
    /// `[A-Za-z0-9_-]` are dropped from `chart`.
    pub fn for_chart(&self, chart: &str) -> Self {
        let suffix: String = chart.chars().filter(|&c| is_id_char(c)).collect();
        let mut engine = self.clone();
        if !suffix.is_empty() {
            engine.config.clip_prefix = format!("{}-{}", self.config.clip_prefix, suffix);
        }
        engine
    }

    pub fn config(&self) -> &TreemapConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }

    pub fn stroke_color(&self) -> Rgba {
        self.stroke
    }

    pub fn text_color(&self) -> Rgba {
        self.text_color
    }

    /// Font size + display text for `label` within `available` px.
    pub fn fit_label(&self, label: &str, available: f32) -> FitResult {
        fit::fit_label(
            self.measure(),
            &self.policy,
            label,
            available,
            self.config.preferred_font_size,
            self.config.min_font_size,
            self.config.line_gap,
        )
    }

    pub fn render_tile(&self, node: &CategoryNode, rect: &TileRect) -> TileOutput {
        tile::render_tile(self, node, rect)
    }

    /// Render every `(node, rect)` pair, in node order.
    pub fn render_frame(&self, nodes: &[CategoryNode], rects: &[TileRect], bounds: TileRect) -> Frame {
        if nodes.is_empty() {
            return Frame::Empty { bounds };
        }
        if nodes.len() != rects.len() {
            tracing::warn!(
                "{} nodes but {} rectangles, rendering the first {}",
                nodes.len(),
                rects.len(),
                nodes.len().min(rects.len())
            );
        }

        let tiles: Vec<TileOutput> = nodes
            .par_iter()
            .zip(rects.par_iter())
            .map(|(node, rect)| self.render_tile(node, rect))
            .collect();

        let hidden = tiles.iter().filter(|t| t.title.is_none()).count();
        let truncated = tiles.iter().filter(|t| t.fit.truncated).count();
        tracing::debug!(
            "Rendered {} tiles ({} without title, {} truncated)",
            tiles.len(),
            hidden,
            truncated
        );

        Frame::Tiles { bounds, tiles }
    }

    /// Full chart pipeline: adapt rows, inset the container, lay out, render.
    pub fn render_chart(&self, rows: &[CategoryRow], layout: &dyn TileLayout, width: f32, height: f32) -> Frame {
        let bounds = TileRect::new(0.0, 0.0, width, height).sanitized();
        let nodes = adapt_rows(rows, self.palette.len());
        if nodes.is_empty() {
            tracing::info!("No category rows for this selection, showing placeholder");
            return Frame::Empty { bounds };
        }

        let area = bounds.inset(self.config.effective_container_padding());
        let sizes: Vec<f64> = nodes.iter().map(|n| n.size).collect();
        let rects = layout.layout(&sizes, area);
        self.render_frame(&nodes, &rects, bounds)
    }
}
