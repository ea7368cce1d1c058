use super::clip::ClipRegion;
use super::colors::Rgba;
use super::fit::FitResult;
use super::lines::{layout_lines, LineLayout};
use super::LabelEngine;
use crate::data::CategoryNode;
use crate::layout::TileRect;
use crate::ui::tooltip::format_count;

/// Filled, rounded tile background.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub rect: TileRect,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub corner_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Value,
}

/// One line of text, positioned by its left edge and alphabetic baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub role: TextRole,
    pub x: f32,
    pub baseline_y: f32,
    pub text: String,
    pub font_size: f32,
    pub opacity: f32,
}

/// Everything a rendering surface needs to draw one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileOutput {
    pub background: Background,
    pub clip: ClipRegion,
    pub fit: FitResult,
    pub lines: LineLayout,
    pub title: Option<TextLayer>,
    pub value: Option<TextLayer>,
}

impl TileOutput {
    /// Text layers in paint order, all confined to `clip`.
    pub fn text_layers(&self) -> impl Iterator<Item = &TextLayer> {
        self.title.iter().chain(self.value.iter())
    }
}

/// Compose fit, truncation, line layout and clipping for one tile.
pub fn render_tile(engine: &LabelEngine, node: &CategoryNode, rect: &TileRect) -> TileOutput {
    let config = engine.config();
    let rect = rect.sanitized();
    let pad = config.tile_padding;

    let available = (rect.width - 2.0 * pad).max(0.0);
    let fit = engine.fit_label(&node.name, available);
    let lines = layout_lines(rect.y, rect.height, fit.font_size, pad, config.line_gap);

    let background = Background {
        rect,
        fill: engine.palette().color(node.color_index),
        stroke: engine.stroke_color(),
        corner_radius: config.tile_corner_radius,
    };
    let clip = ClipRegion::for_tile(&rect, config.tile_corner_radius, &config.clip_prefix);

    // A zero-area tile is background only
    let drawable = !rect.is_empty();
    let text_x = rect.x + pad;

    let title = (drawable && lines.show_title && !fit.display_text.is_empty()).then(|| TextLayer {
        role: TextRole::Title,
        x: text_x,
        baseline_y: lines.title_baseline_y,
        text: fit.display_text.clone(),
        font_size: fit.font_size,
        opacity: 1.0,
    });

    let value = match lines.value_baseline_y {
        Some(baseline_y) if drawable => Some(TextLayer {
            role: TextRole::Value,
            x: text_x,
            baseline_y,
            text: format_count(node.size),
            font_size: fit.font_size,
            opacity: config.value_opacity,
        }),
        _ => None,
    };

    TileOutput {
        background,
        clip,
        fit,
        lines,
        title,
        value,
    }
}
