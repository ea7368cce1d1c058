//! SVG output for rendered frames.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::clip::{ClipKey, ClipRegion};
use super::tile::{TextLayer, TileOutput};
use super::{Frame, LabelEngine, NO_DATA_MESSAGE};
use crate::layout::TileRect;

/// Serialize a frame as a standalone SVG document.
pub fn write_svg(engine: &LabelEngine, frame: &Frame) -> String {
    let config = engine.config();
    let bounds = frame.bounds();
    let mut svg = String::with_capacity(4096);

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{family}">"#,
        w = fmt_num(bounds.width),
        h = fmt_num(bounds.height),
        family = escape_xml(&config.font_family),
    );

    match frame {
        Frame::Empty { bounds } => write_placeholder(engine, &mut svg, bounds),
        Frame::Tiles { bounds, tiles } => {
            let _ = writeln!(
                svg,
                r#"  <rect x="0" y="0" width="{}" height="{}" rx="{r}" ry="{r}" fill="none" stroke="{}"/>"#,
                fmt_num(bounds.width),
                fmt_num(bounds.height),
                engine.stroke_color().to_hex(),
                r = fmt_num(config.container_radius),
            );
            write_clip_defs(&mut svg, tiles);
            for tile in tiles {
                write_tile(engine, &mut svg, tile);
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_placeholder(engine: &LabelEngine, svg: &mut String, bounds: &TileRect) {
    let config = engine.config();
    let _ = writeln!(
        svg,
        r#"  <rect x="0" y="0" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" stroke="{}"/>"#,
        fmt_num(bounds.width),
        fmt_num(bounds.height),
        escape_xml(&config.empty_background),
        engine.stroke_color().to_hex(),
        r = fmt_num(config.container_radius),
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
        fmt_num(bounds.width / 2.0),
        fmt_num(bounds.height / 2.0),
        fmt_num(config.preferred_font_size),
        engine.text_color().to_hex(),
        NO_DATA_MESSAGE,
    );
}

/// One `<clipPath>` per distinct clip key, drawn at the key's whole-pixel
/// geometry; tiles sharing rounded geometry share it.
fn write_clip_defs(svg: &mut String, tiles: &[TileOutput]) {
    let mut regions: BTreeMap<ClipKey, &ClipRegion> = BTreeMap::new();
    for tile in tiles {
        regions.entry(tile.clip.key).or_insert(&tile.clip);
    }

    svg.push_str("  <defs>\n");
    for region in regions.values() {
        let r = &region.rect;
        let _ = writeln!(
            svg,
            r#"    <clipPath id="{}" clipPathUnits="userSpaceOnUse"><rect x="{}" y="{}" width="{}" height="{}" rx="{rad}" ry="{rad}"/></clipPath>"#,
            region.id,
            fmt_num(r.x),
            fmt_num(r.y),
            fmt_num(r.width),
            fmt_num(r.height),
            rad = fmt_num(region.corner_radius),
        );
    }
    svg.push_str("  </defs>\n");
}

fn write_tile(engine: &LabelEngine, svg: &mut String, tile: &TileOutput) {
    let bg = &tile.background;
    svg.push_str("  <g>\n");
    let _ = writeln!(
        svg,
        r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" stroke="{}"/>"#,
        fmt_num(bg.rect.x),
        fmt_num(bg.rect.y),
        fmt_num(bg.rect.width),
        fmt_num(bg.rect.height),
        bg.fill.to_hex(),
        bg.stroke.to_hex(),
        r = fmt_num(bg.corner_radius),
    );

    if tile.text_layers().next().is_some() {
        let _ = writeln!(svg, r#"    <g clip-path="url(#{})">"#, tile.clip.id);
        for layer in tile.text_layers() {
            write_text(engine, svg, layer);
        }
        svg.push_str("    </g>\n");
    }
    svg.push_str("  </g>\n");
}

fn write_text(engine: &LabelEngine, svg: &mut String, layer: &TextLayer) {
    let _ = write!(
        svg,
        r#"      <text x="{}" y="{}" font-size="{}" fill="{}" dominant-baseline="alphabetic" text-anchor="start" pointer-events="none""#,
        fmt_num(layer.x),
        fmt_num(layer.baseline_y),
        fmt_num(layer.font_size),
        engine.text_color().to_hex(),
    );
    if layer.opacity < 1.0 {
        let _ = write!(svg, r#" opacity="{}""#, fmt_num(layer.opacity));
    }
    let _ = writeln!(svg, ">{}</text>", escape_xml(&layer.text));
}

/// Fixed two-decimal formatting with trailing zeros trimmed; never locale dependent.
fn fmt_num(v: f32) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreemapConfig;
    use crate::data::CategoryNode;
    use compact_str::CompactString;

    fn node(name: &str) -> CategoryNode {
        CategoryNode {
            name: CompactString::new(name),
            size: 1200.0,
            share: 50.0,
            color_index: 0,
            rank: None,
        }
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(0.333), "0.33");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn empty_frame_writes_placeholder() {
        let engine = LabelEngine::new(TreemapConfig::default());
        let svg = write_svg(&engine, &Frame::Empty { bounds: TileRect::new(0.0, 0.0, 300.0, 200.0) });
        assert!(svg.contains(">No data</text>"));
        assert!(!svg.contains("clipPath"));
    }

    #[test]
    fn identical_rounded_geometry_shares_one_clip_path() {
        let engine = LabelEngine::new(TreemapConfig::default());
        let nodes = [node("A & B"), node("C")];
        let rects = [
            TileRect::new(10.2, 5.1, 80.4, 40.9),
            TileRect::new(10.4, 4.8, 80.1, 41.2),
        ];
        let frame = engine.render_frame(&nodes, &rects, TileRect::new(0.0, 0.0, 100.0, 60.0));
        let svg = write_svg(&engine, &frame);
        assert_eq!(svg.matches("<clipPath ").count(), 1);
        assert_eq!(svg.matches(r#"clip-path="url(#clip-10-5-80-41)""#).count(), 2);
        assert!(svg.contains(
            r#"<clipPath id="clip-10-5-80-41" clipPathUnits="userSpaceOnUse"><rect x="10" y="5" width="80" height="41" rx="6" ry="6"/></clipPath>"#
        ));
        assert!(svg.contains(">A &amp; B</text>"));
    }

    #[test]
    fn value_line_carries_opacity() {
        let engine = LabelEngine::new(TreemapConfig::default());
        let frame = engine.render_frame(&[node("Shoes")], &[TileRect::new(0.0, 0.0, 120.0, 60.0)], TileRect::new(0.0, 0.0, 120.0, 60.0));
        let svg = write_svg(&engine, &frame);
        assert!(svg.contains(r#"opacity="0.9">1 200</text>"#));
    }
}
