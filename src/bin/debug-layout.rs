/// Diagnostic tool to verify rows → layout → label-fit pipeline
use category_treemap::config::TreemapConfig;
use category_treemap::data::{adapt_rows, parse_rows, CategoryRow};
use category_treemap::layout::{Squarified, TileLayout, TileRect};
use category_treemap::render::LabelEngine;
use category_treemap::ui::tooltip::TooltipInfo;

fn sample_rows() -> Vec<CategoryRow> {
    [
        ("Outerwear", 15320.0),
        ("Knitwear", 9120.0),
        ("Shoes", 7710.0),
        ("Trousers", 5230.0),
        ("Accessories and Small Leather Goods", 2410.0),
        ("Underwear", 1330.0),
        ("Swimwear", 610.0),
        ("Gift Cards", 95.0),
    ]
    .iter()
    .enumerate()
    .map(|(i, (name, count))| CategoryRow::new(name, *count, Some(i as i64 + 1)))
    .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("category_treemap=debug".parse()?),
        )
        .init();

    let rows = match std::env::args().nth(1) {
        Some(path) => parse_rows(&std::fs::read_to_string(&path)?)?,
        None => sample_rows(),
    };
    let width: f32 = std::env::args().nth(2).and_then(|s| s.parse().ok()).unwrap_or(600.0);
    let height: f32 = std::env::args().nth(3).and_then(|s| s.parse().ok()).unwrap_or(300.0);

    println!("=== DIAGNOSTIC: Rows → Layout → Label fit ===");
    println!("Viewport: {width}x{height}, {} rows", rows.len());

    let engine = LabelEngine::new(TreemapConfig::default());
    let config = engine.config();
    let nodes = adapt_rows(&rows, engine.palette().len());
    if nodes.is_empty() {
        println!("\nNo data.");
        return Ok(());
    }

    let area = TileRect::new(0.0, 0.0, width, height).inset(config.effective_container_padding());
    let sizes: Vec<f64> = nodes.iter().map(|n| n.size).collect();
    let rects = Squarified::from_config(config).layout(&sizes, area);

    println!("\n[1] Tiles:");
    for (node, rect) in nodes.iter().zip(&rects) {
        let out = engine.render_tile(node, rect);
        let tip = TooltipInfo::for_node(node);
        println!(
            "  '{}' {} ({}) rect {:.1}x{:.1} at ({:.1}, {:.1}) -> {}px '{}'{} lines: {}{} clip={}",
            tip.title,
            tip.transactions,
            tip.share,
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            out.fit.font_size,
            out.fit.display_text,
            if out.fit.truncated { " (truncated)" } else { "" },
            if out.title.is_some() { "title" } else { "none" },
            if out.value.is_some() { "+value" } else { "" },
            out.clip.id,
        );
    }

    let covered: f32 = rects.iter().map(|r| r.area()).sum();
    println!("\n[2] Coverage: {:.1}% of {:.0}px²", covered / area.area().max(1.0) * 100.0, area.area());

    Ok(())
}
