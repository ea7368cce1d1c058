use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use category_treemap::config::TreemapConfig;
use category_treemap::data::parse_rows;
use category_treemap::layout::Squarified;
use category_treemap::render::svg::write_svg;
use category_treemap::render::text::FontMeasure;
use category_treemap::render::LabelEngine;

const USAGE: &str = "usage: category-treemap [ROWS.json|-] [--width PX] [--height PX] \
[--config FILE.toml] [--font FILE.ttf | --system-font] [--compact] [--chart-id NAME] [--out FILE.svg]";

/// Command line options.
#[derive(Debug)]
struct Options {
    input: Option<PathBuf>,
    width: f32,
    height: f32,
    config: Option<PathBuf>,
    font: Option<PathBuf>,
    system_font: bool,
    compact: bool,
    chart_id: Option<String>,
    out: Option<PathBuf>,
}

fn parse_args(args: Vec<String>) -> Result<Options> {
    let mut opts = Options {
        input: None,
        width: 600.0,
        height: 300.0,
        config: None,
        font: None,
        system_font: false,
        compact: false,
        chart_id: None,
        out: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--width" | "--height" => {
                let flag = args[i].clone();
                i += 1;
                let value: f32 = args
                    .get(i)
                    .with_context(|| format!("{flag} needs a value"))?
                    .parse()
                    .with_context(|| format!("{flag} must be a number"))?;
                if flag == "--width" {
                    opts.width = value;
                } else {
                    opts.height = value;
                }
            }
            "--config" => {
                i += 1;
                opts.config = Some(args.get(i).context("--config needs a path")?.into());
            }
            "--font" => {
                i += 1;
                opts.font = Some(args.get(i).context("--font needs a path")?.into());
            }
            "--chart-id" => {
                i += 1;
                opts.chart_id = Some(args.get(i).context("--chart-id needs a name")?.clone());
            }
            "--out" => {
                i += 1;
                opts.out = Some(args.get(i).context("--out needs a path")?.into());
            }
            "--system-font" => opts.system_font = true,
            "--compact" => opts.compact = true,
            "-h" | "--help" => bail!("{USAGE}"),
            "-" => opts.input = None,
            other if other.starts_with("--") => bail!("unknown flag {other}\n{USAGE}"),
            other => opts.input = Some(PathBuf::from(other)),
        }
        i += 1;
    }
    Ok(opts)
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading rows from {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading rows from stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("category_treemap=info".parse()?),
        )
        .init();

    let opts = parse_args(std::env::args().skip(1).collect())?;

    let mut config = match &opts.config {
        Some(path) => TreemapConfig::load(path)?,
        None => TreemapConfig::default(),
    };
    if opts.compact {
        config.compact = true;
    }

    let engine = if let Some(path) = &opts.font {
        LabelEngine::with_measure(config, Arc::new(FontMeasure::from_path(path)?))
    } else if opts.system_font {
        match FontMeasure::load_system_font() {
            Ok(measure) => LabelEngine::with_measure(config, Arc::new(measure)),
            Err(e) => {
                tracing::warn!("{e}, falling back to coefficient measure");
                LabelEngine::new(config)
            }
        }
    } else {
        LabelEngine::new(config)
    };
    let engine = match &opts.chart_id {
        Some(chart) => engine.for_chart(chart),
        None => engine,
    };

    let rows = parse_rows(&read_input(opts.input.as_ref())?)?;
    tracing::info!(
        "Rendering {} categories into {}x{}",
        rows.len(),
        opts.width,
        opts.height
    );

    let layout = Squarified::from_config(engine.config());
    let frame = engine.render_chart(&rows, &layout, opts.width, opts.height);
    let svg = write_svg(&engine, &frame);

    match &opts.out {
        Some(path) => {
            std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}
