pub mod season;

use anyhow::{Context, Result};
use compact_str::CompactString;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One row of the top-categories query, as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub count: f64,
    #[serde(default, deserialize_with = "lenient_rank")]
    pub rank: Option<i64>,
}

impl CategoryRow {
    pub fn new(category: &str, count: f64, rank: Option<i64>) -> Self {
        Self {
            category: category.to_string(),
            count,
            rank,
        }
    }
}

/// A renderable treemap node. Immutable once built; rebuilt per data refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub name: CompactString,
    /// Metric driving tile area (>= 0)
    pub size: f64,
    /// Percent of the displayed total (0..=100)
    pub share: f64,
    pub color_index: usize,
    pub rank: Option<i64>,
}

/// Turn fetched rows into nodes, keeping input order.
///
/// Rank order is the backend's job; nodes are never re-sorted here.
pub fn adapt_rows(rows: &[CategoryRow], palette_len: usize) -> Vec<CategoryNode> {
    let sizes: Vec<f64> = rows.iter().map(|r| clamp_size(r.count)).collect();
    let total: f64 = sizes.iter().sum();

    rows.iter()
        .zip(sizes)
        .enumerate()
        .map(|(i, (row, size))| CategoryNode {
            name: CompactString::new(&row.category),
            size,
            share: if total > 0.0 { size / total * 100.0 } else { 0.0 },
            color_index: if palette_len == 0 { 0 } else { i % palette_len },
            rank: row.rank,
        })
        .collect()
}

fn clamp_size(count: f64) -> f64 {
    if count.is_finite() {
        count.max(0.0)
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RowsPayload {
    Bare(Vec<CategoryRow>),
    Envelope {
        #[serde(default)]
        data: Vec<CategoryRow>,
    },
}

/// Parse rows from either a bare JSON array or a `{ "data": [...] }` envelope.
pub fn parse_rows(json: &str) -> Result<Vec<CategoryRow>> {
    let payload: RowsPayload =
        serde_json::from_str(json).context("expected a JSON array of rows or a {\"data\": [...]} object")?;
    let rows = match payload {
        RowsPayload::Bare(rows) => rows,
        RowsPayload::Envelope { data } => data,
    };
    tracing::debug!("Parsed {} category rows", rows.len());
    Ok(rows)
}

/// `null`/missing become "", numbers are stringified.
fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Numbers or numeric strings; anything else counts as 0.
fn lenient_number<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(value_as_f64(&Value::deserialize(de)?).unwrap_or(0.0))
}

fn lenient_rank<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    Ok(value_as_f64(&Value::deserialize(de)?).map(|v| v as i64))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}
