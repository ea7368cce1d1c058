use crate::data::CategoryNode;

/// Information to display in the tooltip when hovering over a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipInfo {
    pub title: String,
    pub transactions: String,
    pub share: String,
}

impl TooltipInfo {
    pub fn for_node(node: &CategoryNode) -> Self {
        Self {
            title: node.name.to_string(),
            transactions: format_count(node.size),
            share: format_share(node.share),
        }
    }

    /// Tooltip body as display lines.
    pub fn lines(&self) -> [String; 3] {
        [
            self.title.clone(),
            format!("Transactions: {}", self.transactions),
            format!("Share: {}", self.share),
        ]
    }
}

/// Whole number with plain spaces between thousands groups: `1234567` -> `1 234 567`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Percentage with one decimal: `12.345` -> `12.3%`.
pub fn format_share(share: f64) -> String {
    if !share.is_finite() {
        return "0.0%".to_string();
    }
    format!("{share:.1}%")
}
