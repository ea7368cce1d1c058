use crate::config::{TreemapConfig, DEFAULT_PALETTE};

/// Our own colour representation, independent of any drawing backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        let (r, g, b, a) = match digits.len() {
            3 => {
                let short = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                (short(0)?, short(1)?, short(2)?, 255)
            }
            6 => (channel(0)?, channel(2)?, channel(4)?, 255),
            8 => (channel(0)?, channel(2)?, channel(4)?, channel(6)?),
            _ => return None,
        };
        Some(Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        })
    }

    /// `#rrggbb`, alpha is emitted separately as an opacity attribute.
    pub fn to_hex(self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }
}

/// Ordered, non-empty list of tile colours, cycled by node index.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Build from hex strings; unparseable entries are skipped and an empty
    /// result falls back to the default palette.
    pub fn from_hex_list<S: AsRef<str>>(entries: &[S]) -> Self {
        let colors: Vec<Rgba> = entries
            .iter()
            .filter_map(|c| Rgba::from_hex(c.as_ref()))
            .collect();
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    pub fn from_config(config: &TreemapConfig) -> Self {
        Self::from_hex_list(&config.palette)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for a node index. Never out of bounds.
    pub fn color(&self, index: usize) -> Rgba {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .filter_map(|c| Rgba::from_hex(c))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_and_three_digit_hex() {
        let c = Rgba::from_hex("#aec7e8").unwrap();
        assert_eq!(c.to_hex(), "#aec7e8");
        let short = Rgba::from_hex("#fff").unwrap();
        assert_eq!(short.to_hex(), "#ffffff");
        assert!(Rgba::from_hex("#12345").is_none());
        assert!(Rgba::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn palette_cycles_by_index() {
        let p = Palette::from_hex_list(&["#000000", "#ffffff"]);
        assert_eq!(p.color(0), p.color(2));
        assert_eq!(p.color(1).to_hex(), "#ffffff");
        assert_eq!(p.color(1_000_001).to_hex(), "#ffffff");
    }

    #[test]
    fn empty_palette_falls_back_to_default() {
        let p = Palette::from_hex_list::<&str>(&[]);
        assert_eq!(p.len(), 10);
        assert_eq!(p.color(0).to_hex(), "#aec7e8");
    }
}
