use super::text::TextMeasure;

/// Single trailing glyph appended to shortened labels.
pub const ELLIPSIS: char = '…';

/// Outcome of shortening a label to a width budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    pub text: String,
    pub truncated: bool,
}

/// Decides how an overflowing label is shortened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationPolicy {
    /// A budget of this many character slots or fewer yields no text at all,
    /// rather than a lone illegible glyph.
    pub empty_at_or_below: usize,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self { empty_at_or_below: 1 }
    }
}

impl TruncationPolicy {
    pub const fn new(empty_at_or_below: usize) -> Self {
        Self { empty_at_or_below }
    }

    /// Shorten `label` so it fits `available` px at `font_size`.
    ///
    /// Labels that already fit come back unchanged. Otherwise one character slot
    /// is reserved for the ellipsis; the result is re-measured and trimmed further
    /// if the active measure says the ellipsis glyph is wider than the slot.
    pub fn truncate(
        &self,
        measure: &dyn TextMeasure,
        label: &str,
        font_size: f32,
        available: f32,
    ) -> Truncated {
        let available = if available.is_nan() { 0.0 } else { available.max(0.0) };

        if measure.estimate_width(label, font_size) <= available {
            return Truncated {
                text: label.to_string(),
                truncated: false,
            };
        }

        let max_chars = measure.max_chars(label, font_size, available);
        if max_chars <= self.empty_at_or_below {
            return Truncated {
                text: String::new(),
                truncated: true,
            };
        }

        let mut keep = max_chars.saturating_sub(1);
        let mut text = ellipsize(label, keep);
        while keep > 0 && measure.estimate_width(&text, font_size) > available {
            keep -= 1;
            text = ellipsize(label, keep);
        }
        if measure.estimate_width(&text, font_size) > available {
            text.clear();
        }

        Truncated {
            text,
            truncated: true,
        }
    }
}

fn ellipsize(label: &str, keep: usize) -> String {
    let mut out: String = label.chars().take(keep).collect();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text::CoefficientMeasure;

    const LONG: &str = "Extremely Long Category Name For Testing";

    #[test]
    fn long_label_at_floor_keeps_fourteen_chars_plus_ellipsis() {
        let m = CoefficientMeasure::default();
        let out = TruncationPolicy::default().truncate(&m, LONG, 10.0, 100.0);
        assert!(out.truncated);
        assert_eq!(out.text, "Extremely Long…");
        assert_eq!(out.text.chars().count(), 15);
        assert!(m.estimate_width(&out.text, 10.0) <= 100.0);
    }

    #[test]
    fn fitting_label_is_untouched() {
        let m = CoefficientMeasure::default();
        let out = TruncationPolicy::default().truncate(&m, "Outerwear", 14.0, 200.0);
        assert_eq!(out.text, "Outerwear");
        assert!(!out.truncated);
    }

    #[test]
    fn single_slot_budget_renders_nothing() {
        let m = CoefficientMeasure::default();
        // 1 slot: floor(8 / 6.5) = 1
        let out = TruncationPolicy::default().truncate(&m, "Accessories", 10.0, 8.0);
        assert_eq!(out.text, "");
        assert!(out.truncated);
    }

    #[test]
    fn zero_threshold_allows_bare_ellipsis() {
        let m = CoefficientMeasure::default();
        let out = TruncationPolicy::new(0).truncate(&m, "Accessories", 10.0, 8.0);
        assert_eq!(out.text, "…");
    }

    #[test]
    fn negative_and_nan_budgets_are_empty() {
        let m = CoefficientMeasure::default();
        let policy = TruncationPolicy::default();
        assert_eq!(policy.truncate(&m, "Shoes", 10.0, -5.0).text, "");
        assert_eq!(policy.truncate(&m, "Shoes", 10.0, f32::NAN).text, "");
    }

    #[test]
    fn empty_label_is_never_truncated() {
        let m = CoefficientMeasure::default();
        let out = TruncationPolicy::default().truncate(&m, "", 10.0, 0.0);
        assert_eq!(out.text, "");
        assert!(!out.truncated);
    }

    #[test]
    fn wide_ellipsis_is_trimmed_until_it_fits() {
        struct WideEllipsis;
        impl TextMeasure for WideEllipsis {
            fn estimate_width(&self, text: &str, font_size: f32) -> f32 {
                text.chars()
                    .map(|c| if c == ELLIPSIS { 3.0 * font_size } else { font_size })
                    .sum()
            }
        }
        let out = TruncationPolicy::default().truncate(&WideEllipsis, "abcdefgh", 10.0, 50.0);
        assert_eq!(out.text, "ab…");
        assert!(WideEllipsis.estimate_width(&out.text, 10.0) <= 50.0);
    }
}
