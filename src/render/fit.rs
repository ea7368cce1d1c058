use super::text::TextMeasure;
use super::truncate::TruncationPolicy;

/// Largest font size the solver will start from (px).
pub const MAX_FONT_SIZE: f32 = 512.0;

/// Font size, line height and final text chosen for one tile title.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub font_size: f32,
    pub line_height: f32,
    pub display_text: String,
    pub truncated: bool,
}

/// Largest font size in `[min_size, preferred_size]`, stepping down 1px at a
/// time, at which `label` fits `available`. Returns `min_size` when nothing
/// in range fits. Both bounds are clamped to `MAX_FONT_SIZE`, so the search
/// takes at most that many steps.
pub fn fit_font_size(
    measure: &dyn TextMeasure,
    label: &str,
    available: f32,
    preferred_size: f32,
    min_size: f32,
) -> f32 {
    let min_size = if min_size.is_finite() {
        min_size.clamp(0.0, MAX_FONT_SIZE)
    } else {
        0.0
    };
    let mut size = if preferred_size.is_finite() {
        preferred_size.min(MAX_FONT_SIZE).max(min_size)
    } else {
        min_size
    };
    let available = if available.is_nan() { 0.0 } else { available };

    while size > min_size && measure.estimate_width(label, size) > available {
        size = (size - 1.0).max(min_size);
    }
    size
}

/// Fit the font size, then truncate at the floor if the label still overflows.
pub fn fit_label(
    measure: &dyn TextMeasure,
    policy: &TruncationPolicy,
    label: &str,
    available: f32,
    preferred_size: f32,
    min_size: f32,
    line_gap: f32,
) -> FitResult {
    let font_size = fit_font_size(measure, label, available, preferred_size, min_size);
    let shortened = policy.truncate(measure, label, font_size, available);
    FitResult {
        font_size,
        line_height: font_size + line_gap,
        display_text: shortened.text,
        truncated: shortened.truncated,
    }
}
