/// Which text lines a tile can show and where their baselines sit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLayout {
    pub show_title: bool,
    pub show_value: bool,
    pub line_height: f32,
    pub title_baseline_y: f32,
    pub value_baseline_y: Option<f32>,
}

/// Decide between no text, title only, or title plus value line.
///
/// One line needs `line_height + 2 * padding` of tile height, two lines need
/// `2 * line_height + 2 * padding`. A tile too short for one line renders as
/// a bare coloured rectangle.
pub fn layout_lines(
    tile_top: f32,
    tile_height: f32,
    font_size: f32,
    padding: f32,
    line_gap: f32,
) -> LineLayout {
    let tile_height = if tile_height.is_nan() { 0.0 } else { tile_height.max(0.0) };
    let line_height = font_size + line_gap;

    let show_title = tile_height >= line_height + 2.0 * padding;
    let show_value = show_title && tile_height >= 2.0 * line_height + 2.0 * padding;

    let title_baseline_y = tile_top + padding + font_size;
    LineLayout {
        show_title,
        show_value,
        line_height,
        title_baseline_y,
        value_baseline_y: show_value.then_some(title_baseline_y + line_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_for_any_line() {
        let l = layout_lines(0.0, 18.0, 14.0, 6.0, 2.0);
        assert_eq!(l.line_height, 16.0);
        assert!(!l.show_title);
        assert!(!l.show_value);
        assert_eq!(l.value_baseline_y, None);
    }

    #[test]
    fn title_without_value() {
        let l = layout_lines(0.0, 40.0, 14.0, 6.0, 2.0);
        assert!(l.show_title);
        assert!(!l.show_value);
    }

    #[test]
    fn title_and_value_sixteen_px_apart() {
        let l = layout_lines(100.0, 50.0, 14.0, 6.0, 2.0);
        assert!(l.show_title && l.show_value);
        assert_eq!(l.title_baseline_y, 120.0);
        assert_eq!(l.value_baseline_y, Some(136.0));
    }

    #[test]
    fn exact_boundaries_are_inclusive() {
        assert!(layout_lines(0.0, 28.0, 14.0, 6.0, 2.0).show_title);
        assert!(layout_lines(0.0, 44.0, 14.0, 6.0, 2.0).show_value);
        assert!(!layout_lines(0.0, 43.9, 14.0, 6.0, 2.0).show_value);
    }

    #[test]
    fn nan_height_shows_nothing() {
        let l = layout_lines(0.0, f32::NAN, 14.0, 6.0, 2.0);
        assert!(!l.show_title);
    }
}
