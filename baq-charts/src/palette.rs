use plotters::style::RGBColor;

/// Categorical palette for per-station line series, picked to stay
/// readable on the dark plot background.
const SERIES_COLORS: [RGBColor; 12] = [
    RGBColor(99, 110, 250),
    RGBColor(239, 85, 59),
    RGBColor(0, 204, 150),
    RGBColor(171, 99, 250),
    RGBColor(255, 161, 90),
    RGBColor(25, 211, 243),
    RGBColor(255, 102, 146),
    RGBColor(182, 232, 128),
    RGBColor(255, 151, 255),
    RGBColor(254, 203, 82),
    RGBColor(127, 201, 127),
    RGBColor(190, 174, 212),
];

/// Color for the series at `index`; cycles when a chart has more series
/// than the palette has entries.
pub fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}
