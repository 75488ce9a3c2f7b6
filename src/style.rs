//! Shared chart style, passed explicitly to every encoder and draw call

use crate::shaping::Rgb;
use crate::ui::Theme;

/// Word cloud palette, assigned by display index modulo its length
pub(crate) const CLOUD_PALETTE: [&str; 10] = [
    "#4E79A7", // Blue
    "#F28E2B", // Orange
    "#E15759", // Red
    "#76B7B2", // Teal
    "#59A14F", // Green
    "#EDC948", // Yellow
    "#B07AA1", // Purple
    "#FF9DA7", // Pink
    "#9C755F", // Brown
    "#7F7F7F", // Gray
];

/// Series colors; radar datasets 0 and 1 always get the first two hues
pub(crate) const SERIES_PALETTE: [&str; 6] = [
    "#36A2EB", // Blue
    "#FF6384", // Rose
    "#4BC0C0", // Teal
    "#FF9F40", // Orange
    "#9966FF", // Violet
    "#FFCD56", // Yellow
];

/// Heat-map gradient stops
pub(crate) const HEAT_COLD: Rgb = Rgb::new(0x1E, 0x88, 0xE5); // Blue
pub(crate) const HEAT_MID: Rgb = Rgb::new(0xFF, 0xD5, 0x4F); // Yellow
pub(crate) const HEAT_HOT: Rgb = Rgb::new(0xE5, 0x39, 0x35); // Red
/// Cells with no activity, independent of the gradient
pub(crate) const HEAT_ZERO: &str = "#EBEDF0";

/// How tooltips are triggered on axis charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TooltipMode {
    Axis,
    Item,
}

/// Immutable style bundle for one render
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StyleConfig {
    pub(crate) font_family: &'static str,
    pub(crate) title_font_size: u32,
    pub(crate) label_font_size: u32,
    pub(crate) text_color: &'static str,
    pub(crate) muted_text_color: &'static str,
    pub(crate) background: &'static str,
    pub(crate) card_background: &'static str,
    pub(crate) grid_color: &'static str,
    pub(crate) bar_color: &'static str,
    pub(crate) sent_color: &'static str,
    pub(crate) received_color: &'static str,
    pub(crate) cloud_palette: &'static [&'static str],
    pub(crate) series_palette: &'static [&'static str],
    pub(crate) heat_cold: Rgb,
    pub(crate) heat_mid: Rgb,
    pub(crate) heat_hot: Rgb,
    pub(crate) heat_zero: &'static str,
    pub(crate) animation_ms: u32,
    pub(crate) tooltip: TooltipMode,
    /// Image export size (2x for Retina quality)
    pub(crate) image_width: u32,
    pub(crate) image_height: u32,
}

impl StyleConfig {
    pub(crate) fn light() -> Self {
        Self {
            font_family: "Nunito, 'Segoe UI', Roboto, sans-serif",
            title_font_size: 16,
            label_font_size: 12,
            text_color: "#212529",
            muted_text_color: "#6C757D",
            background: "#F8F9FA",
            card_background: "#FFFFFF",
            grid_color: "#DEE2E6",
            bar_color: "#36A2EB",
            sent_color: "#36A2EB",
            received_color: "#FF6384",
            cloud_palette: &CLOUD_PALETTE,
            series_palette: &SERIES_PALETTE,
            heat_cold: HEAT_COLD,
            heat_mid: HEAT_MID,
            heat_hot: HEAT_HOT,
            heat_zero: HEAT_ZERO,
            animation_ms: 1000,
            tooltip: TooltipMode::Axis,
            image_width: 1600,
            image_height: 900,
        }
    }

    pub(crate) fn dark() -> Self {
        Self {
            text_color: "#FFFFFF",
            muted_text_color: "#ADB5BD",
            background: "#0A0A0C", // Near black
            card_background: "#1C1C21",
            grid_color: "#505050",
            ..Self::light()
        }
    }

    pub(crate) fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    /// Cyclic series color
    pub(crate) fn series_color(&self, index: usize) -> &'static str {
        self.series_palette[index % self.series_palette.len()]
    }

    /// Cyclic word cloud color
    pub(crate) fn cloud_color(&self, index: usize) -> &'static str {
        self.cloud_palette[index % self.cloud_palette.len()]
    }
}
