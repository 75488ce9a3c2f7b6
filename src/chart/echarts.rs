//! ECharts option building for the axis, bubble, radar and pie encodings

use charming::{
    Chart, ImageRenderer,
    component::{Axis, Grid, Legend, RadarCoordinate, Title},
    element::{
        AxisLabel, AxisType, Color, ItemStyle, Label, LabelPosition, LineStyle, SplitLine,
        Symbol, TextStyle, Tooltip, Trigger,
    },
    renderer::ImageFormat,
    series::{Bar, Line, Pie, Radar, Scatter},
};

use super::{ChartSlot, RenderError};
use crate::shaping::{
    CategorySeries, EncodedPoint, Encoding, RadarEncoding, Slice, StackedSeries,
};
use crate::style::{StyleConfig, TooltipMode};

/// Rounding for value labels
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn tooltip(mode: TooltipMode) -> Tooltip {
    let trigger = match mode {
        TooltipMode::Axis => Trigger::Axis,
        TooltipMode::Item => Trigger::Item,
    };
    Tooltip::new().trigger(trigger)
}

/// Series colors in series order
fn palette(colors: impl IntoIterator<Item = &'static str>) -> Vec<Color> {
    colors
        .into_iter()
        .map(|c| Color::Value(c.to_string()))
        .collect()
}

fn base_chart(slot: &ChartSlot, style: &StyleConfig) -> Chart {
    Chart::new()
        .background_color(Color::Value(style.card_background.to_string()))
        .title(
            Title::new()
                .text(slot.title)
                .left("center")
                .top("2%")
                .text_style(
                    TextStyle::new()
                        .color(style.text_color)
                        .font_size(style.title_font_size as f64),
                ),
        )
}

fn category_axis(categories: &[String], style: &StyleConfig) -> Axis {
    Axis::new()
        .type_(AxisType::Category)
        .data(categories.to_vec())
        .axis_label(
            AxisLabel::new()
                .color(style.text_color)
                .font_size(style.label_font_size as f64),
        )
}

fn value_axis(style: &StyleConfig) -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .axis_label(
            AxisLabel::new()
                .color(style.text_color)
                .font_size(style.label_font_size as f64),
        )
        .split_line(
            SplitLine::new().line_style(LineStyle::new().width(0.5).color(style.grid_color)),
        )
}

fn grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("8%")
        .top("15%")
        .contain_label(true)
}

fn legend(names: Vec<String>, style: &StyleConfig) -> Legend {
    Legend::new()
        .data(names)
        .bottom("1%")
        .item_gap(16)
        .text_style(
            TextStyle::new()
                .color(style.text_color)
                .font_size(style.label_font_size as f64),
        )
}

fn bars_chart(slot: &ChartSlot, series: &CategorySeries, style: &StyleConfig) -> Chart {
    base_chart(slot, style)
        .tooltip(tooltip(style.tooltip))
        .grid(grid())
        .x_axis(category_axis(&series.categories, style))
        .y_axis(value_axis(style))
        .series(
            Bar::new()
                .name("Emails")
                .data(series.values.clone())
                .item_style(ItemStyle::new().color(style.bar_color)),
        )
}

/// Ranked names top to bottom
fn horizontal_bars_chart(slot: &ChartSlot, series: &CategorySeries, style: &StyleConfig) -> Chart {
    base_chart(slot, style)
        .tooltip(tooltip(style.tooltip))
        .grid(grid())
        .x_axis(value_axis(style))
        .y_axis(category_axis(&series.categories, style).inverse(true))
        .series(
            Bar::new()
                .name("Emails")
                .data(series.values.clone())
                .item_style(ItemStyle::new().color(style.bar_color)),
        )
}

fn stacked_chart(slot: &ChartSlot, stack: &StackedSeries, style: &StyleConfig) -> Chart {
    let sent_name = "Sent";
    let received_name = "Received";

    let mut chart = base_chart(slot, style)
        .tooltip(tooltip(TooltipMode::Axis))
        .legend(legend(
            vec![sent_name.to_string(), received_name.to_string()],
            style,
        ))
        .grid(grid())
        .x_axis(category_axis(&stack.labels, style))
        .y_axis(value_axis(style));

    for (name, values, color) in [
        (sent_name, &stack.sent, style.sent_color),
        (received_name, &stack.received, style.received_color),
    ] {
        chart = chart.series(
            Bar::new()
                .name(name)
                .data(values.iter().copied().map(round1).collect::<Vec<f64>>())
                .stack("total")
                .item_style(ItemStyle::new().color(color))
                .label(
                    Label::new()
                        .show(true)
                        .position(LabelPosition::Inside)
                        .color(style.text_color)
                        .font_size(style.label_font_size as f64)
                        .formatter("{c}"),
                ),
        );
    }

    chart
}

/// One scatter series per contact so each bubble keeps its own radius
fn bubble_chart(slot: &ChartSlot, points: &[EncodedPoint], style: &StyleConfig) -> Chart {
    let names: Vec<String> = points.iter().map(|p| p.label.clone()).collect();

    let mut chart = base_chart(slot, style)
        .color(palette((0..points.len()).map(|i| style.series_color(i))))
        .tooltip(tooltip(TooltipMode::Item))
        .legend(legend(names, style))
        .grid(grid())
        .x_axis(value_axis(style).name("Sent"))
        .y_axis(value_axis(style).name("Received"));

    for point in points {
        chart = chart.series(
            Scatter::new()
                .name(point.label.as_str())
                // ECharts takes the symbol diameter
                .symbol_size(point.r * 2.0)
                .data(vec![vec![point.x, point.y]]),
        );
    }

    chart
}

fn radar_chart(slot: &ChartSlot, radar: &RadarEncoding, style: &StyleConfig) -> Chart {
    let peak = radar
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0f64, f64::max);
    // Metrics are scores out of 100 upstream; larger values widen the scale
    let max = peak.max(100.0).ceil() as i64;

    let indicators: Vec<(&str, i64, i64)> = radar
        .labels
        .iter()
        .map(|label| (label.as_str(), 0i64, max))
        .collect();

    let mut chart = base_chart(slot, style)
        .color(palette(radar.series.iter().map(|s| s.color)))
        .tooltip(tooltip(TooltipMode::Item))
        .legend(legend(
            radar.series.iter().map(|s| s.name.clone()).collect(),
            style,
        ))
        .radar(RadarCoordinate::new().indicator(indicators));

    for series in &radar.series {
        chart = chart.series(
            Radar::new()
                .name(series.name.as_str())
                .data(vec![(series.values.clone(), series.name.as_str())]),
        );
    }

    chart
}

fn line_chart(slot: &ChartSlot, series: &CategorySeries, style: &StyleConfig) -> Chart {
    base_chart(slot, style)
        .tooltip(tooltip(style.tooltip))
        .grid(grid())
        .x_axis(category_axis(&series.categories, style))
        .y_axis(value_axis(style))
        .series(
            Line::new()
                .name("Emails")
                .data(series.values.clone())
                .symbol(Symbol::Circle)
                .symbol_size(8)
                .line_style(LineStyle::new().width(2))
                .item_style(ItemStyle::new().color(style.series_color(0))),
        )
}

fn pie_chart(slot: &ChartSlot, slices: &[Slice], style: &StyleConfig, doughnut: bool) -> Chart {
    let data: Vec<(f64, &str)> = slices.iter().map(|s| (s.value, s.name.as_str())).collect();

    let pie = Pie::new().name(slot.title).data(data).label(
        Label::new()
            .show(true)
            .color(style.text_color)
            .font_size(style.label_font_size as f64)
            .formatter("{b}: {d}%"),
    );
    let pie = if doughnut {
        pie.radius(vec!["40%", "70%"])
    } else {
        pie.radius(vec!["0%", "65%"])
    };

    base_chart(slot, style)
        .color(palette(style.series_palette.iter().copied()))
        .tooltip(tooltip(TooltipMode::Item))
        .legend(legend(slices.iter().map(|s| s.name.clone()).collect(), style))
        .series(pie)
}

/// Build the chart for an encoding drawn through ECharts; `None` for encodings
/// rendered as markup
pub(super) fn build_chart(
    slot: &ChartSlot,
    encoding: &Encoding,
    style: &StyleConfig,
) -> Option<Chart> {
    let chart = match encoding {
        Encoding::Bars(series) => bars_chart(slot, series, style),
        Encoding::HorizontalBars(series) => horizontal_bars_chart(slot, series, style),
        Encoding::StackedBars(stack) => stacked_chart(slot, stack, style),
        Encoding::Bubbles(points) => bubble_chart(slot, points, style),
        Encoding::Radar(radar) => radar_chart(slot, radar, style),
        Encoding::Line(series) => line_chart(slot, series, style),
        Encoding::Doughnut(slices) => pie_chart(slot, slices, style, true),
        Encoding::Pie(slices) => pie_chart(slot, slices, style, false),
        Encoding::WordCloud(_) | Encoding::HeatMap(_) => return None,
    };
    Some(chart)
}

/// Chart options as JSON, safe to inline inside a `<script>` element
pub(super) fn chart_options(chart: &Chart) -> String {
    chart.to_string().replace("</", "<\\/")
}

/// Render a chart to a PNG file
pub(super) fn save_png(
    chart: &Chart,
    style: &StyleConfig,
    output_path: &str,
) -> Result<(), RenderError> {
    let mut renderer = ImageRenderer::new(style.image_width, style.image_height);
    renderer
        .save_format(ImageFormat::Png, chart, output_path)
        .map_err(|e| RenderError::Chart(format!("Failed to save chart: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SLOTS;
    use crate::shaping::ChartKind;

    fn slot(kind: ChartKind) -> &'static ChartSlot {
        SLOTS.iter().find(|s| s.expected_kind == kind).unwrap()
    }

    #[test]
    fn test_markup_encodings_have_no_chart() {
        let style = StyleConfig::light();
        let encoding = Encoding::WordCloud(vec![]);
        assert!(build_chart(&SLOTS[2], &encoding, &style).is_none());
    }

    #[test]
    fn test_stacked_options_contain_both_series() {
        let style = StyleConfig::light();
        let encoding = Encoding::StackedBars(StackedSeries {
            labels: vec!["someone.long...".to_string()],
            sent: vec![4.0],
            received: vec![0.0],
        });
        let chart = build_chart(slot(ChartKind::Bubbles), &encoding, &style).unwrap();
        let options = chart_options(&chart);
        assert!(options.contains("\"Sent\""));
        assert!(options.contains("\"Received\""));
        assert!(options.contains("someone.long..."));
        assert!(options.contains("\"stack\""));
    }

    #[test]
    fn test_bubble_options_use_diameter() {
        let style = StyleConfig::light();
        let encoding = Encoding::Bubbles(vec![EncodedPoint {
            x: 3.0,
            y: 5.0,
            r: 7.5,
            label: "a@example.com".to_string(),
        }]);
        let chart = build_chart(slot(ChartKind::Bubbles), &encoding, &style).unwrap();
        let options = chart_options(&chart);
        assert!(options.contains("a@example.com"));
        assert!(options.contains("15"));
    }

    #[test]
    fn test_radar_options_list_indicators() {
        let style = StyleConfig::light();
        let encoding = Encoding::Radar(RadarEncoding {
            labels: vec!["Response Rate".to_string(), "Diversity".to_string()],
            series: vec![],
        });
        let chart = build_chart(slot(ChartKind::Radar), &encoding, &style).unwrap();
        let options = chart_options(&chart);
        assert!(options.contains("Response Rate"));
        assert!(options.contains("Diversity"));
    }

    #[test]
    fn test_horizontal_bars_put_names_on_y_axis() {
        let style = StyleConfig::light();
        let encoding = Encoding::HorizontalBars(CategorySeries {
            categories: vec!["boss@example.com".to_string()],
            values: vec![7.0],
        });
        let chart = build_chart(slot(ChartKind::HorizontalBars), &encoding, &style).unwrap();
        let options: serde_json::Value = serde_json::from_str(&chart_options(&chart)).unwrap();
        assert_eq!(options["yAxis"][0]["type"], "category");
        assert_eq!(options["yAxis"][0]["inverse"], true);
        assert_eq!(options["yAxis"][0]["data"][0], "boss@example.com");
        assert_eq!(options["xAxis"][0]["type"], "value");
    }

    #[test]
    fn test_options_escape_script_close() {
        let style = StyleConfig::light();
        let encoding = Encoding::Bars(CategorySeries {
            categories: vec!["</script>".to_string()],
            values: vec![1.0],
        });
        let chart = build_chart(&SLOTS[0], &encoding, &style).unwrap();
        let options = chart_options(&chart);
        assert!(!options.contains("</script>"));
        assert!(options.contains("<\\/script>"));
    }
}
