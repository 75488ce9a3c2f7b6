//! Record-to-encoding mappers, one per chart kind

use thiserror::Error;

use super::gate::{
    BUBBLE_CONTACT_LIMIT, ChartKind, FALLBACK_CONTACT_LIMIT, RANKING_LIMIT, SlotData,
    WORD_CLOUD_LIMIT,
};
use super::scale::{
    bubble_radius, cloud_font_size, gradient_color, heat_intensity, weight_ratio,
};
use crate::payload::{
    ACTIVITY_CELLS, ContactRecord, DAYS_PER_WEEK, HOURS_PER_DAY, HourlyRecord, MetricDataset,
    MetricSeries, RankedCount, WeightedTerm,
};
use crate::style::StyleConfig;

/// Labels longer than this are shortened in the stacked-bar fallback
const LABEL_MAX_CHARS: usize = 15;
const LABEL_KEEP_CHARS: usize = 12;

/// Terms above this share of the maximum weight are bold
const BOLD_RATIO: f64 = 0.6;

pub(crate) const DAY_LABELS: [&str; DAYS_PER_WEEK] =
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Error, PartialEq)]
pub(crate) enum ShapeError {
    #[error("cannot encode {data} as {kind} chart")]
    KindMismatch {
        kind: ChartKind,
        data: &'static str,
    },
    #[error("no {0} data to encode")]
    Missing(ChartKind),
}

/// Category axis with one value per category
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategorySeries {
    pub(crate) categories: Vec<String>,
    pub(crate) values: Vec<f64>,
}

/// Two stacked series over shortened contact labels
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StackedSeries {
    pub(crate) labels: Vec<String>,
    pub(crate) sent: Vec<f64>,
    pub(crate) received: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EncodedPoint {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) r: f64,
    pub(crate) label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CloudWord {
    pub(crate) text: String,
    pub(crate) font_size: f64,
    pub(crate) bold: bool,
    pub(crate) color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RadarSeries {
    pub(crate) name: String,
    pub(crate) values: Vec<f64>,
    pub(crate) color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RadarEncoding {
    pub(crate) labels: Vec<String>,
    pub(crate) series: Vec<RadarSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HeatCell {
    pub(crate) hour: usize,
    pub(crate) value: u64,
    pub(crate) intensity: f64,
    pub(crate) color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HeatRow {
    pub(crate) day: &'static str,
    pub(crate) cells: Vec<HeatCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HeatGrid {
    pub(crate) max: u64,
    pub(crate) rows: Vec<HeatRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slice {
    pub(crate) name: String,
    pub(crate) value: f64,
}

/// Geometry handed to a chart backend
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Encoding {
    Bars(CategorySeries),
    HorizontalBars(CategorySeries),
    StackedBars(StackedSeries),
    Bubbles(Vec<EncodedPoint>),
    WordCloud(Vec<CloudWord>),
    Radar(RadarEncoding),
    HeatMap(HeatGrid),
    Line(CategorySeries),
    Doughnut(Vec<Slice>),
    Pie(Vec<Slice>),
}

impl Encoding {
    pub(crate) fn kind(&self) -> ChartKind {
        match self {
            Encoding::Bars(_) => ChartKind::Bars,
            Encoding::HorizontalBars(_) => ChartKind::HorizontalBars,
            Encoding::StackedBars(_) => ChartKind::StackedBars,
            Encoding::Bubbles(_) => ChartKind::Bubbles,
            Encoding::WordCloud(_) => ChartKind::WordCloud,
            Encoding::Radar(_) => ChartKind::Radar,
            Encoding::HeatMap(_) => ChartKind::HeatMap,
            Encoding::Line(_) => ChartKind::Line,
            Encoding::Doughnut(_) => ChartKind::Doughnut,
            Encoding::Pie(_) => ChartKind::Pie,
        }
    }
}

/// Shorten a label to 12 characters plus `...` when it exceeds 15
pub(crate) fn truncate_label(label: &str) -> String {
    if label.chars().count() > LABEL_MAX_CHARS {
        let kept: String = label.chars().take(LABEL_KEEP_CHARS).collect();
        format!("{}...", kept)
    } else {
        label.to_string()
    }
}

pub(crate) fn encode_hourly(records: &[HourlyRecord]) -> CategorySeries {
    CategorySeries {
        categories: records.iter().map(|r| r.hour.clone()).collect(),
        values: records.iter().map(|r| r.count as f64).collect(),
    }
}

/// Ranking in payload order, largest first upstream
pub(crate) fn encode_ranking(records: &[RankedCount]) -> CategorySeries {
    let shown = &records[..records.len().min(RANKING_LIMIT)];
    CategorySeries {
        categories: shown.iter().map(|r| r.display_name().to_string()).collect(),
        values: shown.iter().map(|r| r.count as f64).collect(),
    }
}

pub(crate) fn encode_contact_stack(records: &[ContactRecord]) -> StackedSeries {
    let shown = &records[..records.len().min(FALLBACK_CONTACT_LIMIT)];
    StackedSeries {
        labels: shown.iter().map(|r| truncate_label(&r.label)).collect(),
        sent: shown.iter().map(|r| r.sent as f64).collect(),
        received: shown.iter().map(|r| r.received as f64).collect(),
    }
}

pub(crate) fn encode_bubbles(records: &[ContactRecord]) -> Vec<EncodedPoint> {
    records
        .iter()
        .take(BUBBLE_CONTACT_LIMIT)
        .map(|r| EncodedPoint {
            x: r.sent as f64,
            y: r.received as f64,
            r: bubble_radius(r.sent, r.received),
            label: r.label.clone(),
        })
        .collect()
}

pub(crate) fn encode_word_cloud(terms: &[WeightedTerm], style: &StyleConfig) -> Vec<CloudWord> {
    let shown = &terms[..terms.len().min(WORD_CLOUD_LIMIT)];
    // Scan rather than trusting the first entry; identical for sorted input
    let max_weight = shown
        .iter()
        .map(|t| t.weight)
        .fold(f64::NEG_INFINITY, f64::max);

    shown
        .iter()
        .enumerate()
        .map(|(i, term)| {
            let ratio = weight_ratio(term.weight, max_weight);
            CloudWord {
                text: term.text.clone(),
                font_size: cloud_font_size(ratio),
                bold: ratio > BOLD_RATIO,
                color: style.cloud_color(i),
            }
        })
        .collect()
}

pub(crate) fn encode_radar(
    labels: &[String],
    datasets: &[MetricDataset],
    style: &StyleConfig,
) -> RadarEncoding {
    RadarEncoding {
        labels: labels.to_vec(),
        series: datasets
            .iter()
            .enumerate()
            .map(|(i, d)| RadarSeries {
                name: d.name.clone(),
                values: d.values.clone(),
                color: style.series_color(i),
            })
            .collect(),
    }
}

pub(crate) fn encode_heat_map(matrix: &[u64], style: &StyleConfig) -> HeatGrid {
    let cell_value = |idx: usize| matrix.get(idx).copied().unwrap_or(0);
    let max = (0..ACTIVITY_CELLS).map(cell_value).max().unwrap_or(0);

    let rows = DAY_LABELS
        .iter()
        .enumerate()
        .map(|(day_idx, &day)| {
            let cells = (0..HOURS_PER_DAY)
                .map(|hour| {
                    let value = cell_value(day_idx * HOURS_PER_DAY + hour);
                    let intensity = heat_intensity(value, max);
                    let color = if value == 0 {
                        style.heat_zero.to_string()
                    } else {
                        gradient_color(style.heat_cold, style.heat_mid, style.heat_hot, intensity)
                            .hex()
                    };
                    HeatCell {
                        hour,
                        value,
                        intensity,
                        color,
                    }
                })
                .collect();
            HeatRow { day, cells }
        })
        .collect();

    HeatGrid { max, rows }
}

/// Map `data` into the encoding for `kind`
pub(crate) fn encode(
    kind: ChartKind,
    data: &SlotData<'_>,
    style: &StyleConfig,
) -> Result<Encoding, ShapeError> {
    let mismatch = || ShapeError::KindMismatch {
        kind,
        data: data.describe(),
    };
    let missing = || ShapeError::Missing(kind);

    let encoding = match (kind, *data) {
        (ChartKind::Bars, SlotData::Hourly(records)) => {
            Encoding::Bars(encode_hourly(records.ok_or_else(missing)?))
        }
        (ChartKind::HorizontalBars, SlotData::Ranking(records)) => {
            Encoding::HorizontalBars(encode_ranking(records.ok_or_else(missing)?))
        }
        (ChartKind::StackedBars, SlotData::Contacts(records)) => {
            Encoding::StackedBars(encode_contact_stack(records.ok_or_else(missing)?))
        }
        (ChartKind::Bubbles, SlotData::Contacts(records)) => {
            Encoding::Bubbles(encode_bubbles(records.ok_or_else(missing)?))
        }
        (ChartKind::WordCloud, SlotData::Terms(terms)) => {
            Encoding::WordCloud(encode_word_cloud(terms.ok_or_else(missing)?, style))
        }
        (ChartKind::Radar, SlotData::Metrics(metrics)) => match metrics {
            Some(MetricSeries {
                labels: Some(labels),
                datasets: Some(datasets),
            }) => Encoding::Radar(encode_radar(labels, datasets, style)),
            _ => return Err(missing()),
        },
        (ChartKind::HeatMap, SlotData::Activity(matrix)) => {
            Encoding::HeatMap(encode_heat_map(matrix.ok_or_else(missing)?, style))
        }
        (ChartKind::Line, SlotData::Daily(days)) => {
            let days = days.ok_or_else(missing)?;
            Encoding::Line(CategorySeries {
                categories: days.iter().map(|d| d.date.clone()).collect(),
                values: days.iter().map(|d| d.count as f64).collect(),
            })
        }
        (ChartKind::Doughnut | ChartKind::Pie, SlotData::Traffic(totals)) => {
            let totals = totals.ok_or_else(missing)?;
            let slices = vec![
                Slice {
                    name: "Sent".to_string(),
                    value: totals.sent as f64,
                },
                Slice {
                    name: "Received".to_string(),
                    value: totals.received as f64,
                },
            ];
            wrap_slices(kind, slices)
        }
        (ChartKind::Doughnut | ChartKind::Pie, SlotData::Folders(folders)) => {
            let slices = folders
                .ok_or_else(missing)?
                .iter()
                .map(|f| Slice {
                    name: f.display_name().to_string(),
                    value: f.count as f64,
                })
                .collect();
            wrap_slices(kind, slices)
        }
        _ => return Err(mismatch()),
    };

    Ok(encoding)
}

fn wrap_slices(kind: ChartKind, slices: Vec<Slice>) -> Encoding {
    if kind == ChartKind::Doughnut {
        Encoding::Doughnut(slices)
    } else {
        Encoding::Pie(slices)
    }
}
