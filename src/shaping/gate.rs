//! Data sufficiency gate: decides whether a slot's data can be drawn

use std::fmt;

use crate::payload::{
    ACTIVITY_CELLS, ContactRecord, DailyCount, FolderCount, HourlyRecord, MetricSeries,
    RankedCount, SentReceived, WeightedTerm,
};

/// Contacts shown in the stacked-bar fallback
pub(crate) const FALLBACK_CONTACT_LIMIT: usize = 3;
/// Contacts shown as bubbles
pub(crate) const BUBBLE_CONTACT_LIMIT: usize = 8;
/// Terms shown in the word cloud
pub(crate) const WORD_CLOUD_LIMIT: usize = 20;
/// Rows in a top senders/recipients ranking
pub(crate) const RANKING_LIMIT: usize = 10;

/// Visual shape of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ChartKind {
    Bars,
    HorizontalBars,
    StackedBars,
    Bubbles,
    WordCloud,
    Radar,
    HeatMap,
    Line,
    Doughnut,
    Pie,
}

impl ChartKind {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            ChartKind::Bars => "bar",
            ChartKind::HorizontalBars => "horizontal-bar",
            ChartKind::StackedBars => "stacked-bar",
            ChartKind::Bubbles => "bubble",
            ChartKind::WordCloud => "word-cloud",
            ChartKind::Radar => "radar",
            ChartKind::HeatMap => "heat-map",
            ChartKind::Line => "line",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of the gate for one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenderPlan {
    Primary,
    Fallback(ChartKind),
    Empty,
}

/// Borrowed view of the payload field a slot reads
#[derive(Debug, Clone, Copy)]
pub(crate) enum SlotData<'a> {
    Hourly(Option<&'a [HourlyRecord]>),
    Contacts(Option<&'a [ContactRecord]>),
    Terms(Option<&'a [WeightedTerm]>),
    Metrics(Option<&'a MetricSeries>),
    Activity(Option<&'a [u64]>),
    Daily(Option<&'a [DailyCount]>),
    Traffic(Option<&'a SentReceived>),
    Folders(Option<&'a [FolderCount]>),
    Ranking(Option<&'a [RankedCount]>),
}

impl SlotData<'_> {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            SlotData::Hourly(_) => "hourly records",
            SlotData::Contacts(_) => "contact records",
            SlotData::Terms(_) => "weighted terms",
            SlotData::Metrics(_) => "metric series",
            SlotData::Activity(_) => "activity matrix",
            SlotData::Daily(_) => "daily counts",
            SlotData::Traffic(_) => "sent/received totals",
            SlotData::Folders(_) => "folder counts",
            SlotData::Ranking(_) => "ranked counts",
        }
    }
}

fn present<T>(data: Option<&[T]>) -> Option<&[T]> {
    data.filter(|items| !items.is_empty())
}

/// Decide how `data` can be shown as `kind`. Never fails; data of the wrong
/// shape for `kind` is treated as absent.
pub(crate) fn assess(kind: ChartKind, data: &SlotData<'_>) -> RenderPlan {
    match (kind, *data) {
        (ChartKind::Bars, SlotData::Hourly(records)) => match present(records) {
            Some(_) => RenderPlan::Primary,
            None => RenderPlan::Empty,
        },
        (ChartKind::Bubbles, SlotData::Contacts(records)) => match present(records) {
            Some(records) if records.iter().any(ContactRecord::is_paired) => RenderPlan::Primary,
            Some(_) => RenderPlan::Fallback(ChartKind::StackedBars),
            None => RenderPlan::Empty,
        },
        (ChartKind::StackedBars, SlotData::Contacts(records)) => match present(records) {
            Some(_) => RenderPlan::Primary,
            None => RenderPlan::Empty,
        },
        (ChartKind::WordCloud, SlotData::Terms(terms)) => match present(terms) {
            Some(_) => RenderPlan::Primary,
            None => RenderPlan::Empty,
        },
        (ChartKind::Radar, SlotData::Metrics(metrics)) => match metrics {
            Some(MetricSeries {
                labels: Some(_),
                datasets: Some(_),
            }) => RenderPlan::Primary,
            _ => RenderPlan::Empty,
        },
        // Only the cells the grid shows count
        (ChartKind::HeatMap, SlotData::Activity(matrix)) => match present(matrix) {
            Some(values) if values.iter().take(ACTIVITY_CELLS).any(|&v| v > 0) => {
                RenderPlan::Primary
            }
            _ => RenderPlan::Empty,
        },
        (ChartKind::Line, SlotData::Daily(days)) => match present(days) {
            Some(_) => RenderPlan::Primary,
            None => RenderPlan::Empty,
        },
        (ChartKind::Doughnut | ChartKind::Pie, SlotData::Traffic(totals)) => match totals {
            Some(t) if t.sent > 0 || t.received > 0 => RenderPlan::Primary,
            _ => RenderPlan::Empty,
        },
        (ChartKind::Pie | ChartKind::Doughnut, SlotData::Folders(folders)) => {
            match present(folders) {
                Some(_) => RenderPlan::Primary,
                None => RenderPlan::Empty,
            }
        }
        (ChartKind::HorizontalBars, SlotData::Ranking(records)) => match present(records) {
            Some(_) => RenderPlan::Primary,
            None => RenderPlan::Empty,
        },
        _ => RenderPlan::Empty,
    }
}
