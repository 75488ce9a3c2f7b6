//! Chart slots and the drawing boundary

mod dashboard;
mod echarts;
mod markup;

pub(crate) use dashboard::DashboardBackend;

use thiserror::Error;

use crate::shaping::{ChartKind, Encoding, ShapeError};
use crate::style::StyleConfig;

#[derive(Debug, Error)]
pub(crate) enum RenderError {
    #[error("failed to shape chart data: {0}")]
    Shape(#[from] ShapeError),
    #[error("failed to render chart: {0}")]
    Chart(String),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Payload field a slot reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    HourlyActivity,
    ContactData,
    WordCloud,
    EmailMetrics,
    ActivityHeatmap,
    DailyCounts,
    SentVsReceived,
    FoldersData,
    TopSenders,
    TopRecipients,
}

/// Named rendering target on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChartSlot {
    pub(crate) slot_id: &'static str,
    pub(crate) title: &'static str,
    pub(crate) expected_kind: ChartKind,
    pub(crate) field: Field,
    /// Placeholder glyph and guidance lines shown when there is nothing to draw
    pub(crate) icon: &'static str,
    pub(crate) empty_title: &'static str,
    pub(crate) empty_hint: &'static str,
}

/// Dashboard slots in page order
pub(crate) const SLOTS: [ChartSlot; 10] = [
    ChartSlot {
        slot_id: "hourly-activity",
        title: "Activity by Hour",
        expected_kind: ChartKind::Bars,
        field: Field::HourlyActivity,
        icon: "\u{1F552}",
        empty_title: "No hourly activity yet",
        empty_hint: "Synchronize an account to see when your mail arrives.",
    },
    ChartSlot {
        slot_id: "contact-bubbles",
        title: "Most Active Contacts",
        expected_kind: ChartKind::Bubbles,
        field: Field::ContactData,
        icon: "\u{1F465}",
        empty_title: "No contact data available",
        empty_hint: "Contacts appear once mail has been sent and received.",
    },
    ChartSlot {
        slot_id: "word-cloud",
        title: "Frequent Subject Terms",
        expected_kind: ChartKind::WordCloud,
        field: Field::WordCloud,
        icon: "\u{2601}",
        empty_title: "No subject terms found",
        empty_hint: "Terms are collected from the subjects of your messages.",
    },
    ChartSlot {
        slot_id: "email-metrics",
        title: "Email Metrics",
        expected_kind: ChartKind::Radar,
        field: Field::EmailMetrics,
        icon: "\u{1F4CA}",
        empty_title: "Metrics not available",
        empty_hint: "Metrics are computed after the first full synchronization.",
    },
    ChartSlot {
        slot_id: "activity-heatmap",
        title: "Weekly Activity",
        expected_kind: ChartKind::HeatMap,
        field: Field::ActivityHeatmap,
        icon: "\u{1F4C5}",
        empty_title: "No activity recorded",
        empty_hint: "The heat map fills in as messages are received each day.",
    },
    ChartSlot {
        slot_id: "daily-counts",
        title: "Emails per Day",
        expected_kind: ChartKind::Line,
        field: Field::DailyCounts,
        icon: "\u{1F4C8}",
        empty_title: "No recent emails",
        empty_hint: "Daily totals cover the last seven days.",
    },
    ChartSlot {
        slot_id: "sent-vs-received",
        title: "Sent vs Received",
        expected_kind: ChartKind::Doughnut,
        field: Field::SentVsReceived,
        icon: "\u{1F4E8}",
        empty_title: "No messages counted",
        empty_hint: "Sent and received totals appear after synchronization.",
    },
    ChartSlot {
        slot_id: "folders",
        title: "Emails by Folder",
        expected_kind: ChartKind::Pie,
        field: Field::FoldersData,
        icon: "\u{1F4C1}",
        empty_title: "No folders found",
        empty_hint: "Folder totals cover the last thirty days.",
    },
    ChartSlot {
        slot_id: "top-senders",
        title: "Top Senders",
        expected_kind: ChartKind::HorizontalBars,
        field: Field::TopSenders,
        icon: "\u{1F4E5}",
        empty_title: "No senders yet",
        empty_hint: "Senders are ranked by the messages you received from them.",
    },
    ChartSlot {
        slot_id: "top-recipients",
        title: "Top Recipients",
        expected_kind: ChartKind::HorizontalBars,
        field: Field::TopRecipients,
        icon: "\u{1F4E4}",
        empty_title: "No recipients yet",
        empty_hint: "Recipients are ranked by the messages you sent to them.",
    },
];

/// Look up a slot by id
pub(crate) fn find_slot(slot_id: &str) -> Option<&'static ChartSlot> {
    SLOTS.iter().find(|s| s.slot_id == slot_id)
}

/// Result of a successful draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DrawHandle {
    pub(crate) slot_id: &'static str,
    pub(crate) kind: ChartKind,
}

/// Drawing primitive the dispatcher hands encodings to
pub(crate) trait ChartBackend {
    /// Draw `encoding` into `slot`
    fn draw(
        &mut self,
        slot: &ChartSlot,
        encoding: &Encoding,
        style: &StyleConfig,
    ) -> Result<DrawHandle, RenderError>;

    /// Show the slot's placeholder instead of a chart
    fn placeholder(&mut self, slot: &ChartSlot, style: &StyleConfig);
}
