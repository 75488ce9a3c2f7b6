//! Rendering dispatch: gate, encode and draw every dashboard slot

use tracing::{debug, error, info, warn};

use crate::chart::{ChartBackend, ChartSlot, Field, RenderError, SLOTS};
use crate::payload::Payload;
use crate::shaping::{ChartKind, RenderPlan, SlotData, assess, encode};
use crate::style::StyleConfig;

/// What happened to one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SlotStatus {
    Drawn(ChartKind),
    Fallback(ChartKind),
    Placeholder,
    Failed(String),
    NotReached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SlotOutcome {
    pub(crate) slot_id: &'static str,
    pub(crate) status: SlotStatus,
}

/// Per-slot outcomes of one `render_all` call, in slot order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct RenderReport {
    pub(crate) outcomes: Vec<SlotOutcome>,
}

impl RenderReport {
    pub(crate) fn drawn(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SlotStatus::Drawn(_) | SlotStatus::Fallback(_)))
            .count()
    }

    pub(crate) fn failed(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.status, SlotStatus::Failed(_)))
    }
}

/// Borrow the payload field `field` names
pub(crate) fn slot_data(payload: &Payload, field: Field) -> SlotData<'_> {
    match field {
        Field::HourlyActivity => SlotData::Hourly(payload.hourly_activity.as_deref()),
        Field::ContactData => SlotData::Contacts(payload.contact_data.as_deref()),
        Field::WordCloud => SlotData::Terms(payload.word_cloud.as_deref()),
        Field::EmailMetrics => SlotData::Metrics(payload.email_metrics.as_ref()),
        Field::ActivityHeatmap => SlotData::Activity(payload.activity_heatmap.as_deref()),
        Field::DailyCounts => SlotData::Daily(payload.daily_counts.as_deref()),
        Field::SentVsReceived => SlotData::Traffic(payload.sent_vs_received.as_ref()),
        Field::FoldersData => SlotData::Folders(payload.folders_data.as_deref()),
        Field::TopSenders => SlotData::Ranking(payload.top_senders.as_deref()),
        Field::TopRecipients => SlotData::Ranking(payload.top_recipients.as_deref()),
    }
}

fn render_slot(
    slot: &ChartSlot,
    payload: &Payload,
    style: &StyleConfig,
    backend: &mut dyn ChartBackend,
) -> Result<SlotStatus, RenderError> {
    let data = slot_data(payload, slot.field);
    let plan = assess(slot.expected_kind, &data);
    debug!(slot = slot.slot_id, ?plan, "slot assessed");

    let (kind, status) = match plan {
        RenderPlan::Empty => {
            backend.placeholder(slot, style);
            return Ok(SlotStatus::Placeholder);
        }
        RenderPlan::Primary => (slot.expected_kind, SlotStatus::Drawn(slot.expected_kind)),
        RenderPlan::Fallback(alt) => {
            info!(
                slot = slot.slot_id,
                from = %slot.expected_kind,
                to = %alt,
                "falling back to alternate chart"
            );
            (alt, SlotStatus::Fallback(alt))
        }
    };

    let encoding = encode(kind, &data, style)?;
    let handle = backend.draw(slot, &encoding, style)?;
    debug!(slot = handle.slot_id, kind = %handle.kind, "slot drawn");
    Ok(status)
}

/// Render every slot from `payload` into `backend`.
///
/// A missing payload gives every slot its placeholder without looking at any
/// field. The first render error stops the loop: slots already drawn stay,
/// the rest are reported as not reached.
pub(crate) fn render_all(
    payload: Option<&Payload>,
    style: &StyleConfig,
    backend: &mut dyn ChartBackend,
) -> RenderReport {
    let mut report = RenderReport::default();

    let Some(payload) = payload else {
        warn!("no payload, showing placeholders");
        for slot in &SLOTS {
            backend.placeholder(slot, style);
            report.outcomes.push(SlotOutcome {
                slot_id: slot.slot_id,
                status: SlotStatus::Placeholder,
            });
        }
        return report;
    };

    let mut slots = SLOTS.iter();
    for slot in slots.by_ref() {
        match render_slot(slot, payload, style, backend) {
            Ok(status) => report.outcomes.push(SlotOutcome {
                slot_id: slot.slot_id,
                status,
            }),
            Err(e) => {
                error!(slot = slot.slot_id, error = %e, "render failed");
                report.outcomes.push(SlotOutcome {
                    slot_id: slot.slot_id,
                    status: SlotStatus::Failed(e.to_string()),
                });
                break;
            }
        }
    }

    for slot in slots {
        report.outcomes.push(SlotOutcome {
            slot_id: slot.slot_id,
            status: SlotStatus::NotReached,
        });
    }

    info!(drawn = report.drawn(), slots = SLOTS.len(), "render finished");
    report
}
