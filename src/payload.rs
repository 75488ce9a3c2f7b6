//! Dashboard payload as delivered by the report aggregator

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Number of cells in the day x hour activity grid
pub(crate) const DAYS_PER_WEEK: usize = 7;
pub(crate) const HOURS_PER_DAY: usize = 24;
pub(crate) const ACTIVITY_CELLS: usize = DAYS_PER_WEEK * HOURS_PER_DAY;

#[derive(Debug, Error)]
pub(crate) enum PayloadError {
    #[error("failed to read payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// `null` decodes as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Emails per hour of day, `hour` formatted as `HH:00`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct HourlyRecord {
    pub(crate) hour: String,
    pub(crate) count: u64,
}

/// Hourly activity arrives either as records or as parallel columns
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HourlyShape {
    Records(Vec<HourlyRecord>),
    Columns { labels: Vec<String>, values: Vec<u64> },
}

impl From<HourlyShape> for Vec<HourlyRecord> {
    fn from(shape: HourlyShape) -> Self {
        match shape {
            HourlyShape::Records(records) => records,
            HourlyShape::Columns { labels, values } => labels
                .into_iter()
                .zip(values)
                .map(|(hour, count)| HourlyRecord { hour, count })
                .collect(),
        }
    }
}

/// Traffic exchanged with one correspondent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ContactRecord {
    /// Address as stored upstream; may be null for unparsable headers
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) sent: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) received: u64,
}

impl ContactRecord {
    /// Both directions carry traffic
    pub(crate) fn is_paired(&self) -> bool {
        self.sent > 0 && self.received > 0
    }
}

/// Subject term with its frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WeightedTerm {
    pub(crate) text: String,
    pub(crate) weight: f64,
}

/// One named series of a [`MetricSeries`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MetricDataset {
    #[serde(alias = "label")]
    pub(crate) name: String,
    #[serde(alias = "data", default)]
    pub(crate) values: Vec<f64>,
}

/// Labeled metric vectors; either half may be missing upstream (`{}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct MetricSeries {
    #[serde(default)]
    pub(crate) labels: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) datasets: Option<Vec<MetricDataset>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DailyCount {
    pub(crate) date: String,
    pub(crate) count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct SentReceived {
    #[serde(default)]
    pub(crate) sent: u64,
    #[serde(default)]
    pub(crate) received: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FolderCount {
    #[serde(default)]
    pub(crate) folder: Option<String>,
    pub(crate) count: u64,
}

impl FolderCount {
    pub(crate) fn display_name(&self) -> &str {
        match self.folder.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "INBOX",
        }
    }
}

/// Correspondent with a message count; upstream keys it by `sender` or
/// `recipient` depending on direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RankedCount {
    #[serde(
        alias = "sender",
        alias = "recipient",
        default,
        deserialize_with = "null_as_default"
    )]
    pub(crate) name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) count: u64,
}

impl RankedCount {
    pub(crate) fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "(unknown)"
        } else {
            &self.name
        }
    }
}

/// Flat 7x24 grid, Monday first, hour 0-23 within each day
pub(crate) type ActivityMatrix = Vec<u64>;

/// All chart inputs; every field may be absent on its own
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Payload {
    pub(crate) hourly_activity: Option<Vec<HourlyRecord>>,
    pub(crate) contact_data: Option<Vec<ContactRecord>>,
    pub(crate) word_cloud: Option<Vec<WeightedTerm>>,
    pub(crate) email_metrics: Option<MetricSeries>,
    pub(crate) activity_heatmap: Option<ActivityMatrix>,
    pub(crate) daily_counts: Option<Vec<DailyCount>>,
    pub(crate) sent_vs_received: Option<SentReceived>,
    pub(crate) folders_data: Option<Vec<FolderCount>>,
    pub(crate) top_senders: Option<Vec<RankedCount>>,
    pub(crate) top_recipients: Option<Vec<RankedCount>>,
}

impl Payload {
    /// Decode each field on its own so one malformed field only blanks its
    /// own slot
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            hourly_activity: field::<HourlyShape>(object, "hourly_activity").map(Into::into),
            contact_data: field(object, "contact_data"),
            word_cloud: field(object, "word_cloud"),
            email_metrics: field(object, "email_metrics"),
            activity_heatmap: field(object, "activity_heatmap"),
            daily_counts: field(object, "daily_counts"),
            sent_vs_received: field(object, "sent_vs_received"),
            folders_data: field(object, "folders_data"),
            top_senders: field(object, "top_senders"),
            top_recipients: field(object, "top_recipients"),
        }
    }
}

/// Absent, `null` and malformed all decode to `None`
fn field<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    let value = object.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(field = key, error = %e, "malformed payload field, treating as missing");
            None
        }
    }
}

/// Parse a payload document. JSON `null` means the whole payload is missing,
/// as does any other non-object document. Only invalid JSON is an error.
pub(crate) fn parse_payload(text: &str) -> Result<Option<Payload>, PayloadError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(object) => Ok(Some(Payload::from_object(&object))),
        Value::Null => Ok(None),
        other => {
            warn!(kind = json_kind(&other), "payload is not an object, treating as missing");
            Ok(None)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Load a payload from a file, or from stdin when `source` is `-`
pub(crate) fn load_payload(source: &str) -> Result<Option<Payload>, PayloadError> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(Path::new(source))?
    };

    let payload = parse_payload(&text)?;
    match &payload {
        Some(_) => debug!(source, bytes = text.len(), "payload loaded"),
        None => debug!(source, "payload is null"),
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_payload_is_missing() {
        assert_eq!(parse_payload("null").unwrap(), None);
    }

    #[test]
    fn test_empty_object_has_no_fields() {
        let payload = parse_payload("{}").unwrap().unwrap();
        assert_eq!(payload, Payload::default());
    }

    #[test]
    fn test_metric_datasets_accept_upstream_keys() {
        let payload = parse_payload(
            r#"{"email_metrics": {"labels": ["a", "b"],
                "datasets": [{"label": "Score", "data": [10, 20]}]}}"#,
        )
        .unwrap()
        .unwrap();
        let metrics = payload.email_metrics.unwrap();
        let datasets = metrics.datasets.unwrap();
        assert_eq!(datasets[0].name, "Score");
        assert_eq!(datasets[0].values, vec![10.0, 20.0]);
    }

    #[test]
    fn test_empty_metrics_object_has_no_parts() {
        let payload = parse_payload(r#"{"email_metrics": {}}"#).unwrap().unwrap();
        let metrics = payload.email_metrics.unwrap();
        assert!(metrics.labels.is_none());
        assert!(metrics.datasets.is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let payload = parse_payload(r#"{"weekday_activity": [], "word_cloud": []}"#)
            .unwrap()
            .unwrap();
        assert_eq!(payload.word_cloud, Some(vec![]));
    }

    #[test]
    fn test_null_contact_label_is_empty() {
        let payload = parse_payload(
            r#"{"hourly_activity": [{"hour": "09:00", "count": 3}],
                "contact_data": [{"label": null, "sent": 1, "received": 2}]}"#,
        )
        .unwrap()
        .unwrap();
        let contacts = payload.contact_data.unwrap();
        assert_eq!(contacts[0].label, "");
        assert!(contacts[0].is_paired());
        assert_eq!(payload.hourly_activity.unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_field_only_drops_itself() {
        let payload = parse_payload(
            r#"{"word_cloud": [{"text": "invoice", "weight": 3}],
                "contact_data": "not a list",
                "activity_heatmap": {"mon": 1}}"#,
        )
        .unwrap()
        .unwrap();
        assert!(payload.contact_data.is_none());
        assert!(payload.activity_heatmap.is_none());
        assert_eq!(payload.word_cloud.unwrap()[0].text, "invoice");
    }

    #[test]
    fn test_hourly_columns_are_zipped() {
        let payload = parse_payload(
            r#"{"hourly_activity": {"labels": ["0:00", "1:00", "2:00"], "values": [4, 0]}}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            payload.hourly_activity.unwrap(),
            vec![
                HourlyRecord {
                    hour: "0:00".to_string(),
                    count: 4,
                },
                HourlyRecord {
                    hour: "1:00".to_string(),
                    count: 0,
                },
            ]
        );
    }

    #[test]
    fn test_non_object_document_is_missing() {
        assert_eq!(parse_payload("[1, 2, 3]").unwrap(), None);
        assert_eq!(parse_payload("\"text\"").unwrap(), None);
    }

    #[test]
    fn test_ranked_counts_accept_both_directions() {
        let payload = parse_payload(
            r#"{"top_senders": [{"sender": "a@example.com", "count": 5},
                                {"sender": null, "count": 1}],
                "top_recipients": [{"recipient": "b@example.com", "count": 2}]}"#,
        )
        .unwrap()
        .unwrap();
        let senders = payload.top_senders.unwrap();
        assert_eq!(senders[0].name, "a@example.com");
        assert_eq!(senders[1].display_name(), "(unknown)");
        assert_eq!(payload.top_recipients.unwrap()[0].name, "b@example.com");
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            parse_payload("{not json"),
            Err(PayloadError::Json(_))
        ));
    }

    #[test]
    fn test_folder_display_name_defaults_to_inbox() {
        let unnamed = FolderCount {
            folder: None,
            count: 3,
        };
        let empty = FolderCount {
            folder: Some(String::new()),
            count: 1,
        };
        let named = FolderCount {
            folder: Some("Archive".to_string()),
            count: 2,
        };
        assert_eq!(unnamed.display_name(), "INBOX");
        assert_eq!(empty.display_name(), "INBOX");
        assert_eq!(named.display_name(), "Archive");
    }
}
