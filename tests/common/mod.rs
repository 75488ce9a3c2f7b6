//! Common test utilities

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

/// Payload where every slot has data for its primary chart
pub fn full_payload() -> Value {
    let hourly: Vec<Value> = (0..24)
        .map(|h| json!({"hour": format!("{:02}:00", h), "count": (h % 5) + 1}))
        .collect();

    let mut heatmap = vec![0u64; 168];
    heatmap[24 + 10] = 9;
    heatmap[2 * 24 + 15] = 3;

    json!({
        "hourly_activity": hourly,
        "contact_data": [
            {"label": "ana@example.com", "sent": 4, "received": 9},
            {"label": "bob@example.com", "sent": 2, "received": 1},
            {"label": "newsletter@example.net", "sent": 0, "received": 20}
        ],
        "word_cloud": [
            {"text": "invoice", "weight": 30},
            {"text": "meeting", "weight": 20},
            {"text": "report", "weight": 10}
        ],
        "email_metrics": {
            "labels": ["Response Rate", "Contact Diversity", "Subject Usage"],
            "datasets": [{"label": "Your Score", "data": [70, 85, 99]}]
        },
        "activity_heatmap": heatmap,
        "daily_counts": [
            {"date": "2024-05-01", "count": 12},
            {"date": "2024-05-02", "count": 7}
        ],
        "sent_vs_received": {"sent": 40, "received": 120},
        "folders_data": [
            {"folder": "INBOX", "count": 100},
            {"folder": null, "count": 4}
        ],
        "top_senders": [
            {"sender": "newsletter@example.net", "count": 20},
            {"sender": "ana@example.com", "count": 9}
        ],
        "top_recipients": [
            {"recipient": "ana@example.com", "count": 4}
        ]
    })
}

/// Upstream quirks: a null contact label, hourly activity as parallel
/// columns, and a field of the wrong shape
pub fn quirky_payload() -> Value {
    json!({
        "hourly_activity": {"labels": ["9:00", "10:00"], "values": [3, 5]},
        "contact_data": [
            {"label": null, "sent": 1, "received": 2}
        ],
        "word_cloud": [{"text": "invoice", "weight": 3}],
        "activity_heatmap": "not a grid"
    })
}

/// Payload whose contacts never go both ways
pub fn one_way_contacts_payload() -> Value {
    json!({
        "contact_data": [
            {"label": "only-sent@example.com", "sent": 4, "received": 0},
            {"label": "only-received@example.com", "sent": 0, "received": 6}
        ]
    })
}

/// Write `value` as JSON into `dir/name`
pub fn write_payload(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, value.to_string()).unwrap();
    path
}

/// Write raw text into `dir/name`
pub fn write_raw(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}
