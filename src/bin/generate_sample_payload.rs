use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Value, json};

/// Deterministic xorshift so samples are reproducible
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound.max(1)
    }
}

fn write_json(path: &Path, value: &Value) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Office-hours shaped weight for an hour of day
fn office_hours(hour: u64) -> u64 {
    match hour {
        9..=11 | 14..=16 => 10,
        8 | 12 | 13 | 17 => 6,
        7 | 18..=20 => 2,
        _ => 0,
    }
}

fn full(rng: &mut SimpleRng) -> Value {
    let hourly: Vec<Value> = (0..24)
        .map(|h| json!({"hour": format!("{:02}:00", h), "count": office_hours(h) * 3 + rng.below(3)}))
        .collect();

    let contacts = [
        ("ana.souza@example.com", 12, 18),
        ("finance-team@example.com", 0, 25),
        ("joao@example.org", 9, 4),
        ("support@vendor.example", 2, 11),
        ("maria.oliveira.longname@example.com", 7, 7),
        ("newsletter@example.net", 0, 30),
        ("pedro@example.com", 5, 1),
        ("legal@example.com", 3, 2),
        ("ops@example.com", 1, 6),
        ("ceo@example.com", 4, 0),
    ];
    let contact_data: Vec<Value> = contacts
        .iter()
        .map(|(label, sent, received)| json!({"label": label, "sent": sent, "received": received}))
        .collect();

    // Rankings from the same contacts
    let mut by_received = contacts.to_vec();
    by_received.sort_by_key(|c| std::cmp::Reverse(c.2));
    let top_senders: Vec<Value> = by_received
        .iter()
        .filter(|c| c.2 > 0)
        .take(5)
        .map(|(label, _, received)| json!({"sender": label, "count": received}))
        .collect();
    let mut by_sent = contacts.to_vec();
    by_sent.sort_by_key(|c| std::cmp::Reverse(c.1));
    let top_recipients: Vec<Value> = by_sent
        .iter()
        .filter(|c| c.1 > 0)
        .take(8)
        .map(|(label, sent, _)| json!({"recipient": label, "count": sent}))
        .collect();

    let words = [
        "invoice", "meeting", "report", "project", "update", "contract", "budget", "review",
        "schedule", "proposal", "payment", "delivery", "approval", "quarterly", "training",
        "support", "release", "planning", "feedback", "deadline", "agenda", "travel",
    ];
    let mut word_cloud: Vec<Value> = words
        .iter()
        .enumerate()
        .map(|(i, w)| json!({"text": w, "weight": 60 - 2 * i as u64 + rng.below(2)}))
        .collect();
    word_cloud.sort_by_key(|t| std::cmp::Reverse(t["weight"].as_u64().unwrap_or(0)));

    let heatmap: Vec<u64> = (0..7u64)
        .flat_map(|day| (0..24u64).map(move |hour| (day, hour)))
        .map(|(day, hour)| {
            let weekday = if day < 5 { 1 } else { 0 };
            office_hours(hour) * weekday + rng.below(2)
        })
        .collect();

    let daily: Vec<Value> = (1..=7)
        .map(|d| json!({"date": format!("2024-05-{:02}", d), "count": 20 + rng.below(30)}))
        .collect();

    json!({
        "hourly_activity": hourly,
        "contact_data": contact_data,
        "word_cloud": word_cloud,
        "email_metrics": {
            "labels": ["Response Rate", "Average Length", "Contact Diversity", "Subject Usage", "Rich Content (HTML)"],
            "datasets": [{"label": "Your Score", "data": [72, 45, 88, 97, 60]}]
        },
        "activity_heatmap": heatmap,
        "daily_counts": daily,
        "sent_vs_received": {"sent": 143, "received": 512},
        "folders_data": [
            {"folder": "INBOX", "count": 410},
            {"folder": "Sent", "count": 143},
            {"folder": "Archive", "count": 57},
            {"folder": null, "count": 12}
        ],
        "top_senders": top_senders,
        "top_recipients": top_recipients
    })
}

/// Only one-directional contacts, so the bubble slot falls back; hourly
/// activity uses the column layout and the heat map has the wrong shape
fn sparse() -> Value {
    json!({
        "hourly_activity": {"labels": ["9:00", "10:00"], "values": [0, 2]},
        "contact_data": [
            {"label": "only-received-from@example.com", "sent": 0, "received": 5},
            {"label": "bob@example.com", "sent": 3, "received": 0}
        ],
        "word_cloud": [],
        "email_metrics": {},
        "activity_heatmap": {"Mon": [0, 1]}
    })
}

fn main() -> std::io::Result<()> {
    let dir = Path::new("test_data");
    std::fs::create_dir_all(dir)?;
    let mut rng = SimpleRng::new(12345);

    // Every slot has data
    write_json(&dir.join("full.json"), &full(&mut rng))?;

    // Fallbacks and placeholders
    write_json(&dir.join("sparse.json"), &sparse())?;

    // Whole payload missing
    write_json(&dir.join("null.json"), &Value::Null)?;

    println!("Generated: full.json, sparse.json, null.json");
    Ok(())
}
