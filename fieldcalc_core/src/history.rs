//! # Saved-Calculation History
//!
//! Immutable, timestamped snapshots of an evaluation the user chose to keep:
//! the template id and title at save time, the raw as-typed input strings,
//! and the pre-formatted result text. Records are never mutated after
//! creation, only deleted individually or in bulk.
//!
//! The list is newest-first and capped; on overflow the oldest records are
//! silently dropped.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::numeric::format_number;
use crate::template::{ResultValue, Template};

/// Most recent entries kept; older ones are dropped on overflow.
pub const HISTORY_CAP: usize = 200;

/// One saved calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    pub template_id: String,
    /// Title at time of save; survives later catalog renames
    pub template_title: String,
    /// Raw (unparsed, as-typed) input strings keyed by input key
    pub inputs: BTreeMap<String, String>,
    /// Pre-formatted result text
    pub result: String,
}

impl HistoryRecord {
    /// Snapshot a completed evaluation.
    pub fn new(
        template: &Template,
        raw_inputs: BTreeMap<String, String>,
        values: &[ResultValue],
        places: u32,
    ) -> Self {
        HistoryRecord {
            id: Uuid::new_v4(),
            at: Utc::now(),
            template_id: template.id.to_string(),
            template_title: template.title.clone(),
            inputs: raw_inputs,
            result: format_result_line(values, places),
        }
    }

    /// Multi-line text for copy/share: title, inputs, result, timestamp.
    pub fn to_copy_text(&self) -> String {
        let inputs = self
            .inputs
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{}\n{}\nresult: {}\n({})",
            self.template_title,
            inputs,
            self.result,
            self.at.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Render result values as the single-line text stored in a record.
pub fn format_result_line(values: &[ResultValue], places: u32) -> String {
    values
        .iter()
        .filter(|v| v.value.is_finite())
        .map(|v| {
            format!("{}={} {}", v.label, format_number(v.value, places), v.unit)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Newest-first, capped list of saved calculations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Prepend a record; drops the oldest entries past [`HISTORY_CAP`].
    pub fn push(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_CAP);
    }

    /// Delete one record by id. Returns true when something was removed.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|r| &r.id != id);
        self.records.len() != before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(result: &str) -> HistoryRecord {
        HistoryRecord {
            id: Uuid::new_v4(),
            at: Utc::now(),
            template_id: "vc_rpm".to_string(),
            template_title: "Cutting speed to rpm".to_string(),
            inputs: BTreeMap::new(),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_push_is_newest_first() {
        let mut history = History::new();
        history.push(record("first"));
        history.push(record("second"));
        assert_eq!(history.iter().next().unwrap().result, "second");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut history = History::new();
        for i in 0..(HISTORY_CAP + 10) {
            history.push(record(&format!("r{i}")));
        }
        assert_eq!(history.len(), HISTORY_CAP);
        // newest survives, oldest is gone
        assert_eq!(
            history.iter().next().unwrap().result,
            format!("r{}", HISTORY_CAP + 9)
        );
        assert!(history.iter().all(|r| r.result != "r0"));
    }

    #[test]
    fn test_remove_by_id() {
        let mut history = History::new();
        let rec = record("keep");
        let target = record("remove");
        let target_id = target.id;
        history.push(rec);
        history.push(target);

        assert!(history.remove(&target_id));
        assert!(!history.remove(&target_id));
        assert_eq!(history.len(), 1);
        assert_eq!(history.iter().next().unwrap().result, "keep");
    }

    #[test]
    fn test_format_result_line() {
        let values = vec![
            ResultValue::new("X", 12.3456, "mm"),
            ResultValue::new("Y", -4.0, "mm"),
        ];
        assert_eq!(format_result_line(&values, 2), "X=12.35 mm / Y=-4 mm");
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let rec = record("954.93 rpm");
        let json = serde_json::to_string(&rec).unwrap();
        let back: HistoryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }
}
