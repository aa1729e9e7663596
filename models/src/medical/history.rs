// models/src/medical/history.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::medical::disease::Disease;
use crate::medical::prediction::PredictionResult;
use crate::medical::reading::TestReading;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValue {
    pub name: &'static str,
    pub value: f64,
}

/// Summary of one past submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub metrics: Vec<MetricValue>,
    #[serde(rename = "Result")]
    pub result: String,
    pub present: bool,
    pub submitted_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(reading: &TestReading, prediction: &PredictionResult, submitted_at: DateTime<Utc>) -> Self {
        let metrics = reading
            .disease
            .summary_metrics()
            .iter()
            .map(|m| MetricValue {
                name: m.name,
                value: reading.get(m.field).unwrap_or(0.0),
            })
            .collect();
        Self {
            metrics,
            result: prediction.message.clone(),
            present: prediction.present,
            submitted_at,
        }
    }

    /// A metric by name; metrics the entry does not carry read as 0.
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
            .unwrap_or(0.0)
    }
}

/// Ordered record of one disease's submissions within a session.
///
/// Entries can only be appended; nothing is edited or removed.
#[derive(Debug, Clone, Serialize)]
pub struct DiseaseHistory {
    pub disease: Disease,
    entries: Vec<HistoryEntry>,
}

impl DiseaseHistory {
    pub fn new(disease: Disease) -> Self {
        Self {
            disease,
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// The entry before the latest one, if there are at least two.
    pub fn previous(&self) -> Option<&HistoryEntry> {
        self.entries.len().checked_sub(2).and_then(|idx| self.entries.get(idx))
    }
}
