//! Health metric models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Weight,
    Temperature,
    HeartRate,
    RespiratoryRate,
    Other,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Weight => "weight",
            MetricKind::Temperature => "temperature",
            MetricKind::HeartRate => "heart_rate",
            MetricKind::RespiratoryRate => "respiratory_rate",
            MetricKind::Other => "other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "weight" => Some(MetricKind::Weight),
            "temperature" | "temp" => Some(MetricKind::Temperature),
            "heart_rate" | "pulse" => Some(MetricKind::HeartRate),
            "respiratory_rate" | "breathing" => Some(MetricKind::RespiratoryRate),
            "other" => Some(MetricKind::Other),
            _ => None,
        }
    }

    /// Unit used when the caller does not give one.
    pub fn default_unit(&self) -> &'static str {
        match self {
            MetricKind::Weight => "kg",
            MetricKind::Temperature => "°C",
            MetricKind::HeartRate | MetricKind::RespiratoryRate => "bpm",
            MetricKind::Other => "",
        }
    }
}

/// A single logged measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthMetric {
    pub id: String,
    pub pet_id: String,
    pub kind: MetricKind,
    pub value: f64,
    pub unit: String,
    pub recorded_on: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new metric entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEntry {
    pub kind: MetricKind,
    pub value: f64,
    pub unit: String,
    pub recorded_on: NaiveDate,
    pub note: Option<String>,
}

/// Raw input of the metric logging screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricForm {
    pub kind: String,
    pub value: Option<f64>,
    /// Empty means the kind's default unit
    pub unit: String,
    pub recorded_on: String,
    pub note: String,
}

impl HealthMetric {
    pub fn new(pet_id: String, entry: MetricEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pet_id,
            kind: entry.kind,
            value: entry.value,
            unit: entry.unit,
            recorded_on: entry.recorded_on,
            note: entry.note,
            created_at: now,
        }
    }
}
