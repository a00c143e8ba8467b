//! Health metric collection operations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{Store, StoreResult};
use crate::models::{HealthMetric, MetricEntry, MetricKind};

impl Store {
    /// Log a measurement for an existing pet.
    pub fn add_metric(
        &mut self,
        pet_id: &str,
        entry: MetricEntry,
        now: DateTime<Utc>,
    ) -> StoreResult<HealthMetric> {
        self.require_pet(pet_id)?;
        let metric = HealthMetric::new(pet_id.to_string(), entry, now);
        self.metrics.push(metric.clone());
        Ok(metric)
    }

    /// Metric history of a pet, oldest first.
    pub fn metrics_for(&self, pet_id: &str) -> Vec<&HealthMetric> {
        let mut metrics: Vec<&HealthMetric> =
            self.metrics.iter().filter(|m| m.pet_id == pet_id).collect();
        // Stable sort keeps log order for same-day entries.
        metrics.sort_by_key(|m| m.recorded_on);
        metrics
    }

    /// Most recent value of each metric kind.
    pub fn latest_metrics(&self, pet_id: &str) -> BTreeMap<MetricKind, &HealthMetric> {
        let mut latest = BTreeMap::new();
        for metric in self.metrics_for(pet_id) {
            latest.insert(metric.kind, metric);
        }
        latest
    }
}
