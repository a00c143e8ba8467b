//! Health status derived from follow-up dates.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::models::{MedicalRecord, PetStatus, RecordKind};

/// Derive a pet's status from its medical records.
///
/// Only the most recent record of each vaccine (by name) and each treatment
/// type counts, so a booster supersedes the dose before it. A follow-up date
/// on or before `today` makes the pet `Due`; one within `window_days` makes
/// it `Expiring`.
pub fn derive_status<'a, I>(records: I, today: NaiveDate, window_days: i64) -> PetStatus
where
    I: IntoIterator<Item = &'a MedicalRecord>,
{
    let mut latest: HashMap<(RecordKind, String), &MedicalRecord> = HashMap::new();
    for record in records {
        let key = match record {
            MedicalRecord::Vaccination(r) => r.data.vaccine_name.trim().to_lowercase(),
            MedicalRecord::Treatment(r) => r.data.treatment_type.as_str().to_string(),
            MedicalRecord::Exam(_) => continue,
        };
        latest
            .entry((record.kind(), key))
            .and_modify(|current| {
                if record.event_date() >= current.event_date() {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    let horizon = today + Duration::days(window_days.max(0));
    latest
        .values()
        .filter_map(|record| record.due_date())
        .fold(PetStatus::Ok, |status, due| {
            if due <= today {
                PetStatus::Due
            } else if due <= horizon && status == PetStatus::Ok {
                PetStatus::Expiring
            } else {
                status
            }
        })
}
