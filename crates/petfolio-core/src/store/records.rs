//! Medical record collection operations.

use chrono::{DateTime, Utc};

use super::{Store, StoreError, StoreResult};
use crate::models::{
    ExamRecord, MedicalRecord, Record, RecordKind, RecordPayload, TimelineEntry, TreatmentRecord,
    VaccinationRecord,
};

impl Store {
    /// Stamp and append a record for an existing pet.
    pub fn create_record(
        &mut self,
        pet_id: &str,
        payload: RecordPayload,
        now: DateTime<Utc>,
    ) -> StoreResult<MedicalRecord> {
        self.require_pet(pet_id)?;

        let record = match payload {
            RecordPayload::Vaccination(data) => {
                self.require_attachments(pet_id, &data.attachment_ids)?;
                let record = Record::new(pet_id.to_string(), data, now);
                self.vaccinations.push(record.clone());
                MedicalRecord::Vaccination(record)
            }
            RecordPayload::Treatment(data) => {
                let record = Record::new(pet_id.to_string(), data, now);
                self.treatments.push(record.clone());
                MedicalRecord::Treatment(record)
            }
            RecordPayload::Exam(data) => {
                let record = Record::new(pet_id.to_string(), data, now);
                self.exams.push(record.clone());
                MedicalRecord::Exam(record)
            }
        };

        Ok(record)
    }

    /// Fail unless every id is an upload of `pet_id`.
    fn require_attachments(&self, pet_id: &str, ids: &[String]) -> StoreResult<()> {
        match ids
            .iter()
            .find(|id| self.get_upload(id).map_or(true, |u| u.pet_id != pet_id))
        {
            Some(id) => Err(StoreError::UploadNotFound(id.clone())),
            None => Ok(()),
        }
    }

    /// Drop a removed upload from vaccination attachments.
    pub(super) fn detach_upload(&mut self, upload_id: &str) {
        for record in &mut self.vaccinations {
            record.data.attachment_ids.retain(|id| id != upload_id);
        }
    }

    pub fn vaccinations_for(&self, pet_id: &str) -> Vec<&VaccinationRecord> {
        self.vaccinations.iter().filter(|r| r.pet_id == pet_id).collect()
    }

    pub fn treatments_for(&self, pet_id: &str) -> Vec<&TreatmentRecord> {
        self.treatments.iter().filter(|r| r.pet_id == pet_id).collect()
    }

    pub fn exams_for(&self, pet_id: &str) -> Vec<&ExamRecord> {
        self.exams.iter().filter(|r| r.pet_id == pet_id).collect()
    }

    /// All records of a pet, in insertion order per kind.
    pub fn records_for(&self, pet_id: &str) -> Vec<MedicalRecord> {
        let vaccinations = self
            .vaccinations_for(pet_id)
            .into_iter()
            .cloned()
            .map(MedicalRecord::Vaccination);
        let treatments = self
            .treatments_for(pet_id)
            .into_iter()
            .cloned()
            .map(MedicalRecord::Treatment);
        let exams = self.exams_for(pet_id).into_iter().cloned().map(MedicalRecord::Exam);

        vaccinations.chain(treatments).chain(exams).collect()
    }

    /// Newest-first timeline of a pet's records.
    pub fn timeline(&self, pet_id: &str) -> Vec<TimelineEntry> {
        let mut entries: Vec<TimelineEntry> =
            self.records_for(pet_id).iter().map(TimelineEntry::from).collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Number of stored records of a kind, across all pets.
    pub fn record_count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Vaccination => self.vaccinations.len(),
            RecordKind::Treatment => self.treatments.len(),
            RecordKind::Exam => self.exams.len(),
        }
    }
}
