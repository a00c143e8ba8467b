//! Health record export for sharing with a vet or boarding service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{
    ExamRecord, HealthMetric, Pet, RecordKind, TimelineEntry, TreatmentRecord, VaccinationRecord,
};
use crate::store::{Store, StoreError, StoreResult};

/// Metadata of an attached document (contents are never exported).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentSummary {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub context: String,
    pub sha256: String,
}

/// Everything recorded about one pet.
#[derive(Debug, Clone, Serialize)]
pub struct HealthRecordExport {
    /// Export timestamp
    pub exported_at: DateTime<Utc>,
    pub pet: Pet,
    pub vaccinations: Vec<VaccinationRecord>,
    pub treatments: Vec<TreatmentRecord>,
    pub exams: Vec<ExamRecord>,
    pub documents: Vec<DocumentSummary>,
    pub metrics: Vec<HealthMetric>,
    /// Newest-first overview of all records
    pub timeline: Vec<TimelineEntry>,
}

impl HealthRecordExport {
    /// Collect the export of a pet from the store.
    pub fn from_store(store: &Store, pet_id: &str, now: DateTime<Utc>) -> StoreResult<Self> {
        let pet = store
            .get_pet(pet_id)
            .cloned()
            .ok_or_else(|| StoreError::PetNotFound(pet_id.to_string()))?;

        Ok(Self {
            exported_at: now,
            vaccinations: store.vaccinations_for(pet_id).into_iter().cloned().collect(),
            treatments: store.treatments_for(pet_id).into_iter().cloned().collect(),
            exams: store.exams_for(pet_id).into_iter().cloned().collect(),
            documents: store
                .uploads_for(pet_id)
                .into_iter()
                .map(|u| DocumentSummary {
                    file_name: u.file_name.clone(),
                    mime_type: u.mime_type.clone(),
                    size_bytes: u.size_bytes,
                    context: u.context.clone(),
                    sha256: u.sha256.clone(),
                })
                .collect(),
            metrics: store.metrics_for(pet_id).into_iter().cloned().collect(),
            timeline: store.timeline(pet_id),
            pet,
        })
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the timeline to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("pet_name,microchip,date,kind,title,due,record_id\n");

        // Lines
        for entry in &self.timeline {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&self.pet.name),
                escape_csv(&self.pet.microchip_number),
                entry.date,
                entry.kind.as_str(),
                escape_csv(&entry.title),
                entry.due.map(|d| d.to_string()).unwrap_or_default(),
                entry.record_id,
            ));
        }

        csv
    }

    /// Records of a kind in the export.
    pub fn count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Vaccination => self.vaccinations.len(),
            RecordKind::Treatment => self.treatments.len(),
            RecordKind::Exam => self.exams.len(),
        }
    }

    /// Follow-up dates that have passed as of `today`.
    pub fn overdue(&self, today: NaiveDate) -> Vec<&TimelineEntry> {
        self.timeline
            .iter()
            .filter(|e| e.due.is_some_and(|due| due <= today))
            .collect()
    }
}

/// Escape a value for CSV.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordPayload, Treatment, TreatmentType, UploadedFile};
    use crate::store::fixtures::make_pet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_pet() -> (Store, String) {
        let mut store = Store::new();
        let pet = make_pet("Biscuit, Jr.");
        let pet_id = pet.id.clone();
        store.insert_pet(pet);
        store
            .create_record(
                &pet_id,
                RecordPayload::Treatment(Treatment {
                    treatment_type: TreatmentType::Flea,
                    product_name: "Seresto".into(),
                    dosage: None,
                    date_given: date(2024, 1, 10),
                    next_due: Some(date(2024, 3, 10)),
                    notes: None,
                }),
                Utc::now(),
            )
            .unwrap();
        store
            .add_upload(UploadedFile::new(
                pet_id.clone(),
                "receipt.pdf".into(),
                "application/pdf".into(),
                b"%PDF",
                "treatment".into(),
                "blob:petfolio",
                Utc::now(),
            ))
            .unwrap();
        (store, pet_id)
    }

    #[test]
    fn test_export_collects_everything() {
        let (store, pet_id) = store_with_pet();
        let export = HealthRecordExport::from_store(&store, &pet_id, Utc::now()).unwrap();
        assert_eq!(export.count(RecordKind::Treatment), 1);
        assert_eq!(export.documents.len(), 1);
        assert_eq!(export.documents[0].file_name, "receipt.pdf");
        assert_eq!(export.overdue(date(2024, 6, 1)).len(), 1);
    }

    #[test]
    fn test_export_unknown_pet() {
        let store = Store::new();
        let result = HealthRecordExport::from_store(&store, "ghost", Utc::now());
        assert!(matches!(result, Err(StoreError::PetNotFound(_))));
    }

    #[test]
    fn test_csv_escapes_names() {
        let (store, pet_id) = store_with_pet();
        let export = HealthRecordExport::from_store(&store, &pet_id, Utc::now()).unwrap();
        let csv = export.to_csv();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("\"Biscuit, Jr.\","));
        assert!(lines[1].contains(",2024-01-10,treatment,Seresto (flea),2024-03-10,"));
    }

    #[test]
    fn test_json_contains_pet() {
        let (store, pet_id) = store_with_pet();
        let export = HealthRecordExport::from_store(&store, &pet_id, Utc::now()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(json["pet"]["id"], pet_id.as_str());
        assert_eq!(json["treatments"][0]["product_name"], "Seresto");
    }
}
