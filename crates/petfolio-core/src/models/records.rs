//! Medical record models: vaccinations, treatments and clinical exams.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of medical record, used for routing and queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Vaccination,
    Treatment,
    Exam,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Vaccination => "vaccination",
            RecordKind::Treatment => "treatment",
            RecordKind::Exam => "exam",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "vaccination" | "vaccine" => Some(RecordKind::Vaccination),
            "treatment" => Some(RecordKind::Treatment),
            "exam" | "clinical exam" => Some(RecordKind::Exam),
            _ => None,
        }
    }
}

/// A record owned by a pet, stamped with identity and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record<T> {
    /// Unique record ID
    pub id: String,
    /// Owning pet ID
    pub pet_id: String,
    #[serde(flatten)]
    pub data: T,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl<T> Record<T> {
    /// Stamp a payload for the given pet.
    pub fn new(pet_id: String, data: T, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pet_id,
            data,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Vaccination details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vaccination {
    pub vaccine_name: String,
    pub manufacturer: Option<String>,
    pub batch_number: Option<String>,
    pub date_administered: NaiveDate,
    /// Date the vaccination stops being valid
    pub valid_until: Option<NaiveDate>,
    pub veterinarian: Option<String>,
    pub notes: Option<String>,
    /// Upload IDs of attached certificates
    pub attachment_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentType {
    Flea,
    Tick,
    Worming,
    Medication,
    Other,
}

impl TreatmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentType::Flea => "flea",
            TreatmentType::Tick => "tick",
            TreatmentType::Worming => "worming",
            TreatmentType::Medication => "medication",
            TreatmentType::Other => "other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "flea" => Some(TreatmentType::Flea),
            "tick" => Some(TreatmentType::Tick),
            "worming" | "deworming" | "wormer" => Some(TreatmentType::Worming),
            "medication" => Some(TreatmentType::Medication),
            "other" => Some(TreatmentType::Other),
            _ => None,
        }
    }
}

/// Parasite treatment or medication course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Treatment {
    pub treatment_type: TreatmentType,
    pub product_name: String,
    pub dosage: Option<String>,
    pub date_given: NaiveDate,
    /// Date the next dose is due
    pub next_due: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Clinical examination with vitals and vet declarations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalExam {
    pub exam_date: NaiveDate,
    pub veterinarian: String,
    pub clinic: Option<String>,
    pub weight_kg: Option<f64>,
    pub temperature_c: Option<f64>,
    pub heart_rate_bpm: Option<u32>,
    pub respiratory_rate_bpm: Option<u32>,
    /// Free-text declarations, e.g. "fit to travel"
    pub declarations: Vec<String>,
    pub notes: Option<String>,
}

pub type VaccinationRecord = Record<Vaccination>;
pub type TreatmentRecord = Record<Treatment>;
pub type ExamRecord = Record<ClinicalExam>;

/// Validated payload for a new medical record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordPayload {
    Vaccination(Vaccination),
    Treatment(Treatment),
    Exam(ClinicalExam),
}

impl RecordPayload {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordPayload::Vaccination(_) => RecordKind::Vaccination,
            RecordPayload::Treatment(_) => RecordKind::Treatment,
            RecordPayload::Exam(_) => RecordKind::Exam,
        }
    }
}

/// A stored medical record of any kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MedicalRecord {
    Vaccination(VaccinationRecord),
    Treatment(TreatmentRecord),
    Exam(ExamRecord),
}

impl MedicalRecord {
    pub fn id(&self) -> &str {
        match self {
            MedicalRecord::Vaccination(r) => &r.id,
            MedicalRecord::Treatment(r) => &r.id,
            MedicalRecord::Exam(r) => &r.id,
        }
    }

    pub fn pet_id(&self) -> &str {
        match self {
            MedicalRecord::Vaccination(r) => &r.pet_id,
            MedicalRecord::Treatment(r) => &r.pet_id,
            MedicalRecord::Exam(r) => &r.pet_id,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            MedicalRecord::Vaccination(_) => RecordKind::Vaccination,
            MedicalRecord::Treatment(_) => RecordKind::Treatment,
            MedicalRecord::Exam(_) => RecordKind::Exam,
        }
    }

    /// Date the event happened (administered, given, examined).
    pub fn event_date(&self) -> NaiveDate {
        match self {
            MedicalRecord::Vaccination(r) => r.data.date_administered,
            MedicalRecord::Treatment(r) => r.data.date_given,
            MedicalRecord::Exam(r) => r.data.exam_date,
        }
    }

    /// Short human-readable title for list rows.
    pub fn title(&self) -> String {
        match self {
            MedicalRecord::Vaccination(r) => r.data.vaccine_name.clone(),
            MedicalRecord::Treatment(r) => {
                format!("{} ({})", r.data.product_name, r.data.treatment_type.as_str())
            }
            MedicalRecord::Exam(r) => format!("Exam with {}", r.data.veterinarian),
        }
    }

    /// Follow-up date, if the record has one.
    pub fn due_date(&self) -> Option<NaiveDate> {
        match self {
            MedicalRecord::Vaccination(r) => r.data.valid_until,
            MedicalRecord::Treatment(r) => r.data.next_due,
            MedicalRecord::Exam(_) => None,
        }
    }
}

/// One row of a pet's chronological record timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineEntry {
    pub record_id: String,
    pub kind: RecordKind,
    pub title: String,
    pub date: NaiveDate,
    pub due: Option<NaiveDate>,
}

impl From<&MedicalRecord> for TimelineEntry {
    fn from(record: &MedicalRecord) -> Self {
        Self {
            record_id: record.id().to_string(),
            kind: record.kind(),
            title: record.title(),
            date: record.event_date(),
            due: record.due_date(),
        }
    }
}

/// Raw input of the vaccination details screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaccinationForm {
    pub vaccine_name: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub date_administered: String,
    pub valid_until: String,
    pub veterinarian: String,
    pub notes: String,
    pub attachment_ids: Vec<String>,
}

/// Raw input of the treatment details screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreatmentForm {
    pub treatment_type: String,
    pub product_name: String,
    pub dosage: String,
    pub date_given: String,
    pub next_due: String,
    pub notes: String,
}

/// Raw input of the clinical exam screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExamForm {
    pub exam_date: String,
    pub veterinarian: String,
    pub clinic: String,
    pub weight_kg: Option<f64>,
    pub temperature_c: Option<f64>,
    pub heart_rate_bpm: Option<u32>,
    pub respiratory_rate_bpm: Option<u32>,
    pub declarations: Vec<String>,
    pub notes: String,
}

/// Form submitted from one of the record detail screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordForm {
    Vaccination(VaccinationForm),
    Treatment(TreatmentForm),
    Exam(ExamForm),
}

impl RecordForm {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordForm::Vaccination(_) => RecordKind::Vaccination,
            RecordForm::Treatment(_) => RecordKind::Treatment,
            RecordForm::Exam(_) => RecordKind::Exam,
        }
    }
}
