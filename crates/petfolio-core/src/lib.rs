//! Petfolio Core Library
//!
//! Local-only pet health tracker: pets, medical records, documents and health
//! metrics held in memory, driven by a screen stack.
//!
//! # Architecture
//!
//! ```text
//!   Shell (web / iOS / Android)
//!        │  Command                    ▲  View + Effects
//!        ▼                             │
//!   ┌──────────────────────────────────┴──┐
//!   │              Controller             │
//!   │  validation → store → derived → nav │
//!   └─────────────────────────────────────┘
//!        │
//!        ▼
//!   Health record export (JSON / CSV)
//! ```
//!
//! # Core Principle
//!
//! **Views never mutate state.** Every change goes through a [`Command`] and
//! either succeeds with a list of [`Effect`]s or fails with a typed error.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Pet, records, uploads, metrics, forms)
//! - [`derived`]: Age label, species normalization, status flag
//! - [`store`]: In-memory entity collections
//! - [`validation`]: Form validation with field-level errors
//! - [`nav`]: Screen names and the navigation stack
//! - [`controller`]: Command dispatch and view models
//! - [`export`]: Health record export
//! - [`config`], [`logging`]: Ambient setup

pub mod config;
pub mod controller;
pub mod derived;
pub mod export;
pub mod logging;
pub mod models;
pub mod nav;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, TrackerConfig};
pub use controller::{Command, Controller, Effect, ToastLevel, TrackerError, View};
pub use export::HealthRecordExport;
pub use models::{
    Avatar, ClinicalExam, Gender, HealthMetric, MedicalRecord, Pet, PetForm, PetStatus,
    RecordForm, RecordKind, Species, Treatment, UploadedFile, Vaccination,
};
pub use nav::{NavStack, Screen};
pub use store::{Store, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use models::{ExamForm, MetricForm, TimelineEntry, TreatmentForm, VaccinationForm};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PetfolioError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not allowed: {0}")]
    NotAllowed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TrackerError> for PetfolioError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::Store(inner) => PetfolioError::NotFound(inner.to_string()),
            TrackerError::Validation(_) | TrackerError::UnknownScreen(_) => {
                PetfolioError::InvalidInput(e.user_message())
            }
            TrackerError::NoCurrentPet | TrackerError::SignInRequired => {
                PetfolioError::NotAllowed(e.user_message())
            }
        }
    }
}

impl From<ConfigError> for PetfolioError {
    fn from(e: ConfigError) -> Self {
        PetfolioError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for PetfolioError {
    fn from(e: serde_json::Error) -> Self {
        PetfolioError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PetfolioError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PetfolioError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a tracker with the default configuration.
#[uniffi::export]
pub fn open_tracker() -> Arc<PetfolioCore> {
    Arc::new(PetfolioCore::wrap(Controller::new(TrackerConfig::default())))
}

/// Open a tracker from a JSON configuration document.
#[uniffi::export]
pub fn open_tracker_with_config(json: String) -> Result<Arc<PetfolioCore>, PetfolioError> {
    let config = TrackerConfig::from_json(&json)?;
    Ok(Arc::new(PetfolioCore::wrap(Controller::new(config))))
}

/// Install the tracing subscriber. Returns false if one was already set.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) -> bool {
    logging::init(filter.as_deref().unwrap_or(logging::DEFAULT_DIRECTIVE))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe controller wrapper for FFI.
///
/// Command methods never fail on domain errors: those come back as error
/// toasts, the same way the controller reports them to views.
#[derive(uniffi::Object)]
pub struct PetfolioCore {
    controller: Arc<Mutex<Controller>>,
}

impl PetfolioCore {
    fn wrap(controller: Controller) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    fn run(&self, command: Command) -> Result<Vec<FfiEffect>, PetfolioError> {
        let mut controller = self.controller.lock()?;
        let effects = controller.handle(command);
        Ok(effects.into_iter().map(|e| e.into()).collect())
    }
}

#[uniffi::export]
impl PetfolioCore {
    // =========================================================================
    // Session & Navigation
    // =========================================================================

    pub fn sign_in(&self, email: String) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::SignIn { email })
    }

    pub fn sign_out(&self) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::SignOut)
    }

    /// Push a screen by its kebab-case name.
    pub fn navigate(&self, screen: String) -> Result<Vec<FfiEffect>, PetfolioError> {
        let screen = screen.parse::<Screen>().map_err(TrackerError::from)?;
        self.run(Command::Navigate(screen))
    }

    pub fn back(&self) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::Back)
    }

    pub fn replace(&self, screen: String) -> Result<Vec<FfiEffect>, PetfolioError> {
        let screen = screen.parse::<Screen>().map_err(TrackerError::from)?;
        self.run(Command::Replace(screen))
    }

    /// Name of the screen on top of the stack.
    pub fn current_screen(&self) -> Result<String, PetfolioError> {
        let controller = self.controller.lock()?;
        Ok(controller.current_screen().as_str().to_string())
    }

    pub fn can_go_back(&self) -> Result<bool, PetfolioError> {
        let controller = self.controller.lock()?;
        Ok(controller.state().nav().can_go_back())
    }

    /// View model of the current screen as JSON.
    pub fn view_json(&self) -> Result<String, PetfolioError> {
        let controller = self.controller.lock()?;
        Ok(serde_json::to_string(&controller.view())?)
    }

    // =========================================================================
    // Pet Operations
    // =========================================================================

    pub fn start_registration(&self) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::StartRegistration)
    }

    pub fn choose_category(&self, category: String) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::ChooseCategory(category))
    }

    /// Submit the pet intake or profile edit form.
    pub fn submit_pet_form(&self, form: FfiPetForm) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::SubmitPetForm(form.into()))
    }

    pub fn select_pet(&self, pet_id: String) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::SelectPet(pet_id))
    }

    pub fn edit_current_pet(&self) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::EditCurrentPet)
    }

    /// Delete a pet and everything it owns.
    pub fn delete_pet(&self, pet_id: String) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::DeletePet(pet_id))
    }

    pub fn list_pets(&self) -> Result<Vec<FfiPet>, PetfolioError> {
        let controller = self.controller.lock()?;
        Ok(controller
            .state()
            .store()
            .list_pets()
            .iter()
            .map(|p| p.into())
            .collect())
    }

    pub fn current_pet(&self) -> Result<Option<FfiPet>, PetfolioError> {
        let controller = self.controller.lock()?;
        Ok(controller.state().current_pet().map(|p| p.into()))
    }

    /// Recompute age labels and status flags.
    pub fn refresh(&self) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::RefreshDerived)
    }

    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Open the detail form of a record kind ("vaccination", "treatment", "exam").
    pub fn open_record_form(&self, kind: String) -> Result<Vec<FfiEffect>, PetfolioError> {
        let kind = RecordKind::parse(&kind)
            .ok_or_else(|| PetfolioError::InvalidInput(format!("Unknown record kind: {}", kind)))?;
        self.run(Command::OpenRecordForm(kind))
    }

    pub fn save_vaccination(
        &self,
        form: FfiVaccinationForm,
    ) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::SaveRecord(RecordForm::Vaccination(form.into())))
    }

    pub fn save_treatment(&self, form: FfiTreatmentForm) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::SaveRecord(RecordForm::Treatment(form.into())))
    }

    pub fn save_exam(&self, form: FfiExamForm) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::SaveRecord(RecordForm::Exam(form.into())))
    }

    /// Newest-first record timeline of a pet.
    pub fn timeline(&self, pet_id: String) -> Result<Vec<FfiTimelineEntry>, PetfolioError> {
        let controller = self.controller.lock()?;
        let store = controller.state().store();
        store.require_pet(&pet_id).map_err(TrackerError::from)?;
        Ok(store.timeline(&pet_id).into_iter().map(|e| e.into()).collect())
    }

    // =========================================================================
    // Upload & Metric Operations
    // =========================================================================

    /// Attach a file to the current pet.
    pub fn attach_file(
        &self,
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
        context: String,
    ) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::AttachFile {
            file_name,
            mime_type,
            bytes,
            context,
        })
    }

    pub fn remove_upload(&self, upload_id: String) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::RemoveUpload(upload_id))
    }

    pub fn uploads(&self, pet_id: String) -> Result<Vec<FfiUpload>, PetfolioError> {
        let controller = self.controller.lock()?;
        Ok(controller
            .state()
            .store()
            .uploads_for(&pet_id)
            .into_iter()
            .map(|u| u.into())
            .collect())
    }

    pub fn log_metric(&self, form: FfiMetricForm) -> Result<Vec<FfiEffect>, PetfolioError> {
        self.run(Command::LogMetric(form.into()))
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export a pet's health record as JSON.
    pub fn export_pet_json(&self, pet_id: String) -> Result<String, PetfolioError> {
        let controller = self.controller.lock()?;
        let export = controller.export_pet(&pet_id)?;
        Ok(export.to_json()?)
    }

    /// Export a pet's record timeline as CSV.
    pub fn export_pet_csv(&self, pet_id: String) -> Result<String, PetfolioError> {
        let controller = self.controller.lock()?;
        let export = controller.export_pet(&pet_id)?;
        Ok(export.to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe effect.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiEffect {
    Toast { level: String, message: String },
    ReleaseReference { reference: String },
}

impl From<Effect> for FfiEffect {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Toast { level, message } => FfiEffect::Toast {
                level: match level {
                    ToastLevel::Info => "info",
                    ToastLevel::Success => "success",
                    ToastLevel::Error => "error",
                }
                .to_string(),
                message,
            },
            Effect::ReleaseReference { reference } => FfiEffect::ReleaseReference { reference },
        }
    }
}

/// FFI-safe pet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPet {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub gender: String,
    pub date_of_birth: String,
    pub microchip_number: String,
    pub weight_kg: Option<f64>,
    pub photo_reference: Option<String>,
    pub stock_avatar: Option<String>,
    pub age_label: String,
    pub status: String,
}

impl From<&Pet> for FfiPet {
    fn from(pet: &Pet) -> Self {
        let (photo_reference, stock_avatar) = match &pet.avatar {
            Avatar::Photo { reference } => (Some(reference.clone()), None),
            Avatar::Stock { key } => (None, Some(key.clone())),
        };
        Self {
            id: pet.id.clone(),
            name: pet.name.clone(),
            species: pet.species.to_string(),
            breed: pet.breed.clone(),
            gender: pet.gender.as_str().to_string(),
            date_of_birth: pet.date_of_birth.to_string(),
            microchip_number: pet.microchip_number.clone(),
            weight_kg: pet.weight_kg,
            photo_reference,
            stock_avatar,
            age_label: pet.age_label.clone(),
            status: pet.status.as_str().to_string(),
        }
    }
}

/// FFI-safe pet form. A photo reference wins over a stock avatar.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPetForm {
    pub editing: Option<String>,
    pub photo_reference: Option<String>,
    pub stock_avatar: Option<String>,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: Option<String>,
    pub date_of_birth: String,
    pub microchip_number: String,
    pub weight_kg: Option<f64>,
}

impl From<FfiPetForm> for PetForm {
    fn from(form: FfiPetForm) -> Self {
        let avatar = match (form.photo_reference, form.stock_avatar) {
            (Some(reference), _) => Some(Avatar::Photo { reference }),
            (None, Some(key)) => Some(Avatar::Stock { key }),
            (None, None) => None,
        };
        PetForm {
            editing: form.editing,
            avatar,
            name: form.name,
            species: form.species,
            breed: form.breed,
            gender: form.gender.as_deref().and_then(Gender::parse),
            date_of_birth: form.date_of_birth,
            microchip_number: form.microchip_number,
            weight_kg: form.weight_kg,
        }
    }
}

/// FFI-safe vaccination form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVaccinationForm {
    pub vaccine_name: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub date_administered: String,
    pub valid_until: String,
    pub veterinarian: String,
    pub notes: String,
    pub attachment_ids: Vec<String>,
}

impl From<FfiVaccinationForm> for VaccinationForm {
    fn from(form: FfiVaccinationForm) -> Self {
        VaccinationForm {
            vaccine_name: form.vaccine_name,
            manufacturer: form.manufacturer,
            batch_number: form.batch_number,
            date_administered: form.date_administered,
            valid_until: form.valid_until,
            veterinarian: form.veterinarian,
            notes: form.notes,
            attachment_ids: form.attachment_ids,
        }
    }
}

/// FFI-safe treatment form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatmentForm {
    pub treatment_type: String,
    pub product_name: String,
    pub dosage: String,
    pub date_given: String,
    pub next_due: String,
    pub notes: String,
}

impl From<FfiTreatmentForm> for TreatmentForm {
    fn from(form: FfiTreatmentForm) -> Self {
        TreatmentForm {
            treatment_type: form.treatment_type,
            product_name: form.product_name,
            dosage: form.dosage,
            date_given: form.date_given,
            next_due: form.next_due,
            notes: form.notes,
        }
    }
}

/// FFI-safe clinical exam form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExamForm {
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

impl From<FfiExamForm> for ExamForm {
    fn from(form: FfiExamForm) -> Self {
        ExamForm {
            exam_date: form.exam_date,
            veterinarian: form.veterinarian,
            clinic: form.clinic,
            weight_kg: form.weight_kg,
            temperature_c: form.temperature_c,
            heart_rate_bpm: form.heart_rate_bpm,
            respiratory_rate_bpm: form.respiratory_rate_bpm,
            declarations: form.declarations,
            notes: form.notes,
        }
    }
}

/// FFI-safe metric form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMetricForm {
    pub kind: String,
    pub value: Option<f64>,
    pub unit: String,
    pub recorded_on: String,
    pub note: String,
}

impl From<FfiMetricForm> for MetricForm {
    fn from(form: FfiMetricForm) -> Self {
        MetricForm {
            kind: form.kind,
            value: form.value,
            unit: form.unit,
            recorded_on: form.recorded_on,
            note: form.note,
        }
    }
}

/// FFI-safe upload metadata.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUpload {
    pub id: String,
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub context: String,
    pub reference: String,
    pub sha256: String,
}

impl From<&UploadedFile> for FfiUpload {
    fn from(file: &UploadedFile) -> Self {
        Self {
            id: file.id.clone(),
            file_name: file.file_name.clone(),
            size_bytes: file.size_bytes,
            mime_type: file.mime_type.clone(),
            context: file.context.clone(),
            reference: file.reference.clone(),
            sha256: file.sha256.clone(),
        }
    }
}

/// FFI-safe timeline entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTimelineEntry {
    pub record_id: String,
    pub kind: String,
    pub title: String,
    pub date: String,
    pub due: Option<String>,
}

impl From<TimelineEntry> for FfiTimelineEntry {
    fn from(entry: TimelineEntry) -> Self {
        Self {
            record_id: entry.record_id,
            kind: entry.kind.as_str().to_string(),
            title: entry.title,
            date: entry.date.to_string(),
            due: entry.due.map(|d| d.to_string()),
        }
    }
}
