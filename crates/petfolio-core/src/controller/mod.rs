//! The controller: sole owner and mutator of application state.
//!
//! Views send [`Command`]s; the controller validates them, applies them to
//! its [`AppState`], moves the navigation stack and answers with
//! [`Effect`]s or a [`TrackerError`]. [`Controller::view`] then routes the
//! current screen to exactly one [`View`].

mod clock;
mod command;
mod effect;
mod state;
mod view;

pub use clock::*;
pub use command::*;
pub use effect::*;
pub use state::*;
pub use view::*;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::derived::{age_label, derive_status, SpeciesNormalizer};
use crate::export::HealthRecordExport;
use crate::models::{
    HealthMetric, MedicalRecord, MetricForm, Pet, PetDetails, PetForm, RecordForm, RecordKind,
    UploadedFile,
};
use crate::nav::{NavStack, Screen, UnknownScreen};
use crate::store::{DeletedPet, StoreError};
use crate::validation::{
    validate_email, validate_metric_form, validate_pet_form, validate_record_form, FormField,
    ValidationErrors,
};

/// Controller errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    #[error("No pet selected")]
    NoCurrentPet,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    UnknownScreen(#[from] UnknownScreen),

    #[error("Sign in required")]
    SignInRequired,
}

impl TrackerError {
    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::NoCurrentPet => "Select a pet first".into(),
            TrackerError::Store(StoreError::PetNotFound(_)) => "That pet no longer exists".into(),
            TrackerError::Store(StoreError::UploadNotFound(_)) => {
                "That file has already been removed".into()
            }
            TrackerError::Validation(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Check the form".into()),
            TrackerError::UnknownScreen(e) => e.to_string(),
            TrackerError::SignInRequired => "Please sign in".into(),
        }
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Top-level coordinator of pets, records, uploads, metrics and navigation.
pub struct Controller {
    state: AppState,
    config: TrackerConfig,
    normalizer: SpeciesNormalizer,
    clock: Box<dyn Clock>,
}

impl Controller {
    /// Create a controller running on the system clock.
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: TrackerConfig, clock: Box<dyn Clock>) -> Self {
        let nav = NavStack::new(config.initial_screen());
        Self {
            state: AppState::new(nav),
            normalizer: SpeciesNormalizer::with_threshold(config.species_match_threshold),
            config,
            clock,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn current_screen(&self) -> Screen {
        self.state.nav.current()
    }

    /// View model of the current screen.
    pub fn view(&self) -> View {
        self.state.view(self.clock.today())
    }

    /// Apply a command.
    pub fn dispatch(&mut self, command: Command) -> TrackerResult<Vec<Effect>> {
        if self.config.require_sign_in
            && self.state.signed_in_as.is_none()
            && !matches!(command, Command::SignIn { .. })
        {
            return Err(TrackerError::SignInRequired);
        }

        match command {
            Command::SignIn { email } => {
                let email = validate_email(&email)?;
                info!(%email, "signed in");
                self.state.signed_in_as = Some(email);
                if self.state.nav.current() == Screen::SignIn {
                    let home = match self.config.start_screen {
                        Screen::SignIn => Screen::Pets,
                        screen => screen,
                    };
                    self.state.nav.replace(home);
                }
                Ok(vec![Effect::success("Signed in")])
            }
            Command::SignOut => {
                self.state.signed_in_as = None;
                self.state.current_pet = None;
                self.state.nav.reset(Screen::SignIn);
                Ok(vec![Effect::info("Signed out")])
            }
            Command::Navigate(screen) => {
                self.ensure_pet_for(screen)?;
                debug!(from = %self.state.nav.current(), to = %screen, "push");
                self.state.nav.push(screen);
                Ok(Vec::new())
            }
            Command::Back => {
                if let Some(left) = self.state.nav.pop() {
                    debug!(from = %left, to = %self.state.nav.current(), "pop");
                    if left == Screen::PetForm {
                        self.state.form_errors = ValidationErrors::new();
                    }
                }
                Ok(Vec::new())
            }
            Command::Replace(screen) => {
                self.ensure_pet_for(screen)?;
                let old = self.state.nav.replace(screen);
                debug!(from = %old, to = %screen, "replace");
                Ok(Vec::new())
            }
            Command::StartRegistration => {
                self.state.pet_form = PetForm::default();
                self.state.form_errors = ValidationErrors::new();
                self.state.nav.push(Screen::CategoryPicker);
                Ok(Vec::new())
            }
            Command::ChooseCategory(raw) => {
                if raw.trim().is_empty() {
                    let mut errors = ValidationErrors::new();
                    errors.push(FormField::Species, "Choose a category");
                    return Err(errors.into());
                }
                let species = self.normalizer.normalize(&raw);
                self.state.pet_form = PetForm::for_species(&species);
                self.state.form_errors = ValidationErrors::new();
                // The picker is not a useful back target once a category is chosen.
                if self.state.nav.current() == Screen::CategoryPicker {
                    self.state.nav.replace(Screen::PetForm);
                } else {
                    self.state.nav.push(Screen::PetForm);
                }
                Ok(Vec::new())
            }
            Command::SubmitPetForm(form) => match form.editing.clone() {
                Some(id) => {
                    let pet = self.update_pet(&id, &form)?;
                    if self.state.nav.current() == Screen::PetForm {
                        self.state.nav.pop();
                    }
                    Ok(vec![Effect::success(format!("{} updated", pet.name))])
                }
                None => {
                    let pet = self.create_pet(&form)?;
                    if self.state.nav.current() == Screen::PetForm {
                        self.state.nav.replace(Screen::Dashboard);
                    } else {
                        self.state.nav.push(Screen::Dashboard);
                    }
                    Ok(vec![Effect::success(format!("{} added", pet.name))])
                }
            },
            Command::SelectPet(id) => {
                self.select_pet(&id)?;
                // Switching pets from a dashboard must not stack a second one.
                if self.state.nav.current() == Screen::Dashboard {
                    self.state.nav.replace(Screen::Dashboard);
                } else {
                    self.state.nav.push(Screen::Dashboard);
                }
                Ok(Vec::new())
            }
            Command::EditCurrentPet => {
                let pet = self.state.current_pet().ok_or(TrackerError::NoCurrentPet)?;
                self.state.pet_form = PetForm::from_pet(pet);
                self.state.form_errors = ValidationErrors::new();
                self.state.nav.push(Screen::PetForm);
                Ok(Vec::new())
            }
            Command::DeletePet(id) => {
                let deleted = self.delete_pet(&id)?;
                let mut effects: Vec<Effect> = deleted
                    .released_references
                    .into_iter()
                    .map(|reference| Effect::ReleaseReference { reference })
                    .collect();
                effects.push(Effect::info(format!("{} deleted", deleted.pet.name)));
                Ok(effects)
            }
            Command::OpenRecordForm(kind) => {
                let screen = record_screen(kind);
                self.ensure_pet_for(screen)?;
                self.state.nav.push(screen);
                Ok(Vec::new())
            }
            Command::SaveRecord(form) => {
                let record = self.create_record(&form)?;
                self.return_to_medical_records();
                let message = match record.kind() {
                    RecordKind::Vaccination => "Vaccination saved",
                    RecordKind::Treatment => "Treatment saved",
                    RecordKind::Exam => "Exam saved",
                };
                Ok(vec![Effect::success(message)])
            }
            Command::AttachFile {
                file_name,
                mime_type,
                bytes,
                context,
            } => {
                let file = self.attach_file(file_name, mime_type, &bytes, context)?;
                Ok(vec![Effect::success(format!("{} attached", file.file_name))])
            }
            Command::RemoveUpload(id) => {
                let file = self.remove_upload(&id)?;
                Ok(vec![Effect::ReleaseReference {
                    reference: file.reference,
                }])
            }
            Command::LogMetric(form) => {
                let metric = self.log_metric(&form)?;
                Ok(vec![Effect::success(format!("{} logged", metric.kind.as_str()))])
            }
            Command::RefreshDerived => {
                self.refresh_derived()?;
                Ok(Vec::new())
            }
        }
    }

    /// Apply a command, reporting failures as error toasts instead of `Err`.
    pub fn handle(&mut self, command: Command) -> Vec<Effect> {
        match self.dispatch(command) {
            Ok(effects) => effects,
            Err(e) => {
                warn!(error = %e, "command rejected");
                vec![Effect::error(e.user_message())]
            }
        }
    }

    /// Validate the intake form, store a new pet and make it current.
    ///
    /// On validation failure the form and its errors are kept for the form
    /// view.
    pub fn create_pet(&mut self, form: &PetForm) -> TrackerResult<Pet> {
        let today = self.clock.today();
        let details = self.validate_pet(form, today)?;
        let pet = Pet::new(details, today, self.clock.now());
        info!(pet_id = %pet.id, name = %pet.name, species = %pet.species, "pet created");

        self.state.store.insert_pet(pet.clone());
        self.state.current_pet = Some(pet.id.clone());
        self.state.pet_form = PetForm::from_pet(&pet);
        Ok(pet)
    }

    /// Apply a profile edit to an existing pet.
    pub fn update_pet(&mut self, id: &str, form: &PetForm) -> TrackerResult<Pet> {
        if self.state.store.get_pet(id).is_none() {
            return Err(StoreError::PetNotFound(id.to_string()).into());
        }
        let today = self.clock.today();
        let details = self.validate_pet(form, today)?;
        let now = self.clock.now();
        let pet = self.state.store.update_pet(id, details, today, now)?.clone();
        info!(pet_id = %pet.id, "pet updated");
        self.state.pet_form = PetForm::from_pet(&pet);
        Ok(pet)
    }

    /// Remove a pet and everything it owns.
    pub fn delete_pet(&mut self, id: &str) -> TrackerResult<DeletedPet> {
        let deleted = self.state.store.delete_pet(id)?;
        info!(
            pet_id = %id,
            records = deleted.records_removed,
            metrics = deleted.metrics_removed,
            uploads = deleted.released_references.len(),
            "pet deleted"
        );

        if self.state.current_pet.as_deref() == Some(id) {
            self.state.current_pet = None;
            self.state.pet_form = PetForm::default();
            let root = match self.state.nav.entries().first() {
                Some(&screen) if !screen.requires_pet() && screen != Screen::PetForm => screen,
                _ => Screen::Pets,
            };
            self.state.nav.reset(root);
        }
        Ok(deleted)
    }

    /// Make a stored pet current and hydrate the pet form from it.
    pub fn select_pet(&mut self, id: &str) -> TrackerResult<Pet> {
        let pet = self
            .state
            .store
            .get_pet(id)
            .cloned()
            .ok_or_else(|| StoreError::PetNotFound(id.to_string()))?;
        debug!(pet_id = %id, "pet selected");
        self.state.pet_form = PetForm::from_pet(&pet);
        self.state.current_pet = Some(pet.id.clone());
        Ok(pet)
    }

    /// Store a medical record for the current pet.
    pub fn create_record(&mut self, form: &RecordForm) -> TrackerResult<MedicalRecord> {
        let pet_id = self.require_current_pet(form.kind().as_str())?;
        let payload = validate_record_form(form, self.clock.today())?;
        let record = self
            .state
            .store
            .create_record(&pet_id, payload, self.clock.now())?;
        info!(pet_id = %pet_id, record_id = %record.id(), kind = record.kind().as_str(), "record created");

        self.refresh_pet(&pet_id)?;
        Ok(record)
    }

    /// Attach selected file contents to the current pet.
    pub fn attach_file(
        &mut self,
        file_name: String,
        mime_type: String,
        bytes: &[u8],
        context: String,
    ) -> TrackerResult<UploadedFile> {
        let pet_id = self.require_current_pet("upload")?;
        let file = UploadedFile::new(
            pet_id,
            file_name,
            mime_type,
            bytes,
            context,
            &self.config.reference_prefix,
            self.clock.now(),
        );
        debug!(upload_id = %file.id, size = file.size_bytes, context = %file.context, "file attached");
        self.state.store.add_upload(file.clone())?;
        Ok(file)
    }

    pub fn remove_upload(&mut self, id: &str) -> TrackerResult<UploadedFile> {
        let file = self.state.store.remove_upload(id)?;
        debug!(upload_id = %id, "upload removed");
        Ok(file)
    }

    /// Log a health metric for the current pet.
    pub fn log_metric(&mut self, form: &MetricForm) -> TrackerResult<HealthMetric> {
        let pet_id = self.require_current_pet("metric")?;
        let entry = validate_metric_form(form, self.clock.today())?;
        let metric = self.state.store.add_metric(&pet_id, entry, self.clock.now())?;
        debug!(pet_id = %pet_id, kind = metric.kind.as_str(), value = metric.value, "metric logged");
        Ok(metric)
    }

    /// Recompute age labels and status flags of every pet.
    pub fn refresh_derived(&mut self) -> TrackerResult<usize> {
        let ids: Vec<String> = self
            .state
            .store
            .list_pets()
            .iter()
            .map(|p| p.id.clone())
            .collect();
        for id in &ids {
            self.refresh_pet(id)?;
        }
        debug!(pets = ids.len(), "derived fields refreshed");
        Ok(ids.len())
    }

    /// Export a pet's full health record.
    pub fn export_pet(&self, pet_id: &str) -> TrackerResult<HealthRecordExport> {
        let export = HealthRecordExport::from_store(&self.state.store, pet_id, self.clock.now())?;
        info!(pet_id, records = export.timeline.len(), "health record exported");
        Ok(export)
    }

    fn refresh_pet(&mut self, pet_id: &str) -> TrackerResult<()> {
        let today = self.clock.today();
        let date_of_birth = self
            .state
            .store
            .get_pet(pet_id)
            .map(|p| p.date_of_birth)
            .ok_or_else(|| StoreError::PetNotFound(pet_id.to_string()))?;
        let records = self.state.store.records_for(pet_id);
        let status = derive_status(&records, today, self.config.expiring_window_days);
        self.state
            .store
            .set_derived(pet_id, age_label(date_of_birth, today), status)?;
        Ok(())
    }

    fn validate_pet(&mut self, form: &PetForm, today: NaiveDate) -> TrackerResult<PetDetails> {
        match validate_pet_form(form, today, &self.normalizer) {
            Ok(details) => {
                self.state.form_errors = ValidationErrors::new();
                Ok(details)
            }
            Err(errors) => {
                debug!(fields = ?errors.fields(), "pet form rejected");
                self.state.pet_form = form.clone();
                self.state.form_errors = errors.clone();
                Err(errors.into())
            }
        }
    }

    fn require_current_pet(&self, operation: &str) -> TrackerResult<String> {
        match self.state.current_pet.clone() {
            Some(id) => Ok(id),
            None => {
                warn!(operation, "no current pet");
                Err(TrackerError::NoCurrentPet)
            }
        }
    }

    fn ensure_pet_for(&self, screen: Screen) -> TrackerResult<()> {
        if screen.requires_pet() && self.state.current_pet().is_none() {
            return Err(TrackerError::NoCurrentPet);
        }
        Ok(())
    }

    /// Leave a record detail screen for the medical records list.
    fn return_to_medical_records(&mut self) {
        let nav = &mut self.state.nav;
        let on_detail = matches!(
            nav.current(),
            Screen::VaccineDetails | Screen::TreatmentDetails | Screen::ExamDetails
        );
        if !on_detail {
            return;
        }

        let below = nav.entries().len().checked_sub(2).map(|i| nav.entries()[i]);
        if below == Some(Screen::MedicalRecords) {
            nav.pop();
        } else {
            nav.replace(Screen::MedicalRecords);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Avatar, Gender, PetStatus, VaccinationForm};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn controller() -> Controller {
        Controller::with_clock(TrackerConfig::default(), Box::new(FixedClock::on(today())))
    }

    fn pet_form(name: &str) -> PetForm {
        PetForm {
            editing: None,
            avatar: Some(Avatar::Stock { key: "dog-1".into() }),
            name: name.into(),
            species: "dog".into(),
            breed: "Collie".into(),
            gender: Some(Gender::Male),
            date_of_birth: "2023-05-15".into(),
            microchip_number: "985000000000002".into(),
            weight_kg: None,
        }
    }

    #[test]
    fn test_create_pet_sets_current() {
        let mut c = controller();
        let pet = c.create_pet(&pet_form("Rex")).unwrap();
        assert_eq!(c.state().current_pet_id(), Some(pet.id.as_str()));
        assert_eq!(pet.age_label, "1y 1m");
        assert_eq!(pet.status, PetStatus::Ok);
    }

    #[test]
    fn test_create_record_without_pet() {
        let mut c = controller();
        let form = RecordForm::Vaccination(VaccinationForm {
            vaccine_name: "Rabies".into(),
            date_administered: "2024-06-01".into(),
            ..VaccinationForm::default()
        });
        assert_eq!(c.create_record(&form), Err(TrackerError::NoCurrentPet));
        assert_eq!(c.state().store().record_count(RecordKind::Vaccination), 0);
    }

    #[test]
    fn test_rejected_form_is_kept_for_view() {
        let mut c = controller();
        let form = PetForm {
            name: "".into(),
            ..pet_form("x")
        };
        let err = c.create_pet(&form).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert_eq!(c.state().form_errors().fields(), vec![FormField::Name]);
        assert_eq!(c.state().pet_form(), &form);
    }

    #[test]
    fn test_handle_turns_errors_into_toasts() {
        let mut c = controller();
        let effects = c.handle(Command::EditCurrentPet);
        assert_eq!(effects, vec![Effect::error("Select a pet first")]);
    }

    #[test]
    fn test_update_unknown_pet() {
        let mut c = controller();
        assert_eq!(
            c.update_pet("ghost", &pet_form("Rex")),
            Err(TrackerError::Store(StoreError::PetNotFound("ghost".into())))
        );
    }

    #[test]
    fn test_refresh_derived_recomputes_age() {
        let mut c = controller();
        c.create_pet(&pet_form("Rex")).unwrap();
        c.clock = Box::new(FixedClock::on(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()));
        assert_eq!(c.refresh_derived(), Ok(1));
        assert_eq!(c.state().current_pet().unwrap().age_label, "2y 1m");
    }
}
