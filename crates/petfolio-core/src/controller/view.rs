//! Routing of the current screen to a view model.

use chrono::NaiveDate;
use serde::Serialize;

use super::AppState;
use crate::models::{
    Avatar, ExamRecord, HealthMetric, Pet, PetForm, PetStatus, RecordKind, Species,
    TimelineEntry, TreatmentRecord, UploadedFile, VaccinationRecord,
};
use crate::nav::Screen;
use crate::validation::ValidationErrors;

/// Summary of a pet as shown on cards and headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetCard {
    pub id: String,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub age_label: String,
    pub status: PetStatus,
    pub avatar: Avatar,
}

impl From<&Pet> for PetCard {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.clone(),
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
            age_label: pet.age_label.clone(),
            status: pet.status,
            avatar: pet.avatar.clone(),
        }
    }
}

/// Counters for the pet dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub vaccinations: usize,
    pub treatments: usize,
    pub exams: usize,
    pub documents: usize,
    /// Earliest follow-up date on or after today
    pub next_due: Option<NaiveDate>,
}

/// The one presentation view for the current screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    SignIn,
    Pets {
        cards: Vec<PetCard>,
    },
    CategoryPicker {
        categories: Vec<Species>,
    },
    PetForm {
        form: PetForm,
        errors: ValidationErrors,
    },
    Dashboard {
        pet: PetCard,
        summary: RecordSummary,
        latest_metrics: Vec<HealthMetric>,
    },
    MedicalRecords {
        pet: PetCard,
        vaccinations: Vec<VaccinationRecord>,
        treatments: Vec<TreatmentRecord>,
        exams: Vec<ExamRecord>,
    },
    RecordForm {
        pet: PetCard,
        kind: RecordKind,
        /// Uploads that can be attached to the record
        documents: Vec<UploadedFile>,
    },
    Timeline {
        pet: PetCard,
        entries: Vec<TimelineEntry>,
    },
    Documents {
        pet: PetCard,
        uploads: Vec<UploadedFile>,
    },
    HealthMetrics {
        pet: PetCard,
        history: Vec<HealthMetric>,
        latest: Vec<HealthMetric>,
    },
    /// A pet screen was reached without a current pet.
    NoPetSelected {
        screen: Screen,
    },
}

/// Screen of the detail form for a record kind.
pub fn record_screen(kind: RecordKind) -> Screen {
    match kind {
        RecordKind::Vaccination => Screen::VaccineDetails,
        RecordKind::Treatment => Screen::TreatmentDetails,
        RecordKind::Exam => Screen::ExamDetails,
    }
}

impl AppState {
    /// Build the view model of the current screen.
    pub fn view(&self, today: NaiveDate) -> View {
        let screen = self.nav.current();
        match screen {
            Screen::SignIn => View::SignIn,
            Screen::Pets => View::Pets {
                cards: self.store.list_pets().iter().map(PetCard::from).collect(),
            },
            Screen::CategoryPicker => View::CategoryPicker {
                categories: Species::PICKER.to_vec(),
            },
            Screen::PetForm => View::PetForm {
                form: self.pet_form.clone(),
                errors: self.form_errors.clone(),
            },
            _ => match self.current_pet() {
                Some(pet) => self.pet_view(screen, pet, today),
                None => View::NoPetSelected { screen },
            },
        }
    }

    fn pet_view(&self, screen: Screen, pet: &Pet, today: NaiveDate) -> View {
        let store = &self.store;
        let card = PetCard::from(pet);
        let owned = |metrics: Vec<&HealthMetric>| metrics.into_iter().cloned().collect::<Vec<_>>();

        match screen {
            Screen::MedicalRecords => View::MedicalRecords {
                pet: card,
                vaccinations: store.vaccinations_for(&pet.id).into_iter().cloned().collect(),
                treatments: store.treatments_for(&pet.id).into_iter().cloned().collect(),
                exams: store.exams_for(&pet.id).into_iter().cloned().collect(),
            },
            Screen::VaccineDetails | Screen::TreatmentDetails | Screen::ExamDetails => {
                let kind = match screen {
                    Screen::VaccineDetails => RecordKind::Vaccination,
                    Screen::TreatmentDetails => RecordKind::Treatment,
                    _ => RecordKind::Exam,
                };
                View::RecordForm {
                    pet: card,
                    kind,
                    documents: store.uploads_for(&pet.id).into_iter().cloned().collect(),
                }
            }
            Screen::Timeline => View::Timeline {
                pet: card,
                entries: store.timeline(&pet.id),
            },
            Screen::Documents => View::Documents {
                pet: card,
                uploads: store.uploads_for(&pet.id).into_iter().cloned().collect(),
            },
            Screen::HealthMetrics => View::HealthMetrics {
                pet: card,
                history: owned(store.metrics_for(&pet.id)),
                latest: owned(store.latest_metrics(&pet.id).into_values().collect()),
            },
            _ => {
                let next_due = store
                    .records_for(&pet.id)
                    .iter()
                    .filter_map(|r| r.due_date())
                    .filter(|due| *due >= today)
                    .min();
                View::Dashboard {
                    pet: card,
                    summary: RecordSummary {
                        vaccinations: store.vaccinations_for(&pet.id).len(),
                        treatments: store.treatments_for(&pet.id).len(),
                        exams: store.exams_for(&pet.id).len(),
                        documents: store.uploads_for(&pet.id).len(),
                        next_due,
                    },
                    latest_metrics: owned(store.latest_metrics(&pet.id).into_values().collect()),
                }
            }
        }
    }
}
